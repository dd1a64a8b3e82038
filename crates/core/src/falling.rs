//! Falling object module - the player-controlled piece
//!
//! A falling object is a fixed group of blocks spawned from one template and
//! painted with one skin. Every move is check-then-commit over the whole
//! group: either all blocks move or none do. Collision queries only read the
//! settled grid.

use crate::block::Block;
use crate::catalogue::{Catalogue, Template};
use crate::grid::Grid;
use crate::render::Renderer;
use crate::rng::SimpleRng;
use crate::types::{GridPos, SkinId, MIN_TOP_ROW_FOR_SHIFT, SCENE_HEIGHT, SCENE_WIDTH, SQUARE_KIND};

/// Result of trying to move a falling object down one row.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallOutcome {
    Fell,
    /// A block is on the bottom row or rests on a settled block.
    CannotFall,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallingObject {
    kind: usize,
    skin: SkinId,
    blocks: Vec<Block>,
    fallen: bool,
    hidden: bool,
}

impl FallingObject {
    /// Spawn with a template and a skin drawn independently at random.
    pub fn spawn(catalogue: &Catalogue, rng: &mut SimpleRng) -> Self {
        let skin = SkinId(rng.pick(catalogue.skins().len()));
        let kind = rng.pick(catalogue.templates().len());
        Self::from_template(kind, &catalogue.templates()[kind], skin)
    }

    /// Spawn a specific template at the spawn anchor.
    pub fn from_template(kind: usize, template: &Template, skin: SkinId) -> Self {
        Self {
            kind,
            skin,
            blocks: template.iter().map(|&offset| Block::new(skin, offset)).collect(),
            fallen: false,
            hidden: false,
        }
    }

    pub fn kind(&self) -> usize {
        self.kind
    }

    pub fn skin(&self) -> SkinId {
        self.skin
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// True once at least one `move_down` has succeeded.
    pub fn fallen(&self) -> bool {
        self.fallen
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Grid positions of the blocks, in template order.
    pub fn positions(&self) -> Vec<GridPos> {
        self.blocks.iter().map(Block::grid_pos).collect()
    }

    pub fn move_down(&mut self, settled: &Grid) -> FallOutcome {
        if !self.can_fall(settled) {
            return FallOutcome::CannotFall;
        }
        self.shift(0, 1);
        self.fallen = true;
        FallOutcome::Fell
    }

    /// Move one column left. Ignored until the object is clear of the top
    /// rows, or when a wall or settled block is in the way.
    pub fn move_left(&mut self, settled: &Grid) {
        if self.top_most() >= MIN_TOP_ROW_FOR_SHIFT && self.can_move_left(settled) {
            self.shift(-1, 0);
        }
    }

    /// Mirror of [`FallingObject::move_left`].
    pub fn move_right(&mut self, settled: &Grid) {
        if self.top_most() >= MIN_TOP_ROW_FOR_SHIFT && self.can_move_right(settled) {
            self.shift(1, 0);
        }
    }

    /// Rotate a quarter turn if the result fits. The square never rotates.
    pub fn rotate(&mut self, settled: &Grid) {
        if self.kind == SQUARE_KIND {
            return;
        }
        if self.can_rotate(settled) {
            self.blocks.iter_mut().for_each(Block::rotate);
        }
    }

    /// The blocks keyed by grid position, ready to merge into the settled grid.
    pub fn to_dict(&self) -> impl Iterator<Item = (GridPos, Block)> + '_ {
        self.blocks.iter().map(|block| (block.grid_pos(), block.clone()))
    }

    /// Hand over the blocks keyed by grid position.
    pub fn into_blocks(self) -> impl Iterator<Item = (GridPos, Block)> {
        self.blocks.into_iter().map(|block| (block.grid_pos(), block))
    }

    pub fn draw(&self, renderer: &mut impl Renderer) {
        if self.hidden {
            return;
        }
        for block in &self.blocks {
            renderer.draw_block(block.skin(), block.pixel_pos());
        }
    }

    fn shift(&mut self, dx: i32, dy: i32) {
        for block in &mut self.blocks {
            block.move_by(dx, dy);
        }
    }

    fn can_fall(&self, settled: &Grid) -> bool {
        self.blocks.iter().all(|block| {
            let pos = block.grid_pos();
            pos.y != SCENE_HEIGHT - 1 && !settled.is_occupied(pos.offset(0, 1))
        })
    }

    fn can_move_left(&self, settled: &Grid) -> bool {
        self.blocks.iter().all(|block| {
            let pos = block.grid_pos();
            pos.x > 0 && !settled.is_occupied(pos.offset(-1, 0))
        })
    }

    fn can_move_right(&self, settled: &Grid) -> bool {
        self.blocks.iter().all(|block| {
            let pos = block.grid_pos();
            pos.x < SCENE_WIDTH - 1 && !settled.is_occupied(pos.offset(1, 0))
        })
    }

    /// Probe a rotation: rotate, check, then complete the four-turn cycle so
    /// the object is back where it started.
    fn can_rotate(&mut self, settled: &Grid) -> bool {
        self.hidden = true;
        self.blocks.iter_mut().for_each(Block::rotate);

        let invalid = self.is_outside()
            || self.blocks.iter().any(|block| settled.is_occupied(block.grid_pos()));

        for _ in 0..3 {
            self.blocks.iter_mut().for_each(Block::rotate);
        }
        self.hidden = false;
        !invalid
    }

    fn is_outside(&self) -> bool {
        self.left_most() < 0
            || self.right_most() >= SCENE_WIDTH
            || self.top_most() < 0
            || self.bottom_most() >= SCENE_HEIGHT
    }

    fn left_most(&self) -> i32 {
        self.blocks.iter().map(|b| b.grid_pos().x).min().unwrap_or(0)
    }

    fn right_most(&self) -> i32 {
        self.blocks.iter().map(|b| b.grid_pos().x).max().unwrap_or(0)
    }

    fn top_most(&self) -> i32 {
        self.blocks.iter().map(|b| b.grid_pos().y).min().unwrap_or(0)
    }

    fn bottom_most(&self) -> i32 {
        self.blocks.iter().map(|b| b.grid_pos().y).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Offset;

    fn template(cells: &[(i32, i32)]) -> Template {
        cells.iter().map(|&(x, y)| Offset::new(x, y)).collect()
    }

    fn l_shape() -> FallingObject {
        FallingObject::from_template(5, &template(&[(0, -1), (0, 0), (0, 1), (1, 1)]), SkinId(0))
    }

    #[test]
    fn test_spawn_picks_from_catalogue() {
        let catalogue = Catalogue::builtin();
        let mut rng = SimpleRng::new(3);
        for _ in 0..50 {
            let obj = FallingObject::spawn(&catalogue, &mut rng);
            assert!(obj.kind() < catalogue.templates().len());
            assert!(obj.skin().0 < catalogue.skins().len());
            assert_eq!(obj.blocks().len(), catalogue.templates()[obj.kind()].len());
            assert!(!obj.fallen());
            assert!(obj.blocks().iter().all(|b| b.skin() == obj.skin()));
        }
    }

    #[test]
    fn test_spawn_offsets_are_anchored() {
        let obj = l_shape();
        assert_eq!(
            obj.positions(),
            vec![
                GridPos::new(6, 0),
                GridPos::new(6, 1),
                GridPos::new(6, 2),
                GridPos::new(7, 2)
            ]
        );
    }

    #[test]
    fn test_rotate_probe_leaves_object_visible() {
        let mut obj = l_shape();
        let _ = obj.move_down(&Grid::new());
        obj.rotate(&Grid::new());
        assert!(!obj.is_hidden());
    }

    #[test]
    fn test_rotate_against_wall_is_reverted() {
        let mut obj =
            FallingObject::from_template(1, &template(&[(0, 2), (0, 1), (0, 0), (0, -1)]), SkinId(0));
        let _ = obj.move_down(&Grid::new());
        let _ = obj.move_down(&Grid::new());
        for _ in 0..SCENE_WIDTH {
            obj.move_right(&Grid::new());
        }
        assert_eq!(obj.blocks()[2].grid_pos(), GridPos::new(SCENE_WIDTH - 1, 3));

        // Lying flat, the bar would reach column 12.
        let before = obj.positions();
        obj.rotate(&Grid::new());
        assert_eq!(obj.positions(), before);
        assert!(!obj.is_hidden());

        obj.move_left(&Grid::new());
        obj.rotate(&Grid::new());
        assert_ne!(obj.positions(), before);
    }

    #[test]
    fn test_draw_skips_hidden_object() {
        let mut obj = l_shape();
        let mut calls: Vec<(SkinId, crate::types::PixelPos)> = Vec::new();
        obj.draw(&mut calls);
        assert_eq!(calls.len(), 4);

        obj.hidden = true;
        calls.clear();
        obj.draw(&mut calls);
        assert!(calls.is_empty());
    }

    #[test]
    fn test_to_dict_keys_match_blocks() {
        let obj = l_shape();
        for (pos, block) in obj.to_dict() {
            assert_eq!(pos, block.grid_pos());
        }
        assert_eq!(obj.to_dict().count(), 4);
    }
}
