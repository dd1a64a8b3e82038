//! Grid module - the settled blocks
//!
//! The settled grid maps each occupied cell to the block resting there.
//! Coordinates: (x, y) with x in 0..12 (left to right) and y in 0..25 (top to
//! bottom). Falling objects only ever see `&Grid`; the engine owns the only
//! mutable handle.

use std::collections::HashMap;

use crate::block::Block;
use crate::types::{GridPos, SkinId, SCENE_WIDTH};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    blocks: HashMap<GridPos, Block>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid with a block of the given skin on every listed cell.
    pub fn from_cells(cells: impl IntoIterator<Item = GridPos>, skin: SkinId) -> Self {
        let mut grid = Self::new();
        for pos in cells {
            grid.insert(Block::at(skin, pos));
        }
        grid
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.blocks.contains_key(&pos)
    }

    pub fn get(&self, pos: GridPos) -> Option<&Block> {
        self.blocks.get(&pos)
    }

    /// Insert a block keyed by its own grid position, replacing any prior one.
    pub fn insert(&mut self, block: Block) -> Option<Block> {
        self.blocks.insert(block.grid_pos(), block)
    }

    /// Merge blocks keyed by position; later entries override earlier ones.
    pub fn merge(&mut self, blocks: impl IntoIterator<Item = (GridPos, Block)>) {
        self.blocks.extend(blocks);
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GridPos, &Block)> {
        self.blocks.iter()
    }

    /// Whether every column of `row` holds a block.
    pub fn is_line_complete(&self, row: i32) -> bool {
        (0..SCENE_WIDTH).all(|col| self.is_occupied(GridPos::new(col, row)))
    }

    /// Delete every block of `row` and move each block above it one row down.
    ///
    /// Rows are walked from the one just above the removed line upward, so a
    /// moved block always lands on a cell that has already been vacated.
    pub fn remove_line(&mut self, row: i32) {
        for col in 0..SCENE_WIDTH {
            self.blocks.remove(&GridPos::new(col, row));
        }

        for line in (0..row).rev() {
            for col in 0..SCENE_WIDTH {
                let Some(mut block) = self.blocks.remove(&GridPos::new(col, line)) else {
                    continue;
                };
                block.move_by(0, 1);
                self.blocks.insert(GridPos::new(col, line + 1), block);
            }
        }
    }
}
