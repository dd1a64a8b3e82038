//! Block module - a single occupied cell
//!
//! A block belongs either to the falling object or to the settled grid. It
//! knows its grid position and the origin it rotates about; its pixel
//! position is always derived from the grid position.

use std::f64::consts::FRAC_PI_2;

use crate::types::{GridPos, Offset, PixelPos, SkinId, SPAWN_COLUMN, SPAWN_ROW};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    skin: SkinId,
    grid_pos: GridPos,
    /// Offset from the rotation anchor. `grid_pos - origin` is the anchor
    /// cell and only changes through `move_by`.
    origin: Offset,
}

impl Block {
    /// Create a block for template offset `origin`, placed at the spawn anchor.
    pub fn new(skin: SkinId, origin: Offset) -> Self {
        Self {
            skin,
            grid_pos: GridPos::new(origin.x + SPAWN_COLUMN, origin.y + SPAWN_ROW),
            origin,
        }
    }

    /// Create a block at an explicit cell with a zero origin.
    pub fn at(skin: SkinId, grid_pos: GridPos) -> Self {
        Self {
            skin,
            grid_pos,
            origin: Offset::new(0, 0),
        }
    }

    pub fn skin(&self) -> SkinId {
        self.skin
    }

    pub fn grid_pos(&self) -> GridPos {
        self.grid_pos
    }

    pub fn origin(&self) -> Offset {
        self.origin
    }

    pub fn pixel_pos(&self) -> PixelPos {
        PixelPos::from(self.grid_pos)
    }

    /// Translate by `(dx, dy)`. Bounds are the caller's concern.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.grid_pos = self.grid_pos.offset(dx, dy);
    }

    /// Rotate a quarter turn about the block's origin.
    ///
    /// Uses the rotation matrix for `pi / 2` with each component rounded to
    /// the nearest cell, so four applications restore the block exactly.
    pub fn rotate(&mut self) {
        let (sin, cos) = FRAC_PI_2.sin_cos();
        let x = f64::from(self.origin.x);
        let y = f64::from(self.origin.y);
        let new_x = (x * cos - y * sin).round() as i32;
        let new_y = (x * sin + y * cos).round() as i32;

        self.grid_pos = GridPos::new(
            new_x + (self.grid_pos.x - self.origin.x),
            new_y + (self.grid_pos.y - self.origin.y),
        );
        self.origin = Offset::new(new_x, new_y);
    }
}
