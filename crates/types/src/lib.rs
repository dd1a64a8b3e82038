//! Shared types and constants for Figgy.
//!
//! Everything in this crate is plain data: coordinates, template offsets,
//! skin ids, player actions and the fixed constants of the playing field.
//! There is no I/O here, so the types can be used from the core engine,
//! the input mapping and the terminal frontend alike.
//!
//! # Playing field
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 25 rows (indexed 0-24, row 0 at the top)
//! - **Spawn anchor**: a template offset `(x, y)` spawns at grid `(x + 6, y + 1)`
//!
//! # Timing
//!
//! All intervals are whole milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_MS` | 1250 | Tick interval at the start of a game |
//! | `DROP_TICK_MS` | 10 | Tick interval while a drop is in progress |
//! | `TICK_STEP_MS` | 100 | Speed-up applied every `LINES_PER_SPEEDUP` lines |
//! | `MIN_TICK_MS` | 20 | Fastest normal tick interval |
//!
//! # Examples
//!
//! ```
//! use figgy_types::{GridPos, PixelPos, BLOCK_SIZE, SCENE_WIDTH};
//!
//! let pos = GridPos::new(SCENE_WIDTH - 1, 2);
//! assert!(pos.in_bounds());
//! assert_eq!(PixelPos::from(pos), PixelPos::new(11 * BLOCK_SIZE, 2 * BLOCK_SIZE));
//! ```

use serde::{Deserialize, Serialize};

/// Number of columns in the playing field.
pub const SCENE_WIDTH: i32 = 12;
/// Number of rows in the playing field.
pub const SCENE_HEIGHT: i32 = 25;

/// Size of one grid cell in pixel units.
pub const BLOCK_SIZE: i32 = 32;

/// Column added to a template offset when a block spawns.
pub const SPAWN_COLUMN: i32 = 6;
/// Row added to a template offset when a block spawns.
pub const SPAWN_ROW: i32 = 1;

/// Template index of the square shape, which never rotates.
pub const SQUARE_KIND: usize = 0;

/// Horizontal moves are ignored until the top of the object reaches this row.
pub const MIN_TOP_ROW_FOR_SHIFT: i32 = 2;

pub const DEFAULT_TICK_MS: u32 = 1250;
pub const DROP_TICK_MS: u32 = 10;
pub const TICK_STEP_MS: u32 = 100;
pub const MIN_TICK_MS: u32 = 20;
pub const LINES_PER_SPEEDUP: u32 = 4;

/// A cell of the playing field as (column, row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether the cell lies inside the playing field.
    pub fn in_bounds(&self) -> bool {
        (0..SCENE_WIDTH).contains(&self.x) && (0..SCENE_HEIGHT).contains(&self.y)
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Position in pixel units, always `grid * BLOCK_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Grid cell containing this pixel position.
    pub fn to_grid(self) -> GridPos {
        GridPos::new(
            self.x.div_euclid(BLOCK_SIZE),
            self.y.div_euclid(BLOCK_SIZE),
        )
    }
}

impl From<GridPos> for PixelPos {
    fn from(pos: GridPos) -> Self {
        Self {
            x: pos.x * BLOCK_SIZE,
            y: pos.y * BLOCK_SIZE,
        }
    }
}

/// Relative cell of a shape template, serialised as `{"x": .., "y": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Index into the skin catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SkinId(pub usize);

/// Player actions, mapped 1:1 onto engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    Start,
    MoveLeft,
    MoveRight,
    Rotate,
    Drop,
}
