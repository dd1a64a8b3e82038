//! Terminal input mapping.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]. The game
//! reacts to discrete key presses only: start, move left, move right, rotate
//! and drop.

pub mod map;

pub use figgy_types as types;

pub use map::{handle_key_event, should_quit};
