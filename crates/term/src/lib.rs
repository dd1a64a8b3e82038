//! Terminal frontend for Figgy.
//!
//! A small game-oriented rendering layer: the core reports blocks through its
//! `Renderer` interface, [`GameView`] paints them into a [`FrameBuffer`], and
//! [`TerminalRenderer`] flushes frames to the terminal with `crossterm`.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use figgy_core as core;
pub use figgy_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
