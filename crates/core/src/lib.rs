//! Core game logic - pure, deterministic, and testable
//!
//! This crate is the whole falling-block game state: the settled grid, the
//! falling object and the tick-driven state machine that ties them together.
//! It has no dependencies on terminals, input devices or real time:
//!
//! - **Deterministic**: spawns come from a seeded RNG, time from a [`Scheduler`]
//! - **Testable**: catalogues are plain values, so tests can use a single shape
//! - **Portable**: drawing goes through the [`Renderer`] trait
//!
//! # Module Structure
//!
//! - [`block`]: one cell with its rotation origin
//! - [`falling`]: the falling object and its move/rotate/collision rules
//! - [`grid`]: settled blocks and line removal
//! - [`engine`]: start, tick, landing, line clears and speed progression
//! - [`catalogue`]: shape templates and skins, loaded once
//! - [`scheduler`]: tick timer interface and the fixed-timestep [`TickClock`]
//! - [`rng`]: seeded LCG used for spawning
//! - [`render`]: renderer interface
//!
//! # Game Rules
//!
//! - The field is 12 columns by 25 rows; objects spawn around column 6, row 1
//! - Objects move left/right only once their top row is at least 2
//! - Rotation is a quarter turn about the template's `(0, 0)` cell; the
//!   square never rotates and blocked rotations are undone
//! - An object that cannot fall even once ends the game
//! - Every fourth cleared line speeds the tick up by 100ms, down to 20ms
//!
//! # Example
//!
//! ```
//! use figgy_core::{Catalogue, Engine, TickClock};
//! use figgy_types::GameAction;
//!
//! let catalogue = Catalogue::builtin();
//! let mut engine = Engine::new(&catalogue, TickClock::new(), 12345);
//! engine.apply_action(GameAction::Start);
//! assert!(engine.is_running());
//!
//! // Ten seconds of game time at the starting speed.
//! engine.advance(10_000);
//! assert!(engine.current().unwrap().fallen());
//! ```

pub mod block;
pub mod catalogue;
pub mod engine;
pub mod falling;
pub mod grid;
pub mod render;
pub mod rng;
pub mod scheduler;

pub use figgy_types as types;

pub use block::Block;
pub use catalogue::{Catalogue, Skin, Template};
pub use engine::{ClearedRows, Engine, EngineEvent, EVENT_LOG_CAPACITY};
pub use falling::{FallOutcome, FallingObject};
pub use grid::Grid;
pub use render::Renderer;
pub use rng::SimpleRng;
pub use scheduler::{Scheduler, TickClock};
