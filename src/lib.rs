//! Figgy (workspace facade crate).
//!
//! Re-exports the workspace crates under stable `figgy::{core,input,term,types}`
//! paths and hosts the environment configuration used by the `figgy` binary.

pub mod config;

pub use figgy_core as core;
pub use figgy_input as input;
pub use figgy_term as term;
pub use figgy_types as types;
