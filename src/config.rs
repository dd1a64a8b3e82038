//! Runtime configuration from environment variables.
//!
//! - `FIGGY_SEED`: RNG seed (default: derived from the system clock)
//! - `FIGGY_CATALOGUE`: path to a JSON shape/skin catalogue (default: built-in)
//! - `FIGGY_FRAME_MS`: game loop frame length in milliseconds (default: 16)
//!
//! Unparsable values fall back to the default.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use crate::core::Catalogue;

pub const DEFAULT_FRAME_MS: u32 = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: u32,
    pub catalogue_path: Option<PathBuf>,
    pub frame_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            catalogue_path: None,
            frame_ms: DEFAULT_FRAME_MS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("FIGGY_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let catalogue_path = lookup("FIGGY_CATALOGUE")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        let frame_ms = lookup("FIGGY_FRAME_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(DEFAULT_FRAME_MS);

        Self {
            seed,
            catalogue_path,
            frame_ms,
        }
    }

    /// Load the configured catalogue, or the built-in one.
    pub fn catalogue(&self) -> Result<Catalogue> {
        match &self.catalogue_path {
            Some(path) => Catalogue::load(path),
            None => Ok(Catalogue::builtin()),
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
