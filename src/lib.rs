//! CRT Breakout - a retro block-breaker game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, game state)
//! - `config`: Immutable game configuration, validated at load time
//! - `highscore`: Single-value high score persistence
//!
//! Rendering, audio and menus are external collaborators: they call
//! [`sim::tick`] once per frame, read entity state back, and drain the
//! [`sim::GameEvent`] queue for sound/visual feedback.

pub mod config;
pub mod highscore;
pub mod sim;

pub use config::{Config, ConfigError};
pub use highscore::HighScore;

/// Frame pacing constants for the host loop
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
