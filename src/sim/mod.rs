//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod rect;
pub mod stage;
pub mod state;
pub mod tick;

pub use collision::{Axis, Side, WallHit, resolve_axis, resolve_wall};
pub use rect::Aabb;
pub use stage::{build_stage, tier_for_level};
pub use state::{
    Ball, Block, GameEvent, GamePhase, GameState, Paddle, Projectile, Upgrade, UpgradeKind,
};
pub use tick::{TickInput, tick};
