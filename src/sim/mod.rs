//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected random source only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod difficulty;
pub mod event;
pub mod powerup;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circle_rect_overlap, circles_overlap};
pub use difficulty::{DifficultyScaler, StrengthBand};
pub use event::GameEvent;
pub use rng::{RandomSource, ScriptedRandom, seeded};
pub use state::{
    Ally, GamePhase, GameState, Hazard, HazardShade, Pickup, PickupKind, PlayerState, Projectile,
    Registry, volley_offsets,
};
pub use tick::{InputSource, TickInput, tick};
