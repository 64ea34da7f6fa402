//! Meteor Volley - tick simulation core for a vertical meteor shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, power-ups, game state)
//! - `session`: Lifecycle surface wiring the simulation to its collaborators
//! - `runner`: Fixed-step scheduling for host frame loops
//! - `autopilot`: Demo-mode input source
//! - `highscores`: Best-score persistence
//! - `tuning`: Data-driven game balance

pub mod autopilot;
pub mod error;
pub mod highscores;
pub mod runner;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, TuningLoadError};
pub use highscores::{JsonFileScoreStore, MemoryScoreStore, ScoreStore};
pub use session::{EventSink, Session, Snapshot};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Horizontal margin kept clear when spawning from the top edge
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Player defaults
    pub const MAX_HP: u32 = 200;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    /// Extra width gained per fire tier
    pub const PLAYER_WIDTH_PER_TIER: f32 = 10.0;
    /// Distance from the bottom edge to the player's top (and muzzle)
    pub const PLAYER_MUZZLE_OFFSET: f32 = 50.0;
    /// Distance from the bottom edge to the ally row
    pub const ALLY_ROW_OFFSET: f32 = 70.0;

    /// Damage economy
    pub const BASE_DAMAGE: f32 = 1.0;
    pub const PERMANENT_DAMAGE_CAP: f32 = 3.0;
    pub const TEMPORARY_DAMAGE_CAP: f32 = 5.0;
    /// Damage pickups with a value at or below this are permanent
    pub const PERMANENT_DAMAGE_THRESHOLD: f32 = 3.0;
    pub const DAMAGE_BOOST_TICKS: u32 = 1800;
    pub const FIRE_RATE_BOOST_TICKS: u32 = 900;

    /// Firing
    pub const BASE_FIRE_INTERVAL: u32 = 20;
    pub const MAX_FIRE_TIER: u8 = 7;
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_HALF_WIDTH: f32 = 5.0;

    /// Allies
    pub const ALLY_CAPACITY: u32 = 8;
    pub const ALLY_SPACING: f32 = 60.0;

    /// Spawning
    pub const BASE_SPAWN_INTERVAL: u32 = 120;
    pub const MIN_SPAWN_INTERVAL: u32 = 30;
    pub const SPAWN_SCORE_DIVISOR: u64 = 20;

    /// Hazards
    pub const BASE_HAZARD_SPEED: f32 = 1.0;
    pub const MIN_HAZARD_SPEED: f32 = 0.8;
    pub const HAZARD_SPEED_JITTER: f32 = 1.0;
    pub const SPEED_STEP_SCORE: u64 = 50;
    pub const MAX_SPEED_STEPS: u64 = 5;
    pub const MAX_HAZARD_STRENGTH: u32 = 199;
    pub const HAZARD_BASE_RADIUS: f32 = 30.0;
    /// Radius gained per point of strength (capped at twice the base)
    pub const HAZARD_RADIUS_PER_STRENGTH: f32 = 5.0;
    /// Max rotation speed magnitude (radians per tick)
    pub const HAZARD_MAX_SPIN: f32 = 0.05;

    /// Pickups
    pub const PICKUP_CHANCE: f32 = 0.15;
    pub const PICKUP_SPEED: f32 = 3.0;
    pub const PICKUP_RADIUS: f32 = 15.0;
    pub const BURST_SCORE_THRESHOLD: u64 = 1000;
    pub const BURST_CHANCE: f32 = 0.05;
    pub const BURST_DAMAGE: f32 = 50.0;
    pub const BURST_EFFECT_COUNT: u32 = 12;
}
