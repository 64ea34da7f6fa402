//! Error types for session construction and tuning loads

use thiserror::Error;

/// A tuning value outside its accepted range.
///
/// Raised once, when a session is built. The simulation itself never
/// produces these; it clamps only where the rules say to (hp, player x,
/// multiplier caps).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive and finite (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be at least 1 (got {value})")]
    BelowOne { field: &'static str, value: f32 },

    #[error("{field} must be a probability in [0, 1] (got {value})")]
    NotProbability { field: &'static str, value: f32 },

    #[error("{field} must be in {min}..={max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("{field} must be in [{min}, {max}] (got {value})")]
    NotWithin {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("min_spawn_interval ({min}) exceeds base_spawn_interval ({base})")]
    SpawnFloorAboveBase { min: u32, base: u32 },

    #[error("player width {width} does not fit in field width {field_width}")]
    PlayerTooWide { width: f32, field_width: f32 },
}

/// Failure while reading a tuning override file.
#[derive(Debug, Error)]
pub enum TuningLoadError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
