//! Game balance values
//!
//! Every number the simulation uses lives here so a host can override them
//! from JSON. Values are checked once, when a session is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, TuningLoadError};

/// Balance table for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    pub spawn_margin: f32,

    // === Player ===
    pub max_hp: u32,
    pub player_speed: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_width_per_tier: f32,
    pub player_muzzle_offset: f32,
    pub ally_row_offset: f32,

    // === Damage ===
    pub base_damage: f32,
    pub permanent_damage_cap: f32,
    pub temporary_damage_cap: f32,
    pub permanent_damage_threshold: f32,
    pub damage_boost_ticks: u32,
    pub fire_rate_boost_ticks: u32,

    // === Firing ===
    pub base_fire_interval: u32,
    pub max_fire_tier: u8,
    pub projectile_speed: f32,
    pub projectile_half_width: f32,

    // === Allies ===
    pub ally_capacity: u32,
    pub ally_spacing: f32,

    // === Spawning ===
    pub base_spawn_interval: u32,
    pub min_spawn_interval: u32,
    pub spawn_score_divisor: u64,

    // === Hazards ===
    pub base_hazard_speed: f32,
    pub min_hazard_speed: f32,
    pub hazard_speed_jitter: f32,
    pub speed_step_score: u64,
    pub max_speed_steps: u64,
    pub max_hazard_strength: u32,
    pub hazard_base_radius: f32,
    pub hazard_radius_per_strength: f32,
    pub hazard_max_spin: f32,

    // === Pickups ===
    pub pickup_chance: f32,
    pub pickup_speed: f32,
    pub pickup_radius: f32,
    pub burst_score_threshold: u64,
    pub burst_chance: f32,
    pub burst_damage: f32,
    pub burst_effect_count: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            spawn_margin: SPAWN_MARGIN,

            max_hp: MAX_HP,
            player_speed: PLAYER_SPEED,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_width_per_tier: PLAYER_WIDTH_PER_TIER,
            player_muzzle_offset: PLAYER_MUZZLE_OFFSET,
            ally_row_offset: ALLY_ROW_OFFSET,

            base_damage: BASE_DAMAGE,
            permanent_damage_cap: PERMANENT_DAMAGE_CAP,
            temporary_damage_cap: TEMPORARY_DAMAGE_CAP,
            permanent_damage_threshold: PERMANENT_DAMAGE_THRESHOLD,
            damage_boost_ticks: DAMAGE_BOOST_TICKS,
            fire_rate_boost_ticks: FIRE_RATE_BOOST_TICKS,

            base_fire_interval: BASE_FIRE_INTERVAL,
            max_fire_tier: MAX_FIRE_TIER,
            projectile_speed: PROJECTILE_SPEED,
            projectile_half_width: PROJECTILE_HALF_WIDTH,

            ally_capacity: ALLY_CAPACITY,
            ally_spacing: ALLY_SPACING,

            base_spawn_interval: BASE_SPAWN_INTERVAL,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            spawn_score_divisor: SPAWN_SCORE_DIVISOR,

            base_hazard_speed: BASE_HAZARD_SPEED,
            min_hazard_speed: MIN_HAZARD_SPEED,
            hazard_speed_jitter: HAZARD_SPEED_JITTER,
            speed_step_score: SPEED_STEP_SCORE,
            max_speed_steps: MAX_SPEED_STEPS,
            max_hazard_strength: MAX_HAZARD_STRENGTH,
            hazard_base_radius: HAZARD_BASE_RADIUS,
            hazard_radius_per_strength: HAZARD_RADIUS_PER_STRENGTH,
            hazard_max_spin: HAZARD_MAX_SPIN,

            pickup_chance: PICKUP_CHANCE,
            pickup_speed: PICKUP_SPEED,
            pickup_radius: PICKUP_RADIUS,
            burst_score_threshold: BURST_SCORE_THRESHOLD,
            burst_chance: BURST_CHANCE,
            burst_damage: BURST_DAMAGE,
            burst_effect_count: BURST_EFFECT_COUNT,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // `!(x > 0)` also rejects NaN
    if !(value > 0.0) || value.is_infinite() {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}

fn positive_int(field: &'static str, value: u64) -> Result<(), ConfigError> {
    positive(field, value as f32)
}

fn at_least_one(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(value >= 1.0) {
        return Err(ConfigError::BelowOne { field, value });
    }
    Ok(())
}

fn within(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if !(min..=max).contains(&value) {
        return Err(ConfigError::NotWithin {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn probability(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::NotProbability { field, value });
    }
    Ok(())
}

impl Tuning {
    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive_int("max_hp", self.max_hp as u64)?;
        positive("player_speed", self.player_speed)?;
        positive("player_width", self.player_width)?;
        positive("player_height", self.player_height)?;
        positive("base_damage", self.base_damage)?;
        positive("projectile_speed", self.projectile_speed)?;
        positive("projectile_half_width", self.projectile_half_width)?;
        positive("base_hazard_speed", self.base_hazard_speed)?;
        positive("min_hazard_speed", self.min_hazard_speed)?;
        positive("hazard_base_radius", self.hazard_base_radius)?;
        positive("pickup_speed", self.pickup_speed)?;
        positive("pickup_radius", self.pickup_radius)?;
        positive_int("base_fire_interval", self.base_fire_interval as u64)?;
        positive_int("min_spawn_interval", self.min_spawn_interval as u64)?;
        positive_int("spawn_score_divisor", self.spawn_score_divisor)?;
        positive_int("speed_step_score", self.speed_step_score)?;
        positive_int("damage_boost_ticks", self.damage_boost_ticks as u64)?;
        positive_int("fire_rate_boost_ticks", self.fire_rate_boost_ticks as u64)?;

        at_least_one("permanent_damage_cap", self.permanent_damage_cap)?;
        at_least_one("temporary_damage_cap", self.temporary_damage_cap)?;

        probability("pickup_chance", self.pickup_chance)?;
        probability("burst_chance", self.burst_chance)?;

        if !(1..=MAX_FIRE_TIER).contains(&self.max_fire_tier) {
            return Err(ConfigError::OutOfRange {
                field: "max_fire_tier",
                value: self.max_fire_tier as i64,
                min: 1,
                max: MAX_FIRE_TIER as i64,
            });
        }
        if self.max_hazard_strength == 0 {
            return Err(ConfigError::OutOfRange {
                field: "max_hazard_strength",
                value: 0,
                min: 1,
                max: u32::MAX as i64,
            });
        }
        if self.min_spawn_interval > self.base_spawn_interval {
            return Err(ConfigError::SpawnFloorAboveBase {
                min: self.min_spawn_interval,
                base: self.base_spawn_interval,
            });
        }
        if self.player_width >= self.field_width {
            return Err(ConfigError::PlayerTooWide {
                width: self.player_width,
                field_width: self.field_width,
            });
        }
        within("spawn_margin", self.spawn_margin, 0.0, self.field_width / 2.0)?;
        // Muzzle and ally row sit above the bottom edge, inside the field
        positive("player_muzzle_offset", self.player_muzzle_offset)?;
        within("player_muzzle_offset", self.player_muzzle_offset, 0.0, self.field_height)?;
        positive("ally_row_offset", self.ally_row_offset)?;
        within("ally_row_offset", self.ally_row_offset, 0.0, self.field_height)?;
        within(
            "permanent_damage_threshold",
            self.permanent_damage_threshold,
            0.0,
            f32::MAX,
        )?;
        // Non-negative knobs where zero is meaningful
        for (field, value) in [
            ("hazard_speed_jitter", self.hazard_speed_jitter),
            ("hazard_radius_per_strength", self.hazard_radius_per_strength),
            ("hazard_max_spin", self.hazard_max_spin),
            ("player_width_per_tier", self.player_width_per_tier),
            ("ally_spacing", self.ally_spacing),
            ("burst_damage", self.burst_damage),
        ] {
            within(field, value, 0.0, f32::MAX)?;
        }
        Ok(())
    }

    /// Parse a JSON override; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, TuningLoadError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON override file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningLoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let tuning = Tuning {
            base_hazard_speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NotPositive { field: "base_hazard_speed", .. })
        ));

        let tuning = Tuning {
            player_speed: f32::NAN,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_spawn_floor_above_base() {
        let tuning = Tuning {
            base_spawn_interval: 20,
            min_spawn_interval: 30,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(ConfigError::SpawnFloorAboveBase { min: 30, base: 20 })
        );
    }

    #[test]
    fn test_rejects_bad_probability_and_tier() {
        let tuning = Tuning {
            pickup_chance: 1.5,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(ConfigError::NotProbability { .. })));

        let tuning = Tuning {
            max_fire_tier: 9,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(ConfigError::OutOfRange { .. })));
    }

    #[test]
    fn test_rejects_nan_spawn_margin() {
        let tuning = Tuning {
            spawn_margin: f32::NAN,
            base_spawn_interval: 30,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NotWithin { field: "spawn_margin", .. })
        ));

        let tuning = Tuning {
            spawn_margin: 500.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_offsets_outside_field() {
        let tuning = Tuning {
            player_muzzle_offset: -500.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NotPositive { field: "player_muzzle_offset", .. })
        ));

        let tuning = Tuning {
            ally_row_offset: 5000.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NotWithin { field: "ally_row_offset", .. })
        ));

        let tuning = Tuning {
            player_muzzle_offset: f32::NAN,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_damage_threshold_and_knobs() {
        let tuning = Tuning {
            permanent_damage_threshold: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NotWithin { field: "permanent_damage_threshold", .. })
        ));

        let tuning = Tuning {
            hazard_speed_jitter: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NotWithin { field: "hazard_speed_jitter", .. })
        ));

        let tuning = Tuning {
            field_width: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NotPositive { field: "field_width", .. })
        ));
    }

    #[test]
    fn test_json_override_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{ "max_hp": 50, "ally_capacity": 2 }"#).unwrap();
        assert_eq!(tuning.max_hp, 50);
        assert_eq!(tuning.ally_capacity, 2);
        assert_eq!(tuning.base_spawn_interval, BASE_SPAWN_INTERVAL);
    }

    #[test]
    fn test_json_override_is_validated() {
        let err = Tuning::from_json_str(r#"{ "max_hp": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningLoadError::Invalid(_)));

        let err = Tuning::from_json_str("not json").unwrap_err();
        assert!(matches!(err, TuningLoadError::Parse(_)));
    }
}
