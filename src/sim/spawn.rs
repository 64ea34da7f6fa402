//! Hazard and pickup spawning

use glam::Vec2;

use super::difficulty::DifficultyScaler;
use super::rng::RandomSource;
use super::state::{GameState, PickupKind};
use crate::tuning::Tuning;

/// Relative weights of the regular pickup draw
const FIRE_PATTERN_WEIGHT: f32 = 4.0;
const DAMAGE_WEIGHT: f32 = 3.0;
const FIRE_RATE_WEIGHT: f32 = 2.0;
const ALLY_WEIGHT: f32 = 1.0;

/// Share of fire-pattern pickups that jump straight to the top tiers
const BIG_TIER_CHANCE: f32 = 0.10;
/// Share of fire-rate pickups that are permanent
const PERMANENT_RATE_CHANCE: f32 = 0.30;

/// Advance the spawn cooldown; spawn a hazard (and maybe a pickup) when due.
///
/// Returns true when a spawn happened this tick.
pub fn run_spawner(state: &mut GameState, rng: &mut dyn RandomSource) -> bool {
    let scaler = DifficultyScaler::new(&state.tuning);
    state.spawn_cooldown += 1;
    if state.spawn_cooldown <= scaler.spawn_interval(state.score) {
        return false;
    }

    spawn_hazard(state, &scaler, rng);

    if let Some(kind) = roll_pickup(state.score, &state.tuning, rng) {
        let x = spawn_x(&state.tuning, rng);
        let id = state.registry.add_pickup(kind, Vec2::new(x, 0.0), &state.tuning);
        log::debug!("Spawned pickup {} {:?} at x={:.0}", id, kind, x);
    }

    state.spawn_cooldown = 0;
    true
}

fn spawn_x(tuning: &Tuning, rng: &mut dyn RandomSource) -> f32 {
    rng.range(tuning.spawn_margin, tuning.field_width - tuning.spawn_margin)
}

/// Emit one hazard at the top edge
pub fn spawn_hazard(state: &mut GameState, scaler: &DifficultyScaler, rng: &mut dyn RandomSource) -> u32 {
    let x = spawn_x(&state.tuning, rng);
    let strength = scaler.sample_strength(state.score, rng);
    let speed = scaler.sample_speed(state.score, rng);
    let rotation = rng.range(0.0, std::f32::consts::TAU);
    let spin = state.tuning.hazard_max_spin;
    let rotation_speed = rng.range(-spin, spin);

    let id = state.registry.add_spinning_hazard(
        Vec2::new(x, 0.0),
        strength,
        speed,
        rotation,
        rotation_speed,
        &state.tuning,
    );
    log::debug!(
        "Spawned hazard {} strength={} speed={:.2} at x={:.0}",
        id,
        strength,
        speed,
        x
    );
    id
}

/// Roll the pickup gate; on success draw a kind
pub fn roll_pickup(score: u64, tuning: &Tuning, rng: &mut dyn RandomSource) -> Option<PickupKind> {
    if !rng.chance(tuning.pickup_chance) {
        return None;
    }
    Some(draw_pickup_kind(score, tuning, rng))
}

/// Weighted draw over pickup kinds and their payloads
pub fn draw_pickup_kind(score: u64, tuning: &Tuning, rng: &mut dyn RandomSource) -> PickupKind {
    if score >= tuning.burst_score_threshold && rng.chance(tuning.burst_chance) {
        return PickupKind::Burst;
    }

    let total = FIRE_PATTERN_WEIGHT + DAMAGE_WEIGHT + FIRE_RATE_WEIGHT + ALLY_WEIGHT;
    let roll = rng.next_f32() * total;

    if roll < FIRE_PATTERN_WEIGHT {
        let max_tier = tuning.max_fire_tier as u32;
        let tier = if rng.chance(BIG_TIER_CHANCE) {
            rng.int_inclusive(6, 7)
        } else {
            rng.int_inclusive(2, 5)
        };
        PickupKind::FirePattern {
            tier: tier.min(max_tier) as u8,
        }
    } else if roll < FIRE_PATTERN_WEIGHT + DAMAGE_WEIGHT {
        let value = rng.int_inclusive(2, 5) as f32;
        if value <= tuning.permanent_damage_threshold {
            PickupKind::PermanentDamage { factor: value }
        } else {
            PickupKind::TemporaryDamage { multiplier: value }
        }
    } else if roll < FIRE_PATTERN_WEIGHT + DAMAGE_WEIGHT + FIRE_RATE_WEIGHT {
        if rng.chance(PERMANENT_RATE_CHANCE) {
            PickupKind::PermanentFireRate {
                percent: (rng.int_inclusive(1, 3) * 10) as f32,
            }
        } else {
            PickupKind::TemporaryFireRate {
                percent: (rng.int_inclusive(5, 15) * 10) as f32,
            }
        }
    } else {
        PickupKind::Ally
    }
}
