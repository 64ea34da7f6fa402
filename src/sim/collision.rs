//! Collision detection and response
//!
//! Three sweeps run in a fixed order each tick:
//! 1. projectiles against hazards (damage, destruction, score, drops)
//! 2. player against pickups (effects)
//! 3. hazards against the bottom edge (player damage)

use glam::Vec2;

use super::event::GameEvent;
use super::powerup;
use super::rng::RandomSource;
use super::spawn::roll_pickup;
use super::state::GameState;

/// Circle-vs-circle: strict overlap when centres are closer than `reach`
#[inline]
pub fn circles_overlap(a: Vec2, b: Vec2, reach: f32) -> bool {
    a.distance_squared(b) < reach * reach
}

/// Circle-vs-axis-aligned rectangle given by its corners
pub fn circle_rect_overlap(center: Vec2, radius: f32, min: Vec2, max: Vec2) -> bool {
    let closest = center.clamp(min, max);
    center.distance_squared(closest) < radius * radius
}

/// Sweep projectiles into hazards.
///
/// Each projectile is absorbed by at most one hazard: hazards are visited in
/// order and take the first live projectiles that overlap them. A hazard
/// stops absorbing once its strength reaches zero. Returns the number of
/// hazards destroyed.
pub fn resolve_projectile_hits(state: &mut GameState, rng: &mut dyn RandomSource) -> u32 {
    let registry = &mut state.registry;
    let mut spent = vec![false; registry.projectiles.len()];

    for hazard in registry.hazards.iter_mut() {
        if hazard.is_destroyed() {
            continue;
        }
        for (i, projectile) in registry.projectiles.iter().enumerate() {
            if spent[i] {
                continue;
            }
            if !circles_overlap(hazard.pos, projectile.pos, hazard.radius + projectile.half_width) {
                continue;
            }
            hazard.strength -= projectile.damage;
            spent[i] = true;
            state.events.push(GameEvent::HazardHit {
                hazard_id: hazard.id,
                pos: hazard.pos,
                damage: projectile.damage,
            });
            if hazard.is_destroyed() {
                break;
            }
        }
    }

    let mut index = 0;
    registry.projectiles.retain(|_| {
        let keep = !spent[index];
        index += 1;
        keep
    });

    settle_destroyed_hazards(state, rng)
}

/// Remove every hazard at or below zero strength, award its initial strength
/// and roll a drop at its last position. Shared by projectile kills and
/// burst pickups.
pub(crate) fn settle_destroyed_hazards(state: &mut GameState, rng: &mut dyn RandomSource) -> u32 {
    if !state.registry.hazards.iter().any(|h| h.is_destroyed()) {
        return 0;
    }

    let (destroyed, alive): (Vec<_>, Vec<_>) = std::mem::take(&mut state.registry.hazards)
        .into_iter()
        .partition(|h| h.is_destroyed());
    state.registry.hazards = alive;

    let count = destroyed.len() as u32;
    for hazard in destroyed {
        let award = hazard.initial_strength as u64;
        state.score += award;
        state.events.push(GameEvent::HazardDestroyed {
            hazard_id: hazard.id,
            pos: hazard.pos,
            score: award,
        });

        if let Some(kind) = roll_pickup(state.score, &state.tuning, rng) {
            let id = state.registry.add_pickup(kind, hazard.pos, &state.tuning);
            log::debug!("Hazard {} dropped pickup {} {:?}", hazard.id, id, kind);
        }
    }
    count
}

/// Collect pickups touching the player; each effect applies exactly once.
/// Returns the number collected.
pub fn collect_pickups(state: &mut GameState, rng: &mut dyn RandomSource) -> usize {
    let (min, max) = state.player.rect(&state.tuning);
    let (collected, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut state.registry.pickups)
        .into_iter()
        .partition(|p| circle_rect_overlap(p.pos, p.radius, min, max));
    state.registry.pickups = remaining;

    let count = collected.len();
    for pickup in collected {
        state.events.push(GameEvent::PickupCollected { kind: pickup.kind });
        powerup::apply(state, pickup.kind, rng);
    }
    count
}

/// Remove hazards past the bottom edge; each deals its absolute current
/// strength to the player. Ends the run when hit points reach zero.
/// Returns total damage dealt.
pub fn resolve_boundary(state: &mut GameState) -> u32 {
    let floor = state.tuning.field_height;
    if !state.registry.hazards.iter().any(|h| h.pos.y > floor) {
        return 0;
    }

    let (fallen, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut state.registry.hazards)
        .into_iter()
        .partition(|h| h.pos.y > floor);
    state.registry.hazards = remaining;

    let mut total = 0;
    for hazard in fallen {
        if state.player.hp == 0 {
            break;
        }
        let amount = hazard.strength.abs().ceil() as u32;
        let before = state.player.hp;
        state.player.hp = before.saturating_sub(amount);
        total += before - state.player.hp;
        state.events.push(GameEvent::PlayerDamaged {
            amount,
            hp_left: state.player.hp,
        });
    }

    if state.player.hp == 0 {
        state.end_run();
    }
    total
}
