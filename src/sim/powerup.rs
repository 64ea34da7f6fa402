//! Pickup effects on the player
//!
//! Permanent effects only ever ratchet upward. Temporary effects carry a tick
//! timer; [`decay_boosts`] runs once per tick and snaps an expired multiplier
//! back to exactly 1.

use glam::Vec2;

use super::collision::settle_destroyed_hazards;
use super::event::GameEvent;
use super::rng::RandomSource;
use super::state::{GameState, PickupKind, PlayerState};

/// Apply one collected pickup.
pub fn apply(state: &mut GameState, kind: PickupKind, rng: &mut dyn RandomSource) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    match kind {
        PickupKind::FirePattern { tier } => {
            let tier = tier.min(tuning.max_fire_tier);
            if tier > player.fire_tier {
                let gained = (tier - player.fire_tier) as f32;
                player.fire_tier = tier;
                player.width = (player.width + tuning.player_width_per_tier * gained)
                    .min(tuning.field_width);
                player.clamp_x(tuning.field_width);
                log::debug!("Fire tier raised to {}", tier);
            }
        }
        PickupKind::PermanentDamage { factor } => {
            let next = (player.permanent_damage * factor).min(tuning.permanent_damage_cap);
            player.permanent_damage = next.max(player.permanent_damage);
        }
        PickupKind::TemporaryDamage { multiplier } => {
            let multiplier = multiplier.min(tuning.temporary_damage_cap);
            if multiplier > 1.0 {
                player.temporary_damage = multiplier;
                player.damage_timer = tuning.damage_boost_ticks;
            }
        }
        PickupKind::PermanentFireRate { percent } => {
            let candidate = 1.0 + percent / 100.0;
            if candidate > player.permanent_fire_rate {
                player.permanent_fire_rate = candidate;
            }
        }
        PickupKind::TemporaryFireRate { percent } => {
            let candidate = 1.0 + percent / 100.0;
            if candidate > player.temporary_fire_rate {
                player.temporary_fire_rate = candidate;
                player.fire_rate_timer = tuning.fire_rate_boost_ticks;
            }
        }
        PickupKind::Ally => recruit_ally(state),
        PickupKind::Burst => burst(state, rng),
    }
}

/// Add an ally at the next alternating slot, if there is room
fn recruit_ally(state: &mut GameState) {
    let count = state.ally_count();
    if count >= state.tuning.ally_capacity {
        log::debug!("Ally capacity reached ({}), pickup wasted", count);
        return;
    }
    let side = if count % 2 == 0 { 1.0 } else { -1.0 };
    let offset = state.tuning.ally_spacing * side * (count / 2 + 1) as f32;
    let pos = Vec2::new(
        state.player.x + offset,
        state.tuning.field_height - state.tuning.ally_row_offset,
    );
    state.registry.add_ally(offset, pos);
    log::debug!("Ally {} recruited at offset {}", count + 1, offset);
}

/// Damage every hazard at once; kills score and drop like projectile kills
fn burst(state: &mut GameState, rng: &mut dyn RandomSource) {
    let damage = state.tuning.burst_damage;
    for hazard in &mut state.registry.hazards {
        hazard.strength -= damage;
    }
    let destroyed = settle_destroyed_hazards(state, rng);
    log::debug!("Burst destroyed {} hazards", destroyed);

    let (width, height) = (state.tuning.field_width, state.tuning.field_height);
    for _ in 0..state.tuning.burst_effect_count {
        let pos = Vec2::new(rng.range(0.0, width), rng.range(0.0, height));
        state.events.push(GameEvent::BurstFlash { pos });
    }
}

/// Count down temporary boosts, resetting each multiplier to 1 on expiry
pub fn decay_boosts(player: &mut PlayerState) {
    if player.damage_timer > 0 {
        player.damage_timer -= 1;
        if player.damage_timer == 0 {
            player.temporary_damage = 1.0;
        }
    }
    if player.fire_rate_timer > 0 {
        player.fire_rate_timer -= 1;
        if player.fire_rate_timer == 0 {
            player.temporary_fire_rate = 1.0;
        }
    }
}
