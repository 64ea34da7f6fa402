//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision;
use super::event::GameEvent;
use super::powerup;
use super::rng::RandomSource;
use super::spawn;
use super::state::{GamePhase, GameState, volley_offsets};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
}

/// Anything that can be polled once per tick for player input
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> TickInput;
}

/// A held input, e.g. from a host that tracks key state itself
impl InputSource for TickInput {
    fn poll(&mut self, _state: &GameState) -> TickInput {
        *self
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, rng: &mut dyn RandomSource) {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    // Player movement
    let speed = state.tuning.player_speed;
    if input.move_left {
        state.player.x -= speed;
    }
    if input.move_right {
        state.player.x += speed;
    }
    state.player.clamp_x(state.tuning.field_width);

    // Allies track the player, then everyone fires on the shared cycle
    let ally_y = state.tuning.field_height - state.tuning.ally_row_offset;
    let player_x = state.player.x;
    for ally in &mut state.registry.allies {
        ally.pos = Vec2::new(player_x + ally.offset, ally_y);
        ally.fire_timer += 1;
    }
    fire_cycle(state);

    powerup::decay_boosts(&mut state.player);

    spawn::run_spawner(state, rng);

    state.registry.advance();

    collision::resolve_projectile_hits(state, rng);
    collision::collect_pickups(state, rng);
    collision::resolve_boundary(state);

    state.registry.prune(state.tuning.field_height);

    if state.player.hp == 0 {
        state.end_run();
    }

    debug_assert!(state.ally_count() <= state.tuning.ally_capacity);
    debug_assert!(state.player.permanent_damage <= state.tuning.permanent_damage_cap);
    debug_assert!(state.player.temporary_damage <= state.tuning.temporary_damage_cap);
}

/// Count toward the next volley and fire it when due
fn fire_cycle(state: &mut GameState) {
    state.player.fire_timer += 1;
    let threshold = state.player.fire_threshold(state.tuning.base_fire_interval);
    if state.player.fire_timer < threshold {
        return;
    }

    let damage = state.player.shot_damage();
    let vel_y = -state.tuning.projectile_speed;
    let half_width = state.tuning.projectile_half_width;
    let muzzle_y = state.tuning.field_height - state.tuning.player_muzzle_offset;
    let x = state.player.x;

    let mut fired = 0;
    for offset in volley_offsets(state.player.fire_tier) {
        state
            .registry
            .add_projectile(Vec2::new(x + offset, muzzle_y), vel_y, damage, half_width);
        fired += 1;
    }

    let ally_muzzles: Vec<Vec2> = state
        .registry
        .allies
        .iter_mut()
        .filter(|ally| ally.fire_timer >= threshold)
        .map(|ally| {
            ally.fire_timer = 0;
            ally.pos
        })
        .collect();
    for pos in ally_muzzles {
        state.registry.add_projectile(pos, vel_y, damage, half_width);
        fired += 1;
    }

    state.player.fire_timer = 0;
    state.events.push(GameEvent::Fired { projectiles: fired });
}
