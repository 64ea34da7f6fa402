//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives on [`GameState`]. The random
//! source is the only outside input and is handed to `tick` by the caller.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; terminal until reset
    GameOver,
}

/// Lateral offsets for each fire tier (index 0 = tier 1)
const VOLLEY_OFFSETS: [&[f32]; 7] = [
    &[0.0],
    &[-20.0, 20.0],
    &[-20.0, 0.0, 20.0],
    &[-30.0, -10.0, 10.0, 30.0],
    &[-40.0, -20.0, 0.0, 20.0, 40.0],
    &[-50.0, -30.0, -10.0, 10.0, 30.0, 50.0],
    &[-60.0, -40.0, -20.0, 0.0, 20.0, 40.0, 60.0],
];

/// Projectile x offsets fired by a tier, clamped to the known patterns
pub fn volley_offsets(tier: u8) -> &'static [f32] {
    let index = (tier.max(1) as usize - 1).min(VOLLEY_OFFSETS.len() - 1);
    VOLLEY_OFFSETS[index]
}

/// A projectile travelling up the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Vertical velocity per tick (negative = up)
    pub vel_y: f32,
    pub damage: f32,
    pub half_width: f32,
}

/// Strength-based shade bucket for drawing hazards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HazardShade {
    Light,
    Medium,
    Dark,
    Darker,
    Darkest,
}

/// A descending meteor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub pos: Vec2,
    /// Remaining hit points; may dip below zero on the killing blow
    pub strength: f32,
    /// Strength at spawn, awarded as score on destruction
    pub initial_strength: u32,
    pub radius: f32,
    /// Fall speed per tick
    pub speed: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Hazard {
    /// Radius grows with strength up to twice the base radius
    pub fn radius_for(strength: u32, tuning: &Tuning) -> f32 {
        (tuning.hazard_base_radius + strength as f32 * tuning.hazard_radius_per_strength)
            .min(tuning.hazard_base_radius * 2.0)
    }

    pub fn is_destroyed(&self) -> bool {
        self.strength <= 0.0
    }

    /// Strength as shown on screen, never negative
    pub fn displayed_strength(&self) -> u32 {
        self.strength.max(0.0).ceil() as u32
    }

    pub fn shade(&self) -> HazardShade {
        match self.displayed_strength() {
            0..=10 => HazardShade::Light,
            11..=30 => HazardShade::Medium,
            31..=50 => HazardShade::Dark,
            51..=100 => HazardShade::Darker,
            _ => HazardShade::Darkest,
        }
    }

    fn advance(&mut self) {
        self.pos.y += self.speed;
        self.rotation = (self.rotation + self.rotation_speed).rem_euclid(std::f32::consts::TAU);
    }
}

/// Pickup types, one payload shape per kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Raise the fire pattern to at least this tier
    FirePattern { tier: u8 },
    /// Multiply the permanent damage multiplier
    PermanentDamage { factor: f32 },
    /// Set the temporary damage multiplier and restart its timer
    TemporaryDamage { multiplier: f32 },
    /// Permanent fire-rate bonus, in percent
    PermanentFireRate { percent: f32 },
    /// Temporary fire-rate bonus, in percent
    TemporaryFireRate { percent: f32 },
    /// Recruit one ally
    Ally,
    /// Damage every hazard on the field
    Burst,
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub speed: f32,
    pub radius: f32,
}

/// A helper unit flying beside the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ally {
    pub id: u32,
    /// Lateral offset from the player's x
    pub offset: f32,
    pub pos: Vec2,
    /// Ticks since this ally joined or last fired. An ally joins a volley
    /// only once a full cycle has passed on its own timer.
    pub fire_timer: u32,
}

/// The player's ship and its upgrade state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub hp: u32,
    pub base_damage: f32,
    pub permanent_damage: f32,
    pub temporary_damage: f32,
    /// Ticks left on the temporary damage multiplier
    pub damage_timer: u32,
    pub permanent_fire_rate: f32,
    pub temporary_fire_rate: f32,
    /// Ticks left on the temporary fire-rate multiplier
    pub fire_rate_timer: u32,
    pub fire_tier: u8,
    /// Ticks since the last volley
    pub fire_timer: u32,
}

impl PlayerState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.field_width / 2.0,
            width: tuning.player_width,
            height: tuning.player_height,
            hp: tuning.max_hp,
            base_damage: tuning.base_damage,
            permanent_damage: 1.0,
            temporary_damage: 1.0,
            damage_timer: 0,
            permanent_fire_rate: 1.0,
            temporary_fire_rate: 1.0,
            fire_rate_timer: 0,
            fire_tier: 1,
            fire_timer: 0,
        }
    }

    /// Damage carried by each projectile
    pub fn shot_damage(&self) -> f32 {
        self.base_damage * self.permanent_damage * self.temporary_damage
    }

    /// Ticks between volleys after fire-rate multipliers
    pub fn fire_threshold(&self, base_interval: u32) -> u32 {
        let rate = self.permanent_fire_rate * self.temporary_fire_rate;
        ((base_interval as f32 / rate).floor() as u32).max(1)
    }

    /// Keep the ship fully inside the field
    pub fn clamp_x(&mut self, field_width: f32) {
        let half = self.width / 2.0;
        let max = (field_width - half).max(half);
        self.x = self.x.clamp(half, max);
    }

    /// Hit box as (min, max) corners
    pub fn rect(&self, tuning: &Tuning) -> (Vec2, Vec2) {
        let top = tuning.field_height - tuning.player_muzzle_offset;
        let half = self.width / 2.0;
        (
            Vec2::new(self.x - half, top),
            Vec2::new(self.x + half, top + self.height),
        )
    }
}

/// Owner of every transient entity collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    pub projectiles: Vec<Projectile>,
    pub hazards: Vec<Hazard>,
    pub pickups: Vec<Pickup>,
    pub allies: Vec<Ally>,
    next_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_projectile(&mut self, pos: Vec2, vel_y: f32, damage: f32, half_width: f32) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            id,
            pos,
            vel_y,
            damage,
            half_width,
        });
        id
    }

    /// Add a hazard at `pos` with the given strength and fall speed
    pub fn add_hazard(&mut self, pos: Vec2, strength: u32, speed: f32, tuning: &Tuning) -> u32 {
        self.add_spinning_hazard(pos, strength, speed, 0.0, 0.0, tuning)
    }

    pub fn add_spinning_hazard(
        &mut self,
        pos: Vec2,
        strength: u32,
        speed: f32,
        rotation: f32,
        rotation_speed: f32,
        tuning: &Tuning,
    ) -> u32 {
        let id = self.next_entity_id();
        self.hazards.push(Hazard {
            id,
            pos,
            strength: strength as f32,
            initial_strength: strength,
            radius: Hazard::radius_for(strength, tuning),
            speed,
            rotation,
            rotation_speed,
        });
        id
    }

    pub fn add_pickup(&mut self, kind: PickupKind, pos: Vec2, tuning: &Tuning) -> u32 {
        let id = self.next_entity_id();
        self.pickups.push(Pickup {
            id,
            kind,
            pos,
            speed: tuning.pickup_speed,
            radius: tuning.pickup_radius,
        });
        id
    }

    pub fn add_ally(&mut self, offset: f32, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.allies.push(Ally {
            id,
            offset,
            pos,
            fire_timer: 0,
        });
        id
    }

    pub fn hazard(&self, id: u32) -> Option<&Hazard> {
        self.hazards.iter().find(|h| h.id == id)
    }

    /// Move every projectile, hazard and pickup by one tick
    pub fn advance(&mut self) {
        for projectile in &mut self.projectiles {
            projectile.pos.y += projectile.vel_y;
        }
        for hazard in &mut self.hazards {
            hazard.advance();
        }
        for pickup in &mut self.pickups {
            pickup.pos.y += pickup.speed;
        }
    }

    /// Drop projectiles past the top and pickups past the bottom
    pub fn prune(&mut self, field_height: f32) {
        self.projectiles.retain(|p| p.pos.y > 0.0);
        self.pickups.retain(|p| p.pos.y <= field_height);
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

/// Complete session state (deterministic given the random source)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks since the last hazard spawn
    pub spawn_cooldown: u32,
    pub player: PlayerState,
    pub registry: Registry,
    /// Events raised during the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state for a validated tuning
    pub fn new(tuning: Tuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self {
            phase: GamePhase::Playing,
            score: 0,
            time_ticks: 0,
            spawn_cooldown: 0,
            player: PlayerState::new(&tuning),
            registry: Registry::new(),
            events: Vec::new(),
            tuning,
        })
    }

    /// Back to a fresh `Playing` state with the same tuning
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.time_ticks = 0;
        self.spawn_cooldown = 0;
        self.player = PlayerState::new(&self.tuning);
        self.registry.clear();
        self.events.clear();
    }

    /// Transition into `GameOver` (no-op if already there)
    pub fn end_run(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.player.hp = 0;
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("Game over at tick {} with score {}", self.time_ticks, self.score);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn ally_count(&self) -> u32 {
        self.registry.allies.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = GameState::new(Tuning::default()).unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.hp, 200);
        assert_eq!(state.player.fire_tier, 1);
        assert_eq!(state.ally_count(), 0);
        assert!(state.registry.hazards.is_empty());
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            ally_spacing: -1.0,
            ..Default::default()
        };
        assert!(GameState::new(tuning).is_err());
    }

    #[test]
    fn test_hazard_radius_capped() {
        let tuning = Tuning::default();
        assert_eq!(Hazard::radius_for(1, &tuning), 35.0);
        assert_eq!(Hazard::radius_for(150, &tuning), 60.0);
    }

    #[test]
    fn test_displayed_strength_never_negative() {
        let tuning = Tuning::default();
        let mut registry = Registry::new();
        let id = registry.add_hazard(Vec2::new(100.0, 0.0), 3, 1.0, &tuning);
        registry.hazards[0].strength = -4.0;
        assert_eq!(registry.hazard(id).unwrap().displayed_strength(), 0);
        assert_eq!(registry.hazards[0].shade(), HazardShade::Light);
    }

    #[test]
    fn test_volley_offsets_per_tier() {
        for tier in 1..=7u8 {
            assert_eq!(volley_offsets(tier).len(), tier as usize);
        }
        // Out-of-range tiers fall back to the nearest pattern
        assert_eq!(volley_offsets(0).len(), 1);
        assert_eq!(volley_offsets(12).len(), 7);
    }

    #[test]
    fn test_fire_threshold_scales_with_rate() {
        let mut player = PlayerState::new(&Tuning::default());
        assert_eq!(player.fire_threshold(20), 20);
        player.permanent_fire_rate = 1.5;
        assert_eq!(player.fire_threshold(20), 13);
        player.temporary_fire_rate = 100.0;
        assert_eq!(player.fire_threshold(20), 1);
    }

    #[test]
    fn test_clamp_x() {
        let mut player = PlayerState::new(&Tuning::default());
        player.x = -100.0;
        player.clamp_x(800.0);
        assert_eq!(player.x, 25.0);
        player.x = 9999.0;
        player.clamp_x(800.0);
        assert_eq!(player.x, 775.0);
    }

    #[test]
    fn test_registry_prune_and_ids() {
        let tuning = Tuning::default();
        let mut registry = Registry::new();
        let a = registry.add_projectile(Vec2::new(10.0, 5.0), -10.0, 1.0, 5.0);
        let b = registry.add_projectile(Vec2::new(10.0, 500.0), -10.0, 1.0, 5.0);
        assert!(b > a);
        registry.add_pickup(PickupKind::Ally, Vec2::new(10.0, 599.0), &tuning);
        registry.advance();
        registry.prune(tuning.field_height);
        assert_eq!(registry.projectiles.len(), 1);
        assert_eq!(registry.projectiles[0].id, b);
        assert!(registry.pickups.is_empty());
    }
}
