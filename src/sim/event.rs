//! Discrete events raised during a tick
//!
//! Collected on [`GameState::events`](super::GameState) and cleared at the
//! start of every tick. Audio, analytics and effects layers read them; the
//! simulation never reads them back.

use glam::Vec2;
use serde::Serialize;

use super::state::PickupKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// Player (and allies) fired a volley
    Fired { projectiles: u32 },
    /// A projectile struck a hazard without necessarily destroying it
    HazardHit { hazard_id: u32, pos: Vec2, damage: f32 },
    /// A hazard's strength reached zero
    HazardDestroyed { hazard_id: u32, pos: Vec2, score: u64 },
    PickupCollected { kind: PickupKind },
    /// A hazard crossed the bottom edge
    PlayerDamaged { amount: u32, hp_left: u32 },
    /// Cosmetic flash from a burst pickup
    BurstFlash { pos: Vec2 },
    GameOver { score: u64 },
}
