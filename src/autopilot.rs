//! Demo-mode pilot
//!
//! An [`InputSource`] that plays on its own: it parks under the hazard
//! closest to the bottom edge and detours for pickups when nothing is
//! about to land.

use crate::sim::{GameState, InputSource, TickInput};

/// Hazards below this fraction of the field height count as urgent
const DANGER_LINE: f32 = 0.6;
/// Pickups are only chased once they are this far down
const PICKUP_LINE: f32 = 0.4;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Stop steering when this close to the target
    pub deadzone: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { deadzone: 4.0 }
    }
}

impl Autopilot {
    /// Lateral position the pilot wants to reach this tick
    pub fn target_x(&self, state: &GameState) -> f32 {
        let height = state.tuning.field_height;
        let lowest = state
            .registry
            .hazards
            .iter()
            .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(std::cmp::Ordering::Equal));

        let in_danger = lowest.is_some_and(|h| h.pos.y > height * DANGER_LINE);
        if !in_danger {
            let x = state.player.x;
            let pickup = state
                .registry
                .pickups
                .iter()
                .filter(|p| p.pos.y > height * PICKUP_LINE)
                .min_by(|a, b| {
                    (a.pos.x - x)
                        .abs()
                        .partial_cmp(&(b.pos.x - x).abs())
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
            if let Some(pickup) = pickup {
                return pickup.pos.x;
            }
        }

        match lowest {
            Some(hazard) => hazard.pos.x,
            None => state.tuning.field_width / 2.0,
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        let delta = self.target_x(state) - state.player.x;
        TickInput {
            move_left: delta < -self.deadzone,
            move_right: delta > self.deadzone,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::PickupKind;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(Tuning::default()).unwrap()
    }

    #[test]
    fn test_idles_at_centre() {
        let state = state();
        let mut pilot = Autopilot::default();
        assert_eq!(pilot.poll(&state), TickInput::default());
    }

    #[test]
    fn test_tracks_lowest_hazard() {
        let mut state = state();
        let tuning = state.tuning.clone();
        state.registry.add_hazard(Vec2::new(700.0, 100.0), 3, 1.0, &tuning);
        state.registry.add_hazard(Vec2::new(100.0, 500.0), 3, 1.0, &tuning);
        let mut pilot = Autopilot::default();
        assert_eq!(pilot.target_x(&state), 100.0);
        assert!(pilot.poll(&state).move_left);
    }

    #[test]
    fn test_chases_pickup_when_safe() {
        let mut state = state();
        let tuning = state.tuning.clone();
        state.registry.add_hazard(Vec2::new(100.0, 100.0), 3, 1.0, &tuning);
        state.registry.add_pickup(PickupKind::Ally, Vec2::new(650.0, 400.0), &tuning);
        let pilot = Autopilot::default();
        assert_eq!(pilot.target_x(&state), 650.0);

        // A hazard about to land takes priority
        state.registry.add_hazard(Vec2::new(200.0, 500.0), 3, 1.0, &tuning);
        assert_eq!(pilot.target_x(&state), 200.0);
    }
}
