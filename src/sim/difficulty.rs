//! Score-driven difficulty curve
//!
//! Maps cumulative score to spawn cadence, hazard strength distribution and
//! fall speed. Stateless: built once from the tuning and queried per spawn.

use serde::Serialize;

use super::rng::RandomSource;
use crate::tuning::Tuning;

/// One weighted strength range in a spawn table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrengthBand {
    pub weight: f32,
    pub min: u32,
    pub max: u32,
}

/// Band layout above each score threshold: (threshold, [(weight, min, max)])
///
/// The last band of each row is the heavy band; a `max` of 0 means "up to the
/// strength cap". Heavy weight only grows row to row, and the first band
/// always starts at 1. The first band's `max` is its ceiling at the row's
/// threshold; it climbs toward the next row's ceiling as score rises.
const BAND_TIERS: [(u64, [(f32, u32, u32); 3]); 6] = [
    (100, [(0.70, 1, 10), (0.25, 10, 30), (0.05, 30, 50)]),
    (500, [(0.40, 1, 15), (0.35, 15, 40), (0.25, 40, 80)]),
    (2_000, [(0.25, 1, 20), (0.35, 20, 60), (0.40, 60, 120)]),
    (20_000, [(0.15, 1, 30), (0.30, 30, 100), (0.55, 100, 0)]),
    (50_000, [(0.10, 1, 40), (0.25, 40, 150), (0.65, 150, 0)]),
    (100_000, [(0.05, 1, 50), (0.15, 50, 180), (0.80, 180, 0)]),
];

/// Light band ceiling, interpolated between this row's and the next row's
fn light_ceiling(row: usize, score: u64) -> u32 {
    let (threshold, bands) = BAND_TIERS[row];
    let start = bands[0].2;
    match BAND_TIERS.get(row + 1) {
        Some(&(next_threshold, next_bands)) => {
            let end = next_bands[0].2;
            let span = next_threshold - threshold;
            let progress = (score - threshold).min(span);
            start + ((end - start) as u64 * progress / span) as u32
        }
        None => start,
    }
}

/// Read-only difficulty service
#[derive(Debug, Clone)]
pub struct DifficultyScaler {
    base_spawn_interval: u32,
    min_spawn_interval: u32,
    spawn_score_divisor: u64,
    base_speed: f32,
    min_speed: f32,
    speed_jitter: f32,
    speed_step_score: u64,
    max_speed_steps: u64,
    max_strength: u32,
}

impl DifficultyScaler {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            base_spawn_interval: tuning.base_spawn_interval,
            min_spawn_interval: tuning.min_spawn_interval,
            spawn_score_divisor: tuning.spawn_score_divisor.max(1),
            base_speed: tuning.base_hazard_speed,
            min_speed: tuning.min_hazard_speed,
            speed_jitter: tuning.hazard_speed_jitter,
            speed_step_score: tuning.speed_step_score.max(1),
            max_speed_steps: tuning.max_speed_steps,
            max_strength: tuning.max_hazard_strength.max(1),
        }
    }

    /// Ticks between hazard spawns, never below the floor
    pub fn spawn_interval(&self, score: u64) -> u32 {
        let reduction = score / self.spawn_score_divisor;
        let interval = (self.base_spawn_interval as u64).saturating_sub(reduction);
        interval.max(self.min_spawn_interval as u64) as u32
    }

    /// Weighted strength bands for the current score
    pub fn strength_table(&self, score: u64) -> Vec<StrengthBand> {
        let row = BAND_TIERS.iter().rposition(|(threshold, _)| score >= *threshold);

        match row {
            None => {
                // Opening: light hazards only, ceiling creeping up with score
                let ceiling = (5 + score / 30).min(self.max_strength as u64) as u32;
                vec![StrengthBand {
                    weight: 1.0,
                    min: 1,
                    max: ceiling.max(1),
                }]
            }
            Some(row) => BAND_TIERS[row]
                .1
                .iter()
                .enumerate()
                .map(|(i, &(weight, min, max))| {
                    let max = if i == 0 { light_ceiling(row, score) } else { max };
                    let max = if max == 0 { self.max_strength } else { max.min(self.max_strength) };
                    StrengthBand {
                        weight,
                        min: min.min(max),
                        max,
                    }
                })
                .collect(),
        }
    }

    /// Base fall speed and the jitter range around it
    pub fn speed_range(&self, score: u64) -> (f32, f32) {
        let steps = (score / self.speed_step_score).min(self.max_speed_steps);
        let base = self.base_speed + steps as f32;
        let half = self.speed_jitter / 2.0;
        ((base - half).max(self.min_speed), (base + half).max(self.min_speed))
    }

    /// Draw a hazard strength from the table
    pub fn sample_strength(&self, score: u64, rng: &mut dyn RandomSource) -> u32 {
        let table = self.strength_table(score);
        let total: f32 = table.iter().map(|b| b.weight).sum();
        let mut roll = rng.next_f32() * total;
        let mut chosen = table[table.len() - 1];
        for band in &table {
            if roll < band.weight {
                chosen = *band;
                break;
            }
            roll -= band.weight;
        }
        rng.int_inclusive(chosen.min, chosen.max)
    }

    /// Draw a fall speed: stepped base plus symmetric jitter, floored
    pub fn sample_speed(&self, score: u64, rng: &mut dyn RandomSource) -> f32 {
        let steps = (score / self.speed_step_score).min(self.max_speed_steps);
        let base = self.base_speed + steps as f32;
        let speed = base + (rng.next_f32() - 0.5) * self.speed_jitter;
        speed.max(self.min_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRandom, seeded};

    fn scaler() -> DifficultyScaler {
        DifficultyScaler::new(&Tuning::default())
    }

    #[test]
    fn test_spawn_interval_curve() {
        let s = scaler();
        assert_eq!(s.spawn_interval(0), 120);
        assert_eq!(s.spawn_interval(200), 110);
        assert_eq!(s.spawn_interval(1_800), 30);
        assert_eq!(s.spawn_interval(u64::MAX), 30);
    }

    #[test]
    fn test_opening_table_is_light() {
        let s = scaler();
        let table = s.strength_table(0);
        assert_eq!(table, vec![StrengthBand { weight: 1.0, min: 1, max: 5 }]);
        assert_eq!(s.strength_table(90)[0].max, 8);
    }

    #[test]
    fn test_light_ceiling_scales_within_row() {
        let s = scaler();
        assert_eq!(s.strength_table(100)[0].max, 10);
        assert_eq!(s.strength_table(300)[0].max, 12);
        assert_eq!(s.strength_table(499)[0].max, 14);
        assert_eq!(s.strength_table(500)[0].max, 15);
        assert_eq!(s.strength_table(1_250)[0].max, 17);
        assert_eq!(s.strength_table(1_000_000)[0].max, 50);

        let mut last = 0;
        for score in (0..120_000).step_by(250) {
            let ceiling = s.strength_table(score)[0].max;
            assert!(ceiling >= last, "light ceiling dropped at {score}");
            last = ceiling;
        }
    }

    #[test]
    fn test_heavy_mass_grows_and_light_band_remains() {
        let s = scaler();
        let mut last_heavy = 0.0;
        for score in [0, 100, 500, 2_000, 20_000, 50_000, 100_000, 1_000_000] {
            let table = s.strength_table(score);
            assert_eq!(table[0].min, 1);
            assert!(table[0].weight > 0.0);
            let heavy = if table.len() > 1 { table[table.len() - 1].weight } else { 0.0 };
            assert!(heavy >= last_heavy, "heavy mass shrank at {score}");
            last_heavy = heavy;
            for band in &table {
                assert!(band.max <= 199);
                assert!(band.min <= band.max);
            }
        }
        assert_eq!(s.strength_table(100_000).last().unwrap().max, 199);
    }

    #[test]
    fn test_sample_strength_picks_band() {
        let s = scaler();
        // First roll selects the band, second places the value inside it
        let mut rng = ScriptedRandom::new(vec![0.99, 0.0]);
        assert_eq!(s.sample_strength(100_000, &mut rng), 180);
        let mut rng = ScriptedRandom::new(vec![0.0, 0.0]);
        assert_eq!(s.sample_strength(100_000, &mut rng), 1);
    }

    #[test]
    fn test_sample_speed_floor_and_steps() {
        let s = scaler();
        let mut rng = ScriptedRandom::constant(0.0);
        assert_eq!(s.sample_speed(0, &mut rng), 0.8);
        let mut rng = ScriptedRandom::constant(0.5);
        assert_eq!(s.sample_speed(120, &mut rng), 3.0);
        assert_eq!(s.sample_speed(10_000, &mut rng), 6.0);
        assert_eq!(s.speed_range(0), (0.8, 1.5));
    }

    #[test]
    fn test_samples_stay_in_bounds() {
        let s = scaler();
        let mut rng = seeded(7);
        for score in [0, 150, 700, 5_000, 60_000, 250_000] {
            for _ in 0..200 {
                let strength = s.sample_strength(score, &mut rng);
                assert!((1..=199).contains(&strength));
                let (lo, hi) = s.speed_range(score);
                let speed = s.sample_speed(score, &mut rng);
                assert!(speed >= lo && speed <= hi);
            }
        }
    }
}
