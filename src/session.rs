//! Game session: the simulation plus its collaborators
//!
//! A [`Session`] owns the [`GameState`], the random source, the best-score
//! store and an optional event sink. Hosts drive it one tick at a time and
//! read [`Snapshot`]s for drawing.

use serde::Serialize;

use crate::error::ConfigError;
use crate::highscores::ScoreStore;
use crate::sim::{
    self, Ally, GameEvent, GamePhase, GameState, Hazard, InputSource, Pickup, PlayerState,
    Projectile, RandomSource, TickInput, seeded,
};
use crate::tuning::Tuning;

/// Receives every event raised by a tick (audio, analytics, effects)
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

/// Read-only view of one tick's result, for presentation
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub time_ticks: u64,
    pub score: u64,
    pub best_score: u64,
    pub ally_capacity: u32,
    pub player: &'a PlayerState,
    pub projectiles: &'a [Projectile],
    pub hazards: &'a [Hazard],
    pub pickups: &'a [Pickup],
    pub allies: &'a [Ally],
}

impl Snapshot<'_> {
    /// One-line status panel
    pub fn hud_line(&self) -> String {
        let p = self.player;
        let mut line = format!(
            "Score: {} | Best: {} | HP: {} | Damage: {}x{}x{} | Shots: {} | Allies: {}/{}",
            self.score,
            self.best_score,
            p.hp,
            p.base_damage,
            p.permanent_damage,
            p.temporary_damage,
            p.fire_tier,
            self.allies.len(),
            self.ally_capacity,
        );
        if p.damage_timer > 0 {
            line.push_str(&format!(" | Boost: {}s", p.damage_timer / 60));
        }
        line
    }
}

/// One play session and its collaborators
pub struct Session {
    state: GameState,
    rng: Box<dyn RandomSource>,
    store: Box<dyn ScoreStore>,
    sink: Option<Box<dyn EventSink>>,
    best_score: u64,
}

impl Session {
    /// Build a session; rejects an invalid tuning before any tick runs
    pub fn new(
        tuning: Tuning,
        rng: Box<dyn RandomSource>,
        store: Box<dyn ScoreStore>,
    ) -> Result<Self, ConfigError> {
        let state = GameState::new(tuning)?;
        let best_score = store.load_best_score();
        log::info!("Session started (best score {})", best_score);
        Ok(Self {
            state,
            rng,
            store,
            sink: None,
            best_score,
        })
    }

    /// Session driven by a seeded PCG stream
    pub fn with_seed(tuning: Tuning, seed: u64, store: Box<dyn ScoreStore>) -> Result<Self, ConfigError> {
        log::info!("Seeding run with {}", seed);
        Self::new(tuning, Box::new(seeded(seed)), store)
    }

    pub fn with_event_sink(mut self, sink: Box<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Run one tick with the given input
    pub fn tick(&mut self, input: &TickInput) {
        let was_over = self.state.is_game_over();
        sim::tick(&mut self.state, input, self.rng.as_mut());

        if let Some(sink) = self.sink.as_mut() {
            for event in &self.state.events {
                sink.on_event(event);
            }
        }

        if !was_over && self.state.is_game_over() {
            self.record_best();
        }
    }

    /// Poll `input` once, then tick
    pub fn step(&mut self, input: &mut dyn InputSource) {
        let input = input.poll(&self.state);
        self.tick(&input);
    }

    fn record_best(&mut self) {
        let score = self.state.score;
        if score > self.best_score {
            log::info!("New best score {} (was {})", score, self.best_score);
            self.best_score = score;
            self.store.save_best_score(score);
        }
    }

    /// Start over from defaults, from any phase
    pub fn reset(&mut self) {
        self.state.reset();
        log::info!("Session reset");
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for tooling and scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let registry = &self.state.registry;
        debug_assert!(registry.hazards.iter().all(|h| h.strength > 0.0));
        Snapshot {
            phase: self.state.phase,
            time_ticks: self.state.time_ticks,
            score: self.state.score,
            best_score: self.best_score,
            ally_capacity: self.state.tuning.ally_capacity,
            player: &self.state.player,
            projectiles: &registry.projectiles,
            hazards: &registry.hazards,
            pickups: &registry.pickups,
            allies: &registry.allies,
        }
    }
}
