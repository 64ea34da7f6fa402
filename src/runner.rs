//! Fixed-step scheduling
//!
//! Hosts call [`FixedStepRunner::advance`] once per frame with the real
//! elapsed time; the runner converts it into whole simulation ticks.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::session::Session;
use crate::sim::InputSource;

/// Longest frame the runner will try to catch up on
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FixedStepRunner {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedStepRunner {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStepRunner {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    /// Run as many ticks as `frame_dt` covers; returns ticks run
    pub fn advance(
        &mut self,
        session: &mut Session,
        input: &mut dyn InputSource,
        frame_dt: f32,
    ) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            session.step(input);
            self.accumulator -= self.step;
            substeps += 1;
        }

        // Drop backlog we refused to simulate
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        substeps
    }

    /// Fraction of a tick left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }
}
