//! Step-Forward coder, sequential mode.

use crate::params::{self, BaseParams, ThresholdParams};
use crate::sequential::{step_reconstruction, SequentialCoder};
use crate::spike::Spike;
use crate::Result;

/// Streaming step-forward coder.
///
/// Performs exactly one step of the batch scan per call: compare the sample
/// against the tracked base, emit the spike, move the base one threshold
/// increment toward the signal. Feeding a series sample-by-sample
/// reproduces the batch spike sequence exactly.
#[derive(Debug, Clone)]
pub struct StepForward {
    threshold: f64,
    start_point: Option<f64>,
    base: Option<f64>,
    previous_output: Option<f64>,
}

impl StepForward {
    /// Create a coder with the given firing threshold.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_point: None,
            base: None,
            previous_output: None,
        }
    }

    /// Current firing threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start point established so far, if any.
    pub fn start_point(&self) -> Option<f64> {
        self.start_point
    }

    /// Current base level, if established.
    pub fn base(&self) -> Option<f64> {
        self.base
    }

    /// Clear the decode-side memory; the base and start point persist.
    pub fn reset(&mut self) {
        self.previous_output = None;
    }
}

impl SequentialCoder for StepForward {
    type EncodeParams = BaseParams;
    type DecodeParams = ThresholdParams;

    fn encode(&mut self, sample: f64, params: BaseParams) -> Result<Spike> {
        let start_point =
            params::resolve_lazy(&mut self.start_point, params.start_point, sample);
        let base = params::resolve_lazy(&mut self.base, params.base, start_point);

        let spike = Spike::from_deviation(sample - base, self.threshold);
        self.base = Some(base + spike.sign() * self.threshold);
        Ok(spike)
    }

    fn decode(&mut self, spike: Spike, params: ThresholdParams) -> Result<f64> {
        let start_point =
            params::resolve_required(&mut self.start_point, params.start_point, "start_point")?;
        let threshold = params::resolve_seeded(&mut self.threshold, params.threshold);
        Ok(step_reconstruction(
            &mut self.previous_output,
            spike,
            start_point,
            threshold,
        ))
    }
}
