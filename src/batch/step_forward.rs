//! Step-Forward coder, batch mode.

use crate::batch::{accumulate, BatchCoder};
use crate::params::{self, BaseParams, ThresholdParams};
use crate::spike::{Spike, SpikeTrain};
use crate::Result;

/// Batch step-forward coder.
///
/// Tracks a base level and fires when the signal departs from it by more
/// than the threshold; the base then steps toward the signal by exactly one
/// threshold increment per spike, regardless of how far the signal moved.
/// The scan is inherently left-to-right because each base update depends on
/// the spike just emitted.
#[derive(Debug, Clone)]
pub struct StepForward {
    threshold: f64,
    start_point: Option<f64>,
    base: Option<f64>,
}

impl StepForward {
    /// Create a coder with the given firing threshold.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_point: None,
            base: None,
        }
    }

    /// Current firing threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start point established by the last call, if any.
    pub fn start_point(&self) -> Option<f64> {
        self.start_point
    }

    /// Base level after the last encode call, if any.
    pub fn base(&self) -> Option<f64> {
        self.base
    }
}

impl BatchCoder for StepForward {
    type EncodeParams = BaseParams;
    type DecodeParams = ThresholdParams;

    fn encode(&mut self, signal: &[f64], params: BaseParams) -> Result<SpikeTrain> {
        if signal.is_empty() {
            return Ok(Vec::new());
        }
        let start_point =
            params::resolve_fresh(&mut self.start_point, params.start_point, signal[0]);
        let mut base = params::resolve_fresh(&mut self.base, params.base, start_point);

        let mut spikes = Vec::with_capacity(signal.len());
        spikes.push(Spike::Silent);
        for &sample in &signal[1..] {
            let spike = Spike::from_deviation(sample - base, self.threshold);
            base += spike.sign() * self.threshold;
            spikes.push(spike);
        }
        self.base = Some(base);
        Ok(spikes)
    }

    fn decode(&mut self, spikes: &[Spike], params: ThresholdParams) -> Result<Vec<f64>> {
        let start_point =
            params::resolve_required(&mut self.start_point, params.start_point, "start_point")?;
        let threshold = params::resolve_seeded(&mut self.threshold, params.threshold);
        Ok(accumulate(spikes, start_point, threshold))
    }
}
