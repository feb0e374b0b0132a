//! Threshold-Based Representation, sequential mode.

use crate::params::{self, ThresholdParams};
use crate::sequential::{step_reconstruction, SequentialCoder};
use crate::spike::Spike;
use crate::stats::RunningMoments;
use crate::Result;

/// Streaming threshold-based coder.
///
/// Tracks the mean and variance of the first-difference stream
/// incrementally and fires against `mean + f_factor * std` recomputed on
/// every call, unless an explicit threshold pins it. The running statistic
/// deliberately differs from the batch coder's whole-series statistic; the
/// two converge as the stream grows.
#[derive(Debug, Clone)]
pub struct Tbr {
    f_factor: f64,
    start_point: Option<f64>,
    threshold: Option<f64>,
    previous_sample: Option<f64>,
    moments: RunningMoments,
    previous_output: Option<f64>,
}

impl Tbr {
    /// Create a coder with the given dispersion factor.
    pub fn new(f_factor: f64) -> Self {
        Self {
            f_factor,
            start_point: None,
            threshold: None,
            previous_sample: None,
            moments: RunningMoments::new(),
            previous_output: None,
        }
    }

    /// Dispersion factor fixed at construction.
    pub fn f_factor(&self) -> f64 {
        self.f_factor
    }

    /// Threshold established by the last call, if any.
    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    /// Start point established so far, if any.
    pub fn start_point(&self) -> Option<f64> {
        self.start_point
    }

    /// Clear streaming memory (previous sample, running moments, previous
    /// reconstruction) while keeping any established parameters.
    pub fn reset(&mut self) {
        self.previous_sample = None;
        self.moments.reset();
        self.previous_output = None;
    }
}

impl SequentialCoder for Tbr {
    type EncodeParams = ThresholdParams;
    type DecodeParams = ThresholdParams;

    fn encode(&mut self, sample: f64, params: ThresholdParams) -> Result<Spike> {
        params::resolve_lazy(&mut self.start_point, params.start_point, sample);

        // First call has no baseline; the difference is defined as zero.
        let diff = sample - self.previous_sample.unwrap_or(sample);
        self.previous_sample = Some(sample);

        self.moments.update(diff);
        let default_threshold = self.moments.mean() + self.f_factor * self.moments.std();
        let threshold =
            params::resolve_fresh(&mut self.threshold, params.threshold, default_threshold);

        Ok(Spike::from_deviation(diff, threshold))
    }

    fn decode(&mut self, spike: Spike, params: ThresholdParams) -> Result<f64> {
        let start_point =
            params::resolve_required(&mut self.start_point, params.start_point, "start_point")?;
        let threshold =
            params::resolve_required(&mut self.threshold, params.threshold, "threshold")?;
        Ok(step_reconstruction(
            &mut self.previous_output,
            spike,
            start_point,
            threshold,
        ))
    }
}
