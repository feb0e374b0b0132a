//! Threshold-Based Representation, batch mode.
//!
//! Spikes fire where the first difference of the signal exceeds a threshold
//! proportional to the dispersion of the differences over the whole series.

use ndarray::Array1;
use tracing::debug;

use crate::batch::{accumulate, BatchCoder};
use crate::params::{self, ThresholdParams};
use crate::spike::{Spike, SpikeTrain};
use crate::Result;

/// Batch threshold-based coder.
///
/// Unless overridden, the threshold defaults to
/// `mean(diff) + f_factor * std(diff)` computed over the entire difference
/// sequence (padded with a leading zero so lengths match). The start point
/// defaults to the first sample and is refreshed on every encode call.
#[derive(Debug, Clone)]
pub struct Tbr {
    f_factor: f64,
    start_point: Option<f64>,
    threshold: Option<f64>,
}

impl Tbr {
    /// Create a coder with the given dispersion factor.
    pub fn new(f_factor: f64) -> Self {
        Self {
            f_factor,
            start_point: None,
            threshold: None,
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

    /// Start point established by the last call, if any.
    pub fn start_point(&self) -> Option<f64> {
        self.start_point
    }
}

impl BatchCoder for Tbr {
    type EncodeParams = ThresholdParams;
    type DecodeParams = ThresholdParams;

    fn encode(&mut self, signal: &[f64], params: ThresholdParams) -> Result<SpikeTrain> {
        if signal.is_empty() {
            return Ok(Vec::new());
        }
        params::resolve_fresh(&mut self.start_point, params.start_point, signal[0]);

        // First difference, padded with a leading zero so output length
        // matches input length.
        let diff = Array1::from_shape_fn(signal.len(), |t| {
            if t == 0 {
                0.0
            } else {
                signal[t] - signal[t - 1]
            }
        });

        let default_threshold = diff.mean().unwrap_or(0.0) + self.f_factor * diff.std(0.0);
        let threshold =
            params::resolve_fresh(&mut self.threshold, params.threshold, default_threshold);
        if params.threshold.is_none() {
            debug!(threshold, "derived TBR threshold from series statistics");
        }

        Ok(diff
            .iter()
            .map(|&d| Spike::from_deviation(d, threshold))
            .collect())
    }

    fn decode(&mut self, spikes: &[Spike], params: ThresholdParams) -> Result<Vec<f64>> {
        let start_point =
            params::resolve_required(&mut self.start_point, params.start_point, "start_point")?;
        let threshold =
            params::resolve_required(&mut self.threshold, params.threshold, "threshold")?;
        Ok(accumulate(spikes, start_point, threshold))
    }
}
