//! BSA (filter-matching) coder, sequential mode.

use crate::params::{self, ScaleParams};
use crate::sequential::SequentialCoder;
use crate::spike::Spike;
use crate::Result;

/// Streaming BSA coder.
///
/// `shift` and `gain` cannot be derived without whole-series lookahead, so
/// encoding fails with a configuration error until both are supplied — by a
/// per-call override or a calibration value taken from a batch pass over
/// representative data. Normalized samples are clamped at zero from below
/// so a mis-calibrated shift cannot distort the kernel match with negative
/// history.
#[derive(Debug, Clone)]
pub struct Bsa {
    threshold: f64,
    kernel: Vec<f64>,
    shift: Option<f64>,
    gain: Option<f64>,
    /// Normalized signal history, most recent first
    signal_history: Vec<f64>,
    /// Spike history, most recent first
    spike_history: Vec<Spike>,
    samples_seen: usize,
}

impl Bsa {
    /// Create a coder with the given residual-reduction threshold and FIR
    /// kernel.
    pub fn new(threshold: f64, kernel: Vec<f64>) -> Self {
        let len = kernel.len();
        Self {
            threshold,
            kernel,
            shift: None,
            gain: None,
            signal_history: vec![0.0; len],
            spike_history: vec![Spike::Silent; len],
            samples_seen: 0,
        }
    }

    /// Residual-reduction threshold fixed at construction.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// FIR kernel fixed at construction.
    pub fn kernel(&self) -> &[f64] {
        &self.kernel
    }

    /// Normalization shift established so far, if any.
    pub fn shift(&self) -> Option<f64> {
        self.shift
    }

    /// Normalization gain established so far, if any.
    pub fn gain(&self) -> Option<f64> {
        self.gain
    }

    /// Clear the signal and spike histories; shift/gain calibration
    /// persists.
    pub fn reset(&mut self) {
        self.signal_history.fill(0.0);
        self.spike_history.fill(Spike::Silent);
        self.samples_seen = 0;
    }
}

impl SequentialCoder for Bsa {
    type EncodeParams = ScaleParams;
    type DecodeParams = ScaleParams;

    fn encode(&mut self, sample: f64, params: ScaleParams) -> Result<Spike> {
        let shift = params::resolve_required(&mut self.shift, params.shift, "shift")?;
        let gain = params::resolve_required(&mut self.gain, params.gain, "gain")?;

        let normalized = ((sample - shift) / gain).max(0.0);
        self.samples_seen += 1;

        if !self.signal_history.is_empty() {
            self.signal_history.rotate_right(1);
            self.signal_history[0] = normalized;
        }

        // Only the slots holding real samples take part in the match; the
        // rest of the buffer is still pre-signal padding.
        let len = self.kernel.len().min(self.samples_seen);
        let mut err1 = 0.0;
        let mut err2 = 0.0;
        for i in 0..len {
            err1 += (self.signal_history[i] - self.kernel[i]).abs();
            err2 += self.signal_history[i].abs();
        }

        if err1 <= err2 - self.threshold {
            for i in 0..len {
                self.signal_history[i] -= self.kernel[i];
            }
            Ok(Spike::Positive)
        } else {
            Ok(Spike::Silent)
        }
    }

    fn decode(&mut self, spike: Spike, params: ScaleParams) -> Result<f64> {
        let shift = params::resolve_required(&mut self.shift, params.shift, "shift")?;
        let gain = params::resolve_required(&mut self.gain, params.gain, "gain")?;

        if !self.spike_history.is_empty() {
            self.spike_history.rotate_right(1);
            self.spike_history[0] = spike;
        }
        let acc: f64 = self
            .spike_history
            .iter()
            .zip(&self.kernel)
            .map(|(s, k)| s.sign() * k)
            .sum();
        Ok(acc * gain + shift)
    }
}
