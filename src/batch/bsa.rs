//! BSA (filter-matching) coder, batch mode.

use tracing::debug;

use crate::batch::BatchCoder;
use crate::params::{self, ScaleParams};
use crate::spike::{Spike, SpikeTrain};
use crate::Result;

/// Batch BSA coder.
///
/// Greedy matching pursuit against a fixed FIR kernel: a spike fires when
/// subtracting the kernel from the recent normalized history lowers the
/// residual by at least the threshold, and the kernel is then removed from
/// the retained history so the same shape cannot match twice. Decisions are
/// irrevocable. BSA never emits negative spikes.
///
/// `shift` defaults to the series minimum and `gain` to the series range,
/// derived once and persisted; sequential mode has no such lookahead and
/// requires both to be supplied.
#[derive(Debug, Clone)]
pub struct Bsa {
    threshold: f64,
    kernel: Vec<f64>,
    shift: Option<f64>,
    gain: Option<f64>,
}

impl Bsa {
    /// Create a coder with the given residual-reduction threshold and FIR
    /// kernel.
    pub fn new(threshold: f64, kernel: Vec<f64>) -> Self {
        Self {
            threshold,
            kernel,
            shift: None,
            gain: None,
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
}

impl BatchCoder for Bsa {
    type EncodeParams = ScaleParams;
    type DecodeParams = ScaleParams;

    fn encode(&mut self, signal: &[f64], params: ScaleParams) -> Result<SpikeTrain> {
        if signal.is_empty() {
            return Ok(Vec::new());
        }
        let min = signal.iter().copied().fold(f64::INFINITY, f64::min);
        let max = signal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let deriving = (params.shift.is_none() && self.shift.is_none())
            || (params.gain.is_none() && self.gain.is_none());
        let shift = params::resolve_lazy(&mut self.shift, params.shift, min);
        let gain = params::resolve_lazy(&mut self.gain, params.gain, max - min);
        if deriving {
            debug!(shift, gain, "derived BSA normalization from series range");
        }

        let mut residual: Vec<f64> = signal.iter().map(|&x| (x - shift) / gain).collect();
        let mut spikes = Vec::with_capacity(signal.len());
        for t in 0..residual.len() {
            let len = self.kernel.len().min(t + 1);
            // Most-recent-first window against the kernel front
            let mut err1 = 0.0;
            let mut err2 = 0.0;
            for i in 0..len {
                err1 += (residual[t - i] - self.kernel[i]).abs();
                err2 += residual[t - i].abs();
            }
            if err1 <= err2 - self.threshold {
                for i in 0..len {
                    residual[t - i] -= self.kernel[i];
                }
                spikes.push(Spike::Positive);
            } else {
                spikes.push(Spike::Silent);
            }
        }
        Ok(spikes)
    }

    fn decode(&mut self, spikes: &[Spike], params: ScaleParams) -> Result<Vec<f64>> {
        let shift = params::resolve_required(&mut self.shift, params.shift, "shift")?;
        let gain = params::resolve_required(&mut self.gain, params.gain, "gain")?;

        // Causal convolution of the spike train with the kernel
        let out = (0..spikes.len())
            .map(|t| {
                let len = self.kernel.len().min(t + 1);
                let acc: f64 = (0..len)
                    .map(|i| spikes[t - i].sign() * self.kernel[i])
                    .sum();
                acc * gain + shift
            })
            .collect();
        Ok(out)
    }
}
