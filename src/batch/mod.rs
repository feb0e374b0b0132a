//! Batch-mode coders.
//!
//! Each coder here transforms a complete ordered series in one call and may
//! derive adaptive parameters from whole-series statistics (TBR's threshold,
//! BSA's shift/gain). That lookahead is the one deliberate behavioral
//! difference from the [`crate::sequential`] coders, which track the same
//! statistics incrementally.

mod bsa;
mod moving_window;
mod step_forward;
mod tbr;

pub use bsa::Bsa;
pub use moving_window::MovingWindow;
pub use step_forward::StepForward;
pub use tbr::Tbr;

use crate::spike::{Spike, SpikeTrain};
use crate::Result;

/// Common contract for whole-series coders.
///
/// `encode` turns a signal into a spike train of the same length; `decode`
/// reconstructs an approximate signal from a spike train. Explicitly passed
/// overrides update the coder's persisted parameters for future calls;
/// omitted ones fall back to the persisted value or a scheme-specific
/// default derived from the input.
pub trait BatchCoder {
    /// Per-call overrides accepted by `encode`.
    type EncodeParams: Default;
    /// Per-call overrides accepted by `decode`.
    type DecodeParams: Default;

    /// Encode a complete signal into a spike train of the same length.
    fn encode(&mut self, signal: &[f64], params: Self::EncodeParams) -> Result<SpikeTrain>;

    /// Reconstruct a signal from a spike train.
    ///
    /// Fails with [`Error::Config`](crate::Error::Config) when a required
    /// adaptive parameter was never established by construction, a prior
    /// call, or an explicit override.
    fn decode(&mut self, spikes: &[Spike], params: Self::DecodeParams) -> Result<Vec<f64>>;
}

/// Cumulative reconstruction shared by the TBR/SF/MW decoders:
/// `signal[t] = signal[t-1] + spike[t] * threshold`, seeded by the start
/// point.
pub(crate) fn accumulate(spikes: &[Spike], start_point: f64, threshold: f64) -> Vec<f64> {
    let mut level = start_point;
    spikes
        .iter()
        .map(|s| {
            level += s.sign() * threshold;
            level
        })
        .collect()
}
