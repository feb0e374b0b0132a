//! Sequential-mode coders.
//!
//! Each coder here consumes one sample (or one spike) per call and carries
//! all necessary memory across calls: running moments, the last base,
//! rolling history buffers, the previous reconstruction. There is no
//! lookahead, which is what makes these suitable for online use — and why
//! sequential BSA cannot derive its own `shift`/`gain`.

mod bsa;
mod moving_window;
mod step_forward;
mod tbr;

pub use bsa::Bsa;
pub use moving_window::MovingWindow;
pub use step_forward::StepForward;
pub use tbr::Tbr;

use crate::spike::Spike;
use crate::Result;

/// Common contract for one-sample-at-a-time coders.
///
/// Override semantics match [`BatchCoder`](crate::batch::BatchCoder): an
/// explicitly passed parameter updates the persisted value for future
/// calls.
pub trait SequentialCoder {
    /// Per-call overrides accepted by `encode`.
    type EncodeParams: Default;
    /// Per-call overrides accepted by `decode`.
    type DecodeParams: Default;

    /// Encode one sample, returning a single spike.
    fn encode(&mut self, sample: f64, params: Self::EncodeParams) -> Result<Spike>;

    /// Reconstruct one sample from one spike.
    ///
    /// Fails with [`Error::Config`](crate::Error::Config) when a required
    /// adaptive parameter was never established by construction, a prior
    /// call, or an explicit override.
    fn decode(&mut self, spike: Spike, params: Self::DecodeParams) -> Result<f64>;
}

/// One step of the cumulative reconstruction shared by the TBR/SF/MW
/// decoders. The first call returns the start point (the spike is ignored);
/// every later call steps the previous output by the spike sign times the
/// threshold.
pub(crate) fn step_reconstruction(
    previous: &mut Option<f64>,
    spike: Spike,
    start_point: f64,
    threshold: f64,
) -> f64 {
    let value = match *previous {
        None => start_point,
        Some(prev) => prev + spike.sign() * threshold,
    };
    *previous = Some(value);
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_reconstruction_first_call_is_start_point() {
        let mut previous = None;
        let first = step_reconstruction(&mut previous, Spike::Positive, 3.0, 0.5);
        assert_eq!(first, 3.0);

        let second = step_reconstruction(&mut previous, Spike::Positive, 3.0, 0.5);
        assert_eq!(second, 3.5);

        let third = step_reconstruction(&mut previous, Spike::Negative, 3.0, 0.5);
        assert_eq!(third, 3.0);
    }
}
