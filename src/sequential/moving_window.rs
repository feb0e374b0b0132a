//! Moving-Window coder, sequential mode.

use crate::params::{self, StartParams, ThresholdParams};
use crate::sequential::{step_reconstruction, SequentialCoder};
use crate::spike::Spike;
use crate::stats::WindowBuffer;
use crate::Result;

/// Streaming moving-window coder.
///
/// The base for each incoming sample is the mean of the previous `window`
/// samples, taken from a circular buffer before the sample is inserted, so
/// the base never includes the sample being classified. During warmup the
/// mean runs over the samples actually seen; the very first sample is its
/// own base and stays silent.
#[derive(Debug, Clone)]
pub struct MovingWindow {
    threshold: f64,
    start_point: Option<f64>,
    history: WindowBuffer,
    previous_output: Option<f64>,
}

impl MovingWindow {
    /// Create a coder with the given firing threshold and window length.
    ///
    /// # Panics
    /// Panics if `window` is zero.
    pub fn new(threshold: f64, window: usize) -> Self {
        Self {
            threshold,
            start_point: None,
            history: WindowBuffer::new(window),
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

    /// Clear the window history and decode-side memory; the start point
    /// persists.
    pub fn reset(&mut self) {
        self.history.reset();
        self.previous_output = None;
    }
}

impl SequentialCoder for MovingWindow {
    type EncodeParams = StartParams;
    type DecodeParams = ThresholdParams;

    fn encode(&mut self, sample: f64, params: StartParams) -> Result<Spike> {
        params::resolve_lazy(&mut self.start_point, params.start_point, sample);

        let base = self.history.mean().unwrap_or(sample);
        self.history.push(sample);
        Ok(Spike::from_deviation(sample - base, self.threshold))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_matches_batch_trace() {
        let mut coder = MovingWindow::new(0.5, 2);
        let signal = [0.0, 1.0, 2.0, 1.0, 0.0];
        let spikes: Vec<Spike> = signal
            .iter()
            .map(|&x| coder.encode(x, StartParams::default()).unwrap())
            .collect();
        assert_eq!(
            spikes,
            vec![
                Spike::Silent,
                Spike::Positive,
                Spike::Positive,
                Spike::Silent,
                Spike::Negative,
            ]
        );
    }

    #[test]
    fn test_first_sample_is_its_own_base() {
        let mut coder = MovingWindow::new(0.1, 4);
        assert_eq!(
            coder.encode(99.0, StartParams::default()).unwrap(),
            Spike::Silent
        );
    }

    #[test]
    fn test_warmup_mean_is_exact() {
        // Window 4, only two samples seen: the base for the third call is
        // the mean of two samples, not a zero-padded mean of four.
        let mut coder = MovingWindow::new(0.5, 4);
        coder.encode(2.0, StartParams::default()).unwrap();
        coder.encode(4.0, StartParams::default()).unwrap();
        // Base is (2+4)/2 = 3; sample 3.2 deviates by 0.2 -> silent
        assert_eq!(
            coder.encode(3.2, StartParams::default()).unwrap(),
            Spike::Silent
        );
    }

    #[test]
    fn test_decode_stream() {
        let mut coder = MovingWindow::new(0.5, 3);
        let p = ThresholdParams::default().with_start_point(2.0);
        assert_eq!(coder.decode(Spike::Silent, p).unwrap(), 2.0);
        assert_eq!(
            coder
                .decode(Spike::Positive, ThresholdParams::default())
                .unwrap(),
            2.5
        );
    }

    #[test]
    fn test_decode_fails_without_start_point() {
        let mut coder = MovingWindow::new(0.5, 3);
        let err = coder
            .decode(Spike::Positive, ThresholdParams::default())
            .unwrap_err();
        assert!(matches!(err, Error::Config("start_point")));
    }

    #[test]
    fn test_reset_clears_history() {
        let mut coder = MovingWindow::new(0.5, 2);
        coder.encode(0.0, StartParams::default()).unwrap();
        coder.encode(10.0, StartParams::default()).unwrap();
        coder.reset();
        // Fresh baseline after reset: first sample is silent again
        assert_eq!(
            coder.encode(100.0, StartParams::default()).unwrap(),
            Spike::Silent
        );
        // Start point survives the reset
        assert_eq!(coder.start_point(), Some(0.0));
    }
}
