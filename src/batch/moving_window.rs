//! Moving-Window coder, batch mode.

use crate::batch::{accumulate, BatchCoder};
use crate::params::{self, StartParams, ThresholdParams};
use crate::spike::{Spike, SpikeTrain};
use crate::Result;

/// Batch moving-window coder.
///
/// The base compared against sample `t` is the mean of the `window` samples
/// before `t`, excluding `t` itself. The partial window at the start of the
/// series is averaged over the samples actually seen, not over zero
/// padding.
#[derive(Debug, Clone)]
pub struct MovingWindow {
    threshold: f64,
    window: usize,
    start_point: Option<f64>,
}

impl MovingWindow {
    /// Create a coder with the given firing threshold and window length.
    ///
    /// # Panics
    /// Panics if `window` is zero.
    pub fn new(threshold: f64, window: usize) -> Self {
        assert!(window > 0, "window must be at least 1");
        Self {
            threshold,
            window,
            start_point: None,
        }
    }

    /// Current firing threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Window length fixed at construction.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Start point established by the last call, if any.
    pub fn start_point(&self) -> Option<f64> {
        self.start_point
    }

    /// Mean of the trailing window ending at `t` (inclusive).
    fn trailing_mean(&self, signal: &[f64], t: usize) -> f64 {
        let lo = t.saturating_sub(self.window - 1);
        let count = t + 1 - lo;
        signal[lo..=t].iter().sum::<f64>() / count as f64
    }
}

impl BatchCoder for MovingWindow {
    type EncodeParams = StartParams;
    type DecodeParams = ThresholdParams;

    fn encode(&mut self, signal: &[f64], params: StartParams) -> Result<SpikeTrain> {
        if signal.is_empty() {
            return Ok(Vec::new());
        }
        params::resolve_fresh(&mut self.start_point, params.start_point, signal[0]);

        // The base sequence is shifted one step right so the base at t
        // never includes sample t itself.
        let spikes = (0..signal.len())
            .map(|t| {
                let base = self.trailing_mean(signal, t.saturating_sub(1));
                Spike::from_deviation(signal[t] - base, self.threshold)
            })
            .collect();
        Ok(spikes)
    }

    fn decode(&mut self, spikes: &[Spike], params: ThresholdParams) -> Result<Vec<f64>> {
        let start_point =
            params::resolve_required(&mut self.start_point, params.start_point, "start_point")?;
        let threshold = params::resolve_seeded(&mut self.threshold, params.threshold);
        Ok(accumulate(spikes, start_point, threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_window_mean_base() {
        let mut coder = MovingWindow::new(0.5, 2);
        let spikes = coder
            .encode(&[0.0, 1.0, 2.0, 1.0, 0.0], StartParams::default())
            .unwrap();
        // bases used per step: [0, 0, 0.5, 1.5, 1.5]
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
    fn test_partial_window_uses_real_sample_count() {
        // With a window longer than the series, bases are running means:
        // [2, 2, 3] for signal [2, 4, 6] -> deviations [0, 2, 3]
        let mut coder = MovingWindow::new(1.0, 10);
        let spikes = coder
            .encode(&[2.0, 4.0, 6.0], StartParams::default())
            .unwrap();
        assert_eq!(
            spikes,
            vec![Spike::Silent, Spike::Positive, Spike::Positive]
        );
    }

    #[test]
    fn test_first_sample_never_fires() {
        let mut coder = MovingWindow::new(0.5, 3);
        let spikes = coder
            .encode(&[42.0, 42.0], StartParams::default())
            .unwrap();
        assert_eq!(spikes[0], Spike::Silent);
    }

    #[test]
    fn test_decode_reconstruction() {
        let mut coder = MovingWindow::new(0.5, 2);
        let out = coder
            .decode(
                &[Spike::Silent, Spike::Positive, Spike::Negative],
                ThresholdParams::default().with_start_point(2.0),
            )
            .unwrap();
        assert_eq!(out, vec![2.0, 2.5, 2.0]);
    }

    #[test]
    fn test_decode_fails_without_start_point() {
        let mut coder = MovingWindow::new(0.5, 2);
        let err = coder
            .decode(&[Spike::Positive], ThresholdParams::default())
            .unwrap_err();
        assert!(matches!(err, Error::Config("start_point")));
    }

    #[test]
    fn test_empty_signal() {
        let mut coder = MovingWindow::new(0.5, 4);
        let spikes = coder.encode(&[], StartParams::default()).unwrap();
        assert!(spikes.is_empty());
        assert!(coder.start_point().is_none());
    }

    #[test]
    #[should_panic(expected = "window must be at least 1")]
    fn test_zero_window_panics() {
        MovingWindow::new(0.5, 0);
    }
}
