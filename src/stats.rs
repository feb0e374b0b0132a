//! Streaming accumulators shared by the sequential coders.

/// Running mean and population variance over a stream of values.
///
/// Incremental update with `N` the count including the new value; the
/// variance term uses the mean from before the update:
///
/// ```text
/// V <- V*(N-1)/N + (M - x)^2 * (N-1)/N^2
/// M <- M*(N-1)/N + x/N
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunningMoments {
    count: u64,
    mean: f64,
    variance: f64,
}

impl RunningMoments {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one observation into the running moments.
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let n = self.count as f64;
        self.variance =
            self.variance * (n - 1.0) / n + (self.mean - value).powi(2) * (n - 1.0) / (n * n);
        self.mean = self.mean * (n - 1.0) / n + value / n;
    }

    /// Number of observations folded in so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running mean of the stream.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Running population variance of the stream.
    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Running population standard deviation of the stream.
    pub fn std(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Forget everything seen so far.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Fixed-size circular buffer with the exact-mean warmup the moving-window
/// coder needs: until the window fills, the mean is taken over the samples
/// actually seen rather than over zero padding.
#[derive(Debug, Clone)]
pub struct WindowBuffer {
    slots: Vec<f64>,
    seen: usize,
}

impl WindowBuffer {
    /// Create a buffer holding the last `window` samples.
    ///
    /// # Panics
    /// Panics if `window` is zero.
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "window must be at least 1");
        Self {
            slots: vec![0.0; window],
            seen: 0,
        }
    }

    /// Number of samples pushed so far.
    pub fn seen(&self) -> usize {
        self.seen
    }

    /// Whether no sample has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.seen == 0
    }

    /// Mean over the last `window` samples, or over everything seen while
    /// the buffer is still filling. `None` before the first push.
    pub fn mean(&self) -> Option<f64> {
        if self.seen == 0 {
            return None;
        }
        // Unfilled slots are zero, so the full-buffer sum is also the
        // warmup sum.
        let filled = self.seen.min(self.slots.len());
        Some(self.slots.iter().sum::<f64>() / filled as f64)
    }

    /// Insert a sample, overwriting the oldest once the window is full.
    pub fn push(&mut self, value: f64) {
        let idx = self.seen % self.slots.len();
        self.slots[idx] = value;
        self.seen += 1;
    }

    /// Forget everything seen so far.
    pub fn reset(&mut self) {
        self.slots.fill(0.0);
        self.seen = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn population_stats(values: &[f64]) -> (f64, f64) {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        (mean, var)
    }

    #[test]
    fn test_running_moments_match_population_stats() {
        let values = [1.0, 2.0, 3.0, -1.0, 0.5, 4.0];
        let mut moments = RunningMoments::new();

        for (i, &v) in values.iter().enumerate() {
            moments.update(v);
            let (mean, var) = population_stats(&values[..=i]);
            assert_relative_eq!(moments.mean(), mean, max_relative = 1e-12);
            assert_relative_eq!(moments.variance(), var, max_relative = 1e-9);
        }
        assert_eq!(moments.count(), values.len() as u64);
    }

    #[test]
    fn test_running_moments_single_value() {
        let mut moments = RunningMoments::new();
        moments.update(5.0);
        assert_relative_eq!(moments.mean(), 5.0);
        assert_relative_eq!(moments.variance(), 0.0);
        assert_relative_eq!(moments.std(), 0.0);
    }

    #[test]
    fn test_running_moments_reset() {
        let mut moments = RunningMoments::new();
        moments.update(2.0);
        moments.update(4.0);
        moments.reset();
        assert_eq!(moments.count(), 0);
        assert_eq!(moments.mean(), 0.0);
        assert_eq!(moments.variance(), 0.0);
    }

    #[test]
    fn test_window_buffer_warmup_mean() {
        let mut buf = WindowBuffer::new(3);
        assert!(buf.mean().is_none());

        buf.push(3.0);
        assert_relative_eq!(buf.mean().unwrap(), 3.0);

        buf.push(1.0);
        assert_relative_eq!(buf.mean().unwrap(), 2.0);
    }

    #[test]
    fn test_window_buffer_rolls() {
        let mut buf = WindowBuffer::new(2);
        buf.push(1.0);
        buf.push(2.0);
        buf.push(5.0); // evicts 1.0
        assert_relative_eq!(buf.mean().unwrap(), 3.5);
        assert_eq!(buf.seen(), 3);
    }

    #[test]
    fn test_window_buffer_reset() {
        let mut buf = WindowBuffer::new(2);
        buf.push(1.0);
        buf.reset();
        assert!(buf.is_empty());
        assert!(buf.mean().is_none());
    }

    #[test]
    #[should_panic(expected = "window must be at least 1")]
    fn test_zero_window_panics() {
        WindowBuffer::new(0);
    }
}
