//! The ternary spike alphabet.
//!
//! Every encoder in this crate emits values from {-1, 0, +1} and nothing
//! else; the [`Spike`] enum makes that closed alphabet a type-level fact.

use serde::{Deserialize, Serialize};

/// A single spike event: the signal went up, went down, or nothing happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spike {
    /// Signal decreased beyond the threshold (-1)
    Negative,
    /// No event (0)
    Silent,
    /// Signal increased beyond the threshold (+1)
    Positive,
}

impl Default for Spike {
    fn default() -> Self {
        Spike::Silent
    }
}

impl Spike {
    /// Numeric value of the spike: -1.0, 0.0 or +1.0.
    pub fn sign(self) -> f64 {
        match self {
            Spike::Negative => -1.0,
            Spike::Silent => 0.0,
            Spike::Positive => 1.0,
        }
    }

    /// Whether this spike carries an event (non-zero).
    pub fn is_firing(self) -> bool {
        !matches!(self, Spike::Silent)
    }

    /// Classify a deviation from a reference level against a threshold.
    ///
    /// Fires positive when the deviation strictly exceeds `threshold`,
    /// negative when it falls strictly below `-threshold`. NaN deviations
    /// or thresholds compare false on both sides and stay silent.
    pub fn from_deviation(deviation: f64, threshold: f64) -> Self {
        if deviation > threshold {
            Spike::Positive
        } else if deviation < -threshold {
            Spike::Negative
        } else {
            Spike::Silent
        }
    }
}

/// An ordered spike sequence, one spike per time step.
pub type SpikeTrain = Vec<Spike>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_values() {
        assert_eq!(Spike::Negative.sign(), -1.0);
        assert_eq!(Spike::Silent.sign(), 0.0);
        assert_eq!(Spike::Positive.sign(), 1.0);
    }

    #[test]
    fn test_from_deviation() {
        assert_eq!(Spike::from_deviation(0.6, 0.5), Spike::Positive);
        assert_eq!(Spike::from_deviation(-0.6, 0.5), Spike::Negative);
        assert_eq!(Spike::from_deviation(0.3, 0.5), Spike::Silent);

        // Boundary is inclusive on the silent side
        assert_eq!(Spike::from_deviation(0.5, 0.5), Spike::Silent);
        assert_eq!(Spike::from_deviation(-0.5, 0.5), Spike::Silent);
    }

    #[test]
    fn test_nan_stays_silent() {
        assert_eq!(Spike::from_deviation(f64::NAN, 0.5), Spike::Silent);
        assert_eq!(Spike::from_deviation(1.0, f64::NAN), Spike::Silent);
    }

    #[test]
    fn test_firing() {
        assert!(Spike::Positive.is_firing());
        assert!(Spike::Negative.is_firing());
        assert!(!Spike::Silent.is_firing());
    }
}
