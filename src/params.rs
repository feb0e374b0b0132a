//! Per-call parameter overrides and the merge rules that resolve them.
//!
//! Every coder keeps its adaptive parameters in option slots. A call may
//! override any of them; an override always updates the persisted value for
//! future calls. Resolution happens in a single merge step per slot, in one
//! of four flavors:
//!
//! - **required** — override, else the stored value, else a configuration
//!   error (decode-side parameters, sequential BSA shift/gain)
//! - **lazy** — override, else the stored value, else a default that is
//!   stored on first use
//! - **fresh** — override, else a default recomputed from this call's input;
//!   the slot is refreshed either way
//! - **seeded** — override, else the constructor-seeded value

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Overrides for TBR encode and for TBR/SF/MW decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdParams {
    /// Reconstruction seed / first-sample reference
    pub start_point: Option<f64>,
    /// Spike-firing threshold
    pub threshold: Option<f64>,
}

impl ThresholdParams {
    /// Override the start point for this call and future calls.
    pub fn with_start_point(mut self, start_point: f64) -> Self {
        self.start_point = Some(start_point);
        self
    }

    /// Override the threshold for this call and future calls.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }
}

/// Overrides for SF encode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseParams {
    /// Reconstruction seed / first-sample reference
    pub start_point: Option<f64>,
    /// Tracked base level the signal is compared against
    pub base: Option<f64>,
}

impl BaseParams {
    /// Override the start point for this call and future calls.
    pub fn with_start_point(mut self, start_point: f64) -> Self {
        self.start_point = Some(start_point);
        self
    }

    /// Override the base level for this call and future calls.
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = Some(base);
        self
    }
}

/// Overrides for MW encode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StartParams {
    /// Reconstruction seed / first-sample reference
    pub start_point: Option<f64>,
}

impl StartParams {
    /// Override the start point for this call and future calls.
    pub fn with_start_point(mut self, start_point: f64) -> Self {
        self.start_point = Some(start_point);
        self
    }
}

/// Overrides for BSA encode and decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleParams {
    /// Additive offset applied before/after the kernel match
    pub shift: Option<f64>,
    /// Multiplicative scale applied before/after the kernel match
    pub gain: Option<f64>,
}

impl ScaleParams {
    /// Override the shift for this call and future calls.
    pub fn with_shift(mut self, shift: f64) -> Self {
        self.shift = Some(shift);
        self
    }

    /// Override the gain for this call and future calls.
    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = Some(gain);
        self
    }
}

/// Required slot: the override wins and persists, else the stored value,
/// else a configuration error naming the parameter.
pub(crate) fn resolve_required(
    slot: &mut Option<f64>,
    override_value: Option<f64>,
    name: &'static str,
) -> Result<f64> {
    if let Some(v) = override_value {
        *slot = Some(v);
    }
    slot.ok_or(Error::Config(name))
}

/// Lazily defaulted slot: the override wins and persists, else the stored
/// value, else the default is stored and used.
pub(crate) fn resolve_lazy(
    slot: &mut Option<f64>,
    override_value: Option<f64>,
    default: f64,
) -> f64 {
    let v = override_value.or(*slot).unwrap_or(default);
    *slot = Some(v);
    v
}

/// Recomputed slot: the override wins, else the default; the slot is
/// refreshed for this call either way.
pub(crate) fn resolve_fresh(
    slot: &mut Option<f64>,
    override_value: Option<f64>,
    default: f64,
) -> f64 {
    let v = override_value.unwrap_or(default);
    *slot = Some(v);
    v
}

/// Constructor-seeded slot: the override wins and persists, else the
/// current value.
pub(crate) fn resolve_seeded(slot: &mut f64, override_value: Option<f64>) -> f64 {
    if let Some(v) = override_value {
        *slot = v;
    }
    *slot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_required_errors_when_unset() {
        let mut slot = None;
        let err = resolve_required(&mut slot, None, "threshold").unwrap_err();
        assert!(matches!(err, Error::Config("threshold")));
    }

    #[test]
    fn test_resolve_required_persists_override() {
        let mut slot = None;
        assert_eq!(resolve_required(&mut slot, Some(2.0), "x").unwrap(), 2.0);
        // Stored value survives into the next call
        assert_eq!(resolve_required(&mut slot, None, "x").unwrap(), 2.0);
    }

    #[test]
    fn test_resolve_lazy_keeps_first_value() {
        let mut slot = None;
        assert_eq!(resolve_lazy(&mut slot, None, 1.5), 1.5);
        // Later defaults do not displace the stored value
        assert_eq!(resolve_lazy(&mut slot, None, 9.0), 1.5);
        // But an explicit override does
        assert_eq!(resolve_lazy(&mut slot, Some(3.0), 9.0), 3.0);
    }

    #[test]
    fn test_resolve_fresh_recomputes() {
        let mut slot = Some(1.0);
        assert_eq!(resolve_fresh(&mut slot, None, 4.0), 4.0);
        assert_eq!(slot, Some(4.0));
        assert_eq!(resolve_fresh(&mut slot, Some(2.0), 4.0), 2.0);
    }

    #[test]
    fn test_resolve_seeded() {
        let mut slot = 0.5;
        assert_eq!(resolve_seeded(&mut slot, None), 0.5);
        assert_eq!(resolve_seeded(&mut slot, Some(0.25)), 0.25);
        assert_eq!(slot, 0.25);
    }

    #[test]
    fn test_builders() {
        let p = ThresholdParams::default()
            .with_start_point(1.0)
            .with_threshold(0.5);
        assert_eq!(p.start_point, Some(1.0));
        assert_eq!(p.threshold, Some(0.5));

        let p = ScaleParams::default().with_shift(-2.0).with_gain(4.0);
        assert_eq!(p.shift, Some(-2.0));
        assert_eq!(p.gain, Some(4.0));
    }
}
