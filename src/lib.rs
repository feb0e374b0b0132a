//! # Spike Codec
//!
//! Converts real-valued time series into ternary spike trains over
//! {-1, 0, +1} and reconstructs approximate signals from them.
//!
//! ## Schemes
//!
//! - **TBR** (Threshold-Based Representation): spikes on first differences
//!   against a threshold estimated from the dispersion of the differences
//! - **SF** (Step-Forward): spikes when the signal departs from a tracked
//!   base level, which chases the signal one threshold step per spike
//! - **MW** (Moving-Window): like SF, but the base is the mean of the most
//!   recent `window` samples
//! - **BSA**: greedy matching pursuit against a fixed FIR kernel; decoding
//!   convolves the spike train with the same kernel
//!
//! Every scheme comes in two modes. [`batch`] coders transform a complete
//! series at once and may derive adaptive parameters from whole-series
//! statistics; [`sequential`] coders consume one sample per call, carry all
//! memory across calls, and never look ahead.
//!
//! ## Example
//!
//! ```
//! use spike_codec::batch::{BatchCoder, StepForward};
//! use spike_codec::params::{BaseParams, ThresholdParams};
//!
//! let mut coder = StepForward::new(0.5);
//! let signal = [0.0, 1.0, 2.0, 1.0, 0.0];
//!
//! let spikes = coder.encode(&signal, BaseParams::default())?;
//! let restored = coder.decode(&spikes, ThresholdParams::default())?;
//!
//! assert_eq!(spikes.len(), signal.len());
//! assert_eq!(restored.len(), signal.len());
//! # Ok::<(), spike_codec::Error>(())
//! ```

pub mod batch;
pub mod params;
pub mod sequential;
pub mod spike;
pub mod stats;

pub use spike::{Spike, SpikeTrain};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::batch::{self, BatchCoder};
    pub use crate::params::{BaseParams, ScaleParams, StartParams, ThresholdParams};
    pub use crate::sequential::{self, SequentialCoder};
    pub use crate::spike::{Spike, SpikeTrain};
    pub use crate::{Error, Result};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for this library
pub type Result<T> = std::result::Result<T, Error>;

/// Library error type
///
/// Decoding (and sequential BSA encoding) needs adaptive parameters that
/// have no derivable default; calls fail with [`Error::Config`] until the
/// parameter is established by a prior call or an explicit override.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required adaptive parameter was never established
    #[error("configuration error: {0} is not set")]
    Config(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = Error::Config("threshold");
        assert_eq!(
            err.to_string(),
            "configuration error: threshold is not set"
        );
    }
}
