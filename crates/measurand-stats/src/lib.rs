//! Sample statistics for measured quantities.
//!
//! This crate collects one-dimensional measurement data into a [`Samples`]
//! aggregate and derives the statistics a metrology-style display needs:
//! mean, sample standard deviation, standard deviation of the mean, and
//! their relative forms. Bad physical data never makes an operation fail;
//! missing or meaningless statistics are `NaN` and propagate.
//!
//! # Examples
//!
//! ```
//! use measurand_stats::Samples;
//!
//! let samples = Samples::from_values([1.0, 2.0, 3.0]);
//! assert_eq!(samples.mean(), 2.0);
//! assert_eq!(samples.stdev(), 1.0);
//! assert_eq!(samples.size(), 3);
//! ```

pub use self::{
    samples::{DEFAULT_OVERLOAD, Samples, SamplesBuilder, SamplesRecord},
    uncertain::{Uncertain, UncertainError},
};

pub mod samples;
pub mod uncertain;

/// Error that can occur while constructing [`Samples`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConstructionError {
    /// Raw samples and precomputed statistics were both supplied.
    #[display("cannot combine raw samples with an explicit mean, stdev or size")]
    SamplesWithStats,
    /// A textual sample value did not parse as a float.
    #[display("invalid sample value {text:?}")]
    InvalidSample {
        /// The offending field, surrounding whitespace removed.
        text: String,
    },
}
