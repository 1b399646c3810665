//! Error types for epicurves-fit.

/// Error type for all fallible operations in the epicurves-fit crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// Returned when the offset and value slices differ in length.
    #[error("offset/value length mismatch: {n_offsets} offsets vs {n_values} values")]
    LengthMismatch {
        /// Number of offsets provided.
        n_offsets: usize,
        /// Number of values provided.
        n_values: usize,
    },

    /// Returned when fewer than two distinct offsets are available: an
    /// exponential through one point is underdetermined.
    #[error("insufficient data for exponential fit: {n_distinct} distinct day(s), need {min}")]
    InsufficientData {
        /// Number of distinct offsets in the input.
        n_distinct: usize,
        /// Minimum number of distinct offsets required.
        min: usize,
    },

    /// Returned when any input value is NaN or infinite.
    #[error("non-finite value in fit input")]
    NonFiniteData,

    /// Returned when the optimizer fails to produce finite parameters.
    #[error("exponential fit did not converge")]
    Convergence,
}
