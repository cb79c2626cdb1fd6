//! Error types for the binevent-binning crate.

/// Error type for all fallible operations in the binevent-binning crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BinningError {
    /// Returned when timestamp and value arrays differ in length.
    #[error("series has {times} timestamps but {values} values")]
    LengthMismatch {
        /// Number of timestamps.
        times: usize,
        /// Number of values.
        values: usize,
    },

    /// Returned when a timestamp is smaller than its predecessor.
    #[error("timestamps are not sorted: index {index} precedes its predecessor")]
    UnsortedTimestamps {
        /// Index of the first out-of-order timestamp.
        index: usize,
    },

    /// Returned when a timestamp is NaN or infinite.
    #[error("non-finite timestamp at index {index}")]
    NonFiniteTimestamp {
        /// Index of the offending timestamp.
        index: usize,
    },

    /// Returned when the bin width is non-finite or not positive.
    #[error("bin window must be finite and positive, got {window}")]
    InvalidWindow {
        /// The invalid window, in seconds.
        window: f64,
    },

    /// Returned when a time range has zero or negative length.
    #[error("time range [{start}, {stop}) must have positive, finite length")]
    InvalidRange {
        /// Range start, in seconds.
        start: f64,
        /// Range stop, in seconds.
        stop: f64,
    },

    /// Returned when a grid would need more bins than can be allocated.
    #[error("grid needs {bins} bins, more than the limit of {limit}")]
    TooManyBins {
        /// Requested number of bins.
        bins: f64,
        /// Largest accepted number of bins.
        limit: usize,
    },

    /// Returned when a classification threshold is NaN or infinite.
    #[error("{name} threshold must be finite, got {value}")]
    InvalidThreshold {
        /// Which threshold (`"observation"` or `"forecast"`).
        name: &'static str,
        /// The invalid value.
        value: f64,
    },

    /// Returned when a bin range has to be derived from a series without samples.
    #[error("{name} series has no samples to derive a time range from")]
    EmptySeries {
        /// Which series was empty.
        name: &'static str,
    },

    /// Returned when per-bin arrays assembled by hand differ in length.
    #[error("per-bin arrays differ in length: time {time}, obsmax {obsmax}, modmax {modmax}")]
    PartsLengthMismatch {
        /// Length of the time axis.
        time: usize,
        /// Length of the observation maxima.
        obsmax: usize,
        /// Length of the forecast maxima.
        modmax: usize,
    },
}
