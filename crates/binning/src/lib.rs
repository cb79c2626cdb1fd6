//! Fixed-width temporal binning of paired observation/forecast series.
//!
//! Two independently (and irregularly) sampled series are reduced onto a
//! shared grid of half-open bins. Each bin keeps the maximum absolute
//! magnitude of the samples falling in it, or `None` when it has none, and
//! the maxima are then classified against separate observation and forecast
//! thresholds.
//!
//! # Quick start
//!
//! ```
//! use binevent_binning::{BinConfig, Series, Thresholds, TimeRange, bin_pair};
//!
//! let obs = Series::new(vec![0.0, 600.0, 1500.0], vec![0.1, 0.45, 0.2]).unwrap();
//! let fcst = Series::new(vec![60.0, 1260.0], vec![0.35, 0.05]).unwrap();
//! let config = BinConfig::default().with_range(TimeRange::new(0.0, 2400.0).unwrap());
//!
//! let pair = bin_pair(&obs, &fcst, &config).unwrap();
//! assert_eq!(pair.len(), 2);
//!
//! let flags = pair.classify(&Thresholds::uniform(0.3).unwrap());
//! assert_eq!(flags.observed(), &[Some(true), Some(false)]);
//! assert_eq!(flags.forecast(), &[Some(true), Some(false)]);
//! ```
//!
//! # Architecture
//!
//! ```text
//! bin_pair()
//!   ├─ BinGrid::for_range() / BinGrid::spanning()   (grid.rs)
//!   ├─ partial trailing bin policy                  (reduce.rs)
//!   └─ bin_max() for each side                      (reduce.rs)
//! BinnedPair::classify()                            (classify.rs)
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod grid;
pub mod reduce;
pub mod series;

pub use classify::{Classification, Thresholds, classify};
pub use config::{BinConfig, DEFAULT_WINDOW_SECS, TimeRange};
pub use error::BinningError;
pub use grid::{BinGrid, MAX_BINS};
pub use reduce::{BinnedPair, bin_max, bin_pair};
pub use series::Series;
