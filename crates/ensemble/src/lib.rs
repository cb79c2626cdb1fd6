//! Multi-model ensemble forecasts built from binary event tables.
//!
//! Every member is an [`EventTable`](binevent_contingency::EventTable) for
//! the same observations on the same bin grid. Members are combined either
//! by vote ([`npc`]) or by reducing their per-bin forecast maxima
//! ([`reduced_table`]), and the result is an ordinary event table that can
//! be scored and aggregated like any single model.
//!
//! # Example
//!
//! ```
//! use binevent_binning::{BinnedPair, Thresholds};
//! use binevent_contingency::EventTable;
//! use binevent_ensemble::{Reducer, npc, reduced_table};
//!
//! let thresholds = Thresholds::uniform(0.3).unwrap();
//! let member = |modmax: Vec<Option<f64>>| {
//!     let pair = BinnedPair::from_parts(vec![0.0, 1200.0], vec![Some(0.5), Some(0.1)], modmax)
//!         .unwrap();
//!     EventTable::from_binned(pair, thresholds)
//! };
//! let members = vec![
//!     member(vec![Some(0.4), Some(0.1)]),
//!     member(vec![Some(0.35), Some(0.9)]),
//!     member(vec![Some(0.1), Some(0.2)]),
//! ];
//!
//! let voted = npc(&members, 2).unwrap();
//! assert_eq!(voted.counts().hits(), 1);
//! assert_eq!(voted.counts().false_alarms(), 0);
//!
//! let mean = reduced_table(&members, Reducer::Mean, thresholds).unwrap();
//! assert_eq!(mean.counts().false_alarms(), 1);
//! ```

mod error;
mod members;
mod reduce;
mod vote;

pub use error::EnsembleError;
pub use members::validate;
pub use reduce::{Reducer, combine_maxima, reduced_table};
pub use vote::{npc, vote_counts};
