//! # gat-viz
//!
//! Data side of the generalization-across-time (GAT) plots.
//!
//! A GAT analysis trains one classifier per training time point and scores it
//! at every testing time point. This crate holds the resulting score grid
//! ([`GatResults`]), extracts 1-D slices from it ([`gat_slice`]) and resolves
//! the chance level of the scorer ([`chance_level`]). Drawing lives in
//! `gat-viz-render`.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Chance level resolution from the scorer kind.
pub mod chance;
/// Error and warning types.
pub mod error;
/// Results model and JSON loading.
pub mod results;
/// Diagonal and per-classifier slices of the score grid.
pub mod slice;
/// Serializable overview of a results document.
pub mod summary;

/// Crate version, reported by `gatviz version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use chance::{ChanceLevel, chance_level};
pub use error::{Error, Result, Warning};
pub use results::{GatResults, Label, Scorer, ScorerKind, TestTimes, TrainTimes, load_results};
pub use slice::{GatSlice, SliceKind, TrainTimeSelector, gat_slice};
pub use summary::GatSummary;
