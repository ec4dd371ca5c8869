//! 1-D slices through the score grid.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::results::GatResults;

/// Relative slack on the one-step tolerance so that `t - t' == step` survives
/// floating-point rounding of the time axes.
const STEP_SLACK: f64 = 1e-9;

/// Which slice of the grid to extract.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TrainTimeSelector {
    /// Classifiers trained and tested at (nearly) the same time.
    #[default]
    Diagonal,
    /// The full testing curve of the classifier trained closest to this time.
    Time(f64),
}

impl FromStr for TrainTimeSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("diagonal") {
            return Ok(Self::Diagonal);
        }
        match trimmed.parse::<f64>() {
            Ok(t) if t.is_finite() => Ok(Self::Time(t)),
            _ => Err(Error::InvalidSelector(s.to_string())),
        }
    }
}

impl fmt::Display for TrainTimeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Diagonal => f.write_str("diagonal"),
            Self::Time(t) => write!(f, "{t}"),
        }
    }
}

/// Where a slice came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SliceKind {
    /// Train time == test time.
    Diagonal,
    /// One classifier's row.
    Classifier {
        /// Row index in the grid.
        index: usize,
        /// Training time of that classifier.
        train_time: f64,
    },
}

/// A 1-D score curve with its time axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatSlice {
    /// X values, aligned with `scores`.
    pub times: Vec<f64>,
    /// Scores along the slice.
    pub scores: Vec<f64>,
    /// Origin of the slice.
    pub kind: SliceKind,
}

impl GatSlice {
    /// Finite `(min, max)` of the scores, if any.
    pub fn score_range(&self) -> Option<(f64, f64)> {
        let (lo, hi) = self
            .scores
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        (lo <= hi).then_some((lo, hi))
    }
}

/// Extract a slice of the score grid.
///
/// A grid whose classifiers were each tested at a single time point already is
/// the diagonal and is returned flattened, whatever the selector. Otherwise the
/// diagonal is rebuilt by nearest-time matching, which tolerates testing times
/// sampled differently from training times: each classifier takes the score at
/// the testing time nearest to its training time, searched over every
/// classifier's testing axis, provided that time lies within one training step.
/// Classifiers without such a match keep a score of 0.
pub fn gat_slice(results: &GatResults, selector: TrainTimeSelector) -> Result<GatSlice> {
    let scores = results.scores()?;
    let train = &results.train_times.times;

    if results.is_diagonal_only() {
        let flat: Vec<f64> = scores.iter().flatten().copied().collect();
        ensure_aligned(train, &flat)?;
        return Ok(GatSlice { times: train.clone(), scores: flat, kind: SliceKind::Diagonal });
    }

    match selector {
        TrainTimeSelector::Diagonal => {
            let step = results.train_times.step;
            let tolerance = step + step.abs() * STEP_SLACK;
            let mut diag = vec![0.0; scores.len()];
            for (i, (&t, row)) in train.iter().zip(scores).enumerate() {
                for test in &results.test_times.times {
                    let Some(j) = nearest_index(test, t) else {
                        continue;
                    };
                    if (t - test[j]).abs() <= tolerance {
                        if let Some(&v) = row.get(j) {
                            diag[i] = v;
                        }
                    }
                }
            }
            ensure_aligned(train, &diag)?;
            Ok(GatSlice { times: train.clone(), scores: diag, kind: SliceKind::Diagonal })
        }
        TrainTimeSelector::Time(t) => {
            // Index 0 counts as "not found", matching the tool this format comes from.
            let idx = match nearest_index(train, t) {
                Some(idx) if idx > 0 => idx,
                _ => return Err(Error::NoClassifierAtTime(t)),
            };
            let row = scores.get(idx).cloned().ok_or_else(|| {
                Error::Validation(format!("no score row for classifier {idx}"))
            })?;
            let times = results.test_times.times.get(idx).cloned().unwrap_or_default();
            ensure_aligned(&times, &row)?;
            tracing::debug!(train_time = t, index = idx, "classifier slice selected");
            Ok(GatSlice {
                times,
                scores: row,
                kind: SliceKind::Classifier { index: idx, train_time: train[idx] },
            })
        }
    }
}

/// Index of the value closest to `target` (first one on ties).
pub fn nearest_index(values: &[f64], target: f64) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| {
            let d = (v - target).abs();
            match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((i, d)),
            }
        })
        .map(|(i, _)| i)
}

fn ensure_aligned(times: &[f64], scores: &[f64]) -> Result<()> {
    if times.len() != scores.len() {
        return Err(Error::Validation(format!(
            "slice length mismatch: times={} scores={}",
            times.len(),
            scores.len()
        )));
    }
    Ok(())
}
