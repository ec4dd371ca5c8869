//! GAT results document.
//!
//! The analysis process writes one JSON document per fitted GAT object. It is
//! loaded once and then only borrowed by the renderers.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Training time axis: one time point per classifier plus the nominal spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainTimes {
    /// Training time of each classifier (one per score row), in seconds.
    pub times: Vec<f64>,
    /// Nominal spacing between consecutive training times, in seconds.
    pub step: f64,
}

/// Testing time axes, one sequence per classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestTimes {
    /// `times[i]` are the testing times of classifier `i` (may differ per row).
    pub times: Vec<Vec<f64>>,
}

/// Family of the scoring function that produced the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    /// Fraction of correct predictions.
    Accuracy,
    /// Area under the ROC curve.
    AucRoc,
    /// Anything else; no chance level can be inferred.
    Unknown,
}

impl ScorerKind {
    /// Map a scorer function name onto its family.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "accuracy_score" | "accuracy" => Self::Accuracy,
            "roc_auc_score" | "roc_auc" | "auc" => Self::AucRoc,
            _ => Self::Unknown,
        }
    }
}

/// Scorer identity: the name as written by the analysis and its resolved kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorer {
    /// Name of the scoring function.
    pub name: String,
    /// Resolved scorer family.
    pub kind: ScorerKind,
}

impl Scorer {
    /// Build a scorer from its name, inferring the kind.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = ScorerKind::from_name(&name);
        Self { name, kind }
    }

    /// Build a scorer with an explicit kind.
    pub fn with_kind(name: impl Into<String>, kind: ScorerKind) -> Self {
        Self { name: name.into(), kind }
    }
}

/// Class label of a training sample.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// Integer-coded class.
    Int(i64),
    /// Named class.
    Text(String),
}

/// Scores of a fitted generalization-across-time analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ResultsDoc", into = "ResultsDoc")]
pub struct GatResults {
    /// `scores[i][j]`: classifier trained at `train_times.times[i]`, tested at
    /// `test_times.times[i][j]`. `None` until the analysis has been scored.
    pub scores: Option<Vec<Vec<f64>>>,
    /// Training time axis.
    pub train_times: TrainTimes,
    /// Per-classifier testing time axes.
    pub test_times: TestTimes,
    /// Scoring function.
    pub scorer: Scorer,
    /// Labels used for training.
    pub y_train: Vec<Label>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResultsDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scores: Option<Vec<Vec<f64>>>,
    train_times: TrainTimes,
    test_times: TestTimes,
    scorer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scorer_kind: Option<ScorerKind>,
    #[serde(default)]
    y_train: Vec<Label>,
}

impl From<ResultsDoc> for GatResults {
    fn from(doc: ResultsDoc) -> Self {
        let scorer = match doc.scorer_kind {
            Some(kind) => Scorer::with_kind(doc.scorer, kind),
            None => Scorer::named(doc.scorer),
        };
        Self {
            scores: doc.scores,
            train_times: doc.train_times,
            test_times: doc.test_times,
            scorer,
            y_train: doc.y_train,
        }
    }
}

impl From<GatResults> for ResultsDoc {
    fn from(r: GatResults) -> Self {
        let scorer_kind = if ScorerKind::from_name(&r.scorer.name) == r.scorer.kind {
            None
        } else {
            Some(r.scorer.kind)
        };
        Self {
            scores: r.scores,
            train_times: r.train_times,
            test_times: r.test_times,
            scorer: r.scorer.name,
            scorer_kind,
            y_train: r.y_train,
        }
    }
}

/// Read a results document from disk.
pub fn load_results(path: &Path) -> Result<GatResults> {
    tracing::debug!(path = %path.display(), "loading GAT results");
    let text = std::fs::read_to_string(path)?;
    GatResults::from_json_str(&text)
}

impl GatResults {
    /// Parse a results document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Whether scores are available.
    pub fn is_scored(&self) -> bool {
        self.scores.is_some()
    }

    /// The score grid, or [`Error::NotScored`].
    pub fn scores(&self) -> Result<&[Vec<f64>]> {
        self.scores.as_deref().ok_or(Error::NotScored)
    }

    /// Smallest and largest finite score in the grid.
    pub fn score_range(&self) -> Result<(f64, f64)> {
        let scores = self.scores()?;
        let (lo, hi) = scores
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if lo > hi {
            return Err(Error::Validation("score grid has no finite values".to_string()));
        }
        Ok((lo, hi))
    }

    /// Default time limits `[test_min, test_max, train_min, train_max]`: first
    /// testing time of the first classifier, last testing time of the last
    /// classifier, first and last training times.
    pub fn default_tlim(&self) -> Result<[f64; 4]> {
        let train = &self.train_times.times;
        let test = &self.test_times.times;
        let test_min = test.first().and_then(|row| row.first());
        let test_max = test.last().and_then(|row| row.last());
        match (test_min, test_max, train.first(), train.last()) {
            (Some(&a), Some(&b), Some(&c), Some(&d)) => Ok([a, b, c, d]),
            _ => Err(Error::Validation("time axes are empty".to_string())),
        }
    }

    /// Number of distinct training labels.
    pub fn n_unique_labels(&self) -> usize {
        self.y_train.iter().collect::<BTreeSet<_>>().len()
    }

    /// Number of classifiers (training time points).
    pub fn n_train_times(&self) -> usize {
        self.train_times.times.len()
    }

    /// Whether every classifier was tested at exactly one time point, i.e. the
    /// grid already is a diagonal.
    pub fn is_diagonal_only(&self) -> bool {
        !self.test_times.times.is_empty() && self.test_times.times.iter().all(|t| t.len() == 1)
    }

    /// Structural checks on the time axes and, when present, the score grid.
    pub fn validate(&self) -> Result<()> {
        let n = self.train_times.times.len();
        if n == 0 {
            return Err(Error::Validation("train_times.times is empty".to_string()));
        }
        if self.train_times.times.iter().any(|t| !t.is_finite()) {
            return Err(Error::Validation("train_times.times must be finite".to_string()));
        }
        if !(self.train_times.step.is_finite() && self.train_times.step > 0.0) {
            return Err(Error::Validation(format!(
                "train_times.step must be positive, got {}",
                self.train_times.step
            )));
        }
        if self.test_times.times.len() != n {
            return Err(Error::Validation(format!(
                "test_times rows mismatch: got={} expected={}",
                self.test_times.times.len(),
                n
            )));
        }
        for (i, row) in self.test_times.times.iter().enumerate() {
            if row.is_empty() {
                return Err(Error::Validation(format!("test_times row {i} is empty")));
            }
            if row.iter().any(|t| !t.is_finite()) {
                return Err(Error::Validation(format!("test_times row {i} must be finite")));
            }
        }
        if let Some(scores) = &self.scores {
            if scores.len() != n {
                return Err(Error::Validation(format!(
                    "scores rows mismatch: got={} expected={}",
                    scores.len(),
                    n
                )));
            }
            for (i, (row, times)) in scores.iter().zip(&self.test_times.times).enumerate() {
                if row.len() != times.len() {
                    return Err(Error::Validation(format!(
                        "scores row {i} length mismatch: got={} expected={}",
                        row.len(),
                        times.len()
                    )));
                }
            }
        }
        Ok(())
    }
}
