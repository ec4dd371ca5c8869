//! Chance level of the scorer.

use serde::Serialize;

use crate::error::Warning;
use crate::results::{GatResults, ScorerKind};

/// Expected score of a non-informative classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChanceLevel {
    /// Chance level resolved from the scorer kind.
    Known {
        /// Chance score.
        value: f64,
    },
    /// No chance level can be inferred for this scorer.
    Unknown {
        /// Scorer name, for the advisory.
        scorer: String,
    },
}

impl ChanceLevel {
    /// Numeric chance level, if known.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Known { value } => Some(*value),
            Self::Unknown { .. } => None,
        }
    }

    /// The advisory to surface when the level is unknown.
    pub fn warning(&self) -> Option<Warning> {
        match self {
            Self::Known { .. } => None,
            Self::Unknown { scorer } => Some(Warning::ChanceLevelUnknown { scorer: scorer.clone() }),
        }
    }
}

/// Chance level of the scorer: one over the number of classes for accuracy,
/// one half for ROC AUC.
///
/// Accuracy with no training labels has no defined level and is reported as
/// unknown.
pub fn chance_level(results: &GatResults) -> ChanceLevel {
    match results.scorer.kind {
        ScorerKind::Accuracy => match results.n_unique_labels() {
            0 => ChanceLevel::Unknown { scorer: results.scorer.name.clone() },
            n => ChanceLevel::Known { value: 1.0 / n as f64 },
        },
        ScorerKind::AucRoc => ChanceLevel::Known { value: 0.5 },
        ScorerKind::Unknown => ChanceLevel::Unknown { scorer: results.scorer.name.clone() },
    }
}
