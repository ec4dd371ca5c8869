//! Overview of a results document, as printed by `gatviz inspect`.

use serde::Serialize;

use crate::chance::{ChanceLevel, chance_level};
use crate::error::Result;
use crate::results::{GatResults, ScorerKind};
use crate::slice::{GatSlice, TrainTimeSelector, gat_slice};

/// Plot-friendly overview of a results document.
#[derive(Debug, Clone, Serialize)]
pub struct GatSummary {
    /// Number of classifiers.
    pub n_train_times: usize,
    /// Length of each classifier's testing axis.
    pub test_lengths: Vec<usize>,
    /// Whether the grid holds one testing time per classifier.
    pub diagonal_only: bool,
    /// Scorer name.
    pub scorer: String,
    /// Resolved scorer family.
    pub scorer_kind: ScorerKind,
    /// Number of distinct training labels.
    pub n_classes: usize,
    /// Whether scores are present.
    pub scored: bool,
    /// `[min, max]` over finite scores.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_range: Option<[f64; 2]>,
    /// Default time limits `[test_min, test_max, train_min, train_max]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tlim: Option<[f64; 4]>,
    /// Diagonal slice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagonal: Option<GatSlice>,
    /// Chance level.
    pub chance: ChanceLevel,
}

impl GatResults {
    /// Summarize the document. Fails only on slice extraction errors other than
    /// missing scores.
    pub fn summary(&self) -> Result<GatSummary> {
        let diagonal =
            if self.is_scored() { Some(gat_slice(self, TrainTimeSelector::Diagonal)?) } else { None };
        Ok(GatSummary {
            n_train_times: self.n_train_times(),
            test_lengths: self.test_times.times.iter().map(Vec::len).collect(),
            diagonal_only: self.is_diagonal_only(),
            scorer: self.scorer.name.clone(),
            scorer_kind: self.scorer.kind,
            n_classes: self.n_unique_labels(),
            scored: self.is_scored(),
            score_range: self.score_range().ok().map(|(lo, hi)| [lo, hi]),
            tlim: self.default_tlim().ok(),
            diagonal,
            chance: chance_level(self),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_scored_document() {
        let r = GatResults::from_json_str(
            r#"{
                "scores": [[0.5, 0.6], [0.55, 0.9]],
                "train_times": {"times": [0.0, 0.1], "step": 0.1},
                "test_times": {"times": [[0.0, 0.1], [0.0, 0.1]]},
                "scorer": "roc_auc_score"
            }"#,
        )
        .unwrap();
        let s = r.summary().unwrap();
        assert_eq!(s.n_train_times, 2);
        assert_eq!(s.score_range, Some([0.5, 0.9]));
        assert_eq!(s.diagonal.as_ref().unwrap().scores, vec![0.5, 0.9]);
        assert_eq!(s.chance.value(), Some(0.5));

        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["scorer_kind"], "auc_roc");
        assert_eq!(v["chance"]["status"], "known");
    }

    #[test]
    fn summary_of_unscored_document() {
        let r = GatResults::from_json_str(
            r#"{
                "train_times": {"times": [0.0], "step": 0.1},
                "test_times": {"times": [[0.0]]},
                "scorer": "accuracy_score",
                "y_train": [0, 1]
            }"#,
        )
        .unwrap();
        let s = r.summary().unwrap();
        assert!(!s.scored);
        assert!(s.diagonal.is_none());
        assert!(s.score_range.is_none());
        assert_eq!(s.chance.value(), Some(0.5));
    }
}
