use std::fmt;

use thiserror::Error;

/// Errors raised while loading results or extracting slices.
#[derive(Error, Debug)]
pub enum Error {
    /// The analysis has not produced scores yet.
    #[error("Please score your data before trying to plot scores")]
    NotScored,

    /// A numeric train-time selector resolved to no usable classifier.
    #[error("No classifier trained at {0}")]
    NoClassifierAtTime(f64),

    /// The slice selector is neither `diagonal` nor a number.
    #[error("train_time must be 'diagonal' or a float, got {0:?}")]
    InvalidSelector(String),

    /// Structural problem in a results document.
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Non-fatal advisories produced while resolving plot parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The scorer is neither accuracy- nor AUC-like, so no chance level is known.
    ChanceLevelUnknown {
        /// Scorer name as found in the results document.
        scorer: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ChanceLevelUnknown { scorer } => {
                write!(f, "Cannot find chance level from {scorer}, specify chance level")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_condition() {
        assert!(Error::NotScored.to_string().contains("score your data"));
        assert_eq!(Error::NoClassifierAtTime(3.5).to_string(), "No classifier trained at 3.5");
        assert!(Error::InvalidSelector("foo".into()).to_string().contains("\"foo\""));
    }

    #[test]
    fn warning_display() {
        let w = Warning::ChanceLevelUnknown { scorer: "f1_score".into() };
        assert_eq!(w.to_string(), "Cannot find chance level from f1_score, specify chance level");
    }
}
