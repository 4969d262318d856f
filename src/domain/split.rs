// ============================================================
// Layer 3 — Dataset Split
// ============================================================
// Which partition of the dataset a sample belongs to.
//
// The split controls one domain rule: train and validation
// samples carry a ground-truth answer, test samples do not.
// Asking a test sample for its output target is an error,
// not an empty vector — the caller must never silently train
// on a missing label.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use serde::{Deserialize, Serialize};

/// The dataset partition a sample is tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSplit {
    /// Used to update model weights — answer required
    Train,

    /// Used to measure generalisation — answer required
    Validation,

    /// Held-out evaluation set — no answer attached or queryable
    Test,
}

impl DatasetSplit {
    /// True for the splits that must carry a ground-truth answer
    pub fn requires_answer(&self) -> bool {
        !matches!(self, DatasetSplit::Test)
    }
}

impl std::fmt::Display for DatasetSplit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetSplit::Train      => write!(f, "train"),
            DatasetSplit::Validation => write!(f, "validation"),
            DatasetSplit::Test       => write!(f, "test"),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_requirement_per_split() {
        assert!(DatasetSplit::Train.requires_answer());
        assert!(DatasetSplit::Validation.requires_answer());
        assert!(!DatasetSplit::Test.requires_answer());
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&DatasetSplit::Validation).unwrap();
        assert_eq!(json, "\"validation\"");
        let back: DatasetSplit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DatasetSplit::Validation);
    }
}
