// ============================================================
// Layer 4 — Annotation Loader
// ============================================================
// Loads raw VQA records from a JSON annotations file.
//
// Expected file shape — a single JSON array:
//   [
//     {
//       "question_id": 1,
//       "image_id": 10,
//       "question": "what color is the ball",
//       "answer": "red",
//       "image_file": "COCO_000000000010.jpg"
//     },
//     ...
//   ]
//
// The "answer" field is optional: records without it can only
// become test-split samples downstream.
//
// Each record's image_file is resolved against the images
// directory. Records whose image file is missing are skipped
// with a warning rather than aborting the whole run — one
// corrupt download should not block preparing the other
// hundred thousand samples.
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json crate documentation

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::record::VqaRecord;
use crate::domain::traits::RecordSource;

/// Loads VQA annotation records from a JSON file, resolving image
/// files against a directory. Implements RecordSource from Layer 3.
pub struct JsonDatasetLoader {
    /// Path to the annotations JSON file
    annotations: PathBuf,

    /// Directory containing the referenced image files
    images_dir: PathBuf,
}

impl JsonDatasetLoader {
    pub fn new(annotations: impl Into<PathBuf>, images_dir: impl Into<PathBuf>) -> Self {
        Self {
            annotations: annotations.into(),
            images_dir:  images_dir.into(),
        }
    }

    /// Absolute path of a record's image file
    pub fn image_path(&self, record: &VqaRecord) -> PathBuf {
        self.images_dir.join(&record.image_file)
    }
}

impl RecordSource for JsonDatasetLoader {
    fn load_all(&self) -> Result<Vec<VqaRecord>> {
        let json = fs::read_to_string(&self.annotations).with_context(|| {
            format!("cannot read annotations file '{}'", self.annotations.display())
        })?;

        let records = parse_records(&json).with_context(|| {
            format!("cannot parse annotations file '{}'", self.annotations.display())
        })?;

        // Drop records whose image is not on disk — warn and continue
        let total = records.len();
        let available: Vec<VqaRecord> = records
            .into_iter()
            .filter(|r| {
                let path = self.image_path(r);
                if path.is_file() {
                    true
                } else {
                    tracing::warn!(
                        "Skipping question {}: image '{}' not found",
                        r.question_id,
                        path.display()
                    );
                    false
                }
            })
            .collect();

        tracing::info!(
            "Loaded {} records ({} skipped for missing images)",
            available.len(),
            total - available.len()
        );
        Ok(available)
    }
}

/// Parse an annotations JSON array into records.
/// Split out from file handling so it can be tested on strings.
pub fn parse_records(json: &str) -> Result<Vec<VqaRecord>> {
    let records: Vec<VqaRecord> = serde_json::from_str(json)?;
    Ok(records)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labelled_record() {
        let json = r#"[
            {
                "question_id": 1,
                "image_id": 10,
                "question": "what color is the ball",
                "answer": "red",
                "image_file": "ball.jpg"
            }
        ]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question_id, 1);
        assert_eq!(records[0].image_id, 10);
        assert!(records[0].is_labelled());
    }

    #[test]
    fn test_parse_record_without_answer() {
        let json = r#"[
            {
                "question_id": 2,
                "image_id": 11,
                "question": "how many dogs are there",
                "image_file": "dogs.jpg"
            }
        ]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records[0].answer, None);
        assert!(!records[0].is_labelled());
    }

    #[test]
    fn test_blank_answer_counts_as_unlabelled() {
        let json = r#"[
            {
                "question_id": 3,
                "image_id": 12,
                "question": "what is on the table",
                "answer": "   ",
                "image_file": "table.jpg"
            }
        ]"#;
        let records = parse_records(json).unwrap();
        assert!(!records[0].is_labelled());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse_records("{not json").is_err());
    }
}
