// ============================================================
// Layer 3 — Raw Annotation Record
// ============================================================
// One line of a VQA annotations file, before any validation,
// tokenization, or image loading has happened.
//
// This is a plain data struct with no behaviour — it is what
// the loader (Layer 4) produces and what the prepare use case
// (Layer 2) turns into fully-validated domain entities.
//
// Records without an answer can only become test-split samples;
// the split assignment itself happens later, in the use case.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// A raw (question, answer?, image) annotation as loaded from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VqaRecord {
    /// Unique question identifier
    pub question_id: u64,

    /// Identifier of the image this question is about
    pub image_id: u64,

    /// The natural language question
    pub question: String,

    /// The ground-truth answer — absent for test-split records
    #[serde(default)]
    pub answer: Option<String>,

    /// Image file name, resolved against the images directory
    pub image_file: String,
}

impl VqaRecord {
    /// True when this record carries a ground-truth answer
    /// and can therefore serve as a train/validation sample.
    pub fn is_labelled(&self) -> bool {
        self.answer.as_deref().is_some_and(|a| !a.trim().is_empty())
    }
}
