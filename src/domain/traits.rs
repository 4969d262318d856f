// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The external services the sample core depends on are
// consumed through traits, not concrete types:
//
//   - TextIndexer  implemented by HfTextIndexer    (infra)
//   - PixelDecode  implemented by FileImageDecoder (infra)
//   - RecordSource implemented by JsonDatasetLoader (data)
//
// By programming against these seams the domain layer stays
// free of the tokenizers / image crates, and tests can swap
// in tiny stub services with known outputs instead of fitting
// a real vocabulary or decoding real image files.
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use std::path::Path;

use ndarray::Array3;

use crate::domain::error::VqaResult;
use crate::domain::record::VqaRecord;

// ─── TextIndexer ──────────────────────────────────────────────────────────────
/// A fitted text→token-index service.
///
/// Index meaning is vocabulary-specific: every Question and Answer
/// that will be batched together must be tokenized by the same
/// fitted instance (or an equivalently fitted one).
///
/// Implementations are stateless with respect to any single call,
/// so one instance can be shared behind an Arc across all entities
/// and across worker threads.
pub trait TextIndexer: Send + Sync {
    /// Map a text to its ordered sequence of vocabulary indices.
    /// Repeated calls with the same text return identical sequences.
    fn indices(&self, text: &str) -> VqaResult<Vec<u32>>;
}

// ─── PixelDecode ──────────────────────────────────────────────────────────────
/// A path→pixel-array decoding service.
///
/// Implementations:
///   - FileImageDecoder → decodes image files with the image crate
///   - (tests) stub decoders returning synthetic arrays
pub trait PixelDecode: Send + Sync {
    /// Decode the file at `path` into a (height, width, 3) f32 array.
    /// Channel 0 is red, 1 green, 2 blue, values in 0.0..=255.0.
    fn decode(&self, path: &Path) -> VqaResult<Array3<f32>>;
}

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can produce raw VQA annotation records.
///
/// Implementations:
///   - JsonDatasetLoader → loads from a JSON annotations file
///   - (future) CsvDatasetLoader → loads from CSV exports
pub trait RecordSource {
    /// Load all available records from this source.
    fn load_all(&self) -> anyhow::Result<Vec<VqaRecord>>;
}
