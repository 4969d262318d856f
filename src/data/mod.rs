// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw annotation file and model-ready
// tensors, one module per step:
//
//   annotations.json + images/
//       │
//       ▼
//   JsonDatasetLoader  → reads records, checks image files
//       │
//       ▼
//   Preprocessor       → cleans question/answer text
//       │
//       ▼
//   split_train_val    → shuffles into train/validation
//       │
//       ▼
//   (domain entities)  → Question / Answer / ImageRef / VqaSample
//       │
//       ▼
//   encoding + pixels  → padded vectors, normalized tensors
//
// The encoding and pixels modules hold the pure numeric
// contracts; they know nothing about files or services, which
// is why the sample aggregate can call them directly.
//
// Reference: Rust Book §7 (Modules)

/// Loads VQA annotation records from JSON
pub mod loader;

/// Cleans raw question/answer text before tokenisation
pub mod preprocessor;

/// Fixed-length padding and one-hot target helpers
pub mod encoding;

/// Bilinear resize, mean subtraction, channel-first transpose
pub mod pixels;

/// Seeded shuffle and train/validation split
pub mod splitter;
