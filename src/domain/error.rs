// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure the sample-preparation core can produce.
//
// The four families mirror the validation points of the pipeline:
//   InvalidArgument — malformed constructor inputs
//   NotFound        — a referenced image file does not exist
//   Precondition    — an operation was called before the state
//                     it needs was established (no tokenizer yet,
//                     output requested on a test-split sample)
//   OutOfRange      — a token index falls outside its vocabulary
//
// Plus two wrappers for the external services:
//   Decode   — the image decoder rejected a file
//   Tokenize — the tokenizer failed on a text
//
// All errors are raised synchronously at the point of violation
// and propagate to the caller — bad input is a data error here,
// not a transient condition, so there is no retry logic.
//
// Reference: Rust Book §9 (Error Handling)
//            thiserror crate documentation

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the domain layer
pub type VqaResult<T> = std::result::Result<T, VqaError>;

/// All errors produced by the sample assembly and encoding core
#[derive(Debug, Error)]
pub enum VqaError {
    /// A constructor was given a malformed or inconsistent input,
    /// e.g. a train/validation sample without an answer
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced image file does not exist on disk
    #[error("image file not found: '{}'", .0.display())]
    NotFound(PathBuf),

    /// An operation needs state that was never established
    #[error("precondition not met: {0}")]
    Precondition(String),

    /// A computed index escaped its declared vocabulary bound
    #[error("token index {index} is out of range for vocabulary of size {vocab_size}")]
    OutOfRange { index: usize, vocab_size: usize },

    /// The image decoding service rejected a file
    #[error("cannot decode image '{}': {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    /// The tokenizer service failed on a text
    #[error("tokenizer error: {0}")]
    Tokenize(String),
}
