// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `prepare` and `inspect`, and
// all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::prepare_use_case::PrepareConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prepare VQA samples: tokenize, encode, and validate the dataset
    Prepare(PrepareArgs),

    /// Encode a single sample by question id and print the result
    Inspect(InspectArgs),
}

/// All arguments for the `prepare` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// JSON annotations file with question/answer/image records
    #[arg(long, default_value = "data/annotations.json")]
    pub annotations: String,

    /// Directory containing the referenced image files
    #[arg(long, default_value = "data/images")]
    pub images_dir: String,

    /// Output directory for the tokenizer, config, and manifest
    #[arg(long, default_value = "prepared")]
    pub out_dir: String,

    /// Fixed question length: shorter questions are zero-left-padded,
    /// longer ones keep their last tokens
    #[arg(long, default_value_t = 22)]
    pub max_question_len: usize,

    /// Maximum number of entries in the question vocabulary
    #[arg(long, default_value_t = 10000)]
    pub question_vocab_size: usize,

    /// Size of the answer label space — the one-hot output length
    #[arg(long, default_value_t = 1000)]
    pub answer_vocab_size: usize,

    /// Fraction of labelled records that go to training, e.g. 0.8 = 80%
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,

    /// Shuffle seed for the train/validation split
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Keep decoded images in memory during the encoding pass
    /// (faster on re-encoding, expensive for large datasets)
    #[arg(long)]
    pub cache_images: bool,
}

/// Convert CLI PrepareArgs into the application-layer PrepareConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<PrepareArgs> for PrepareConfig {
    fn from(a: PrepareArgs) -> Self {
        PrepareConfig {
            annotations:         a.annotations,
            images_dir:          a.images_dir,
            out_dir:             a.out_dir,
            max_question_len:    a.max_question_len,
            question_vocab_size: a.question_vocab_size,
            answer_vocab_size:   a.answer_vocab_size,
            train_fraction:      a.train_fraction,
            seed:                a.seed,
            cache_images:        a.cache_images,
        }
    }
}

/// All arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// The question id of the sample to encode and print
    #[arg(long)]
    pub question_id: u64,

    /// JSON annotations file (same as used during prepare)
    #[arg(long, default_value = "data/annotations.json")]
    pub annotations: String,

    /// Directory containing the referenced image files
    #[arg(long, default_value = "data/images")]
    pub images_dir: String,

    /// Directory where prepare wrote the tokenizer
    #[arg(long, default_value = "prepared")]
    pub out_dir: String,

    /// Fixed question length used for the padded vector
    #[arg(long, default_value_t = 22)]
    pub max_question_len: usize,

    /// Question vocabulary size (must match the prepare run)
    #[arg(long, default_value_t = 10000)]
    pub question_vocab_size: usize,

    /// Answer label space size (must match the prepare run)
    #[arg(long, default_value_t = 1000)]
    pub answer_vocab_size: usize,
}

impl From<InspectArgs> for PrepareConfig {
    fn from(a: InspectArgs) -> Self {
        PrepareConfig {
            annotations:         a.annotations,
            images_dir:          a.images_dir,
            out_dir:             a.out_dir,
            max_question_len:    a.max_question_len,
            question_vocab_size: a.question_vocab_size,
            answer_vocab_size:   a.answer_vocab_size,
            ..PrepareConfig::default()
        }
    }
}
