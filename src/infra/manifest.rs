// ============================================================
// Layer 6 — Preparation Manifest
// ============================================================
// Persists what a preparation run did, so a downstream trainer
// can reconstruct the exact encoding parameters:
//
//   prepare_config.json — the full PrepareConfig of the run
//   manifest.json       — per-split sample counts, tensor
//                         shapes, and vocabulary sizes
//
// Why save the config separately?
//   A trainer that consumes these samples must pad its own
//   inference-time questions to the same max_question_len and
//   build one-hot targets of the same answer_vocab_size.
//   Without the config those numbers live only in someone's
//   shell history.
//
// Reference: Rust Book §9 (Error Handling)

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::prepare_use_case::PrepareConfig;
use crate::data::pixels::IMAGE_EDGE;

/// Summary of one preparation run, written next to the tokenizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Samples per split
    pub train_samples:      usize,
    pub validation_samples: usize,
    pub test_samples:       usize,

    /// Question vector length every sample was padded to
    pub max_question_len: usize,

    /// Image tensor shape, channel-first
    pub image_shape: [usize; 3],

    /// Question vocabulary size used for the tokenizer build
    pub question_vocab_size: usize,

    /// Answer label space — the one-hot output length
    pub answer_vocab_size: usize,
}

impl Manifest {
    pub fn new(
        train_samples:      usize,
        validation_samples: usize,
        test_samples:       usize,
        cfg:                &PrepareConfig,
    ) -> Self {
        Self {
            train_samples,
            validation_samples,
            test_samples,
            max_question_len:    cfg.max_question_len,
            image_shape:         [3, IMAGE_EDGE, IMAGE_EDGE],
            question_vocab_size: cfg.question_vocab_size,
            answer_vocab_size:   cfg.answer_vocab_size,
        }
    }
}

/// Writes the run config and manifest into the output directory.
pub struct ManifestWriter {
    dir: PathBuf,
}

impl ManifestWriter {
    /// Create a writer, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Save the preparation configuration as pretty JSON.
    pub fn save_config(&self, cfg: &PrepareConfig) -> Result<()> {
        let path = self.dir.join("prepare_config.json");
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved prepare config to '{}'", path.display());
        Ok(())
    }

    /// Save the run manifest as pretty JSON.
    pub fn save_manifest(&self, manifest: &Manifest) -> Result<()> {
        let path = self.dir.join("manifest.json");
        let json = serde_json::to_string_pretty(manifest)?;
        fs::write(&path, json)
            .with_context(|| format!("cannot write manifest to '{}'", path.display()))?;
        tracing::info!(
            "Manifest written: {} train / {} validation / {} test samples",
            manifest.train_samples,
            manifest.validation_samples,
            manifest.test_samples
        );
        Ok(())
    }

    /// Load a manifest written by a previous run.
    pub fn load_manifest(&self) -> Result<Manifest> {
        let path = self.dir.join("manifest.json");
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "cannot read manifest from '{}' — run 'prepare' first",
                path.display()
            )
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}
