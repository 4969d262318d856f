// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Builds, saves, and loads the shared word-level tokenizer.
//
// In tokenizers 0.15, train_from_files requires Trainer::Model
// to equal ModelWrapper. The simpler approach for a word-level
// vocabulary is to build the tokenizer JSON manually and load
// it back, bypassing the trainer type mismatch entirely.
//
// Index layout (fixed, relied on by the encoding contract):
//   0 → [PAD]   — the question padding value, so zero-left
//                 padding never collides with a real word
//   1 → [UNK]   — unknown words at inference time
//   2.. → corpus words by descending frequency, capped at
//         vocab_size
//
// The SAME fitted tokenizer instance serves every question and
// answer in a run — index meaning is vocabulary-specific, and
// mixing two fits would silently scramble the targets.
//
// Reference: HuggingFace tokenizers documentation

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokenizers::Tokenizer;

use crate::domain::error::{VqaError, VqaResult};
use crate::domain::traits::TextIndexer;

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load an existing tokenizer or build a new one from the corpus
    pub fn load_or_build(&self, corpus: &[String], vocab_size: usize) -> Result<Tokenizer> {
        let tok_path = self.dir.join("tokenizer.json");
        if tok_path.exists() {
            tracing::info!("Loading existing tokenizer from disk");
            self.load()
        } else {
            tracing::info!("Building new tokenizer (vocab_size={})", vocab_size);
            self.build_and_save(corpus, vocab_size)
        }
    }

    /// Load a previously saved tokenizer from its JSON file
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.dir.join("tokenizer.json");
        Tokenizer::from_file(&path).map_err(|e| {
            anyhow::anyhow!("cannot load tokenizer from '{}': {}", path.display(), e)
        })
    }

    /// Build a word-level vocabulary from the question/answer corpus
    /// and write a valid tokenizer JSON directly.
    fn build_and_save(&self, corpus: &[String], vocab_size: usize) -> Result<Tokenizer> {
        std::fs::create_dir_all(&self.dir).ok();

        // ── Step 1: Count word frequencies across the corpus ──────────────────
        use std::collections::HashMap;
        let mut freq: HashMap<String, usize> = HashMap::new();

        for text in corpus {
            for word in text.split_whitespace() {
                let w = word.to_lowercase();
                let w = w.trim_matches(|c: char| !c.is_alphanumeric());
                if !w.is_empty() {
                    *freq.entry(w.to_string()).or_insert(0) += 1;
                }
            }
        }

        // Sort by frequency descending; ties broken alphabetically so
        // the build is deterministic across runs
        let mut words: Vec<(String, usize)> = freq.into_iter().collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        // Reserve 2 slots for [PAD] and [UNK]
        let max_words = vocab_size.saturating_sub(2);
        words.truncate(max_words);

        // ── Step 2: Build the vocab JSON ──────────────────────────────────────
        // [PAD] must be 0: the padding contract left-pads with zero
        let mut vocab = serde_json::json!({
            "[PAD]": 0,
            "[UNK]": 1,
        });

        let mut next_id = 2usize;
        for (word, _) in &words {
            if vocab.get(word).is_none() {
                vocab[word] = serde_json::json!(next_id);
                next_id += 1;
            }
        }

        // ── Step 3: Write the tokenizer JSON in HuggingFace format ────────────
        // This is the layout Tokenizer::from_file() expects
        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                {"id": 0, "content": "[PAD]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 1, "content": "[UNK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
            ],
            "normalizer": {
                "type": "BertNormalizer",
                "clean_text": true,
                "handle_chinese_chars": true,
                "strip_accents": null,
                "lowercase": true
            },
            "pre_tokenizer": {
                "type": "Whitespace"
            },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": "[UNK]"
            }
        });

        let tok_path = self.dir.join("tokenizer.json");
        std::fs::write(&tok_path, serde_json::to_string_pretty(&tokenizer_json)?)
            .with_context(|| "cannot write tokenizer JSON")?;

        tracing::info!(
            "Tokenizer built with {} entries, saved to '{}'",
            next_id,
            tok_path.display()
        );

        Tokenizer::from_file(&tok_path)
            .map_err(|e| anyhow::anyhow!("cannot reload tokenizer: {e}"))
    }
}

// ─── TextIndexer Adapter ──────────────────────────────────────────────────────
/// Adapts a fitted HuggingFace tokenizer to the domain's
/// TextIndexer seam. Stateless per call; share one instance behind
/// an Arc across all entities of a run.
pub struct HfTextIndexer {
    tokenizer: Tokenizer,
}

impl HfTextIndexer {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }
}

impl TextIndexer for HfTextIndexer {
    fn indices(&self, text: &str) -> VqaResult<Vec<u32>> {
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| VqaError::Tokenize(e.to_string()))?;
        Ok(encoding.get_ids().to_vec())
    }
}
