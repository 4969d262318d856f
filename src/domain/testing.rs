// ============================================================
// Layer 3 — Shared Test Stubs
// ============================================================
// Stub implementations of the service traits used by the
// entity and sample unit tests. Compiled only for tests.
//
// MapIndexer replaces a fitted tokenizer with a fixed
// word→index table, CountingDecoder replaces the image decoder
// with a synthetic solid-colour array and a call counter so
// caching behaviour can be asserted.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::Array3;

use crate::domain::error::VqaResult;
use crate::domain::traits::{PixelDecode, TextIndexer};

/// A text indexer backed by a fixed word→index map.
/// Unknown words are silently skipped, like an unfitted word
/// would be by a word-level vocabulary without [UNK] handling.
pub struct MapIndexer {
    vocab: HashMap<String, u32>,
}

impl MapIndexer {
    pub fn new(entries: &[(&str, u32)]) -> Self {
        let vocab = entries
            .iter()
            .map(|(word, idx)| (word.to_string(), *idx))
            .collect();
        Self { vocab }
    }

    /// Mapping for a single word
    pub fn single(word: &str, index: u32) -> Self {
        Self::new(&[(word, index)])
    }

    /// The worked-example vocabulary:
    /// what=3, color=7, is=1, the=2, ball=9, red=42
    pub fn ball_vocab() -> Self {
        Self::new(&[
            ("what", 3),
            ("color", 7),
            ("is", 1),
            ("the", 2),
            ("ball", 9),
            ("red", 42),
        ])
    }
}

impl TextIndexer for MapIndexer {
    fn indices(&self, text: &str) -> VqaResult<Vec<u32>> {
        Ok(text
            .split_whitespace()
            .filter_map(|word| self.vocab.get(word).copied())
            .collect())
    }
}

/// A pixel decoder returning a solid-colour (h, w, 3) array,
/// counting how many times decode() was invoked.
pub struct CountingDecoder {
    height: usize,
    width:  usize,
    rgb:    [f32; 3],
    calls:  AtomicUsize,
}

impl CountingDecoder {
    pub fn solid(height: usize, width: usize, rgb: [f32; 3]) -> Self {
        Self {
            height,
            width,
            rgb,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times decode() has run
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PixelDecode for CountingDecoder {
    fn decode(&self, _path: &Path) -> VqaResult<Array3<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Array3::from_shape_fn(
            (self.height, self.width, 3),
            |(_, _, c)| self.rgb[c],
        ))
    }
}

/// Create (once) and return a real file path for tests that need
/// ImageRef's existence check to pass. The content is irrelevant —
/// the stub decoders never read it.
pub fn existing_test_file(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("vqa_prep_test_{name}"));
    if !path.exists() {
        std::fs::write(&path, b"stub").expect("cannot create test file");
    }
    path
}
