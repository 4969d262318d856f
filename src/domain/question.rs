// ============================================================
// Layer 3 — Question Entity
// ============================================================
// A single VQA question: its identifier, the raw text, the id
// of the image it refers to, and the token-index sequence the
// tokenizer service produces from the text.
//
// Tokenization is decoupled from construction on purpose:
// one shared, pre-fit tokenizer is applied lazily across many
// questions without refitting. Each question remembers the
// indexer it was tokenized with so it can be re-tokenized
// later (e.g. after a vocabulary change) without the caller
// supplying it again.
//
// There is no implicit default tokenizer anywhere — the indexer
// arrives either at construction (with_indexer) or through an
// explicit tokenize_with call, never from global state.
//
// Reference: Rust Book §15 (Smart Pointers, Arc)

use std::sync::Arc;

use crate::domain::error::{VqaError, VqaResult};
use crate::domain::traits::TextIndexer;

/// A validated VQA question with its lazily-computed token indices.
pub struct Question {
    /// Unique question identifier
    id: u64,

    /// Identifier of the associated image
    image_id: u64,

    /// The raw question text
    text: String,

    /// Size of the question vocabulary — kept for bounds checks,
    /// the input encoding itself uses raw indices, not one-hot
    vocab_size: usize,

    /// Token-index sequence, empty until tokenized
    tokens: Vec<u32>,

    /// The indexer this question was last tokenized with.
    /// None until one is supplied at construction or via tokenize_with.
    indexer: Option<Arc<dyn TextIndexer>>,
}

impl Question {
    /// Create a question that has not been tokenized yet.
    ///
    /// Numeric validity (non-negative ids and vocab size) is
    /// enforced by the unsigned parameter types, so plain
    /// construction cannot fail.
    pub fn new(id: u64, text: impl Into<String>, image_id: u64, vocab_size: usize) -> Self {
        Self {
            id,
            image_id,
            text: text.into(),
            vocab_size,
            tokens: Vec::new(),
            indexer: None,
        }
    }

    /// Create a question and tokenize it immediately with `indexer`.
    /// The indexer is remembered for later re-tokenization.
    pub fn with_indexer(
        id:         u64,
        text:       impl Into<String>,
        image_id:   u64,
        vocab_size: usize,
        indexer:    Arc<dyn TextIndexer>,
    ) -> VqaResult<Self> {
        let mut question = Self::new(id, text, image_id, vocab_size);
        question.tokenize_with(indexer)?;
        Ok(question)
    }

    /// Tokenize with an explicitly supplied indexer.
    ///
    /// The indexer replaces any previously remembered one and is
    /// stored for future tokenize() calls. Returns the freshly
    /// computed index sequence.
    pub fn tokenize_with(&mut self, indexer: Arc<dyn TextIndexer>) -> VqaResult<&[u32]> {
        self.tokens  = indexer.indices(&self.text)?;
        self.indexer = Some(indexer);
        Ok(&self.tokens)
    }

    /// Re-tokenize with the remembered indexer.
    ///
    /// Fails with a precondition error if no indexer was ever
    /// supplied — there is no implicit default.
    pub fn tokenize(&mut self) -> VqaResult<&[u32]> {
        let indexer = self.indexer.clone().ok_or_else(|| {
            VqaError::Precondition(format!(
                "question {} has no tokenizer: supply one at construction or via tokenize_with",
                self.id
            ))
        })?;
        self.tokens = indexer.indices(&self.text)?;
        Ok(&self.tokens)
    }

    /// The current token-index sequence — empty if never tokenized.
    /// Pure accessor, never tokenizes implicitly.
    pub fn tokens(&self) -> &[u32] {
        &self.tokens
    }

    /// Question length measured in tokens
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn image_id(&self) -> u64 {
        self.image_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }
}
