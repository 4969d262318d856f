// ============================================================
// Layer 3 — Answer Entity
// ============================================================
// A single ground-truth answer: its identifier, the id of the
// question it belongs to, the raw text, and the token-index
// sequence used to build the one-hot training target.
//
// vocab_size here is the size of the ANSWER label space and
// therefore the length of the one-hot output vector — it is
// not the question vocabulary.
//
// Same lazy-tokenization contract as Question: the indexer is
// supplied explicitly and remembered, never pulled from any
// global default.

use std::sync::Arc;

use crate::domain::error::{VqaError, VqaResult};
use crate::domain::traits::TextIndexer;

/// A validated VQA answer with its lazily-computed token indices.
pub struct Answer {
    /// Unique answer identifier
    id: u64,

    /// Identifier of the question this answer belongs to
    question_id: u64,

    /// The raw answer text
    text: String,

    /// Size of the answer label space — the one-hot output length
    vocab_size: usize,

    /// Token-index sequence, empty until tokenized
    tokens: Vec<u32>,

    /// The indexer this answer was last tokenized with
    indexer: Option<Arc<dyn TextIndexer>>,
}

impl Answer {
    /// Create an answer that has not been tokenized yet.
    pub fn new(id: u64, text: impl Into<String>, question_id: u64, vocab_size: usize) -> Self {
        Self {
            id,
            question_id,
            text: text.into(),
            vocab_size,
            tokens: Vec::new(),
            indexer: None,
        }
    }

    /// Create an answer and tokenize it immediately with `indexer`.
    pub fn with_indexer(
        id:          u64,
        text:        impl Into<String>,
        question_id: u64,
        vocab_size:  usize,
        indexer:     Arc<dyn TextIndexer>,
    ) -> VqaResult<Self> {
        let mut answer = Self::new(id, text, question_id, vocab_size);
        answer.tokenize_with(indexer)?;
        Ok(answer)
    }

    /// Tokenize with an explicitly supplied indexer, remembering it
    /// for future tokenize() calls.
    pub fn tokenize_with(&mut self, indexer: Arc<dyn TextIndexer>) -> VqaResult<&[u32]> {
        self.tokens  = indexer.indices(&self.text)?;
        self.indexer = Some(indexer);
        Ok(&self.tokens)
    }

    /// Re-tokenize with the remembered indexer.
    pub fn tokenize(&mut self) -> VqaResult<&[u32]> {
        let indexer = self.indexer.clone().ok_or_else(|| {
            VqaError::Precondition(format!(
                "answer {} has no tokenizer: supply one at construction or via tokenize_with",
                self.id
            ))
        })?;
        self.tokens = indexer.indices(&self.text)?;
        Ok(&self.tokens)
    }

    /// The current token-index sequence — empty if never tokenized.
    pub fn tokens(&self) -> &[u32] {
        &self.tokens
    }

    /// Answer length measured in tokens
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn question_id(&self) -> u64 {
        self.question_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the one-hot target vector built from this answer
    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::MapIndexer;

    #[test]
    fn test_new_answer_has_no_tokens() {
        let a = Answer::new(4, "red", 1, 1000);
        assert!(a.tokens().is_empty());
        assert_eq!(a.vocab_size(), 1000);
    }

    #[test]
    fn test_with_indexer_tokenizes_immediately() {
        let a = Answer::with_indexer(4, "red", 1, 1000, Arc::new(MapIndexer::single("red", 42)))
            .unwrap();
        assert_eq!(a.tokens(), &[42]);
        assert_eq!(a.token_count(), 1);
    }

    #[test]
    fn test_tokenize_without_indexer_is_a_precondition_error() {
        let mut a = Answer::new(4, "red", 1, 1000);
        assert!(matches!(a.tokenize().unwrap_err(), VqaError::Precondition(_)));
    }

    #[test]
    fn test_tokenize_is_idempotent() {
        let mut a = Answer::new(4, "red", 1, 1000);
        let first: Vec<u32> = a
            .tokenize_with(Arc::new(MapIndexer::single("red", 42)))
            .unwrap()
            .to_vec();
        let second: Vec<u32> = a.tokenize().unwrap().to_vec();
        assert_eq!(first, second);
        assert_eq!(first, vec![42]);
    }
}
