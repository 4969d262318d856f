// ============================================================
// Layer 4 — Sequence Encoding Helpers
// ============================================================
// The two small numeric contracts shared by the sample
// aggregate: fixed-length question padding and one-hot
// target construction.
//
// Padding convention (pre-padding, pre-truncation):
//   - shorter than max_len → zeros on the LEFT, tokens on the right
//   - longer than max_len  → keep the LAST max_len tokens
//   Index 0 is reserved for [PAD] in the vocabulary, so zero
//   padding never collides with a real word.
//
//   Example, max_len = 8:
//     [3, 7, 1, 2, 9] → [0, 0, 0, 3, 7, 1, 2, 9]
//   Example, max_len = 3:
//     [3, 7, 1, 2, 9] → [1, 2, 9]
//
// This matches the conventional pre-padding semantics of
// sequence models: the most recent tokens sit next to the
// end of the window.
//
// Reference: Keras pad_sequences documentation
//            Rust Book §8 (Vectors)

use ndarray::Array1;

use crate::domain::error::{VqaError, VqaResult};

/// Pad or truncate a token sequence to exactly `max_len` elements.
///
/// Always returns a vector of length `max_len`, regardless of the
/// input length.
pub fn pad_sequence(tokens: &[u32], max_len: usize) -> Array1<u32> {
    let mut padded = Array1::<u32>::zeros(max_len);

    if tokens.len() >= max_len {
        // Keep the right-most max_len tokens
        let tail = &tokens[tokens.len() - max_len..];
        for (slot, &token) in padded.iter_mut().zip(tail) {
            *slot = token;
        }
    } else {
        // Left-pad with zeros: tokens occupy the right end
        let offset = max_len - tokens.len();
        for (i, &token) in tokens.iter().enumerate() {
            padded[offset + i] = token;
        }
    }

    padded
}

/// Build a one-hot vector of length `vocab_size` with a single 1.0
/// at `index`.
///
/// Fails with OutOfRange if `index` does not fit the vocabulary —
/// an out-of-bounds tokenizer output must never silently corrupt
/// a training target.
pub fn one_hot(index: usize, vocab_size: usize) -> VqaResult<Array1<f32>> {
    if index >= vocab_size {
        return Err(VqaError::OutOfRange { index, vocab_size });
    }
    let mut target = Array1::<f32>::zeros(vocab_size);
    target[index] = 1.0;
    Ok(target)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_sequence_is_left_padded() {
        let padded = pad_sequence(&[3, 7, 1, 2, 9], 8);
        assert_eq!(padded.to_vec(), vec![0, 0, 0, 3, 7, 1, 2, 9]);
    }

    #[test]
    fn test_long_sequence_keeps_the_tail() {
        let padded = pad_sequence(&[3, 7, 1, 2, 9], 3);
        assert_eq!(padded.to_vec(), vec![1, 2, 9]);
    }

    #[test]
    fn test_exact_length_is_unchanged() {
        let padded = pad_sequence(&[5, 6, 7], 3);
        assert_eq!(padded.to_vec(), vec![5, 6, 7]);
    }

    #[test]
    fn test_empty_sequence_pads_to_all_zeros() {
        let padded = pad_sequence(&[], 4);
        assert_eq!(padded.to_vec(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_one_hot_sets_exactly_one_entry() {
        let target = one_hot(42, 1000).unwrap();
        assert_eq!(target.len(), 1000);
        assert_eq!(target[42], 1.0);
        assert_eq!(target.sum(), 1.0);
    }

    #[test]
    fn test_one_hot_rejects_out_of_range_index() {
        let err = one_hot(1000, 1000).unwrap_err();
        assert!(matches!(
            err,
            VqaError::OutOfRange { index: 1000, vocab_size: 1000 }
        ));
    }
}
