// ============================================================
// Layer 3 — VQA Sample Aggregate
// ============================================================
// Binds one Question, one ImageRef, and — outside the test
// split — one Answer into the unit a model consumes.
//
// The two operations that matter numerically:
//
//   get_input(max_question_len, cache_image)
//     question tokens → zero-left-padded vector of exactly
//                       max_question_len elements
//     image pixels    → bilinear resize to 224×224×3,
//                       per-channel mean subtraction (HWC order),
//                       transpose to channel-first (3, 224, 224)
//
//   get_output()
//     answer tokens   → one-hot f32 vector of length
//                       answer.vocab_size, hot at the FIRST
//                       answer token
//
// A sample is immutable after construction except for the lazy
// caches inside its owned entities (token sequences, decoded
// pixels). Test-split samples never hold an answer, so asking
// them for an output is a precondition violation.

use ndarray::{Array1, Array3};

use crate::data::encoding::{one_hot, pad_sequence};
use crate::data::pixels::{resize_bilinear, subtract_channel_means, to_channel_first, IMAGE_EDGE};
use crate::domain::answer::Answer;
use crate::domain::error::{VqaError, VqaResult};
use crate::domain::image::ImageRef;
use crate::domain::question::Question;
use crate::domain::split::DatasetSplit;

/// One model-ready VQA training unit.
pub struct VqaSample {
    question: Question,
    image:    ImageRef,
    answer:   Option<Answer>,
    split:    DatasetSplit,
}

impl VqaSample {
    /// Assemble a sample from validated entities.
    ///
    /// For train/validation splits the answer is mandatory and its
    /// absence is an InvalidArgument error. For the test split any
    /// supplied answer is dropped — a test sample must never be
    /// able to leak a label.
    pub fn new(
        question: Question,
        image:    ImageRef,
        answer:   Option<Answer>,
        split:    DatasetSplit,
    ) -> VqaResult<Self> {
        let answer = if split.requires_answer() {
            match answer {
                Some(a) => Some(a),
                None => {
                    return Err(VqaError::InvalidArgument(format!(
                        "a {split} sample requires an answer (question {})",
                        question.id()
                    )))
                }
            }
        } else {
            None
        };

        Ok(Self { question, image, answer, split })
    }

    /// Encode the (question, image) input pair.
    ///
    /// The question must already be tokenized — this method never
    /// tokenizes implicitly, so an untokenized question simply
    /// yields an all-zero vector, exactly like an empty question.
    /// Establishing the tokenization upstream is the assembly
    /// pipeline's responsibility.
    ///
    /// `cache_image` controls whether the decoded full-size pixel
    /// array is retained inside the ImageRef for later calls.
    pub fn get_input(
        &self,
        max_question_len: usize,
        cache_image:      bool,
    ) -> VqaResult<(Array1<u32>, Array3<f32>)> {
        // Question: fixed-length padded token vector
        let question = pad_sequence(self.question.tokens(), max_question_len);

        // Image: resize → mean-subtract (still HWC) → channel-first
        let pixels      = self.image.pixel_array(cache_image)?;
        let mut resized = resize_bilinear(&pixels, IMAGE_EDGE, IMAGE_EDGE);
        subtract_channel_means(&mut resized);
        let image = to_channel_first(resized);

        Ok((question, image))
    }

    /// Encode the one-hot training target.
    ///
    /// Only the first answer token is used — multi-word answers are
    /// deliberately not supported, this is single-label
    /// classification and widening it would change the output
    /// tensor semantics.
    pub fn get_output(&self) -> VqaResult<Array1<f32>> {
        if self.split == DatasetSplit::Test {
            return Err(VqaError::Precondition(
                "test-split samples have no answer and no output encoding".to_string(),
            ));
        }

        // The constructor guarantees an answer for non-test splits
        let answer = self.answer.as_ref().ok_or_else(|| {
            VqaError::Precondition("sample has no answer attached".to_string())
        })?;

        let first = *answer.tokens().first().ok_or_else(|| {
            VqaError::Precondition(format!(
                "answer {} has no tokens: tokenize it before encoding the output",
                answer.id()
            ))
        })?;

        one_hot(first as usize, answer.vocab_size())
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    /// The attached answer — always None for test-split samples
    pub fn answer(&self) -> Option<&Answer> {
        self.answer.as_ref()
    }

    pub fn split(&self) -> DatasetSplit {
        self.split
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::{existing_test_file, CountingDecoder, MapIndexer};
    use crate::domain::traits::PixelDecode;
    use std::sync::Arc;

    /// Builds the worked example from the encoding contract:
    /// question "what color is the ball" over a 13x7 solid image,
    /// answer "red" mapped to token 42 in a 1000-label space.
    fn ball_sample(split: DatasetSplit) -> VqaSample {
        let indexer = Arc::new(MapIndexer::ball_vocab());

        let question =
            Question::with_indexer(1, "what color is the ball", 10, 500, Arc::clone(&indexer) as _)
                .unwrap();

        let answer = Answer::with_indexer(4, "red", 1, 1000, indexer as _).unwrap();

        let decoder = Arc::new(CountingDecoder::solid(13, 7, [200.0, 150.0, 100.0]));
        let image = ImageRef::new(
            10,
            existing_test_file("ball_sample.bin"),
            decoder as Arc<dyn PixelDecode>,
        )
        .unwrap();

        let answer = if split == DatasetSplit::Test { None } else { Some(answer) };
        VqaSample::new(question, image, answer, split).unwrap()
    }

    #[test]
    fn test_missing_answer_outside_test_split_is_invalid() {
        let indexer  = Arc::new(MapIndexer::ball_vocab());
        let question = Question::with_indexer(1, "what color is the ball", 10, 500, indexer as _)
            .unwrap();
        let decoder  = Arc::new(CountingDecoder::solid(4, 4, [0.0, 0.0, 0.0]));
        let image    = ImageRef::new(
            10,
            existing_test_file("missing_answer.bin"),
            decoder as Arc<dyn PixelDecode>,
        )
        .unwrap();

        let err = VqaSample::new(question, image, None, DatasetSplit::Train).unwrap_err();
        assert!(matches!(err, VqaError::InvalidArgument(_)));
    }

    #[test]
    fn test_question_vector_is_left_padded_to_max_len() {
        let sample = ball_sample(DatasetSplit::Train);
        let (question, _) = sample.get_input(8, false).unwrap();
        // Tokens [3, 7, 1, 2, 9] left-padded to length 8
        assert_eq!(question.to_vec(), vec![0, 0, 0, 3, 7, 1, 2, 9]);
    }

    #[test]
    fn test_long_question_keeps_last_tokens() {
        let sample = ball_sample(DatasetSplit::Train);
        let (question, _) = sample.get_input(3, false).unwrap();
        assert_eq!(question.to_vec(), vec![1, 2, 9]);
    }

    #[test]
    fn test_image_tensor_is_channel_first_224() {
        let sample = ball_sample(DatasetSplit::Train);
        let (_, image) = sample.get_input(8, false).unwrap();
        assert_eq!(image.dim(), (3, 224, 224));
    }

    #[test]
    fn test_image_tensor_is_mean_subtracted() {
        // Solid 200/150/100 image: after mean removal every pixel of
        // a channel holds value − mean, in R,G,B channel order
        let sample = ball_sample(DatasetSplit::Train);
        let (_, image) = sample.get_input(8, false).unwrap();
        assert!((image[(0, 100, 100)] - (200.0 - 123.68)).abs() < 1e-3);
        assert!((image[(1, 100, 100)] - (150.0 - 116.779)).abs() < 1e-3);
        assert!((image[(2, 100, 100)] - (100.0 - 103.939)).abs() < 1e-3);
    }

    #[test]
    fn test_output_is_one_hot_at_first_answer_token() {
        let sample = ball_sample(DatasetSplit::Train);
        let target = sample.get_output().unwrap();
        assert_eq!(target.len(), 1000);
        assert_eq!(target[42], 1.0);
        assert_eq!(target.sum(), 1.0);
    }

    #[test]
    fn test_test_split_sample_has_no_output() {
        let sample = ball_sample(DatasetSplit::Test);
        assert!(sample.answer().is_none());
        let err = sample.get_output().unwrap_err();
        assert!(matches!(err, VqaError::Precondition(_)));
    }

    #[test]
    fn test_untokenized_answer_is_a_precondition_error() {
        let indexer  = Arc::new(MapIndexer::ball_vocab());
        let question = Question::with_indexer(1, "what color is the ball", 10, 500, indexer as _)
            .unwrap();
        let decoder  = Arc::new(CountingDecoder::solid(4, 4, [0.0, 0.0, 0.0]));
        let image    = ImageRef::new(
            10,
            existing_test_file("untokenized_answer.bin"),
            decoder as Arc<dyn PixelDecode>,
        )
        .unwrap();
        // Never tokenized — no token to build the one-hot from
        let answer = Answer::new(4, "red", 1, 1000);

        let sample = VqaSample::new(question, image, Some(answer), DatasetSplit::Train).unwrap();
        assert!(matches!(sample.get_output().unwrap_err(), VqaError::Precondition(_)));
    }

    #[test]
    fn test_out_of_vocabulary_answer_token_is_rejected() {
        let indexer  = Arc::new(MapIndexer::ball_vocab());
        let question = Question::with_indexer(1, "what color is the ball", 10, 500, indexer as _)
            .unwrap();
        let decoder  = Arc::new(CountingDecoder::solid(4, 4, [0.0, 0.0, 0.0]));
        let image    = ImageRef::new(
            10,
            existing_test_file("oov_answer.bin"),
            decoder as Arc<dyn PixelDecode>,
        )
        .unwrap();
        // Token 42 cannot index a 10-label output space
        let answer = Answer::with_indexer(4, "red", 1, 10, Arc::new(MapIndexer::single("red", 42)))
            .unwrap();

        let sample = VqaSample::new(question, image, Some(answer), DatasetSplit::Train).unwrap();
        assert!(matches!(
            sample.get_output().unwrap_err(),
            VqaError::OutOfRange { index: 42, vocab_size: 10 }
        ));
    }

    #[test]
    fn test_cache_flag_reaches_the_image_entity() {
        let sample = ball_sample(DatasetSplit::Train);
        sample.get_input(8, false).unwrap();
        assert!(!sample.image().is_loaded());
        sample.get_input(8, true).unwrap();
        assert!(sample.image().is_loaded());
    }
}
