// ============================================================
// Layer 2 — Inspect Use Case
// ============================================================
// Encodes a single sample, selected by question id, and renders
// a human-readable report: raw text, token indices, the padded
// question vector, the image tensor shape, and (for labelled
// records) the one-hot target position.
//
// This is the debugging companion to `prepare`: when a trainer
// misbehaves, the first question is always "what exactly does
// sample N look like after encoding?".

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};

use crate::data::loader::JsonDatasetLoader;
use crate::data::preprocessor::Preprocessor;
use crate::domain::answer::Answer;
use crate::domain::image::ImageRef;
use crate::domain::question::Question;
use crate::domain::sample::VqaSample;
use crate::domain::split::DatasetSplit;
use crate::domain::traits::{PixelDecode, RecordSource, TextIndexer};
use crate::infra::image_decoder::FileImageDecoder;
use crate::infra::tokenizer_store::{HfTextIndexer, TokenizerStore};
use crate::application::prepare_use_case::PrepareConfig;

pub struct InspectUseCase {
    config: PrepareConfig,
}

impl InspectUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Encode the sample for `question_id` and format a report.
    pub fn inspect(&self, question_id: u64) -> Result<String> {
        let cfg = &self.config;

        // The tokenizer must already exist — inspect never builds
        // one, otherwise two inspects could disagree on indices
        let store     = TokenizerStore::new(&cfg.out_dir);
        let tokenizer = store
            .load()
            .context("no tokenizer found — run 'prepare' first")?;
        let indexer: Arc<dyn TextIndexer> = Arc::new(HfTextIndexer::new(tokenizer));

        let loader = JsonDatasetLoader::new(&cfg.annotations, &cfg.images_dir);
        let record = loader
            .load_all()?
            .into_iter()
            .find(|r| r.question_id == question_id)
            .ok_or_else(|| anyhow!("no record with question_id {question_id}"))?;

        let prep     = Preprocessor::new();
        let question_text = prep.clean(&record.question);
        let split = if record.is_labelled() {
            DatasetSplit::Train
        } else {
            DatasetSplit::Test
        };

        // Assemble the one sample
        let question = Question::with_indexer(
            record.question_id,
            question_text.as_str(),
            record.image_id,
            cfg.question_vocab_size,
            Arc::clone(&indexer),
        )?;
        let decoder: Arc<dyn PixelDecode> = Arc::new(FileImageDecoder::new());
        let image = ImageRef::new(record.image_id, loader.image_path(&record), decoder)?;
        let answer = match &record.answer {
            Some(text) if split.requires_answer() => Some(Answer::with_indexer(
                record.question_id,
                prep.clean(text),
                record.question_id,
                cfg.answer_vocab_size,
                Arc::clone(&indexer),
            )?),
            _ => None,
        };
        let sample = VqaSample::new(question, image, answer, split)?;

        // Encode and render
        let (question_vec, image_tensor) = sample.get_input(cfg.max_question_len, false)?;

        let mut report = String::new();
        report.push_str(&format!("question_id: {}\n", record.question_id));
        report.push_str(&format!("image_id:    {}\n", record.image_id));
        report.push_str(&format!("split:       {split}\n"));
        report.push_str(&format!("question:    \"{question_text}\"\n"));
        report.push_str(&format!("tokens:      {:?}\n", sample.question().tokens()));
        report.push_str(&format!("padded ({}): {:?}\n", cfg.max_question_len, question_vec.to_vec()));
        report.push_str(&format!("image shape: {:?}\n", image_tensor.dim()));

        match sample.get_output() {
            Ok(target) => {
                let hot = target.iter().position(|&v| v == 1.0);
                report.push_str(&format!(
                    "target:      one-hot length {}, hot index {:?}\n",
                    target.len(),
                    hot
                ));
            }
            Err(e) => report.push_str(&format!("target:      none ({e})\n")),
        }

        Ok(report)
    }
}
