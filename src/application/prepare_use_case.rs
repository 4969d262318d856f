// ============================================================
// Layer 2 — Prepare Use Case
// ============================================================
// Orchestrates the full preparation pipeline in order:
//
//   Step 1: Load annotation records    (Layer 4 - data)
//   Step 2: Clean question/answer text (Layer 4 - data)
//   Step 3: Build / load tokenizer     (Layer 6 - infra)
//   Step 4: Split train/validation     (Layer 4 - data)
//   Step 5: Assemble domain samples    (Layer 3 - domain)
//   Step 6: Encode every sample        (Layer 3 - domain)
//   Step 7: Write config + manifest    (Layer 6 - infra)
//
// Step 6 runs the real get_input/get_output encoding over the
// whole dataset. That is not wasted work: it is the validation
// pass that catches undecodable images and out-of-vocabulary
// answer labels while the run is still cheap to rerun, instead
// of three hours into training.

use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{
    loader::JsonDatasetLoader,
    preprocessor::Preprocessor,
    splitter::split_train_val,
};
use crate::domain::answer::Answer;
use crate::domain::image::ImageRef;
use crate::domain::question::Question;
use crate::domain::record::VqaRecord;
use crate::domain::sample::VqaSample;
use crate::domain::split::DatasetSplit;
use crate::domain::traits::{PixelDecode, RecordSource, TextIndexer};
use crate::infra::{
    image_decoder::FileImageDecoder,
    manifest::{Manifest, ManifestWriter},
    tokenizer_store::{HfTextIndexer, TokenizerStore},
};

// ─── Preparation Configuration ───────────────────────────────────────────────
// All parameters of a preparation run. Serialisable so the run
// can be reconstructed from prepare_config.json by a trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    pub annotations:         String,
    pub images_dir:          String,
    pub out_dir:             String,
    pub max_question_len:    usize,
    pub question_vocab_size: usize,
    pub answer_vocab_size:   usize,
    pub train_fraction:      f64,
    pub seed:                u64,
    pub cache_images:        bool,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            annotations:         "data/annotations.json".to_string(),
            images_dir:          "data/images".to_string(),
            out_dir:             "prepared".to_string(),
            max_question_len:    22,
            question_vocab_size: 10000,
            answer_vocab_size:   1000,
            train_fraction:      0.8,
            seed:                42,
            cache_images:        false,
        }
    }
}

// ─── PrepareUseCase ──────────────────────────────────────────────────────────
// Owns the config and runs the full preparation pipeline.
pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Execute the full preparation pipeline end to end.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load annotation records ───────────────────────────────────
        tracing::info!("Loading annotations from '{}'", cfg.annotations);
        let loader  = JsonDatasetLoader::new(&cfg.annotations, &cfg.images_dir);
        let records = loader.load_all()?;
        tracing::info!("Loaded {} usable records", records.len());

        // ── Step 2: Clean question and answer text ────────────────────────────
        let prep = Preprocessor::new();
        let records: Vec<VqaRecord> = records
            .into_iter()
            .map(|mut r| {
                r.question = prep.clean(&r.question);
                r.answer   = r.answer.as_deref().map(|a| prep.clean(a));
                r
            })
            .collect();

        // ── Step 3: Build / load the shared tokenizer ─────────────────────────
        // Questions AND answers feed the corpus: answer words must
        // get vocabulary indices or no one-hot target can name them.
        let corpus: Vec<String> = records
            .iter()
            .flat_map(|r| {
                std::iter::once(r.question.clone()).chain(r.answer.clone())
            })
            .collect();

        let store     = TokenizerStore::new(&cfg.out_dir);
        let tokenizer = store.load_or_build(&corpus, cfg.question_vocab_size)?;
        let indexer: Arc<dyn TextIndexer> = Arc::new(HfTextIndexer::new(tokenizer));

        // ── Step 4: Partition records into splits ─────────────────────────────
        // Records without an answer can only be test samples; the
        // labelled rest is shuffled into train/validation.
        let (labelled, test_records): (Vec<_>, Vec<_>) =
            records.into_iter().partition(|r| r.is_labelled());
        let (train_records, val_records) =
            split_train_val(labelled, cfg.train_fraction, cfg.seed);
        tracing::info!(
            "Split: {} train, {} validation, {} test",
            train_records.len(),
            val_records.len(),
            test_records.len()
        );

        // ── Steps 5+6: Assemble and encode each split ─────────────────────────
        let decoder: Arc<dyn PixelDecode> = Arc::new(FileImageDecoder::new());

        let train = self.assemble_and_encode(
            &train_records, DatasetSplit::Train, &loader, &indexer, &decoder,
        );
        let validation = self.assemble_and_encode(
            &val_records, DatasetSplit::Validation, &loader, &indexer, &decoder,
        );
        let test = self.assemble_and_encode(
            &test_records, DatasetSplit::Test, &loader, &indexer, &decoder,
        );

        // ── Step 7: Persist config and manifest ───────────────────────────────
        let writer = ManifestWriter::new(&cfg.out_dir);
        writer.save_config(cfg)?;
        writer.save_manifest(&Manifest::new(train, validation, test, cfg))?;

        Ok(())
    }

    /// Build samples for one split and run the encoding contract over
    /// each of them. Returns how many samples survived; individual
    /// failures are logged and skipped so one bad record cannot sink
    /// a whole preparation run.
    fn assemble_and_encode(
        &self,
        records: &[VqaRecord],
        split:   DatasetSplit,
        loader:  &JsonDatasetLoader,
        indexer: &Arc<dyn TextIndexer>,
        decoder: &Arc<dyn PixelDecode>,
    ) -> usize {
        let cfg = &self.config;
        let mut encoded = 0usize;

        for record in records {
            match self.build_sample(record, split, loader, indexer, decoder) {
                Ok(sample) => {
                    // The actual encoding contract: fixed-length question
                    // vector + (3, 224, 224) image tensor, and for
                    // labelled splits the one-hot target
                    let input = sample.get_input(cfg.max_question_len, cfg.cache_images);
                    let output = if split.requires_answer() {
                        sample.get_output().map(|_| ())
                    } else {
                        Ok(())
                    };

                    match input.and_then(|_| output) {
                        Ok(()) => encoded += 1,
                        Err(e) => tracing::warn!(
                            "Skipping question {}: encoding failed: {e}",
                            record.question_id
                        ),
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        "Skipping question {}: assembly failed: {e}",
                        record.question_id
                    );
                }
            }
        }

        tracing::info!("{split}: encoded {encoded} of {} records", records.len());
        encoded
    }

    /// Turn one raw record into a fully-validated, tokenized sample.
    fn build_sample(
        &self,
        record:  &VqaRecord,
        split:   DatasetSplit,
        loader:  &JsonDatasetLoader,
        indexer: &Arc<dyn TextIndexer>,
        decoder: &Arc<dyn PixelDecode>,
    ) -> Result<VqaSample> {
        let cfg = &self.config;

        let question = Question::with_indexer(
            record.question_id,
            record.question.as_str(),
            record.image_id,
            cfg.question_vocab_size,
            Arc::clone(indexer),
        )?;

        let image = ImageRef::new(
            record.image_id,
            loader.image_path(record),
            Arc::clone(decoder),
        )?;

        let answer = match (&record.answer, split.requires_answer()) {
            (Some(text), true) => Some(Answer::with_indexer(
                record.question_id,
                text.as_str(),
                record.question_id,
                cfg.answer_vocab_size,
                Arc::clone(indexer),
            )?),
            _ => None,
        };

        Ok(VqaSample::new(question, image, answer, split)?)
    }
}
