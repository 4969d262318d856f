// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Shuffles labelled records and splits them into the training
// and validation populations before samples are assembled.
//
// Why shuffle before splitting?
//   Annotation files are usually ordered by image id, so
//   without shuffling the validation set would cover only the
//   last images of the collection. Shuffling gives both sets
//   a representative mix.
//
// The shuffle is seeded (StdRng) so a preparation run is
// reproducible: the same seed always yields the same
// train/validation membership, which keeps the written
// manifest meaningful across reruns.
//
// Uses Fisher-Yates via rand::seq::SliceRandom, the standard
// unbiased shuffle.
//
// Reference: rand crate documentation

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffle `records` with the given seed and split into
/// (train, validation) by `train_fraction` (e.g. 0.8 = 80% train).
pub fn split_train_val<T>(
    mut records:    Vec<T>,
    train_fraction: f64,
    seed:           u64,
) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    records.shuffle(&mut rng);

    let total    = records.len();
    let split_at = ((total as f64) * train_fraction).round() as usize;
    // Clamp so tiny datasets never panic
    let split_at = split_at.min(total);

    let validation = records.split_off(split_at);

    tracing::debug!(
        "Split {} records: {} train, {} validation",
        total,
        records.len(),
        validation.len()
    );

    (records, validation)
}
