// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// The heart of the application — the entities and rules that
// define what a VQA sample IS, independent of any file format,
// tokenizer library, or CLI.
//
// Rules for this layer:
//   - NO tokenizers / image / clap types here
//   - NO file format knowledge (JSON, JPEG, ...)
//   - External services only through the traits in traits.rs
//
// Why keep this layer pure?
//   - Entity tests run with tiny stub services, no fixtures
//   - The tokenizer or image backend can be swapped without
//     touching a single entity
//
// The one deliberate exception: ndarray. Tensors ARE the
// domain vocabulary of an encoding pipeline, so Array1/Array3
// appear in entity signatures.
//
// Reference: Rust Book §7 (Modules)

// Error taxonomy shared by every layer
pub mod error;

// Train / validation / test partition tag
pub mod split;

// Raw annotation record produced by loaders
pub mod record;

// Service abstractions (tokenizer, image decoder, record source)
pub mod traits;

// The three entities a sample is assembled from
pub mod answer;
pub mod image;
pub mod question;

// The sample aggregate with the get_input / get_output contract
pub mod sample;

// Stub services shared by the unit tests
#[cfg(test)]
pub mod testing;
