// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Concrete implementations of the domain's service seams plus
// run persistence:
//
//   tokenizer_store.rs — word-level vocabulary build/save/load
//                        on top of the tokenizers crate, and
//                        the HfTextIndexer adapter that plugs
//                        it into the TextIndexer seam
//
//   image_decoder.rs   — FileImageDecoder, the PixelDecode
//                        implementation backed by the image
//                        crate (JPEG/PNG → raw f32 arrays)
//
//   manifest.rs        — writes prepare_config.json and
//                        manifest.json so a trainer can
//                        reconstruct the encoding parameters
//
// Why is this a separate layer?
//   The domain layer names the contracts; this layer commits
//   to libraries and file formats. Swapping the tokenizer
//   backend or adding a new image format touches only these
//   files.
//
// Reference: Rust Book §7 (Modules)

/// Tokenizer build/persistence and the TextIndexer adapter
pub mod tokenizer_store;

/// Image-file decoding service
pub mod image_decoder;

/// Run config and manifest persistence
pub mod manifest;
