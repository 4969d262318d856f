// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish one
// user-visible goal per use case:
//
//   prepare_use_case — the full dataset preparation pipeline
//   inspect_use_case — encode and pretty-print a single sample
//
// Rules for this layer:
//   - No tensor math here (that's Layer 4 helpers)
//   - No printing here (that's Layer 1, the CLI)
//   - No direct file-format code (Layers 4 and 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The dataset preparation workflow
pub mod prepare_use_case;

// The single-sample debugging workflow
pub mod inspect_use_case;
