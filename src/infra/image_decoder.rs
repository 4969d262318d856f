// ============================================================
// Layer 6 — File Image Decoder
// ============================================================
// The production PixelDecode implementation: decodes image
// files (JPEG, PNG, ...) with the image crate and converts
// them to the (height, width, 3) f32 layout the domain layer
// works with.
//
// Conversion rules:
//   - every image is forced to RGB8, so grayscale and RGBA
//     sources come out as three channels too
//   - channel order is R, G, B — matching the order of the
//     CHANNEL_MEANS constants applied later
//   - values are the raw 0..=255 intensities as f32, NOT
//     rescaled to 0..1 (mean subtraction expects 0..255)
//
// Reference: image crate documentation

use std::path::Path;

use ndarray::Array3;

use crate::domain::error::{VqaError, VqaResult};
use crate::domain::traits::PixelDecode;

/// Decodes image files from disk into raw pixel arrays.
pub struct FileImageDecoder;

impl FileImageDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileImageDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelDecode for FileImageDecoder {
    fn decode(&self, path: &Path) -> VqaResult<Array3<f32>> {
        let decoded = image::open(path).map_err(|e| VqaError::Decode {
            path:   path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();

        // ImageBuffer stores row-major RGB triples, which is exactly
        // the (height, width, 3) layout Array3 expects
        let raw = rgb.into_raw();
        let pixels: Vec<f32> = raw.into_iter().map(f32::from).collect();

        Array3::from_shape_vec((height as usize, width as usize, 3), pixels).map_err(|e| {
            VqaError::Decode {
                path:   path.to_path_buf(),
                reason: format!("unexpected pixel buffer shape: {e}"),
            }
        })
    }
}
