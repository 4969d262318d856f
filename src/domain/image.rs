// ============================================================
// Layer 3 — Image Reference Entity
// ============================================================
// A validated reference to one image file, plus an optional
// in-memory cache of its decoded pixel array.
//
// The actual decoding is delegated to the PixelDecode service
// supplied at construction — this entity never touches image
// formats itself, it only owns the path and the cache.
//
// The cache is single-assignment (OnceLock): once the pixels
// are stored they are never replaced, so after the first write
// any number of readers — including readers on other threads —
// can share the same Arc without observing mutation. This is
// what makes concurrent sample encoding sound without locks.
//
// Reference: Rust Book §16 (Shared-State Concurrency)
//            std::sync::OnceLock documentation

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use ndarray::Array3;

use crate::domain::error::{VqaError, VqaResult};
use crate::domain::traits::PixelDecode;

/// A validated image reference with a single-assignment pixel cache.
pub struct ImageRef {
    /// Identifier referenced by Question::image_id
    image_id: u64,

    /// Path to the image file — guaranteed to exist at construction
    path: PathBuf,

    /// The decoding service used by load()
    decoder: Arc<dyn PixelDecode>,

    /// Decoded (height, width, 3) pixel array, absent until first load.
    /// Written at most once; later loads with cache=true keep the
    /// first value.
    pixels: OnceLock<Arc<Array3<f32>>>,
}

impl ImageRef {
    /// Create an image reference.
    ///
    /// Fails with NotFound if `path` is not an existing file —
    /// a dangling reference must be caught at assembly time, not
    /// in the middle of an encoding pass.
    pub fn new(
        image_id: u64,
        path:     impl Into<PathBuf>,
        decoder:  Arc<dyn PixelDecode>,
    ) -> VqaResult<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(VqaError::NotFound(path));
        }
        Ok(Self {
            image_id,
            path,
            decoder,
            pixels: OnceLock::new(),
        })
    }

    /// Decode the image from disk.
    ///
    /// Always returns the freshly decoded array; when `cache` is
    /// true it is also stored for later pixel_array() calls. If the
    /// cache was already populated the stored value wins and the
    /// fresh decode is returned without replacing it.
    pub fn load(&self, cache: bool) -> VqaResult<Arc<Array3<f32>>> {
        let decoded = Arc::new(self.decoder.decode(&self.path)?);
        if cache {
            // set() fails only if already populated — first write wins
            let _ = self.pixels.set(Arc::clone(&decoded));
        }
        Ok(decoded)
    }

    /// The decoded pixel array, from cache when available.
    ///
    /// With caching enabled, repeated calls return the same Arc —
    /// the image is decoded from disk exactly once.
    pub fn pixel_array(&self, cache: bool) -> VqaResult<Arc<Array3<f32>>> {
        if let Some(pixels) = self.pixels.get() {
            return Ok(Arc::clone(pixels));
        }
        self.load(cache)
    }

    /// True once a decoded array is held in memory
    pub fn is_loaded(&self) -> bool {
        self.pixels.get().is_some()
    }

    pub fn image_id(&self) -> u64 {
        self.image_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::{existing_test_file, CountingDecoder};

    #[test]
    fn test_missing_path_fails_with_not_found() {
        let decoder = Arc::new(CountingDecoder::solid(4, 4, [10.0, 20.0, 30.0]));
        let err = ImageRef::new(7, "/definitely/not/a/real/image.jpg", decoder).unwrap_err();
        assert!(matches!(err, VqaError::NotFound(_)));
    }

    #[test]
    fn test_cached_load_decodes_exactly_once() {
        let file    = existing_test_file("cached_load.bin");
        let decoder = Arc::new(CountingDecoder::solid(4, 4, [10.0, 20.0, 30.0]));
        let image   = ImageRef::new(7, &file, Arc::clone(&decoder) as Arc<dyn PixelDecode>).unwrap();

        assert!(!image.is_loaded());
        let first  = image.pixel_array(true).unwrap();
        let second = image.pixel_array(true).unwrap();

        // Same Arc both times, one decode total
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(decoder.calls(), 1);
        assert!(image.is_loaded());
    }

    #[test]
    fn test_uncached_load_decodes_every_time() {
        let file    = existing_test_file("uncached_load.bin");
        let decoder = Arc::new(CountingDecoder::solid(2, 2, [0.0, 0.0, 0.0]));
        let image   = ImageRef::new(8, &file, Arc::clone(&decoder) as Arc<dyn PixelDecode>).unwrap();

        image.pixel_array(false).unwrap();
        image.pixel_array(false).unwrap();

        assert_eq!(decoder.calls(), 2);
        assert!(!image.is_loaded());
    }

    #[test]
    fn test_decoded_shape_is_height_width_channels() {
        let file    = existing_test_file("decoded_shape.bin");
        let decoder = Arc::new(CountingDecoder::solid(6, 9, [1.0, 2.0, 3.0]));
        let image   = ImageRef::new(9, &file, decoder as Arc<dyn PixelDecode>).unwrap();

        let pixels = image.pixel_array(true).unwrap();
        assert_eq!(pixels.dim(), (6, 9, 3));
    }
}
