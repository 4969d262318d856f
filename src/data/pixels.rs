// ============================================================
// Layer 4 — Pixel Array Operations
// ============================================================
// The image half of the encoding contract: resize to a fixed
// square, subtract the per-channel dataset means, and reorder
// the axes to channel-first layout.
//
// Order matters and is part of the numeric contract:
//   1. resize (bilinear)        — (H, W, 3)  → (224, 224, 3)
//   2. subtract channel means   — in native HWC channel order
//   3. transpose to CHW         — (224, 224, 3) → (3, 224, 224)
//
// The means are the classic ImageNet/VGG per-channel averages
// (R 123.68, G 116.779, B 103.939); a model trained against
// mean-subtracted inputs only stays compatible if every
// preparation pass uses these exact constants.
//
// Reference: Simonyan & Zisserman (2015), VGG paper

use ndarray::{Array3, Axis};

/// Edge length of the square model input, in pixels
pub const IMAGE_EDGE: usize = 224;

/// Per-channel means subtracted before the channel transpose,
/// indexed in the loaded array's native channel order (R, G, B)
pub const CHANNEL_MEANS: [f32; 3] = [123.68, 116.779, 103.939];

/// Resize an (H, W, C) array to (new_h, new_w, C) with bilinear
/// interpolation.
///
/// Deterministic: the same input always produces the same output.
/// Sampling uses the top-left aligned convention
/// src = dst * (src_len / dst_len), clamping the 2x2 neighbourhood
/// at the borders.
pub fn resize_bilinear(pixels: &Array3<f32>, new_h: usize, new_w: usize) -> Array3<f32> {
    let (orig_h, orig_w, channels) = pixels.dim();
    let mut resized = Array3::<f32>::zeros((new_h, new_w, channels));

    let scale_y = orig_h as f32 / new_h as f32;
    let scale_x = orig_w as f32 / new_w as f32;

    for y in 0..new_h {
        for x in 0..new_w {
            let src_y = y as f32 * scale_y;
            let src_x = x as f32 * scale_x;

            // The 2x2 source neighbourhood around (src_y, src_x)
            let y1 = (src_y.floor() as usize).min(orig_h - 1);
            let x1 = (src_x.floor() as usize).min(orig_w - 1);
            let y2 = (y1 + 1).min(orig_h - 1);
            let x2 = (x1 + 1).min(orig_w - 1);

            let dy = src_y - y1 as f32;
            let dx = src_x - x1 as f32;

            for c in 0..channels {
                let p11 = pixels[(y1, x1, c)];
                let p12 = pixels[(y1, x2, c)];
                let p21 = pixels[(y2, x1, c)];
                let p22 = pixels[(y2, x2, c)];

                resized[(y, x, c)] = p11 * (1.0 - dx) * (1.0 - dy)
                    + p12 * dx * (1.0 - dy)
                    + p21 * (1.0 - dx) * dy
                    + p22 * dx * dy;
            }
        }
    }

    resized
}

/// Subtract `CHANNEL_MEANS` from an (H, W, 3) array in place,
/// channel by channel, before any axis reordering.
pub fn subtract_channel_means(pixels: &mut Array3<f32>) {
    for (c, mean) in CHANNEL_MEANS.iter().enumerate() {
        pixels.index_axis_mut(Axis(2), c).mapv_inplace(|v| v - mean);
    }
}

/// Reorder an (H, W, C) array into channel-first (C, H, W) layout,
/// materialised contiguously so downstream consumers can read it
/// as a flat buffer.
pub fn to_channel_first(pixels: Array3<f32>) -> Array3<f32> {
    pixels.permuted_axes([2, 0, 1]).as_standard_layout().to_owned()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// An (h, w, 3) array filled with one constant value per channel
    fn solid(h: usize, w: usize, rgb: [f32; 3]) -> Array3<f32> {
        Array3::from_shape_fn((h, w, 3), |(_, _, c)| rgb[c])
    }

    #[test]
    fn test_resize_produces_requested_shape() {
        let small = solid(5, 9, [10.0, 20.0, 30.0]);
        let big   = resize_bilinear(&small, IMAGE_EDGE, IMAGE_EDGE);
        assert_eq!(big.dim(), (IMAGE_EDGE, IMAGE_EDGE, 3));
    }

    #[test]
    fn test_resize_of_constant_image_stays_constant() {
        // Interpolating between equal values must return that value
        let constant = solid(17, 31, [50.0, 100.0, 150.0]);
        let resized  = resize_bilinear(&constant, 8, 8);
        for &v in resized.index_axis(Axis(2), 0).iter() {
            assert!((v - 50.0).abs() < 1e-4);
        }
        for &v in resized.index_axis(Axis(2), 2).iter() {
            assert!((v - 150.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_identity_resize_preserves_pixels() {
        let original = Array3::from_shape_fn((4, 4, 3), |(y, x, c)| (y * 16 + x * 3 + c) as f32);
        let resized  = resize_bilinear(&original, 4, 4);
        assert_eq!(resized, original);
    }

    #[test]
    fn test_mean_subtraction_per_channel() {
        let mut pixels = solid(2, 2, [200.0, 200.0, 200.0]);
        subtract_channel_means(&mut pixels);
        assert!((pixels[(0, 0, 0)] - (200.0 - 123.68)).abs() < 1e-4);
        assert!((pixels[(0, 0, 1)] - (200.0 - 116.779)).abs() < 1e-4);
        assert!((pixels[(0, 0, 2)] - (200.0 - 103.939)).abs() < 1e-4);
    }

    #[test]
    fn test_channel_first_moves_the_channel_axis() {
        let hwc = solid(4, 6, [1.0, 2.0, 3.0]);
        let chw = to_channel_first(hwc);
        assert_eq!(chw.dim(), (3, 4, 6));
        assert_eq!(chw[(0, 2, 5)], 1.0);
        assert_eq!(chw[(1, 0, 0)], 2.0);
        assert_eq!(chw[(2, 3, 1)], 3.0);
    }
}
