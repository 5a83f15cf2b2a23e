//! # Colour Quantizer
//!
//! Reduces per-channel colour resolution to the era's bit depth by floor
//! division into evenly spaced levels. The floor (rather than round) is what
//! crushes shadows toward black, matching the reference era looks; it must
//! not be "fixed" to rounding.

use crate::pipeline::types::PixelBuffer;

/// Depth at or above which no quantization is applied
pub const FULL_COLOR_DEPTH: u8 = 24;

/// Quantize R, G and B to `2^color_depth` evenly spaced levels, leaving
/// alpha untouched. No-op at 24 bits or more.
pub fn quantize(buf: &mut PixelBuffer, color_depth: u8) {
    if color_depth >= FULL_COLOR_DEPTH {
        return;
    }

    let levels = 1u32 << color_depth;
    // Power-of-two step, so the divisions below stay exact in binary
    let step = 256.0 / levels as f64;

    for pixel in buf.as_image_mut().pixels_mut() {
        for c in pixel.0.iter_mut().take(3) {
            *c = ((*c as f64 / step).floor() * step) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_buffer() -> PixelBuffer {
        let mut buf = PixelBuffer::new(256, 1);
        for x in 0..256u32 {
            let v = x as u8;
            buf.set_pixel(x, 0, [v, v, v, 255]);
        }
        buf
    }

    #[test]
    fn test_depth_6_values_are_multiples_of_step() {
        let mut buf = gradient_buffer();
        quantize(&mut buf, 6);

        // step = 256 / 64 = 4
        let mut max = 0u8;
        for x in 0..256u32 {
            let p = buf.get_pixel(x, 0);
            assert_eq!(p[0] % 4, 0);
            max = max.max(p[0]);
        }
        // floor(255/4)*4: the top level is 252, never 255 (floor bias)
        assert_eq!(max, 252);
    }

    #[test]
    fn test_depth_8_is_identity() {
        let mut buf = gradient_buffer();
        let before = buf.clone();
        quantize(&mut buf, 8);
        assert_eq!(buf.as_image().as_raw(), before.as_image().as_raw());
    }

    #[test]
    fn test_quantization_is_idempotent() {
        let mut once = gradient_buffer();
        quantize(&mut once, 5);
        let mut twice = once.clone();
        quantize(&mut twice, 5);
        assert_eq!(once.as_image().as_raw(), twice.as_image().as_raw());
    }

    #[test]
    fn test_full_depth_is_noop() {
        for depth in [24, 32] {
            let mut buf = gradient_buffer();
            let before = buf.clone();
            quantize(&mut buf, depth);
            assert_eq!(buf.as_image().as_raw(), before.as_image().as_raw());
        }
    }

    #[test]
    fn test_alpha_untouched() {
        let mut buf = PixelBuffer::new_filled(4, 4, [200, 150, 100, 137]);
        quantize(&mut buf, 4);
        assert_eq!(buf.get_pixel(2, 2)[3], 137);
    }

    #[test]
    fn test_level_count_at_depth_2() {
        let mut buf = gradient_buffer();
        quantize(&mut buf, 2);

        let mut seen = std::collections::BTreeSet::new();
        for x in 0..256u32 {
            seen.insert(buf.get_pixel(x, 0)[0]);
        }
        assert_eq!(seen.len(), 4);
        assert!(seen.iter().all(|v| v % 64 == 0));
    }
}
