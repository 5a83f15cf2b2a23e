//! # Tone Pipeline
//!
//! Draws the cropped source region into the fixed output dimensions with
//! nearest-neighbour sampling (deliberately unsmoothed, so era-appropriate
//! pixelation survives), applies the era's ordered tone adjustments, and adds
//! motion ghosting for long-exposure eras.

use crate::{
    catalog::{EraDefinition, ToneAdjustment},
    effects::blend,
    pipeline::crop::{AspectFormat, CropRect},
    pipeline::types::{PixelBuffer, RawFrame},
};

/// Number of ghost frames composited for a long exposure
pub const GHOST_FRAMES: u32 = 3;
/// Opacity of each ghost frame
pub const GHOST_OPACITY: f32 = 0.3;
/// Blur radius applied to each ghost frame, in pixels
pub const GHOST_BLUR: f32 = 2.0;

/// Render the cropped region of `frame` into the format's output dimensions
/// and apply the era's base tone transform.
pub fn render_base(
    frame: &RawFrame,
    crop: CropRect,
    format: AspectFormat,
    era: &EraDefinition,
) -> PixelBuffer {
    let (out_w, out_h) = format.output_size();
    let mut out = PixelBuffer::new(out_w, out_h);

    // Degenerate sources are rejected by the pipeline before this point
    if frame.width() == 0 || frame.height() == 0 {
        return out;
    }

    // Nearest-neighbour resample of the crop rectangle
    for oy in 0..out_h {
        let sy = crop.y + (oy as f32 + 0.5) * crop.height / out_h as f32;
        let sy = (sy.floor() as i64).clamp(0, frame.height() as i64 - 1) as u32;
        for ox in 0..out_w {
            let sx = crop.x + (ox as f32 + 0.5) * crop.width / out_w as f32;
            let sx = (sx.floor() as i64).clamp(0, frame.width() as i64 - 1) as u32;
            out.set_pixel(ox, oy, frame.get_pixel(sx, sy));
        }
    }

    for adjustment in era.tone {
        apply_adjustment(&mut out, *adjustment);
    }

    out
}

/// Apply one tone adjustment in place
pub fn apply_adjustment(buf: &mut PixelBuffer, adjustment: ToneAdjustment) {
    match adjustment {
        ToneAdjustment::Grayscale(amount) => apply_matrix(buf, grayscale_matrix(amount)),
        ToneAdjustment::Sepia(amount) => apply_matrix(buf, sepia_matrix(amount)),
        ToneAdjustment::Saturate(amount) => apply_matrix(buf, saturate_matrix(amount)),
        ToneAdjustment::HueRotate(degrees) => apply_matrix(buf, hue_rotate_matrix(degrees)),
        ToneAdjustment::Contrast(amount) => {
            map_channels(buf, |c| (c - 127.5) * amount + 127.5)
        }
        ToneAdjustment::Brightness(amount) => map_channels(buf, |c| c * amount),
        ToneAdjustment::Blur(radius) => blend::box_blur(buf, radius),
    }
}

/// Composite blurred ghost frames onto the buffer, simulating the motion
/// smear of a multi-second exposure. Each pass snapshots the current buffer,
/// blurs the snapshot, and blends it back at reduced opacity.
pub fn apply_long_exposure(buf: &mut PixelBuffer) {
    for _ in 0..GHOST_FRAMES {
        let mut ghost = buf.clone();
        blend::box_blur(&mut ghost, GHOST_BLUR);
        blend::composite(buf, &ghost, GHOST_OPACITY, 0, 0);
    }
}

fn map_channels<F: Fn(f32) -> f32>(buf: &mut PixelBuffer, f: F) {
    for pixel in buf.as_image_mut().pixels_mut() {
        for c in pixel.0.iter_mut().take(3) {
            *c = f(*c as f32).round().clamp(0.0, 255.0) as u8;
        }
    }
}

fn apply_matrix(buf: &mut PixelBuffer, m: [[f32; 3]; 3]) {
    for pixel in buf.as_image_mut().pixels_mut() {
        let [r, g, b] = [pixel.0[0] as f32, pixel.0[1] as f32, pixel.0[2] as f32];
        for (i, row) in m.iter().enumerate() {
            let v = row[0] * r + row[1] * g + row[2] * b;
            pixel.0[i] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
}

// Luminance weights shared by the grayscale and saturation matrices
const LUM_R: f32 = 0.2126;
const LUM_G: f32 = 0.7152;
const LUM_B: f32 = 0.0722;

fn grayscale_matrix(amount: f32) -> [[f32; 3]; 3] {
    let a = amount.clamp(0.0, 1.0);
    let keep = 1.0 - a;
    [
        [LUM_R * a + keep, LUM_G * a, LUM_B * a],
        [LUM_R * a, LUM_G * a + keep, LUM_B * a],
        [LUM_R * a, LUM_G * a, LUM_B * a + keep],
    ]
}

fn sepia_matrix(amount: f32) -> [[f32; 3]; 3] {
    let a = amount.clamp(0.0, 1.0);
    let keep = 1.0 - a;
    [
        [0.393 * a + keep, 0.769 * a, 0.189 * a],
        [0.349 * a, 0.686 * a + keep, 0.168 * a],
        [0.272 * a, 0.534 * a, 0.131 * a + keep],
    ]
}

fn saturate_matrix(s: f32) -> [[f32; 3]; 3] {
    [
        [LUM_R + (1.0 - LUM_R) * s, LUM_G * (1.0 - s), LUM_B * (1.0 - s)],
        [LUM_R * (1.0 - s), LUM_G + (1.0 - LUM_G) * s, LUM_B * (1.0 - s)],
        [LUM_R * (1.0 - s), LUM_G * (1.0 - s), LUM_B + (1.0 - LUM_B) * s],
    ]
}

fn hue_rotate_matrix(degrees: f32) -> [[f32; 3]; 3] {
    let rad = degrees.to_radians();
    let (sin, cos) = rad.sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EraCatalog;
    use crate::pipeline::crop::compute_crop;

    fn mid_gray_frame() -> RawFrame {
        RawFrame::new_filled(1920, 1080, [128, 128, 128, 255])
    }

    #[test]
    fn test_modern_render_is_identity_on_gray() {
        let catalog = EraCatalog::new();
        let era = catalog.get("modern").unwrap();
        let frame = mid_gray_frame();
        let crop = compute_crop(frame.width(), frame.height(), AspectFormat::Square);

        let out = render_base(&frame, crop, AspectFormat::Square, era);
        assert_eq!(out.width(), 1080);
        assert_eq!(out.height(), 1080);
        for y in [0, 540, 1079] {
            for x in [0, 540, 1079] {
                assert_eq!(out.get_pixel(x, y), [128, 128, 128, 255]);
            }
        }
    }

    #[test]
    fn test_grayscale_eras_are_fully_desaturated() {
        let catalog = EraCatalog::new();
        let frame = RawFrame::new_filled(640, 480, [210, 90, 40, 255]);

        for id in ["daguerreotype", "wet-plate", "early-film", "noir"] {
            let era = catalog.get(id).unwrap();
            let crop = compute_crop(frame.width(), frame.height(), AspectFormat::Square);
            let out = render_base(&frame, crop, AspectFormat::Square, era);
            for y in (0..out.height()).step_by(97) {
                for x in (0..out.width()).step_by(97) {
                    let p = out.get_pixel(x, y);
                    assert_eq!(p[0], p[1], "{} not desaturated at ({},{})", id, x, y);
                    assert_eq!(p[1], p[2], "{} not desaturated at ({},{})", id, x, y);
                }
            }
        }
    }

    #[test]
    fn test_contrast_pushes_away_from_midpoint() {
        let mut buf = PixelBuffer::new_filled(2, 1, [100, 100, 100, 255]);
        buf.set_pixel(1, 0, [180, 180, 180, 255]);
        apply_adjustment(&mut buf, ToneAdjustment::Contrast(1.5));

        assert!(buf.get_pixel(0, 0)[0] < 100);
        assert!(buf.get_pixel(1, 0)[0] > 180);
    }

    #[test]
    fn test_brightness_scales_channels() {
        let mut buf = PixelBuffer::new_filled(1, 1, [100, 50, 200, 255]);
        apply_adjustment(&mut buf, ToneAdjustment::Brightness(0.5));
        assert_eq!(buf.get_pixel(0, 0), [50, 25, 100, 255]);
    }

    #[test]
    fn test_saturate_identity_at_one() {
        let mut buf = PixelBuffer::new_filled(1, 1, [100, 150, 200, 255]);
        apply_adjustment(&mut buf, ToneAdjustment::Saturate(1.0));
        assert_eq!(buf.get_pixel(0, 0), [100, 150, 200, 255]);
    }

    #[test]
    fn test_long_exposure_preserves_flat_buffer() {
        // Ghosting a uniform buffer changes nothing away from the edges
        let mut buf = PixelBuffer::new_filled(32, 32, [77, 77, 77, 255]);
        apply_long_exposure(&mut buf);
        assert_eq!(buf.get_pixel(16, 16), [77, 77, 77, 255]);
    }

    #[test]
    fn test_long_exposure_smears_detail() {
        let mut buf = PixelBuffer::new_filled(33, 33, [0, 0, 0, 255]);
        buf.set_pixel(16, 16, [255, 255, 255, 255]);
        apply_long_exposure(&mut buf);

        // Energy bled into the neighbourhood
        assert!(buf.get_pixel(14, 16)[0] > 0);
        assert!(buf.get_pixel(16, 16)[0] < 255);
    }
}
