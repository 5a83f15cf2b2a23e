//! # Encoder
//!
//! Serializes the final buffer to JPEG at a fixed quality. RGBA is flattened
//! over black first: the daguerreotype edge mask lowers alpha, and JPEG has
//! no alpha channel, so reduced coverage must become darkness.

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, ImageEncoder, RgbImage};

use crate::error::PipelineError;
use crate::pipeline::types::PixelBuffer;

/// JPEG quality used for every artifact (canvas `toDataURL` quality 0.95)
pub const JPEG_QUALITY: u8 = 95;

/// Encode the buffer as JPEG bytes.
///
/// A zero-area buffer is an error, never a degenerate artifact.
pub fn encode_jpeg(buf: &PixelBuffer, quality: u8) -> Result<Vec<u8>, PipelineError> {
    let (width, height) = (buf.width(), buf.height());
    if width == 0 || height == 0 {
        return Err(PipelineError::EmptyFrame { width, height });
    }

    let rgb = flatten_over_black(buf);

    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    encoder
        .write_image(rgb.as_raw(), width, height, ColorType::Rgb8)
        .map_err(|e| PipelineError::EncodingFailed { reason: e.to_string() })?;

    Ok(bytes)
}

fn flatten_over_black(buf: &PixelBuffer) -> RgbImage {
    RgbImage::from_fn(buf.width(), buf.height(), |x, y| {
        let p = buf.get_pixel(x, y);
        let a = p[3] as u16;
        image::Rgb([
            (p[0] as u16 * a / 255) as u8,
            (p[1] as u16 * a / 255) as u8,
            (p[2] as u16 * a / 255) as u8,
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_area_buffer_is_rejected() {
        let buf = PixelBuffer::new(0, 0);
        let err = encode_jpeg(&buf, JPEG_QUALITY).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyFrame { width: 0, height: 0 }));
    }

    #[test]
    fn test_encode_produces_jpeg_magic() {
        let buf = PixelBuffer::new_filled(16, 16, [128, 128, 128, 255]);
        let bytes = encode_jpeg(&buf, JPEG_QUALITY).unwrap();
        assert!(bytes.len() > 2);
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let buf = PixelBuffer::new_filled(32, 32, [90, 140, 200, 255]);
        let a = encode_jpeg(&buf, JPEG_QUALITY).unwrap();
        let b = encode_jpeg(&buf, JPEG_QUALITY).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_alpha_flattens_to_black() {
        let transparent = PixelBuffer::new_filled(8, 8, [255, 255, 255, 0]);
        let rgb = flatten_over_black(&transparent);
        assert_eq!(rgb.get_pixel(4, 4).0, [0, 0, 0]);

        let half = PixelBuffer::new_filled(8, 8, [255, 255, 255, 128]);
        let rgb = flatten_over_black(&half);
        assert_eq!(rgb.get_pixel(4, 4).0[0], 128);
    }
}
