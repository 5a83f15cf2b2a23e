use chrono::{DateTime, Utc};
use image::{ImageBuffer, Rgba, RgbaImage};

/// A raw source frame handed in by the acquisition collaborator.
///
/// Interleaved 8-bit RGBA; read-only to the pipeline. One of these exists per
/// capture request.
#[derive(Clone, Debug)]
pub struct RawFrame {
    buffer: RgbaImage,
}

impl RawFrame {
    /// Wrap an RGBA image buffer as a source frame
    pub fn new(buffer: RgbaImage) -> Self {
        Self { buffer }
    }

    /// Create a frame from raw interleaved RGBA bytes
    pub fn from_rgba_bytes(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        ImageBuffer::from_raw(width, height, data).map(|buffer| Self { buffer })
    }

    /// Create a frame filled with a single colour (test fixture helper)
    pub fn new_filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let buffer = ImageBuffer::from_fn(width, height, |_, _| Rgba(color));
        Self { buffer }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Width / height; 0.0 for a degenerate frame
    pub fn aspect(&self) -> f32 {
        if self.buffer.height() == 0 {
            0.0
        } else {
            self.buffer.width() as f32 / self.buffer.height() as f32
        }
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.buffer.get_pixel(x, y).0
    }
}

/// A mutable RGBA8 working buffer, owned by whichever pipeline stage is
/// currently transforming it.
///
/// Thin wrapper around an [`RgbaImage`] with the pixel helpers the effect
/// passes need.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    buffer: RgbaImage,
}

impl PixelBuffer {
    /// Create a buffer with the given dimensions filled with opaque black
    pub fn new(width: u32, height: u32) -> Self {
        let buffer = ImageBuffer::from_fn(width, height, |_, _| Rgba([0, 0, 0, 255]));
        Self { buffer }
    }

    /// Create a buffer filled with the specified colour
    pub fn new_filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let buffer = ImageBuffer::from_fn(width, height, |_, _| Rgba(color));
        Self { buffer }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.width() == 0 || self.buffer.height() == 0
    }

    /// Get a pixel at the given coordinates (returns RGBA array)
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.buffer.get_pixel(x, y).0
    }

    /// Get a mutable reference to a pixel at the given coordinates
    pub fn get_pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8; 4] {
        &mut self.buffer.get_pixel_mut(x, y).0
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        self.buffer.put_pixel(x, y, Rgba(color));
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &RgbaImage {
        &self.buffer
    }

    /// Get a mutable reference to the underlying image buffer
    pub fn as_image_mut(&mut self) -> &mut RgbaImage {
        &mut self.buffer
    }
}

/// The encoded output of one successful pipeline run.
///
/// Immutable once created; handed to the gallery/storage collaborator.
#[derive(Clone, Debug)]
pub struct CaptureArtifact {
    /// Encoded JPEG bytes
    pub bytes: Vec<u8>,

    /// Identifier of the era that produced this photo
    pub era_id: String,

    /// Identifier of the aspect format (square/portrait/landscape)
    pub format_id: String,

    /// When the capture completed
    pub timestamp: DateTime<Utc>,
}

impl CaptureArtifact {
    /// Download filename: `{eraIdentifier}-{timestamp}.jpg`
    pub fn filename(&self) -> String {
        format!("{}-{}.jpg", self.era_id, self.timestamp.timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_raw_frame_from_bytes_checks_length() {
        assert!(RawFrame::from_rgba_bytes(2, 2, vec![0u8; 16]).is_some());
        assert!(RawFrame::from_rgba_bytes(2, 2, vec![0u8; 15]).is_none());
    }

    #[test]
    fn test_degenerate_frame_aspect() {
        let frame = RawFrame::new_filled(0, 0, [0, 0, 0, 255]);
        assert_eq!(frame.aspect(), 0.0);
    }

    #[test]
    fn test_pixel_buffer_roundtrip() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.set_pixel(1, 2, [10, 20, 30, 255]);
        assert_eq!(buf.get_pixel(1, 2), [10, 20, 30, 255]);
        buf.get_pixel_mut(1, 2)[0] = 99;
        assert_eq!(buf.get_pixel(1, 2), [99, 20, 30, 255]);
    }

    #[test]
    fn test_artifact_filename() {
        let artifact = CaptureArtifact {
            bytes: vec![],
            era_id: "polaroid".to_string(),
            format_id: "square".to_string(),
            timestamp: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        };
        assert_eq!(artifact.filename(), "polaroid-1700000000000.jpg");
    }
}
