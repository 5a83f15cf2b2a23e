use std::fmt;
use std::str::FromStr;

/// Target output shape for a capture.
///
/// Output dimensions are fixed per format and always match the target aspect
/// ratio within rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectFormat {
    /// 1:1, 1080x1080
    Square,
    /// 4:5, 1080x1350
    Portrait,
    /// 1.91:1, 1080x566
    Landscape,
}

impl AspectFormat {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    /// Target aspect ratio (width / height)
    pub fn ratio(&self) -> f32 {
        match self {
            Self::Square => 1.0,
            Self::Portrait => 4.0 / 5.0,
            Self::Landscape => 1.91,
        }
    }

    /// Fixed output dimensions (width, height)
    pub fn output_size(&self) -> (u32, u32) {
        match self {
            Self::Square => (1080, 1080),
            Self::Portrait => (1080, 1350),
            Self::Landscape => (1080, 566),
        }
    }

    pub fn all() -> [AspectFormat; 3] {
        [Self::Square, Self::Portrait, Self::Landscape]
    }
}

impl fmt::Display for AspectFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AspectFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "square" => Ok(Self::Square),
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            other => Err(format!(
                "unknown format '{}', expected square, portrait or landscape",
                other
            )),
        }
    }
}

/// A crop rectangle within a source frame, in source pixel coordinates.
///
/// Fractional coordinates are kept; the tone pipeline samples through them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CropRect {
    /// True when the rectangle encloses less than one source pixel
    pub fn is_degenerate(&self) -> bool {
        self.width < 1.0 || self.height < 1.0
    }
}

/// Compute the centred crop rectangle matching the target aspect ratio.
///
/// Crops width when the source is wider than the target, height when it is
/// narrower. A zero-size source yields a degenerate rectangle, which the
/// pipeline rejects before rendering.
pub fn compute_crop(source_width: u32, source_height: u32, format: AspectFormat) -> CropRect {
    let sw = source_width as f32;
    let sh = source_height as f32;
    let target = format.ratio();

    if sh == 0.0 {
        return CropRect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };
    }

    let source_aspect = sw / sh;

    if source_aspect > target {
        // Source is wider, crop the sides
        let width = sh * target;
        CropRect {
            x: (sw - width) / 2.0,
            y: 0.0,
            width,
            height: sh,
        }
    } else {
        // Source is taller, crop top and bottom
        let height = sw / target;
        CropRect {
            x: 0.0,
            y: (sh - height) / 2.0,
            width: sw,
            height,
        }
    }
}
