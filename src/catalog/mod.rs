//! # Era Catalog
//!
//! Static table of photographic era definitions, ordered oldest to newest.
//! Each era bundles the tonal base transform, the colour depth of the
//! recording medium, and an exposure class that decides whether long-exposure
//! ghosting is applied. The compositor pass lists live in
//! [`crate::effects::registry`] and are looked up by era identifier.

/// One named adjustment in an era's base tone transform.
///
/// Adjustments apply in the order they appear in [`EraDefinition::tone`],
/// with CSS-filter semantics (amounts of 1.0 are identity for the scaling
/// adjustments, full effect for grayscale/sepia).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToneAdjustment {
    /// Desaturate toward luminance; 1.0 is fully monochrome
    Grayscale(f32),
    /// Shift toward sepia tones; 1.0 is the full sepia matrix
    Sepia(f32),
    /// Saturation multiplier; 1.0 is identity
    Saturate(f32),
    /// Contrast multiplier about mid-gray; 1.0 is identity
    Contrast(f32),
    /// Brightness multiplier; 1.0 is identity
    Brightness(f32),
    /// Hue rotation in degrees
    HueRotate(f32),
    /// Gaussian-style blur radius in pixels
    Blur(f32),
}

/// Exposure class of an era's recording process.
///
/// `Long` exposures get motion ghosting in the tone pipeline; the other
/// classes only label the era.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExposureClass {
    Fast,
    Normal,
    Medium,
    Long,
}

/// A single photographic era preset
#[derive(Debug, Clone)]
pub struct EraDefinition {
    /// Unique identifier, used for compositor dispatch and filenames
    pub id: &'static str,

    /// Human-readable display name
    pub name: &'static str,

    /// Year the process became widespread (display and ordering label only)
    pub year: u16,

    /// Ordered base tone transform
    pub tone: &'static [ToneAdjustment],

    /// Colour depth of the medium in bits; >= 24 means no quantization
    pub color_depth: u8,

    /// Exposure class
    pub exposure: ExposureClass,
}

use ToneAdjustment::*;

const DAGUERREOTYPE_TONE: &[ToneAdjustment] =
    &[Grayscale(1.0), Contrast(1.3), Brightness(0.85), Blur(0.5)];
const WET_PLATE_TONE: &[ToneAdjustment] =
    &[Grayscale(1.0), Contrast(1.4), Brightness(0.95), Blur(0.4)];
const EARLY_FILM_TONE: &[ToneAdjustment] =
    &[Grayscale(1.0), Contrast(0.95), Brightness(0.88)];
const SEPIA_TONE: &[ToneAdjustment] =
    &[Sepia(1.0), Contrast(0.8), Brightness(1.08), Saturate(0.7), Blur(0.6)];
const NOIR_TONE: &[ToneAdjustment] =
    &[Grayscale(1.0), Contrast(1.5), Brightness(0.9)];
const KODACHROME_TONE: &[ToneAdjustment] =
    &[Saturate(1.4), Contrast(1.15), Brightness(0.95), HueRotate(-2.0)];
const POLAROID_TONE: &[ToneAdjustment] =
    &[Contrast(0.75), Saturate(0.85), Brightness(1.15), Blur(0.6)];
const EARLY_DIGITAL_TONE: &[ToneAdjustment] =
    &[Contrast(1.25), Saturate(1.1), Brightness(0.95)];
const SMARTPHONE_HDR_TONE: &[ToneAdjustment] =
    &[Contrast(1.35), Saturate(1.4), Brightness(1.08)];

/// The built-in eras, ordered oldest to newest.
///
/// Array position is the total order used for previous/next navigation;
/// the year is a display label.
const ERAS: &[EraDefinition] = &[
    EraDefinition {
        id: "daguerreotype",
        name: "Daguerreotype",
        year: 1839,
        tone: DAGUERREOTYPE_TONE,
        color_depth: 6, // 64 levels, reduced gradation for the vintage look
        exposure: ExposureClass::Long,
    },
    EraDefinition {
        id: "wet-plate",
        name: "Wet Plate Collodion",
        year: 1855,
        tone: WET_PLATE_TONE,
        color_depth: 7, // 128 levels
        exposure: ExposureClass::Medium,
    },
    EraDefinition {
        id: "early-film",
        name: "Early Film",
        year: 1900,
        tone: EARLY_FILM_TONE,
        color_depth: 8, // 256 shades of gray
        exposure: ExposureClass::Normal,
    },
    EraDefinition {
        id: "sepia",
        name: "Sepia Portrait",
        year: 1930,
        tone: SEPIA_TONE,
        color_depth: 8,
        exposure: ExposureClass::Normal,
    },
    EraDefinition {
        id: "noir",
        name: "Film Noir",
        year: 1948,
        tone: NOIR_TONE,
        color_depth: 8,
        exposure: ExposureClass::Normal,
    },
    EraDefinition {
        id: "kodachrome",
        name: "Kodachrome",
        year: 1960,
        tone: KODACHROME_TONE,
        color_depth: 24, // Full colour but film grain character
        exposure: ExposureClass::Normal,
    },
    EraDefinition {
        id: "polaroid",
        name: "Polaroid",
        year: 1980,
        tone: POLAROID_TONE,
        color_depth: 16, // Limited instant film colour
        exposure: ExposureClass::Normal,
    },
    EraDefinition {
        id: "early-digital",
        name: "Early Digital",
        year: 2000,
        tone: EARLY_DIGITAL_TONE,
        color_depth: 16, // 16-bit colour (65K colours)
        exposure: ExposureClass::Fast,
    },
    EraDefinition {
        id: "smartphone-hdr",
        name: "Smartphone HDR",
        year: 2010,
        tone: SMARTPHONE_HDR_TONE,
        color_depth: 24,
        exposure: ExposureClass::Fast,
    },
    EraDefinition {
        id: "modern",
        name: "Modern",
        year: 2018,
        tone: &[],
        color_depth: 32, // Full colour + alpha
        exposure: ExposureClass::Fast,
    },
];

/// Read-only catalog of the built-in eras
#[derive(Debug, Clone, Copy, Default)]
pub struct EraCatalog;

impl EraCatalog {
    pub fn new() -> Self {
        Self
    }

    /// All eras in timeline order
    pub fn eras(&self) -> &'static [EraDefinition] {
        ERAS
    }

    /// Look up an era by identifier
    pub fn get(&self, id: &str) -> Option<&'static EraDefinition> {
        ERAS.iter().find(|era| era.id == id)
    }

    /// Position of an era in the timeline
    pub fn index_of(&self, id: &str) -> Option<usize> {
        ERAS.iter().position(|era| era.id == id)
    }

    /// The era after the given one, if any (timeline navigation)
    pub fn next(&self, id: &str) -> Option<&'static EraDefinition> {
        self.index_of(id).and_then(|i| ERAS.get(i + 1))
    }

    /// The era before the given one, if any (timeline navigation)
    pub fn previous(&self, id: &str) -> Option<&'static EraDefinition> {
        self.index_of(id)
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| ERAS.get(i))
    }

    pub fn len(&self) -> usize {
        ERAS.len()
    }

    pub fn is_empty(&self) -> bool {
        ERAS.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_eras_present() {
        let catalog = EraCatalog::new();
        for id in [
            "daguerreotype",
            "wet-plate",
            "early-film",
            "sepia",
            "noir",
            "kodachrome",
            "polaroid",
            "early-digital",
            "smartphone-hdr",
            "modern",
        ] {
            assert!(catalog.get(id).is_some(), "missing era {}", id);
        }
        assert_eq!(catalog.len(), 10);
    }

    #[test]
    fn test_identifiers_unique() {
        let catalog = EraCatalog::new();
        for era in catalog.eras() {
            assert_eq!(
                catalog.eras().iter().filter(|e| e.id == era.id).count(),
                1,
                "duplicate era id {}",
                era.id
            );
        }
    }

    #[test]
    fn test_timeline_is_ordered_by_year() {
        let catalog = EraCatalog::new();
        let years: Vec<u16> = catalog.eras().iter().map(|e| e.year).collect();
        let mut sorted = years.clone();
        sorted.sort_unstable();
        assert_eq!(years, sorted);
    }

    #[test]
    fn test_navigation() {
        let catalog = EraCatalog::new();

        assert_eq!(catalog.next("daguerreotype").map(|e| e.id), Some("wet-plate"));
        assert_eq!(catalog.previous("daguerreotype").map(|e| e.id), None);
        assert_eq!(catalog.next("modern").map(|e| e.id), None);
        assert_eq!(catalog.previous("modern").map(|e| e.id), Some("smartphone-hdr"));
    }

    #[test]
    fn test_only_daguerreotype_is_long_exposure() {
        let catalog = EraCatalog::new();
        let long: Vec<&str> = catalog
            .eras()
            .iter()
            .filter(|e| e.exposure == ExposureClass::Long)
            .map(|e| e.id)
            .collect();
        assert_eq!(long, vec!["daguerreotype"]);
    }

    #[test]
    fn test_modern_is_passthrough() {
        let catalog = EraCatalog::new();
        let modern = catalog.get("modern").unwrap();
        assert!(modern.tone.is_empty());
        assert!(modern.color_depth >= 24);
    }
}
