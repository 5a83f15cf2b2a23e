use std::collections::HashMap;

use crate::effects::blend::{BlendMode, GradientStop, Tint};
use crate::effects::passes::{Anchor, Pass};

/// Registry mapping era identifiers to their ordered compositing pass lists.
///
/// Adding a new era means adding one catalog entry and one pass list here;
/// the compositor itself never branches on era identifiers. Order matters:
/// later passes blend over the result of earlier ones.
pub struct EffectRegistry {
    passes: HashMap<&'static str, Vec<Pass>>,
}

impl EffectRegistry {
    /// Create a registry with the pass lists for all built-in eras
    pub fn new() -> Self {
        let mut registry = Self { passes: HashMap::new() };
        registry.register_builtin_eras();
        registry
    }

    fn register_builtin_eras(&mut self) {
        self.passes.insert("daguerreotype", daguerreotype_passes());
        self.passes.insert("wet-plate", wet_plate_passes());
        self.passes.insert("early-film", film_grain_passes());
        self.passes.insert("noir", film_grain_passes());
        self.passes.insert("sepia", sepia_passes());
        self.passes.insert("kodachrome", kodachrome_passes());
        self.passes.insert("polaroid", polaroid_passes());
        self.passes.insert("early-digital", early_digital_passes());
        self.passes.insert("smartphone-hdr", smartphone_hdr_passes());
        // Modern stays clean
        self.passes.insert("modern", Vec::new());
    }

    /// Register or replace a custom pass list
    pub fn register(&mut self, era_id: &'static str, passes: Vec<Pass>) {
        self.passes.insert(era_id, passes);
    }

    /// The ordered pass list for an era; unknown eras get no passes
    pub fn passes(&self, era_id: &str) -> &[Pass] {
        self.passes.get(era_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the era's pass list uses the random source
    pub fn is_stochastic(&self, era_id: &str) -> bool {
        self.passes(era_id).iter().any(Pass::is_stochastic)
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

const WHITE: f32 = 255.0;

/// Metallic sheen, light vignette, then an edge-alpha mask (the plate centre
/// was sharper than its edges)
fn daguerreotype_passes() -> Vec<Pass> {
    vec![
        Pass::Radial {
            anchor: Anchor::Middle,
            inner: 0.05,
            outer: 0.65,
            stops: vec![
                GradientStop::new(0.0, Tint::rgba(WHITE, WHITE, WHITE, 0.15)),
                GradientStop::new(0.6, Tint::rgba(200.0, 200.0, 200.0, 0.0)),
                GradientStop::new(1.0, Tint::rgba(0.0, 0.0, 0.0, 0.45)),
            ],
            blend: BlendMode::SourceOver,
        },
        Pass::Radial {
            anchor: Anchor::Middle,
            inner: 0.3,
            outer: 0.9,
            stops: vec![
                GradientStop::new(0.0, Tint::rgba(WHITE, WHITE, WHITE, 1.0)),
                GradientStop::new(0.6, Tint::rgba(180.0, 180.0, 180.0, 1.0)),
                GradientStop::new(1.0, Tint::rgba(50.0, 50.0, 50.0, 0.4)),
            ],
            blend: BlendMode::Multiply,
        },
        Pass::Radial {
            anchor: Anchor::Middle,
            inner: 0.3,
            outer: 0.6,
            stops: vec![
                GradientStop::new(0.0, Tint::rgba(WHITE, WHITE, WHITE, 1.0)),
                GradientStop::new(0.8, Tint::rgba(WHITE, WHITE, WHITE, 0.9)),
                GradientStop::new(1.0, Tint::rgba(WHITE, WHITE, WHITE, 0.75)),
            ],
            blend: BlendMode::DestinationIn,
        },
    ]
}

/// Uneven exposure with a wandering hot spot, overexposed glow, deep shadows
fn wet_plate_passes() -> Vec<Pass> {
    vec![
        Pass::Radial {
            anchor: Anchor::Window { x_min: 0.3, x_span: 0.4, y_min: 0.2, y_span: 0.3 },
            inner: 0.05,
            outer: 0.4,
            stops: vec![
                GradientStop::new(0.0, Tint::rgba(WHITE, WHITE, WHITE, 0.2)),
                GradientStop::new(1.0, Tint::rgba(WHITE, WHITE, WHITE, 0.0)),
            ],
            blend: BlendMode::SourceOver,
        },
        Pass::SelfComposite { blur: 6.0, brightness: 1.4, opacity: 0.25, offset_x: 0 },
        Pass::Flat {
            tint: Tint::rgba(0.0, 0.0, 0.0, 0.15),
            blend: BlendMode::Multiply,
        },
    ]
}

/// Heavy grain, vertical scratches and dust, shared by early-film and noir
fn film_grain_passes() -> Vec<Pass> {
    vec![
        Pass::Grain { count: 24_000, max_opacity: 0.12 },
        Pass::Scratches { count: 8 },
        Pass::Dust { count: 15 },
    ]
}

/// Warm overlay, romantic softness, warm-gray vignette
fn sepia_passes() -> Vec<Pass> {
    vec![
        Pass::Flat {
            tint: Tint::rgba(120.0, 80.0, 40.0, 0.12),
            blend: BlendMode::SourceOver,
        },
        Pass::SelfComposite { blur: 4.0, brightness: 1.1, opacity: 0.2, offset_x: 0 },
        Pass::Radial {
            anchor: Anchor::Middle,
            inner: 0.3,
            outer: 0.7,
            stops: vec![
                GradientStop::new(0.0, Tint::rgba(WHITE, WHITE, WHITE, 1.0)),
                GradientStop::new(1.0, Tint::rgba(100.0, 80.0, 60.0, 0.85)),
            ],
            blend: BlendMode::Multiply,
        },
    ]
}

/// Rich reds, boosted cyans, deep blacks
fn kodachrome_passes() -> Vec<Pass> {
    vec![
        Pass::Flat {
            tint: Tint::rgba(255.0, 60.0, 0.0, 0.08),
            blend: BlendMode::SourceOver,
        },
        Pass::Flat {
            tint: Tint::rgba(0.0, 80.0, 120.0, 0.04),
            blend: BlendMode::Screen,
        },
        Pass::Flat {
            tint: Tint::rgba(0.0, 0.0, 0.0, 0.08),
            blend: BlendMode::Multiply,
        },
    ]
}

/// Cool cast, magenta shadows, dreamy softness, heavy edge fade
fn polaroid_passes() -> Vec<Pass> {
    vec![
        Pass::Flat {
            tint: Tint::rgba(160.0, 200.0, 255.0, 0.15),
            blend: BlendMode::SourceOver,
        },
        Pass::Flat {
            tint: Tint::rgba(255.0, 240.0, 255.0, 0.95),
            blend: BlendMode::Multiply,
        },
        Pass::SelfComposite { blur: 2.0, brightness: 1.0, opacity: 0.15, offset_x: 0 },
        Pass::Radial {
            anchor: Anchor::Middle,
            inner: 0.25,
            outer: 0.75,
            stops: vec![
                GradientStop::new(0.0, Tint::rgba(WHITE, WHITE, WHITE, 1.0)),
                GradientStop::new(0.7, Tint::rgba(230.0, 230.0, 240.0, 1.0)),
                GradientStop::new(1.0, Tint::rgba(180.0, 180.0, 200.0, 0.75)),
            ],
            blend: BlendMode::Multiply,
        },
    ]
}

/// Over-sharpen echo either side, then CCD colour noise
fn early_digital_passes() -> Vec<Pass> {
    vec![
        Pass::SelfComposite { blur: 0.0, brightness: 1.0, opacity: 0.35, offset_x: -1 },
        Pass::SelfComposite { blur: 0.0, brightness: 1.0, opacity: 0.35, offset_x: 1 },
        Pass::ColorNoise { count: 3000, opacity: 0.08, max_value: 80 },
    ]
}

/// Over-processed halo, lifted highlights, pumped shadows
fn smartphone_hdr_passes() -> Vec<Pass> {
    vec![
        Pass::SelfComposite { blur: 12.0, brightness: 1.3, opacity: 0.28, offset_x: 0 },
        Pass::Flat {
            tint: Tint::rgba(255.0, 255.0, 255.0, 0.08),
            blend: BlendMode::SourceOver,
        },
        Pass::Flat {
            tint: Tint::rgba(40.0, 40.0, 40.0, 0.15),
            blend: BlendMode::Screen,
        },
    ]
}
