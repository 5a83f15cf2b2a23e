//! Compositing pass descriptors.
//!
//! A pass is data: what to draw and which blend mode to draw it with. The
//! per-era ordered lists live in [`super::registry`]; applying a list in
//! order reproduces that era's darkroom character. Stochastic passes pull
//! from the caller's random source, so tests can seed them.

use rand::Rng;

use crate::effects::blend::{self, BlendMode, GradientStop, Tint};
use crate::pipeline::types::PixelBuffer;

/// Where a radial gradient is anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// Centre of the buffer
    Middle,
    /// Randomized per capture within a bounded window, as fractions of the
    /// buffer dimensions
    Window {
        x_min: f32,
        x_span: f32,
        y_min: f32,
        y_span: f32,
    },
}

/// One compositing pass over the working buffer
#[derive(Debug, Clone, PartialEq)]
pub enum Pass {
    /// Flat colour overlay
    Flat { tint: Tint, blend: BlendMode },

    /// Radial gradient fill; radii are fractions of the buffer width
    Radial {
        anchor: Anchor,
        inner: f32,
        outer: f32,
        stops: Vec<GradientStop>,
        blend: BlendMode,
    },

    /// Blurred/brightened copy of the buffer drawn back onto itself,
    /// optionally shifted horizontally
    SelfComposite {
        blur: f32,
        brightness: f32,
        opacity: f32,
        offset_x: i32,
    },

    /// Dense monochrome film grain: single dark pixels at random low opacity
    Grain { count: u32, max_opacity: f32 },

    /// Near-vertical light scratch lines
    Scratches { count: u32 },

    /// Soft light dust disks
    Dust { count: u32 },

    /// Coloured sensor noise pixels
    ColorNoise {
        count: u32,
        opacity: f32,
        max_value: u8,
    },
}

impl Pass {
    /// Apply this pass in place
    pub fn apply<R: Rng>(&self, buf: &mut PixelBuffer, rng: &mut R) {
        if buf.is_empty() {
            return;
        }
        match self {
            Pass::Flat { tint, blend } => blend::fill(buf, *tint, *blend),
            Pass::Radial { anchor, inner, outer, stops, blend } => {
                let w = buf.width() as f32;
                let h = buf.height() as f32;
                let (cx, cy) = match anchor {
                    Anchor::Middle => (w / 2.0, h / 2.0),
                    Anchor::Window { x_min, x_span, y_min, y_span } => (
                        w * (x_min + rng.gen::<f32>() * x_span),
                        h * (y_min + rng.gen::<f32>() * y_span),
                    ),
                };
                blend::fill_radial(buf, cx, cy, w * inner, w * outer, stops, *blend);
            }
            Pass::SelfComposite { blur, brightness, opacity, offset_x } => {
                let mut copy = buf.clone();
                blend::box_blur(&mut copy, *blur);
                if (*brightness - 1.0).abs() > f32::EPSILON {
                    blend::brighten(&mut copy, *brightness);
                }
                blend::composite(buf, &copy, *opacity, *offset_x, 0);
            }
            Pass::Grain { count, max_opacity } => {
                apply_grain(buf, rng, *count, *max_opacity)
            }
            Pass::Scratches { count } => apply_scratches(buf, rng, *count),
            Pass::Dust { count } => apply_dust(buf, rng, *count),
            Pass::ColorNoise { count, opacity, max_value } => {
                apply_color_noise(buf, rng, *count, *opacity, *max_value)
            }
        }
    }

    /// Whether the pass draws from the random source
    pub fn is_stochastic(&self) -> bool {
        matches!(
            self,
            Pass::Grain { .. }
                | Pass::Scratches { .. }
                | Pass::Dust { .. }
                | Pass::ColorNoise { .. }
                | Pass::Radial { anchor: Anchor::Window { .. }, .. }
        )
    }
}

fn apply_grain<R: Rng>(buf: &mut PixelBuffer, rng: &mut R, count: u32, max_opacity: f32) {
    let (w, h) = (buf.width(), buf.height());
    for _ in 0..count {
        let x = rng.gen_range(0..w);
        let y = rng.gen_range(0..h);
        let opacity = rng.gen::<f32>() * max_opacity;
        blend::blend_pixel(
            buf.get_pixel_mut(x, y),
            Tint::rgba(0.0, 0.0, 0.0, opacity),
            BlendMode::SourceOver,
        );
    }
}

fn apply_scratches<R: Rng>(buf: &mut PixelBuffer, rng: &mut R, count: u32) {
    let w = buf.width();
    let h = buf.height();
    for _ in 0..count {
        let opacity = rng.gen::<f32>() * 0.08 + 0.02;
        let width: u32 = if rng.gen::<f32>() < 0.7 { 1 } else { 2 };
        let top = rng.gen::<f32>() * w as f32;
        let drift = (rng.gen::<f32>() - 0.5) * 10.0;

        for y in 0..h {
            let x = top + drift * y as f32 / h as f32;
            for dx in 0..width {
                let px = x.floor() as i64 + dx as i64;
                if px >= 0 && px < w as i64 {
                    blend::blend_pixel(
                        buf.get_pixel_mut(px as u32, y),
                        Tint::rgba(255.0, 255.0, 255.0, opacity),
                        BlendMode::SourceOver,
                    );
                }
            }
        }
    }
}

fn apply_dust<R: Rng>(buf: &mut PixelBuffer, rng: &mut R, count: u32) {
    let w = buf.width();
    let h = buf.height();
    for _ in 0..count {
        let opacity = rng.gen::<f32>() * 0.15;
        let cx = rng.gen::<f32>() * w as f32;
        let cy = rng.gen::<f32>() * h as f32;
        let radius = rng.gen::<f32>() * 3.0;

        let x0 = ((cx - radius).floor() as i64).max(0);
        let x1 = ((cx + radius).ceil() as i64).min(w as i64 - 1);
        let y0 = ((cy - radius).floor() as i64).max(0);
        let y1 = ((cy + radius).ceil() as i64).min(h as i64 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= radius * radius {
                    blend::blend_pixel(
                        buf.get_pixel_mut(x as u32, y as u32),
                        Tint::rgba(255.0, 255.0, 255.0, opacity),
                        BlendMode::SourceOver,
                    );
                }
            }
        }
    }
}

fn apply_color_noise<R: Rng>(
    buf: &mut PixelBuffer,
    rng: &mut R,
    count: u32,
    opacity: f32,
    max_value: u8,
) {
    let (w, h) = (buf.width(), buf.height());
    for _ in 0..count {
        let x = rng.gen_range(0..w);
        let y = rng.gen_range(0..h);
        let tint = Tint::rgba(
            rng.gen_range(0..max_value) as f32,
            rng.gen_range(0..max_value) as f32,
            rng.gen_range(0..max_value) as f32,
            opacity,
        );
        blend::blend_pixel(buf.get_pixel_mut(x, y), tint, BlendMode::SourceOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    fn flat_gray(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::new_filled(w, h, [128, 128, 128, 255])
    }

    #[test]
    fn test_grain_only_darkens() {
        let mut buf = flat_gray(64, 64);
        Pass::Grain { count: 2000, max_opacity: 0.12 }.apply(&mut buf, &mut rng());

        let mut touched = 0;
        for y in 0..64 {
            for x in 0..64 {
                let p = buf.get_pixel(x, y);
                assert!(p[0] <= 128, "grain lightened a pixel");
                if p[0] < 128 {
                    touched += 1;
                }
            }
        }
        // Collisions and opacities rounding to nothing allowed, but most of
        // the 2000 dots must land as distinct darkened pixels
        assert!(touched > 1200 && touched <= 2000, "touched = {}", touched);
    }

    #[test]
    fn test_scratches_only_lighten() {
        let mut buf = flat_gray(64, 64);
        Pass::Scratches { count: 8 }.apply(&mut buf, &mut rng());

        let mut touched = 0;
        for y in 0..64 {
            for x in 0..64 {
                let p = buf.get_pixel(x, y);
                assert!(p[0] >= 128, "scratch darkened a pixel");
                if p[0] > 128 {
                    touched += 1;
                }
            }
        }
        // Near-vertical lines cross every row
        assert!(touched >= 64);
    }

    #[test]
    fn test_self_composite_offset_shifts_detail() {
        let mut buf = PixelBuffer::new_filled(8, 1, [0, 0, 0, 255]);
        buf.set_pixel(4, 0, [200, 200, 200, 255]);
        Pass::SelfComposite { blur: 0.0, brightness: 1.0, opacity: 0.35, offset_x: 1 }
            .apply(&mut buf, &mut rng());

        // The bright pixel echoes one to the right
        assert!(buf.get_pixel(5, 0)[0] > 0);
        assert_eq!(buf.get_pixel(3, 0)[0], 0);
    }

    #[test]
    fn test_color_noise_touches_roughly_count_pixels() {
        let mut buf = PixelBuffer::new_filled(128, 128, [255, 255, 255, 255]);
        Pass::ColorNoise { count: 3000, opacity: 0.08, max_value: 80 }
            .apply(&mut buf, &mut rng());

        let changed = buf
            .as_image()
            .pixels()
            .filter(|p| p.0 != [255, 255, 255, 255])
            .count();
        // Collisions allowed, but the statistical character must hold
        assert!(changed > 2000 && changed <= 3000, "changed = {}", changed);
    }

    #[test]
    fn test_window_anchor_stays_in_bounds() {
        let mut buf = flat_gray(50, 40);
        let pass = Pass::Radial {
            anchor: Anchor::Window { x_min: 0.3, x_span: 0.4, y_min: 0.2, y_span: 0.3 },
            inner: 0.05,
            outer: 0.4,
            stops: vec![
                GradientStop::new(0.0, Tint::rgba(255.0, 255.0, 255.0, 0.2)),
                GradientStop::new(1.0, Tint::rgba(255.0, 255.0, 255.0, 0.0)),
            ],
            blend: BlendMode::SourceOver,
        };
        // Applying repeatedly must never index out of bounds
        let mut r = rng();
        for _ in 0..10 {
            pass.apply(&mut buf, &mut r);
        }
    }

    #[test]
    fn test_stochastic_classification() {
        assert!(Pass::Grain { count: 1, max_opacity: 0.1 }.is_stochastic());
        assert!(!Pass::Flat {
            tint: Tint::rgba(0.0, 0.0, 0.0, 0.1),
            blend: BlendMode::Multiply
        }
        .is_stochastic());
    }

    #[test]
    fn test_deterministic_pass_ignores_rng_state() {
        let pass = Pass::Flat {
            tint: Tint::rgba(255.0, 60.0, 0.0, 0.08),
            blend: BlendMode::SourceOver,
        };
        let mut a = flat_gray(16, 16);
        let mut b = flat_gray(16, 16);
        pass.apply(&mut a, &mut SmallRng::seed_from_u64(1));
        pass.apply(&mut b, &mut SmallRng::seed_from_u64(2));
        assert_eq!(a.as_image().as_raw(), b.as_image().as_raw());
    }
}
