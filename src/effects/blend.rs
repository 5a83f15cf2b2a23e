//! Compositing primitives shared by the effect passes: flat and radial
//! gradient fills under the standard blend modes, whole-buffer
//! self-compositing, box blur and brightness scaling.
//!
//! Self-compositing always reads from a caller-supplied snapshot and writes
//! into the live buffer, so there is no read-after-write ambiguity.

use crate::pipeline::types::PixelBuffer;

/// Blend mode for a compositing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Normal alpha blend
    SourceOver,
    /// Darkening multiply, composited by source alpha
    Multiply,
    /// Lightening screen, composited by source alpha
    Screen,
    /// Keep destination colour, mask destination alpha by source alpha
    DestinationIn,
}

/// A source colour for fills: RGB in 0..=255, alpha in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Tint {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    fn lerp(from: Tint, to: Tint, t: f32) -> Tint {
        Tint {
            r: from.r + (to.r - from.r) * t,
            g: from.g + (to.g - from.g) * t,
            b: from.b + (to.b - from.b) * t,
            a: from.a + (to.a - from.a) * t,
        }
    }
}

/// One colour stop of a radial gradient, offset in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub tint: Tint,
}

impl GradientStop {
    pub const fn new(offset: f32, tint: Tint) -> Self {
        Self { offset, tint }
    }
}

fn clamp_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Blend a source tint into one destination pixel
pub fn blend_pixel(dst: &mut [u8; 4], src: Tint, mode: BlendMode) {
    let sa = src.a.clamp(0.0, 1.0);
    let da = dst[3] as f32 / 255.0;

    match mode {
        BlendMode::DestinationIn => {
            dst[3] = clamp_u8(da * sa * 255.0);
        }
        _ => {
            let src_rgb = [src.r, src.g, src.b];
            for (i, &s) in src_rgb.iter().enumerate() {
                let d = dst[i] as f32;
                let blended = match mode {
                    BlendMode::SourceOver => s,
                    BlendMode::Multiply => d * s / 255.0,
                    BlendMode::Screen => 255.0 - (255.0 - d) * (255.0 - s) / 255.0,
                    BlendMode::DestinationIn => unreachable!(),
                };
                dst[i] = clamp_u8(blended * sa + d * (1.0 - sa));
            }
            dst[3] = clamp_u8((sa + da * (1.0 - sa)) * 255.0);
        }
    }
}

/// Fill the whole buffer with a flat tint under the given blend mode
pub fn fill(buf: &mut PixelBuffer, tint: Tint, mode: BlendMode) {
    for pixel in buf.as_image_mut().pixels_mut() {
        blend_pixel(&mut pixel.0, tint, mode);
    }
}

/// Fill the whole buffer with a radial gradient under the given blend mode.
///
/// `cx`/`cy` are the gradient centre, `inner`/`outer` the start and end radii
/// in pixels; stops must be sorted by offset.
pub fn fill_radial(
    buf: &mut PixelBuffer,
    cx: f32,
    cy: f32,
    inner: f32,
    outer: f32,
    stops: &[GradientStop],
    mode: BlendMode,
) {
    if stops.is_empty() {
        return;
    }

    let width = buf.width();
    let height = buf.height();

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            let tint = sample_stops(stops, gradient_position(dist, inner, outer));
            blend_pixel(buf.get_pixel_mut(x, y), tint, mode);
        }
    }
}

fn gradient_position(dist: f32, inner: f32, outer: f32) -> f32 {
    if outer <= inner {
        return if dist < inner { 0.0 } else { 1.0 };
    }
    ((dist - inner) / (outer - inner)).clamp(0.0, 1.0)
}

fn sample_stops(stops: &[GradientStop], t: f32) -> Tint {
    let first = stops[0];
    if t <= first.offset {
        return first.tint;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(f32::EPSILON);
            return Tint::lerp(a.tint, b.tint, (t - a.offset) / span);
        }
    }
    stops[stops.len() - 1].tint
}

/// Draw `src` over `dst` at an integer offset with a global opacity.
///
/// Pixels falling outside the destination are dropped; destination pixels the
/// source does not cover are left unchanged.
pub fn composite(dst: &mut PixelBuffer, src: &PixelBuffer, opacity: f32, dx: i32, dy: i32) {
    let opacity = opacity.clamp(0.0, 1.0);
    let (dw, dh) = (dst.width() as i64, dst.height() as i64);

    for sy in 0..src.height() {
        let ty = sy as i64 + dy as i64;
        if ty < 0 || ty >= dh {
            continue;
        }
        for sx in 0..src.width() {
            let tx = sx as i64 + dx as i64;
            if tx < 0 || tx >= dw {
                continue;
            }
            let s = src.get_pixel(sx, sy);
            let tint = Tint::rgba(
                s[0] as f32,
                s[1] as f32,
                s[2] as f32,
                opacity * s[3] as f32 / 255.0,
            );
            blend_pixel(dst.get_pixel_mut(tx as u32, ty as u32), tint, BlendMode::SourceOver);
        }
    }
}

/// Separable box blur approximating a Gaussian of the given pixel radius.
///
/// Sub-pixel radii still blur with a one pixel window; a radius of zero is a
/// no-op.
pub fn box_blur(buf: &mut PixelBuffer, radius: f32) {
    if radius <= 0.0 || buf.is_empty() {
        return;
    }
    let r = (radius.round() as i64).max(1);

    blur_pass(buf, r, true);
    blur_pass(buf, r, false);
}

fn blur_pass(buf: &mut PixelBuffer, r: i64, horizontal: bool) {
    let width = buf.width() as i64;
    let height = buf.height() as i64;
    let snapshot = buf.clone();

    for y in 0..height {
        for x in 0..width {
            let mut sums = [0.0f32; 4];
            let mut count = 0.0f32;
            for o in -r..=r {
                let (sx, sy) = if horizontal { (x + o, y) } else { (x, y + o) };
                if sx < 0 || sx >= width || sy < 0 || sy >= height {
                    continue;
                }
                let p = snapshot.get_pixel(sx as u32, sy as u32);
                for (sum, &c) in sums.iter_mut().zip(p.iter()) {
                    *sum += c as f32;
                }
                count += 1.0;
            }
            let out = buf.get_pixel_mut(x as u32, y as u32);
            for (o, sum) in out.iter_mut().zip(sums.iter()) {
                *o = clamp_u8(sum / count);
            }
        }
    }
}

/// Scale the RGB channels by a brightness factor, leaving alpha alone
pub fn brighten(buf: &mut PixelBuffer, factor: f32) {
    for pixel in buf.as_image_mut().pixels_mut() {
        for c in pixel.0.iter_mut().take(3) {
            *c = clamp_u8(*c as f32 * factor);
        }
    }
}
