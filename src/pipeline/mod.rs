//! # Capture Pipeline
//!
//! Orchestrates one capture: crop, tone, quantize, composite, encode. The
//! pipeline is a pure function of its inputs plus a random source; it holds
//! no state between captures and runs synchronously to completion. One
//! capture owns its working buffer exclusively from crop to encode.

pub mod crop;
pub mod encoder;
pub mod quantize;
pub mod tone;
pub mod types;

pub use crop::{compute_crop, AspectFormat, CropRect};
pub use types::{CaptureArtifact, PixelBuffer, RawFrame};

use chrono::Utc;
use rand::Rng;
use tracing::{debug, info};

use crate::{
    catalog::{EraDefinition, ExposureClass},
    config::CaptureConfig,
    effects::EffectRegistry,
    error::PipelineError,
};

/// The era-effects capture pipeline.
///
/// Stateless apart from configuration and the static pass registry; safe to
/// reuse across captures. Distinct pipelines may run concurrently since no
/// buffer is shared, but a single capture is strictly sequential.
pub struct CapturePipeline {
    config: CaptureConfig,
    effects: EffectRegistry,
}

impl CapturePipeline {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            effects: EffectRegistry::new(),
        }
    }

    pub fn with_registry(config: CaptureConfig, effects: EffectRegistry) -> Self {
        Self { config, effects }
    }

    /// Run the full pipeline for one frame, producing an encoded artifact.
    ///
    /// Fails without retry on a degenerate frame or an encoding error; no
    /// partial artifact is ever produced.
    pub fn capture<R: Rng>(
        &self,
        frame: &RawFrame,
        era: &EraDefinition,
        format: AspectFormat,
        rng: &mut R,
    ) -> Result<CaptureArtifact, PipelineError> {
        let buffer = self.render(frame, era, format, rng)?;

        debug!("Encoding {}x{} buffer", buffer.width(), buffer.height());
        let bytes = encoder::encode_jpeg(&buffer, self.config.jpeg_quality)?;

        let artifact = CaptureArtifact {
            bytes,
            era_id: era.id.to_string(),
            format_id: format.id().to_string(),
            timestamp: Utc::now(),
        };
        info!(
            "Captured {} ({}) -> {} bytes",
            era.name,
            format,
            artifact.bytes.len()
        );
        Ok(artifact)
    }

    /// Run every stage except encoding and return the final pixel buffer.
    ///
    /// Exposed so callers (and tests) can inspect the exact pixels that go
    /// into the encoder.
    pub fn render<R: Rng>(
        &self,
        frame: &RawFrame,
        era: &EraDefinition,
        format: AspectFormat,
        rng: &mut R,
    ) -> Result<PixelBuffer, PipelineError> {
        let crop_rect = crop::compute_crop(frame.width(), frame.height(), format);
        if crop_rect.is_degenerate() {
            return Err(PipelineError::EmptyFrame {
                width: frame.width(),
                height: frame.height(),
            });
        }
        debug!(
            "Crop {}x{} -> ({:.1},{:.1}) {:.1}x{:.1}",
            frame.width(),
            frame.height(),
            crop_rect.x,
            crop_rect.y,
            crop_rect.width,
            crop_rect.height
        );

        let mut buffer = tone::render_base(frame, crop_rect, format, era);

        if era.exposure == ExposureClass::Long {
            debug!("Applying long-exposure ghosting for {}", era.id);
            tone::apply_long_exposure(&mut buffer);
        }

        quantize::quantize(&mut buffer, era.color_depth);

        let passes = self.effects.passes(era.id);
        debug!("Applying {} compositing passes for {}", passes.len(), era.id);
        for pass in passes {
            pass.apply(&mut buffer, rng);
        }

        Ok(buffer)
    }
}

impl Default for CapturePipeline {
    fn default() -> Self {
        Self::new(CaptureConfig::default())
    }
}
