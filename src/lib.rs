//! # Era-Camera
//!
//! Render captured frames as era-styled photographs spanning 180 years of
//! photographic history, from daguerreotype plates to over-processed
//! smartphone HDR.
//!
//! One capture takes a raw RGBA frame, an era preset and an aspect format,
//! and runs it through a fixed pipeline: centred aspect crop, tonal base
//! transform, colour-depth quantization, the era's ordered compositing
//! passes, and JPEG encoding.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use era_camera::{
//!     catalog::EraCatalog,
//!     pipeline::{AspectFormat, CapturePipeline, RawFrame},
//! };
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! # fn main() -> anyhow::Result<()> {
//! let catalog = EraCatalog::new();
//! let era = catalog.get("daguerreotype").expect("built-in era");
//!
//! let frame = RawFrame::new_filled(1920, 1080, [128, 128, 128, 255]);
//! let pipeline = CapturePipeline::default();
//! let mut rng = SmallRng::from_entropy();
//!
//! let artifact = pipeline.capture(&frame, era, AspectFormat::Square, &mut rng)?;
//! std::fs::write(artifact.filename(), &artifact.bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`catalog`] - Static era definitions (tone transform, colour depth, exposure class)
//! - [`pipeline`] - Crop, tone, quantize and encode stages plus orchestration
//! - [`effects`] - Blend primitives and per-era compositing pass lists
//! - [`gallery`] - Persisted photo store handed the artifact after capture
//! - [`config`] - Configuration management
//!
//! ## Adding an era
//!
//! An era is one [`catalog::EraDefinition`] entry plus one pass list
//! registered in [`effects::EffectRegistry`]; the pipeline never branches on
//! era identifiers itself.

pub mod catalog;
pub mod config;
pub mod effects;
pub mod error;
pub mod gallery;
pub mod pipeline;

// Re-export commonly used types for convenience
pub use crate::{
    catalog::{EraCatalog, EraDefinition, ExposureClass},
    config::Config,
    effects::EffectRegistry,
    error::{CaptureError, PipelineError, Result},
    gallery::{FileGallery, GalleryStore},
    pipeline::{AspectFormat, CaptureArtifact, CapturePipeline, RawFrame},
};
