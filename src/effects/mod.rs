//! # Effect Compositor
//!
//! Era-specific compositing passes and the blend primitives they are built
//! from. Each era's look is one ordered list of [`Pass`] descriptors, looked
//! up by era identifier in the [`EffectRegistry`] and applied in place over
//! the toned, quantized buffer.

pub mod blend;
pub mod passes;
pub mod registry;

// Re-exports for convenience
pub use blend::{BlendMode, GradientStop, Tint};
pub use passes::{Anchor, Pass};
pub use registry::EffectRegistry;
