//! Particles module - cloud generation, heart sampling, morph engine
//!
//! Re-exports only. All logic in submodules.

mod cloud;
mod heart;
mod morph;
mod random;

pub use cloud::{hsl_to_rgb, spawn_base_cloud, ParticleCloud, RegionConfig, PARTICLE_COUNT};
pub use heart::{generate_heart_points, inside_heart, HeartConfig};
pub use morph::{ease_in_out_cubic, FrameUniforms, MorphEngine, MorphError, MorphState, ShapeKind};
pub use random::{RandomSource, Xorshift32};
