//! Renderer module - WebGPU particle field rendering
//!
//! Re-exports only. All logic in submodules.

mod particles;
mod state;

pub use particles::{render_frame, upload_positions, upload_static_attributes};
pub use state::{initialize_gpu, GpuStateError};
