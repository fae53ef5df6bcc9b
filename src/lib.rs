//! Heartfield Web - gesture-driven particle heart
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules
//!
//! JavaScript owns the camera, the MediaPipe hand landmarker, audio,
//! and the DOM; this crate owns gesture classification, the particle
//! field, and WebGPU rendering.

mod bridge;
pub mod gesture;
pub mod particles;
mod renderer;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{
    frame_update, init_scene, last_finger_position, last_gesture_label, start_heart_morph,
    update_hand_landmarks,
};

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize WebGPU - must be called before init_scene / frame_update
#[wasm_bindgen]
pub async fn init() -> Result<(), JsValue> {
    renderer::initialize_gpu().await?;
    console_log!("WebGPU initialized with particle rendering");
    Ok(())
}
