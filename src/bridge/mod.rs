//! Bridge module - JS <-> Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod hand;
mod scene;

pub use hand::{last_finger_position, last_gesture_label, update_hand_landmarks};
pub use scene::{frame_update, init_scene, start_heart_morph};
