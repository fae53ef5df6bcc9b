//! Gesture module - landmark model and finger-count classification
//!
//! Re-exports only. All logic in submodules.

mod classifier;
mod landmarks;
mod tracker;

pub use classifier::{classify, Gesture};
pub use landmarks::{
    FrameLengthError, Landmark, LandmarkFrame, FINGER_JOINTS, INDEX_TIP, LANDMARK_COUNT, WRIST,
};
pub use tracker::{DetectorError, GestureTracker, HandDetector};
