//! Hand landmark bridge
//!
//! JavaScript owns the MediaPipe hand landmarker and pushes each
//! detection result in as a flat Float32Array plus the video
//! timestamp. Rust classifies and keeps the latest gesture and index
//! fingertip for polling.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use crate::gesture::{GestureTracker, LandmarkFrame};

thread_local! {
    static TRACKER: RefCell<GestureTracker> = RefCell::new(GestureTracker::new());
}

/// Feed one detector result for one video timestamp.
///
/// `data` is either empty (no hand this frame) or 63 floats
/// (21 landmarks x, y, z). Returns the classified gesture label, or
/// nothing when the timestamp repeats or no hand is present.
#[wasm_bindgen]
pub fn update_hand_landmarks(data: &[f32], timestamp: f64) -> Option<String> {
    TRACKER.with(|tracker_cell| {
        let mut tracker = tracker_cell.borrow_mut();

        if !tracker.accept_timestamp(timestamp) {
            // Same video frame as last call; nothing new to classify
            return None;
        }

        if data.is_empty() {
            tracker.ingest(None);
            return None;
        }

        let frame = match LandmarkFrame::from_flat(data) {
            Ok(frame) => frame,
            Err(err) => {
                web_sys::console::warn_1(
                    &format!("Invalid landmark data length: {} (expected 63)", err.got).into(),
                );
                tracker.ingest(None);
                return None;
            }
        };

        tracker.ingest(Some(&frame)).map(|g| g.label())
    })
}

/// Latest classified gesture, if a hand was seen on the newest frame
#[wasm_bindgen]
pub fn last_gesture_label() -> Option<String> {
    TRACKER.with(|tracker_cell| tracker_cell.borrow().last_gesture().map(|g| g.label()))
}

/// Normalized [x, y] of the index fingertip from the latest frame with
/// a hand, for cursor-style UI use
#[wasm_bindgen]
pub fn last_finger_position() -> Option<Vec<f32>> {
    TRACKER.with(|tracker_cell| {
        tracker_cell
            .borrow()
            .last_finger_pos()
            .map(|(x, y)| vec![x, y])
    })
}
