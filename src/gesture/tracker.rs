//! Per-frame gesture tracking
//!
//! Wraps the classifier with the frame discipline the detector needs:
//! one classification per unique video timestamp, detector failures
//! downgraded to "no hand for this frame", and the last index
//! fingertip kept around for cursor-style use.

use super::classifier::{classify, Gesture};
use super::landmarks::LandmarkFrame;

/// Opaque hand-landmark inference capability.
///
/// The tracker never sees model loading or GPU delegation; readiness
/// shows up as `Ok(None)` until the detector starts producing frames.
pub trait HandDetector {
    fn detect(&mut self, timestamp: f64) -> Result<Option<LandmarkFrame>, DetectorError>;
}

/// Transient inference failure. Treated as no-signal for the frame it
/// occurred in; the tracker keeps polling on later frames.
#[derive(Debug, Clone)]
pub struct DetectorError(pub String);

/// Tracks gesture state across video frames
pub struct GestureTracker {
    last_timestamp: f64,
    last_gesture: Option<Gesture>,
    last_finger_pos: Option<(f32, f32)>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self {
            last_timestamp: -1.0,
            last_gesture: None,
            last_finger_pos: None,
        }
    }

    /// Poll the detector for one video timestamp.
    ///
    /// Returns the freshly classified gesture, or `None` when the
    /// timestamp was already seen, the detector reported no hand, or
    /// the detector failed this frame.
    pub fn poll<D: HandDetector>(&mut self, detector: &mut D, timestamp: f64) -> Option<Gesture> {
        if timestamp == self.last_timestamp {
            // Render loop runs faster than the video produces frames;
            // skip redundant classification work.
            return None;
        }
        self.last_timestamp = timestamp;

        match detector.detect(timestamp) {
            Ok(frame) => self.ingest(frame.as_ref()),
            Err(_) => self.ingest(None),
        }
    }

    /// Feed one already-detected frame (or the absence of one).
    ///
    /// This is the path the wasm bridge uses when JavaScript runs the
    /// detector itself and pushes results in.
    pub fn ingest(&mut self, frame: Option<&LandmarkFrame>) -> Option<Gesture> {
        match frame {
            Some(frame) => {
                let tip = frame.index_tip();
                self.last_finger_pos = Some((tip.x, tip.y));
                let gesture = classify(frame);
                self.last_gesture = Some(gesture);
                Some(gesture)
            }
            None => {
                // No hand: explicit no-signal, never a default gesture
                self.last_finger_pos = None;
                self.last_gesture = None;
                None
            }
        }
    }

    /// Record a timestamp as consumed without running detection.
    /// Returns false when the timestamp is a duplicate.
    pub fn accept_timestamp(&mut self, timestamp: f64) -> bool {
        if timestamp == self.last_timestamp {
            return false;
        }
        self.last_timestamp = timestamp;
        true
    }

    pub fn last_gesture(&self) -> Option<Gesture> {
        self.last_gesture
    }

    /// Normalized index fingertip from the most recent frame with a hand
    pub fn last_finger_pos(&self) -> Option<(f32, f32)> {
        self.last_finger_pos
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::landmarks::{Landmark, LANDMARK_COUNT, INDEX_PIP, INDEX_TIP};

    /// Scripted detector: pops one canned response per detect call
    struct FakeDetector {
        responses: Vec<Result<Option<LandmarkFrame>, DetectorError>>,
        calls: usize,
    }

    impl HandDetector for FakeDetector {
        fn detect(&mut self, _timestamp: f64) -> Result<Option<LandmarkFrame>, DetectorError> {
            self.calls += 1;
            self.responses.remove(0)
        }
    }

    fn one_finger_frame() -> LandmarkFrame {
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        landmarks[INDEX_PIP] = Landmark { x: 0.2, y: 0.0, z: 0.0 };
        landmarks[INDEX_TIP] = Landmark { x: 0.4, y: 0.3, z: 0.0 };
        LandmarkFrame::new(landmarks)
    }

    #[test]
    fn duplicate_timestamps_skip_detection() {
        let mut detector = FakeDetector {
            responses: vec![Ok(Some(one_finger_frame())), Ok(None)],
            calls: 0,
        };
        let mut tracker = GestureTracker::new();

        assert_eq!(tracker.poll(&mut detector, 1.0), Some(Gesture::One));
        assert_eq!(tracker.poll(&mut detector, 1.0), None);
        assert_eq!(detector.calls, 1);
        // Gesture from the first frame is still the latest known
        assert_eq!(tracker.last_gesture(), Some(Gesture::One));
    }

    #[test]
    fn no_hand_clears_state() {
        let mut detector = FakeDetector {
            responses: vec![Ok(Some(one_finger_frame())), Ok(None)],
            calls: 0,
        };
        let mut tracker = GestureTracker::new();

        tracker.poll(&mut detector, 1.0);
        assert!(tracker.last_finger_pos().is_some());

        assert_eq!(tracker.poll(&mut detector, 2.0), None);
        assert_eq!(tracker.last_gesture(), None);
        assert_eq!(tracker.last_finger_pos(), None);
    }

    #[test]
    fn detector_error_is_no_signal_for_that_frame_only() {
        let mut detector = FakeDetector {
            responses: vec![
                Err(DetectorError("inference failed".into())),
                Ok(Some(one_finger_frame())),
            ],
            calls: 0,
        };
        let mut tracker = GestureTracker::new();

        assert_eq!(tracker.poll(&mut detector, 1.0), None);
        // Next frame recovers
        assert_eq!(tracker.poll(&mut detector, 2.0), Some(Gesture::One));
    }

    #[test]
    fn finger_pos_tracks_index_tip() {
        let mut tracker = GestureTracker::new();
        tracker.ingest(Some(&one_finger_frame()));
        assert_eq!(tracker.last_finger_pos(), Some((0.4, 0.3)));
    }
}
