//! Finger-count gesture classification
//!
//! Robust finger counting based on distance from the wrist: a digit is
//! "open" when its fingertip sits farther from the wrist than its
//! proximal joint does. A ratio test, so it holds up under hand
//! rotation and changing camera distance where absolute thresholds
//! fall apart.

use super::landmarks::{LandmarkFrame, FINGER_JOINTS};

/// Discrete gesture symbol for one frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    One,
    Two,
    Three,
    /// Unrecognized configuration, carrying the raw open-finger count
    Other(u8),
}

impl Gesture {
    /// Display label matching what the UI overlay shows
    pub fn label(&self) -> String {
        match self {
            Gesture::One => "ONE".to_string(),
            Gesture::Two => "TWO".to_string(),
            Gesture::Three => "THREE".to_string(),
            Gesture::Other(n) => format!("OTHER ({})", n),
        }
    }
}

/// Per-digit extension flags, thumb..pinky
#[derive(Clone, Copy, Debug)]
struct OpenFingers([bool; 5]);

impl OpenFingers {
    fn measure(frame: &LandmarkFrame) -> Self {
        let wrist = frame.wrist();
        let mut open = [false; 5];
        for (digit, (tip, pip)) in FINGER_JOINTS.iter().enumerate() {
            open[digit] = frame.get(*tip).dist_sq(wrist) > frame.get(*pip).dist_sq(wrist);
        }
        Self(open)
    }

    fn count(&self) -> u8 {
        self.0.iter().filter(|&&o| o).count() as u8
    }

    fn index(&self) -> bool {
        self.0[1]
    }
    fn middle(&self) -> bool {
        self.0[2]
    }
    fn ring(&self) -> bool {
        self.0[3]
    }
    fn pinky(&self) -> bool {
        self.0[4]
    }
}

/// Classify one frame into a gesture symbol.
///
/// Raw finger count is ambiguous for natural poses (a loose "3" often
/// reads as thumb+index+middle), so the rules bias toward the shape a
/// person most likely intended. Rule order is load-bearing:
///
/// 1. count >= 3 with ring or pinky open -> THREE
/// 2. count == 3 with ring and pinky closed -> TWO (sloppy two)
/// 3. index + middle open -> TWO
/// 4. index open, middle closed -> ONE
/// 5. count == 2 -> TWO
/// 6. count == 1 -> ONE
/// 7. anything else -> OTHER(count)
pub fn classify(frame: &LandmarkFrame) -> Gesture {
    let fingers = OpenFingers::measure(frame);
    let count = fingers.count();

    if count >= 3 && (fingers.ring() || fingers.pinky()) {
        return Gesture::Three;
    }
    if count == 3 && !fingers.ring() && !fingers.pinky() {
        return Gesture::Two;
    }
    if fingers.index() && fingers.middle() {
        return Gesture::Two;
    }
    if fingers.index() && !fingers.middle() {
        return Gesture::One;
    }
    if count == 2 {
        return Gesture::Two;
    }
    if count == 1 {
        return Gesture::One;
    }
    Gesture::Other(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::landmarks::{Landmark, LandmarkFrame, FINGER_JOINTS, LANDMARK_COUNT};

    /// Build a frame where the listed digits (0=thumb..4=pinky) are
    /// open: tip beyond the proximal joint, measured from the wrist at
    /// the origin. Closed digits get their tip pulled inside the joint.
    fn frame_with_open(open: &[usize]) -> LandmarkFrame {
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (digit, (tip, pip)) in FINGER_JOINTS.iter().enumerate() {
            // Spread digits along distinct directions to stay realistic
            let angle = 0.4 + digit as f32 * 0.35;
            let (dx, dy) = (angle.cos(), angle.sin());
            landmarks[*pip] = Landmark { x: dx * 0.2, y: dy * 0.2, z: 0.0 };
            let tip_r = if open.contains(&digit) { 0.35 } else { 0.1 };
            landmarks[*tip] = Landmark { x: dx * tip_r, y: dy * tip_r, z: 0.0 };
        }
        LandmarkFrame::new(landmarks)
    }

    #[test]
    fn fist_is_other_zero() {
        // All fingertips collapsed onto the wrist
        let frame = LandmarkFrame::new([Landmark::default(); LANDMARK_COUNT]);
        assert_eq!(classify(&frame), Gesture::Other(0));
    }

    #[test]
    fn index_only_is_one() {
        assert_eq!(classify(&frame_with_open(&[1])), Gesture::One);
    }

    #[test]
    fn index_middle_is_two() {
        assert_eq!(classify(&frame_with_open(&[1, 2])), Gesture::Two);
    }

    #[test]
    fn sloppy_three_is_two() {
        // Thumb + index + middle without ring/pinky reads as TWO
        assert_eq!(classify(&frame_with_open(&[0, 1, 2])), Gesture::Two);
    }

    #[test]
    fn three_requires_ring_or_pinky() {
        assert_eq!(classify(&frame_with_open(&[1, 2, 3])), Gesture::Three);
        assert_eq!(classify(&frame_with_open(&[1, 2, 4])), Gesture::Three);
    }

    #[test]
    fn four_and_five_open_are_three() {
        // count >= 3 with ring open still lands on THREE
        assert_eq!(classify(&frame_with_open(&[0, 1, 2, 3])), Gesture::Three);
        assert_eq!(classify(&frame_with_open(&[0, 1, 2, 3, 4])), Gesture::Three);
    }

    #[test]
    fn thumb_pinky_falls_back_to_two() {
        // No index involvement: rule 5 fallback
        assert_eq!(classify(&frame_with_open(&[0, 4])), Gesture::Two);
    }

    #[test]
    fn thumb_only_falls_back_to_one() {
        assert_eq!(classify(&frame_with_open(&[0])), Gesture::One);
    }

    #[test]
    fn ring_pinky_pair_without_index_is_two() {
        assert_eq!(classify(&frame_with_open(&[3, 4])), Gesture::Two);
    }

    #[test]
    fn labels_match_ui_strings() {
        assert_eq!(Gesture::Three.label(), "THREE");
        assert_eq!(Gesture::Other(4).label(), "OTHER (4)");
    }
}
