//! Hand landmark data model
//!
//! One MediaPipe hand = 21 landmarks in a fixed anatomical order.
//! Frames arrive from JavaScript as a flat Float32Array of 63 values
//! and are validated here before anything downstream touches them.

// ============================================================================
// HAND LANDMARK INDICES (MediaPipe Hand - 21 total)
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_MCP: usize = 2;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// Number of landmarks per detected hand
pub const LANDMARK_COUNT: usize = 21;

/// (tip, proximal joint) pairs for the extension test, thumb..pinky
pub const FINGER_JOINTS: [(usize, usize); 5] = [
    (THUMB_TIP, THUMB_MCP),
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single 3D landmark point (normalized video-frame coordinates)
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct Landmark {
    pub x: f32, // 0-1 normalized
    pub y: f32, // 0-1 normalized
    pub z: f32, // Relative depth
}

impl Landmark {
    /// Squared planar distance to another landmark.
    ///
    /// The extension heuristic compares distance ratios, so the square
    /// root is never needed. Depth is ignored: MediaPipe z is far
    /// noisier than x/y and the test works on the image plane.
    pub fn dist_sq(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Error for malformed landmark input. A wrong-sized frame is a
/// programming error on the JS side, rejected before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLengthError {
    pub got: usize,
}

/// One validated frame: exactly 21 landmarks
#[derive(Clone, Debug)]
pub struct LandmarkFrame {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl LandmarkFrame {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    /// Parse a flat `[x0, y0, z0, x1, ...]` slice of 63 floats.
    pub fn from_flat(data: &[f32]) -> Result<Self, FrameLengthError> {
        if data.len() != LANDMARK_COUNT * 3 {
            return Err(FrameLengthError { got: data.len() });
        }

        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (i, lm) in landmarks.iter_mut().enumerate() {
            *lm = Landmark {
                x: data[i * 3],
                y: data[i * 3 + 1],
                z: data[i * 3 + 2],
            };
        }
        Ok(Self { landmarks })
    }

    pub fn get(&self, index: usize) -> &Landmark {
        &self.landmarks[index]
    }

    pub fn wrist(&self) -> &Landmark {
        &self.landmarks[WRIST]
    }

    /// Index fingertip, used as a cursor position by the UI layer
    pub fn index_tip(&self) -> &Landmark {
        &self.landmarks[INDEX_TIP]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_length() {
        let err = LandmarkFrame::from_flat(&[0.0; 60]).unwrap_err();
        assert_eq!(err.got, 60);
        assert!(LandmarkFrame::from_flat(&[0.0; 64]).is_err());
    }

    #[test]
    fn parses_flat_layout() {
        let mut data = vec![0.0f32; 63];
        data[INDEX_TIP * 3] = 0.25;
        data[INDEX_TIP * 3 + 1] = 0.75;
        data[INDEX_TIP * 3 + 2] = -0.1;

        let frame = LandmarkFrame::from_flat(&data).unwrap();
        assert_eq!(frame.index_tip().x, 0.25);
        assert_eq!(frame.index_tip().y, 0.75);
        assert_eq!(frame.index_tip().z, -0.1);
        assert_eq!(*frame.wrist(), Landmark::default());
    }

    #[test]
    fn dist_sq_ignores_depth() {
        let a = Landmark { x: 0.0, y: 0.0, z: 0.0 };
        let b = Landmark { x: 3.0, y: 4.0, z: 100.0 };
        assert_eq!(a.dist_sq(&b), 25.0);
    }
}
