//! Morph engine - timed interpolation and heartbeat pulse
//!
//! An explicit state machine (Idle -> Animating -> Steady) advanced by
//! per-frame wall-clock deltas, so the morph lands after the same real
//! time on a 30 Hz phone and a 144 Hz desktop.

use super::cloud::ParticleCloud;

/// Destination configuration kinds the engine knows how to hold
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Heart,
}

/// Morph lifecycle state. At most one morph is in flight at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphState {
    Idle,
    Animating,
    Steady(ShapeKind),
}

/// Per-frame values handed to the renderer as shader uniforms
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameUniforms {
    pub time: f32,
    pub pulse_strength: f32,
    pub rotation_y: f32,
}

/// Morph engine errors are programming errors; fail fast, never coerce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphError {
    /// Target buffer length does not match the cloud's position buffer
    TargetLengthMismatch { expected: usize, got: usize },
}

/// Heartbeat frequency once steady, in pulse cycles per second
const BEAT_FREQ: f32 = 2.0;

/// Idle background spin per tick
const DRIFT_PER_TICK: f32 = 0.0005;

/// Ease-in-out cubic: slow start, slow landing
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

pub struct MorphEngine {
    state: MorphState,
    /// Snapshot of positions at morph start (interpolation source)
    source: Vec<f32>,
    /// Destination positions, same length as the cloud buffer
    target: Vec<f32>,
    duration_ms: f32,
    elapsed_ms: f32,
    /// Rotation carried from the drift phase, eased to zero during the
    /// morph so the heart lands facing the camera
    rotation_y: f32,
    rotation_at_start: f32,
    pulse: f32,
}

impl MorphEngine {
    pub fn new() -> Self {
        Self {
            state: MorphState::Idle,
            source: Vec::new(),
            target: Vec::new(),
            duration_ms: 0.0,
            elapsed_ms: 0.0,
            rotation_y: 0.0,
            rotation_at_start: 0.0,
            pulse: 0.0,
        }
    }

    pub fn state(&self) -> MorphState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.state == MorphState::Animating
    }

    /// Begin a morph toward `target` over `duration_ms`.
    ///
    /// A request arriving while a morph is already animating is
    /// dropped: state, source snapshot, and target all stay untouched.
    pub fn start_morph(
        &mut self,
        cloud: &ParticleCloud,
        target: Vec<f32>,
        duration_ms: f32,
    ) -> Result<(), MorphError> {
        if self.state == MorphState::Animating {
            return Ok(());
        }
        if target.len() != cloud.positions.len() {
            return Err(MorphError::TargetLengthMismatch {
                expected: cloud.positions.len(),
                got: target.len(),
            });
        }

        self.source = cloud.positions.clone();
        self.target = target;
        self.duration_ms = duration_ms.max(1.0);
        self.elapsed_ms = 0.0;
        self.rotation_at_start = self.rotation_y;
        self.state = MorphState::Animating;
        Ok(())
    }

    /// Advance an in-flight morph by `dt_ms` of wall-clock time.
    ///
    /// Returns true when particle positions were mutated (so the
    /// caller knows a GPU re-upload is due).
    pub fn advance(&mut self, cloud: &mut ParticleCloud, dt_ms: f32) -> bool {
        if self.state != MorphState::Animating {
            return false;
        }

        self.elapsed_ms += dt_ms.max(0.0);
        let raw = (self.elapsed_ms / self.duration_ms).min(1.0);
        let t = ease_in_out_cubic(raw);

        if raw >= 1.0 {
            // Land exactly on the target, no interpolation residue
            cloud.positions.copy_from_slice(&self.target);
            self.rotation_y = 0.0;
            self.pulse = 1.0;
            self.state = MorphState::Steady(ShapeKind::Heart);
            return true;
        }

        for ((pos, src), dst) in cloud
            .positions
            .iter_mut()
            .zip(&self.source)
            .zip(&self.target)
        {
            *pos = src * (1.0 - t) + dst * t;
        }

        // Swing back to face front while the shape forms
        self.rotation_y = self.rotation_at_start * (1.0 - t);
        // Pulse ramps in with the morph so the first beat isn't a jump
        self.pulse = t;
        true
    }

    /// Per-frame update independent of morphing.
    ///
    /// Steady heart: sharp heartbeat pulse and a gentle sway. Idle
    /// cloud: slow constant drift. Returns the uniform values for the
    /// renderer.
    pub fn tick(&mut self, time_seconds: f32) -> FrameUniforms {
        match self.state {
            MorphState::Steady(ShapeKind::Heart) => {
                // |sin|^6 spikes briefly near the peaks: a systolic
                // beat rather than a smooth sinusoidal bulge
                let beat = (time_seconds * BEAT_FREQ).sin().abs().powi(6);
                self.pulse = 1.0 + beat * 0.8;
                self.rotation_y = (time_seconds).sin() * 0.1;
            }
            MorphState::Idle => {
                self.rotation_y += DRIFT_PER_TICK;
                self.pulse = 0.0;
            }
            MorphState::Animating => {
                // advance() owns pulse and rotation while morphing
            }
        }

        FrameUniforms {
            time: time_seconds,
            pulse_strength: self.pulse,
            rotation_y: self.rotation_y,
        }
    }
}

impl Default for MorphEngine {
    fn default() -> Self {
        Self::new()
    }
}
