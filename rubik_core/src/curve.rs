//! Time curves that shape a face turn.
use bevy_math::curve::{easing::EaseFunction, Curve};

use crate::constants::rotation_constants::FACE_ROTATION_SECS;

/// Maps elapsed time in `[0, duration]` to an interpolation parameter in
/// `[0, 1]`. Implementations must be monotonic on that domain.
pub trait RotationCurve {
    /// Length of the curve's domain; a turn lasts exactly this long.
    fn duration(&self) -> f32;

    fn evaluate(&self, elapsed: f32) -> f32;
}

/// A Bevy easing function stretched over `duration` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EasedCurve {
    pub ease: EaseFunction,
    pub duration: f32,
}

impl EasedCurve {
    pub fn new(ease: EaseFunction, duration: f32) -> Self {
        Self {
            ease,
            duration: duration.max(0.0),
        }
    }

    pub fn linear(duration: f32) -> Self {
        Self::new(EaseFunction::Linear, duration)
    }
}

impl Default for EasedCurve {
    fn default() -> Self {
        Self::new(EaseFunction::CubicInOut, FACE_ROTATION_SECS)
    }
}

impl RotationCurve for EasedCurve {
    fn duration(&self) -> f32 {
        self.duration
    }

    fn evaluate(&self, elapsed: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        self.ease.sample_clamped(elapsed / self.duration)
    }
}

impl<F: Fn(f32) -> f32> RotationCurve for (f32, F) {
    fn duration(&self) -> f32 {
        self.0
    }

    fn evaluate(&self, elapsed: f32) -> f32 {
        (self.1)(elapsed)
    }
}
