//! Rejections reported by the rotation engine and the cube spinner.
//!
//! Error types derived with `thiserror`.

use thiserror::Error;

use crate::pivot::FacePivot;

/// Why a rotation request was not carried out.
///
/// No request ever leaves the engine half-updated: on `Err` the grouping,
/// the session and every cubie pose are exactly as before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RotationError {
    /// Another face owns the rotation pivot.
    #[error("cannot turn {requested}: {active} is being turned")]
    Busy {
        active: FacePivot,
        requested: FacePivot,
    },
    /// A drag or release arrived while no face was grabbed, or while the
    /// grabbed face is still animating.
    #[error("no face is held")]
    NotHolding,
    /// The scene has no pose for this pivot.
    #[error("no pose for pivot {0}")]
    UnknownPivot(FacePivot),
    /// The requested angle is NaN or infinite.
    #[error("invalid rotation angle {0}")]
    InvalidAngle(f32),
    /// The spin axis has zero length or is not finite.
    #[error("invalid spin axis")]
    InvalidAxis,
    /// The whole cube is already spinning.
    #[error("cube spin already in progress")]
    SpinInProgress,
}
