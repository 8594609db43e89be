//! Engine-independent cube logic for rubik_robot.
//!
//! Everything here works on plain poses expressed in the cube's own frame:
//! face pivots and plane membership, the nearest-90 snap, the face rotation
//! state machine, whole-cube spins, the scramble driver and a small
//! forward-kinematics helper. The Bevy application mirrors the results into
//! `Transform`s; nothing in this crate knows about entities or rendering.
//!
//! ## Frames
//!
//! Cube frame: origin at the cube centre, cubies on the `{-1, 0, 1}³ * spacing`
//! lattice. A face pivot's local +Z axis points out of its face and is the
//! axis every turn of that face spins around.

pub mod constants;
pub mod curve;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod kinematics;
pub mod pivot;
pub mod scene;
pub mod scramble;
pub mod spin;

pub use curve::{EasedCurve, RotationCurve};
pub use engine::{EngineSettings, FaceRotationEngine, RotationStart, StepStatus};
pub use error::RotationError;
pub use kinematics::{EndEffectorLocator, LinkedNode, OrientationModel, TransformNode};
pub use pivot::{FacePivot, PivotSelector, PointSpace};
pub use scene::{CubeModel, CubeScene};
pub use scramble::{ScrambleProgress, Scrambler};
pub use spin::{CubeSpinner, SpinStatus};
