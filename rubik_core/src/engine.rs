//! Face rotation state machine.
//!
//! One face at a time owns the *rotation pivot*: a grouping transform placed
//! on the face pivot with the cubies of that face attached. A session eases
//! the group from its current orientation to a target orientation; when the
//! target leaves the face at a right angle the group dissolves, otherwise
//! the face stays held so the next turn of the same face can continue
//! without re-grouping.
//!
//! ```text
//!   Idle ──begin──▶ Rotating ──step, aligned──▶ Idle
//!    │                 ▲  │
//!  begin_drag          │  └──step, not aligned──▶ Holding
//!    ▼                 │                           │
//!  Holding ──begin / release (same face)───────────┘
//! ```
use bevy_math::{Isometry3d, Quat};
use log::{debug, info};

use crate::constants::rotation_constants::{
    ALIGNMENT_TOLERANCE_DEG, MEMBERSHIP_TOLERANCE, QUARTER_TURN_DEG,
};
use crate::curve::{EasedCurve, RotationCurve};
use crate::error::RotationError;
use crate::geometry::{is_right_angle, nearest_multiple, twist_degrees};
use crate::pivot::{plane_members, FacePivot};
use crate::scene::CubeScene;

/// Tolerances used by the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineSettings {
    /// Half thickness of the slab around a face plane.
    pub membership_tolerance: f32,
    /// Degrees from a multiple of 90 at which a group may still dissolve.
    pub alignment_tolerance_deg: f32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            membership_tolerance: MEMBERSHIP_TOLERANCE,
            alignment_tolerance_deg: ALIGNMENT_TOLERANCE_DEG,
        }
    }
}

/// Outcome of an accepted rotation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationStart {
    Started,
    /// The face was already animating; its session was left untouched.
    Continued,
}

/// What a call to [`FaceRotationEngine::step`] observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    /// No face owns the rotation pivot.
    Idle,
    Rotating,
    /// A face owns the rotation pivot but nothing is animating.
    Holding,
    /// A session finished this step and its group dissolved.
    JustCompleted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionKind {
    Turn,
    Snap,
}

/// An eased rotation in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationSession {
    pub pivot: FacePivot,
    pub start: Quat,
    pub target: Quat,
    pub elapsed: f32,
    pub kind: SessionKind,
}

#[derive(Clone, Copy, Debug)]
struct GroupedCubie {
    index: usize,
    offset: Isometry3d,
}

/// The grouping transform and the cubies attached to it.
#[derive(Clone, Debug)]
pub struct RotationPivot {
    pivot: FacePivot,
    face_pose: Isometry3d,
    pose: Isometry3d,
    members: Vec<GroupedCubie>,
}

impl RotationPivot {
    fn form<S: CubeScene + ?Sized>(
        scene: &S,
        pivot: FacePivot,
        tolerance: f32,
    ) -> Result<Self, RotationError> {
        let face_pose = scene
            .pivot_pose(pivot)
            .ok_or(RotationError::UnknownPivot(pivot))?;
        let to_face = face_pose.inverse();
        let members = plane_members(scene, face_pose, tolerance)
            .into_iter()
            .map(|index| GroupedCubie {
                index,
                offset: to_face * scene.cubie_pose(index),
            })
            .collect();

        Ok(Self {
            pivot,
            face_pose,
            pose: face_pose,
            members,
        })
    }

    pub fn pivot(&self) -> FacePivot {
        self.pivot
    }

    /// Current pose of the grouping transform in the cube frame.
    pub fn pose(&self) -> Isometry3d {
        self.pose
    }

    pub fn member_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().map(|member| member.index)
    }

    /// Twist of the group about the face axis, relative to the face pivot.
    pub fn twist_degrees(&self) -> f32 {
        twist_degrees(self.face_pose.rotation.inverse() * self.pose.rotation)
    }
}

/// Drives face turns of a cube one face at a time.
#[derive(Clone, Debug)]
pub struct FaceRotationEngine<C = EasedCurve> {
    curve: C,
    settings: EngineSettings,
    group: Option<RotationPivot>,
    session: Option<RotationSession>,
    completed: u64,
}

impl FaceRotationEngine<EasedCurve> {
    pub fn new() -> Self {
        Self::with_curve(EasedCurve::default(), EngineSettings::default())
    }
}

impl Default for FaceRotationEngine<EasedCurve> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: RotationCurve> FaceRotationEngine<C> {
    pub fn with_curve(curve: C, settings: EngineSettings) -> Self {
        Self {
            curve,
            settings,
            group: None,
            session: None,
            completed: 0,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn curve(&self) -> &C {
        &self.curve
    }

    /// True iff a session is animating.
    pub fn is_rotating(&self) -> bool {
        self.session.is_some()
    }

    /// Face owning the rotation pivot, animating or held.
    pub fn active_pivot(&self) -> Option<FacePivot> {
        self.group.as_ref().map(|group| group.pivot)
    }

    pub fn session(&self) -> Option<&RotationSession> {
        self.session.as_ref()
    }

    pub fn rotation_pivot(&self) -> Option<&RotationPivot> {
        self.group.as_ref()
    }

    /// Sessions that ran to their target since the engine was created.
    pub fn completed_sessions(&self) -> u64 {
        self.completed
    }

    /// Turns `pivot` by `degrees` about its forward axis, starting from the
    /// rotation pivot's current orientation.
    ///
    /// Rejected with [`RotationError::Busy`] while another face owns the
    /// rotation pivot. Asking again for a face that is already animating
    /// continues the running session.
    pub fn begin_rotation<S: CubeScene + ?Sized>(
        &mut self,
        scene: &S,
        pivot: FacePivot,
        degrees: f32,
    ) -> Result<RotationStart, RotationError> {
        if !degrees.is_finite() {
            return Err(RotationError::InvalidAngle(degrees));
        }
        let Some(group) = self.claim(scene, pivot)? else {
            return Ok(RotationStart::Continued);
        };

        let start = group.pose.rotation;
        let target = (start * Quat::from_rotation_z(degrees.to_radians())).normalize();
        self.start_session(pivot, start, target, SessionKind::Turn);
        Ok(RotationStart::Started)
    }

    /// Eases `pivot` to the multiple of 90 degrees nearest to its current
    /// twist. Same preconditions as [`Self::begin_rotation`].
    pub fn begin_snap_to_nearest_90<S: CubeScene + ?Sized>(
        &mut self,
        scene: &S,
        pivot: FacePivot,
    ) -> Result<RotationStart, RotationError> {
        let Some(group) = self.claim(scene, pivot)? else {
            return Ok(RotationStart::Continued);
        };

        let start = group.pose.rotation;
        let face = group.face_pose.rotation;
        let snapped = nearest_multiple(group.twist_degrees(), QUARTER_TURN_DEG as u32);
        let target = (face * Quat::from_rotation_z(snapped.to_radians())).normalize();
        self.start_session(pivot, start, target, SessionKind::Snap);
        Ok(RotationStart::Started)
    }

    /// Groups the cubies of `pivot` without animating, ready for [`Self::drag`].
    pub fn begin_drag<S: CubeScene + ?Sized>(
        &mut self,
        scene: &S,
        pivot: FacePivot,
    ) -> Result<(), RotationError> {
        match self.claim(scene, pivot)? {
            Some(_) => Ok(()),
            None => Err(RotationError::NotHolding),
        }
    }

    /// Turns the held face by `degrees` immediately.
    pub fn drag<S: CubeScene + ?Sized>(
        &mut self,
        scene: &mut S,
        degrees: f32,
    ) -> Result<(), RotationError> {
        if !degrees.is_finite() {
            return Err(RotationError::InvalidAngle(degrees));
        }
        if self.session.is_some() {
            return Err(RotationError::NotHolding);
        }
        let Some(group) = self.group.as_ref() else {
            return Err(RotationError::NotHolding);
        };

        let twist = Quat::from_rotation_z(degrees.to_radians());
        let rotation = (group.pose.rotation * twist).normalize();
        self.apply_rotation(scene, rotation);
        Ok(())
    }

    /// Lets go of the held face, snapping it to the nearest right angle.
    pub fn release<S: CubeScene + ?Sized>(
        &mut self,
        scene: &S,
    ) -> Result<RotationStart, RotationError> {
        let Some(pivot) = self.active_pivot() else {
            return Err(RotationError::NotHolding);
        };
        if self.is_rotating() {
            return Err(RotationError::NotHolding);
        }
        self.begin_snap_to_nearest_90(scene, pivot)
    }

    /// Turns the cubies of `pivot` by `degrees` in one go, without grouping
    /// or easing. Only allowed while no face owns the rotation pivot.
    /// Returns the number of cubies moved.
    pub fn rotate_face_instant<S: CubeScene + ?Sized>(
        &mut self,
        scene: &mut S,
        pivot: FacePivot,
        degrees: f32,
    ) -> Result<usize, RotationError> {
        if !degrees.is_finite() {
            return Err(RotationError::InvalidAngle(degrees));
        }
        if let Some(active) = self.active_pivot() {
            return Err(RotationError::Busy {
                active,
                requested: pivot,
            });
        }
        let face = scene
            .pivot_pose(pivot)
            .ok_or(RotationError::UnknownPivot(pivot))?;

        let twist = Isometry3d::from_rotation(Quat::from_rotation_z(degrees.to_radians()));
        let turn = face * twist * face.inverse();
        let members = plane_members(&*scene, face, self.settings.membership_tolerance);
        for &index in &members {
            let pose = turn * scene.cubie_pose(index);
            scene.set_cubie_pose(index, pose);
        }
        debug!("instant {degrees} degree turn of {pivot} moved {} cubies", members.len());
        Ok(members.len())
    }

    /// Advances the running session by `delta_secs` and writes the new poses
    /// of the grouped cubies into `scene`.
    pub fn step<S: CubeScene + ?Sized>(&mut self, scene: &mut S, delta_secs: f32) -> StepStatus {
        let delta_secs = if delta_secs.is_finite() && delta_secs > 0.0 {
            delta_secs
        } else {
            0.0
        };

        let Some(session) = self.session.as_mut() else {
            return if self.group.is_some() {
                StepStatus::Holding
            } else {
                StepStatus::Idle
            };
        };

        session.elapsed += delta_secs;
        if session.elapsed < self.curve.duration() {
            let param = self.curve.evaluate(session.elapsed).clamp(0.0, 1.0);
            let rotation = session.start.slerp(session.target, param);
            self.apply_rotation(scene, rotation);
            return StepStatus::Rotating;
        }

        // Land exactly on the target so no floating point residue builds up.
        let RotationSession {
            pivot,
            target,
            kind,
            ..
        } = *session;
        self.session = None;
        self.completed += 1;
        self.apply_rotation(scene, target);

        let aligned = self.group.as_ref().is_none_or(|group| {
            is_right_angle(group.twist_degrees(), self.settings.alignment_tolerance_deg)
        });
        if aligned {
            self.group = None;
            info!("{pivot} {kind:?} complete, group released");
            StepStatus::JustCompleted
        } else {
            debug!("{pivot} {kind:?} complete off a right angle, face held");
            StepStatus::Holding
        }
    }

    /// Rotation pivot for the next session of `pivot`, grouped on demand.
    /// `Ok(None)` when `pivot` is already animating.
    fn claim<S: CubeScene + ?Sized>(
        &mut self,
        scene: &S,
        pivot: FacePivot,
    ) -> Result<Option<&RotationPivot>, RotationError> {
        if let Some(group) = &self.group {
            if group.pivot != pivot {
                return Err(RotationError::Busy {
                    active: group.pivot,
                    requested: pivot,
                });
            }
            if self.session.is_some() {
                return Ok(None);
            }
        } else {
            let group = RotationPivot::form(scene, pivot, self.settings.membership_tolerance)?;
            debug!("grouped {} cubies under {pivot}", group.members.len());
            self.group = Some(group);
        }
        Ok(self.group.as_ref())
    }

    fn start_session(&mut self, pivot: FacePivot, start: Quat, target: Quat, kind: SessionKind) {
        debug!(
            "{pivot} {kind:?} started, {:.1} degrees to go",
            start.angle_between(target).to_degrees()
        );
        self.session = Some(RotationSession {
            pivot,
            start,
            target,
            elapsed: 0.0,
            kind,
        });
    }

    fn apply_rotation<S: CubeScene + ?Sized>(&mut self, scene: &mut S, rotation: Quat) {
        let Some(group) = self.group.as_mut() else {
            return;
        };
        group.pose.rotation = rotation;
        for member in &group.members {
            scene.set_cubie_pose(member.index, group.pose * member.offset);
        }
    }
}
