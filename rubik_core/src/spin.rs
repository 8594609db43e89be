//! Quarter turns of the whole cube.
use bevy_math::{Dir3, Isometry3d, Quat, Vec3};
use log::debug;

use crate::constants::{cube_constants::CUBE_SPIN_SECS, rotation_constants::QUARTER_TURN_DEG};
use crate::error::RotationError;
use crate::scene::CubeScene;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinStatus {
    Idle,
    Spinning,
    Finished,
}

#[derive(Clone, Copy, Debug)]
struct Spin {
    start: Quat,
    target: Quat,
    elapsed: f32,
}

/// Spins the cube 90 degrees about a world axis with linear timing.
#[derive(Clone, Debug)]
pub struct CubeSpinner {
    duration: f32,
    spin: Option<Spin>,
}

impl Default for CubeSpinner {
    fn default() -> Self {
        Self::new(CUBE_SPIN_SECS)
    }
}

impl CubeSpinner {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            spin: None,
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    pub fn begin<S: CubeScene + ?Sized>(
        &mut self,
        scene: &S,
        axis: Vec3,
    ) -> Result<(), RotationError> {
        if self.spin.is_some() {
            return Err(RotationError::SpinInProgress);
        }
        let axis = Dir3::new(axis).map_err(|_| RotationError::InvalidAxis)?;

        let start = scene.cube_pose().rotation;
        let quarter = Quat::from_axis_angle(*axis, QUARTER_TURN_DEG.to_radians());
        let target = (quarter * start).normalize();
        debug!("cube spin about {:?} started", *axis);
        self.spin = Some(Spin {
            start,
            target,
            elapsed: 0.0,
        });
        Ok(())
    }

    pub fn step<S: CubeScene + ?Sized>(&mut self, scene: &mut S, delta_secs: f32) -> SpinStatus {
        let Some(spin) = self.spin.as_mut() else {
            return SpinStatus::Idle;
        };
        if delta_secs.is_finite() && delta_secs > 0.0 {
            spin.elapsed += delta_secs;
        }

        let finished = spin.elapsed >= self.duration;
        let rotation = if finished {
            spin.target
        } else {
            spin.start.slerp(spin.target, spin.elapsed / self.duration)
        };

        let translation = scene.cube_pose().translation;
        scene.set_cube_pose(Isometry3d::new(translation, rotation));

        if finished {
            self.spin = None;
            SpinStatus::Finished
        } else {
            SpinStatus::Spinning
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::CubeModel;

    #[test]
    fn test_spin_turns_cube_a_quarter() {
        let mut model = CubeModel::standard(1.0);
        let mut spinner = CubeSpinner::new(0.3);
        spinner.begin(&model, Vec3::Y).unwrap();

        assert_eq!(spinner.step(&mut model, 0.15), SpinStatus::Spinning);
        let halfway = model.cube_pose().rotation;
        let expected = Quat::from_rotation_y(45f32.to_radians()) * Vec3::X;
        assert!((halfway * Vec3::X - expected).length() < 1e-4);

        assert_eq!(spinner.step(&mut model, 0.2), SpinStatus::Finished);
        assert!(!spinner.is_spinning());
        let blue = model.world_pivot_pose(crate::pivot::FacePivot::Blue).unwrap();
        assert!((Vec3::from(blue.translation) - Vec3::X).length() < 1e-5);
        assert_eq!(spinner.step(&mut model, 0.1), SpinStatus::Idle);
    }

    #[test]
    fn test_spin_keeps_cube_position() {
        let mut model = CubeModel::standard(1.0);
        model.set_cube_pose(Isometry3d::from_translation(Vec3::new(0.0, 2.0, -3.0)));
        let mut spinner = CubeSpinner::new(0.1);
        spinner.begin(&model, Vec3::X).unwrap();
        spinner.step(&mut model, 1.0);
        assert_eq!(Vec3::from(model.cube_pose().translation), Vec3::new(0.0, 2.0, -3.0));
    }

    #[test]
    fn test_spin_rejects_overlap_and_zero_axis() {
        let model = CubeModel::standard(1.0);
        let mut spinner = CubeSpinner::default();
        assert_eq!(spinner.begin(&model, Vec3::ZERO), Err(RotationError::InvalidAxis));
        spinner.begin(&model, Vec3::NEG_Y).unwrap();
        assert_eq!(spinner.begin(&model, Vec3::X), Err(RotationError::SpinInProgress));
    }
}
