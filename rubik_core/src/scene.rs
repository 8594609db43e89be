//! Pose provider seam between the rotation logic and whatever owns the cube.
use bevy_math::{Isometry3d, Vec3};

use crate::constants::cube_constants::{CUBE_ORDER, CUBIE_COUNT};
use crate::pivot::FacePivot;

/// Poses of the cube, its face pivots and its cubies.
///
/// Pivot and cubie poses are expressed in the cube frame; only
/// [`CubeScene::cube_pose`] is a world pose.
pub trait CubeScene {
    fn cube_pose(&self) -> Isometry3d;
    fn set_cube_pose(&mut self, pose: Isometry3d);

    fn pivot_pose(&self, pivot: FacePivot) -> Option<Isometry3d>;

    fn cubie_count(&self) -> usize;
    fn cubie_pose(&self, index: usize) -> Isometry3d;
    fn set_cubie_pose(&mut self, index: usize, pose: Isometry3d);

    /// Half the edge length of the cube's bounding box.
    fn half_extent(&self) -> f32;

    /// World pose of a face pivot.
    fn world_pivot_pose(&self, pivot: FacePivot) -> Option<Isometry3d> {
        self.pivot_pose(pivot).map(|pose| self.cube_pose() * pose)
    }
}

/// In-memory cube: 27 cubies on a regular lattice and six fixed face pivots.
#[derive(Clone, Debug)]
pub struct CubeModel {
    spacing: f32,
    cube: Isometry3d,
    pivots: [Isometry3d; 6],
    cubies: Vec<Isometry3d>,
}

impl CubeModel {
    /// Solved cube at the world origin with `spacing` between cubie centres.
    pub fn standard(spacing: f32) -> Self {
        let pivots = FacePivot::ALL
            .map(|pivot| Isometry3d::new(pivot.outward_axis() * spacing, pivot.rest_rotation()));

        let half = (CUBE_ORDER / 2) as i32;
        let mut cubies = Vec::with_capacity(CUBIE_COUNT);
        for x in -half..=half {
            for y in -half..=half {
                for z in -half..=half {
                    let position = Vec3::new(x as f32, y as f32, z as f32) * spacing;
                    cubies.push(Isometry3d::from_translation(position));
                }
            }
        }

        Self {
            spacing,
            cube: Isometry3d::IDENTITY,
            pivots,
            cubies,
        }
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Lattice index of the cubie that starts at `(x, y, z)`, each in `-1..=1`.
    pub fn lattice_index(x: i32, y: i32, z: i32) -> Option<usize> {
        let half = (CUBE_ORDER / 2) as i32;
        let in_range = |c: i32| (-half..=half).contains(&c);
        if !(in_range(x) && in_range(y) && in_range(z)) {
            return None;
        }
        let order = CUBE_ORDER as i32;
        Some(((x + half) * order * order + (y + half) * order + (z + half)) as usize)
    }

    pub fn cubie_poses(&self) -> &[Isometry3d] {
        &self.cubies
    }
}

impl Default for CubeModel {
    fn default() -> Self {
        Self::standard(crate::constants::cube_constants::CUBIE_SPACING)
    }
}

impl CubeScene for CubeModel {
    fn cube_pose(&self) -> Isometry3d {
        self.cube
    }

    fn set_cube_pose(&mut self, pose: Isometry3d) {
        self.cube = pose;
    }

    fn pivot_pose(&self, pivot: FacePivot) -> Option<Isometry3d> {
        self.pivots.get(pivot.index()).copied()
    }

    fn cubie_count(&self) -> usize {
        self.cubies.len()
    }

    fn cubie_pose(&self, index: usize) -> Isometry3d {
        self.cubies[index]
    }

    fn set_cubie_pose(&mut self, index: usize, pose: Isometry3d) {
        if let Some(cubie) = self.cubies.get_mut(index) {
            *cubie = pose;
        }
    }

    fn half_extent(&self) -> f32 {
        self.spacing * CUBE_ORDER as f32 / 2.0
    }
}
