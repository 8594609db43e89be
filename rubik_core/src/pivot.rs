//! Face pivots, plane membership and pivot picking.
use core::f32::consts::{FRAC_PI_2, PI};
use core::fmt;

use bevy_math::{
    bounding::{Aabb3d, RayCast3d},
    Dir3, Isometry3d, Quat, Ray3d, Vec3,
};

use crate::constants::cube_constants::GRAB_RADIUS;
use crate::scene::CubeScene;

/// The six face pivots of the cube, named after the colour of the centre
/// cubie they turn. Declaration order is the iteration order used to break
/// distance ties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FacePivot {
    Blue,
    Red,
    Green,
    Yellow,
    White,
    Orange,
}

impl FacePivot {
    pub const ALL: [FacePivot; 6] = [
        FacePivot::Blue,
        FacePivot::Red,
        FacePivot::Green,
        FacePivot::Yellow,
        FacePivot::White,
        FacePivot::Orange,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Outward normal of the face in the cube frame.
    pub fn outward_axis(self) -> Vec3 {
        match self {
            FacePivot::Blue => Vec3::Z,
            FacePivot::Red => Vec3::X,
            FacePivot::Green => Vec3::NEG_Z,
            FacePivot::Yellow => Vec3::NEG_Y,
            FacePivot::White => Vec3::Y,
            FacePivot::Orange => Vec3::NEG_X,
        }
    }

    /// Orientation whose local +Z is [`FacePivot::outward_axis`].
    pub fn rest_rotation(self) -> Quat {
        match self {
            FacePivot::Blue => Quat::IDENTITY,
            FacePivot::Red => Quat::from_rotation_y(FRAC_PI_2),
            FacePivot::Green => Quat::from_rotation_y(PI),
            FacePivot::Yellow => Quat::from_rotation_x(FRAC_PI_2),
            FacePivot::White => Quat::from_rotation_x(-FRAC_PI_2),
            FacePivot::Orange => Quat::from_rotation_y(-FRAC_PI_2),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FacePivot::Blue => "blue",
            FacePivot::Red => "red",
            FacePivot::Green => "green",
            FacePivot::Yellow => "yellow",
            FacePivot::White => "white",
            FacePivot::Orange => "orange",
        }
    }
}

impl fmt::Display for FacePivot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Indices of the cubies whose centres lie in the thin slab around the face
/// plane of `face_pose`: `|(p - face) · forward| < tolerance`, strictly.
pub fn plane_members<S: CubeScene + ?Sized>(
    scene: &S,
    face_pose: Isometry3d,
    tolerance: f32,
) -> Vec<usize> {
    let origin = Vec3::from(face_pose.translation);
    let forward = face_pose.rotation * Vec3::Z;

    (0..scene.cubie_count())
        .filter(|&index| {
            let offset = Vec3::from(scene.cubie_pose(index).translation) - origin;
            offset.dot(forward).abs() < tolerance
        })
        .collect()
}

/// Which frame a query point is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointSpace {
    /// Cube frame, the frame pivot and cubie poses are stored in.
    Local,
    World,
}

/// Picks the face pivot a pointer or hand is aiming at.
#[derive(Clone, Copy, Debug)]
pub struct PivotSelector {
    grab_radius: f32,
}

impl Default for PivotSelector {
    fn default() -> Self {
        Self {
            grab_radius: GRAB_RADIUS,
        }
    }
}

impl PivotSelector {
    pub fn new(grab_radius: f32) -> Self {
        Self { grab_radius }
    }

    /// Pivot nearest to `point` by squared distance. The first pivot in
    /// [`FacePivot::ALL`] order wins ties. `None` only if the scene has no
    /// pivot poses at all.
    pub fn closest_pivot<S: CubeScene + ?Sized>(
        &self,
        scene: &S,
        point: Vec3,
        space: PointSpace,
    ) -> Option<FacePivot> {
        let local = match space {
            PointSpace::Local => point,
            PointSpace::World => Vec3::from(scene.cube_pose().inverse_transform_point(point)),
        };

        let mut best: Option<(FacePivot, f32)> = None;
        for pivot in FacePivot::ALL {
            let Some(pose) = scene.pivot_pose(pivot) else {
                continue;
            };
            let distance = (local - Vec3::from(pose.translation)).length_squared();
            match best {
                Some((_, closest)) if distance >= closest => {}
                _ => best = Some((pivot, distance)),
            }
        }
        best.map(|(pivot, _)| pivot)
    }

    /// Casts `ray` (world frame) against the cube's bounding box and returns
    /// the pivot closest to the hit point, or `None` on a miss.
    pub fn best_pivot_for_screen_pick<S: CubeScene + ?Sized>(
        &self,
        scene: &S,
        ray: Ray3d,
    ) -> Option<FacePivot> {
        let cube = scene.cube_pose();
        let origin = Vec3::from(cube.inverse_transform_point(ray.origin));
        let direction = Dir3::new(cube.rotation.inverse() * *ray.direction).ok()?;
        let local_ray = Ray3d::new(origin, direction);

        let bounds = Aabb3d::new(Vec3::ZERO, Vec3::splat(scene.half_extent()));
        let distance = RayCast3d::from_ray(local_ray, f32::MAX).aabb_intersection_at(&bounds)?;

        self.closest_pivot(scene, local_ray.get_point(distance), PointSpace::Local)
    }

    /// Pivot for a hand at `world_point`, provided the hand is within the
    /// grab radius of the cube centre. The radius is in cube-frame units.
    pub fn pivot_for_grab<S: CubeScene + ?Sized>(
        &self,
        scene: &S,
        world_point: Vec3,
    ) -> Option<FacePivot> {
        let local = Vec3::from(scene.cube_pose().inverse_transform_point(world_point));
        if local.length() >= self.grab_radius {
            return None;
        }
        self.closest_pivot(scene, local, PointSpace::Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::CubeModel;

    #[test]
    fn test_rest_rotation_points_forward_out_of_face() {
        for pivot in FacePivot::ALL {
            let forward = pivot.rest_rotation() * Vec3::Z;
            assert!(
                (forward - pivot.outward_axis()).length() < 1e-5,
                "{pivot} forward {forward:?}"
            );
        }
    }

    #[test]
    fn test_index_round_trip() {
        for pivot in FacePivot::ALL {
            assert_eq!(FacePivot::from_index(pivot.index()), Some(pivot));
        }
        assert_eq!(FacePivot::from_index(6), None);
    }

    #[test]
    fn test_every_face_has_nine_members() {
        let model = CubeModel::standard(1.0);
        for pivot in FacePivot::ALL {
            let pose = model.pivot_pose(pivot).unwrap();
            assert_eq!(plane_members(&model, pose, 0.01).len(), 9, "{pivot}");
        }
    }

    #[test]
    fn test_membership_includes_on_plane_and_excludes_offset() {
        let mut model = CubeModel::standard(1.0);
        let face = model.pivot_pose(FacePivot::Blue).unwrap();
        let members = plane_members(&model, face, 0.01);

        // centre of the Blue face sits exactly on the plane
        let on_plane = CubeModel::lattice_index(0, 0, 1).unwrap();
        assert!(members.contains(&on_plane));

        // push one cubie just past the slab
        let mut pose = model.cubie_pose(on_plane);
        pose.translation.z += 0.02;
        model.set_cubie_pose(on_plane, pose);
        assert!(!plane_members(&model, face, 0.01).contains(&on_plane));

        // inside the slab it still counts
        pose.translation.z -= 0.015;
        model.set_cubie_pose(on_plane, pose);
        assert!(plane_members(&model, face, 0.01).contains(&on_plane));
    }

    #[test]
    fn test_membership_boundary_is_exclusive() {
        let model = CubeModel::standard(1.0);
        let face = model.pivot_pose(FacePivot::Blue).unwrap();
        // The middle layer sits exactly one unit from the blue face plane.
        let members = plane_members(&model, face, 1.0);
        assert_eq!(members.len(), 9);
        assert!(members
            .iter()
            .all(|&i| model.cubie_pose(i).translation.z > 0.5));
    }

    #[test]
    fn test_closest_pivot_local_and_world() {
        let mut model = CubeModel::standard(1.0);
        let selector = PivotSelector::default();
        assert_eq!(
            selector.closest_pivot(&model, Vec3::new(0.2, 1.4, 0.1), PointSpace::Local),
            Some(FacePivot::White)
        );

        // Turn the cube so its white face looks down +X in the world.
        model.set_cube_pose(Isometry3d::new(
            Vec3::new(5.0, 0.0, 0.0),
            Quat::from_rotation_z(-FRAC_PI_2),
        ));
        assert_eq!(
            selector.closest_pivot(&model, Vec3::new(6.4, 0.0, 0.0), PointSpace::World),
            Some(FacePivot::White)
        );
    }

    #[test]
    fn test_closest_pivot_tie_goes_to_first_enumerated() {
        let model = CubeModel::standard(1.0);
        let selector = PivotSelector::default();
        // Equidistant from every face centre.
        assert_eq!(
            selector.closest_pivot(&model, Vec3::ZERO, PointSpace::Local),
            Some(FacePivot::Blue)
        );
        // Equidistant from red (+X) and white (+Y); red is enumerated first.
        assert_eq!(
            selector.closest_pivot(&model, Vec3::new(1.0, 1.0, 0.0), PointSpace::Local),
            Some(FacePivot::Red)
        );
    }

    #[test]
    fn test_screen_pick_hits_front_face() {
        let model = CubeModel::standard(1.0);
        let selector = PivotSelector::default();
        let ray = Ray3d::new(Vec3::new(0.3, -0.2, 10.0), Dir3::NEG_Z);
        assert_eq!(
            selector.best_pivot_for_screen_pick(&model, ray),
            Some(FacePivot::Blue)
        );

        let ray = Ray3d::new(Vec3::new(-10.0, 0.1, 0.2), Dir3::X);
        assert_eq!(
            selector.best_pivot_for_screen_pick(&model, ray),
            Some(FacePivot::Orange)
        );
    }

    #[test]
    fn test_screen_pick_miss_returns_none() {
        let model = CubeModel::standard(1.0);
        let selector = PivotSelector::default();
        let ray = Ray3d::new(Vec3::new(3.0, 0.0, 10.0), Dir3::NEG_Z);
        assert_eq!(selector.best_pivot_for_screen_pick(&model, ray), None);
    }

    #[test]
    fn test_grab_requires_hand_near_cube() {
        let model = CubeModel::standard(1.0);
        let selector = PivotSelector::default();
        assert_eq!(
            selector.pivot_for_grab(&model, Vec3::new(0.0, -1.1, 0.0)),
            Some(FacePivot::Yellow)
        );
        assert_eq!(selector.pivot_for_grab(&model, Vec3::new(0.0, -2.0, 0.0)), None);
    }
}
