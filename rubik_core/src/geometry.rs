//! Small geometric helpers behind face picking, dragging and snapping.
use bevy_math::{primitives::InfinitePlane3d, Dir3, EulerRot, Quat, Ray3d, Vec3};

use crate::constants::rotation_constants::QUARTER_TURN_DEG;

/// Nearest multiple of `step` to `value`, computed on the truncated integer
/// part of `value`.
///
/// The two `step`-aligned brackets around the value are found from its sign
/// and remainder; the upper bracket wins only when the value lies strictly
/// above their midpoint, so an exact midpoint resolves to the lower one.
pub fn nearest_multiple(value: f32, step: u32) -> f32 {
    // Clamped so the bracket arithmetic below stays inside i64.
    let value = value.clamp(-1e15, 1e15) as i64;
    let step = i64::from(step.max(1));

    let remainder = value.abs() % step;
    let (lower, upper) = if value > 0 {
        let lower = value - remainder;
        (lower, lower + step)
    } else {
        let upper = value + remainder;
        (upper - step, upper)
    };

    let midpoint = (upper + lower) as f32 / 2.0;
    if value as f32 > midpoint {
        upper as f32
    } else {
        lower as f32
    }
}

/// Twist about the local Z axis, in degrees, taken from the Y-X-Z Euler
/// decomposition of `rotation`.
pub fn twist_degrees(rotation: Quat) -> f32 {
    let (_, _, z) = rotation.to_euler(EulerRot::YXZ);
    z.to_degrees()
}

/// True when `degrees` is within `tolerance` of a multiple of 90 on either side.
pub fn is_right_angle(degrees: f32, tolerance: f32) -> bool {
    let remainder = degrees.abs() % QUARTER_TURN_DEG;
    remainder < tolerance || QUARTER_TURN_DEG - remainder < tolerance
}

/// Point where `ray` meets the plane through `origin` with the given normal.
/// `None` when the ray is parallel to the plane or points away from it.
pub fn project_onto_plane(ray: Ray3d, origin: Vec3, normal: Vec3) -> Option<Vec3> {
    let normal = Dir3::new(normal).ok()?;
    let distance = ray.intersect_plane(origin, InfinitePlane3d { normal })?;
    Some(ray.get_point(distance))
}

/// Angle in degrees from `from` to `to`, negative when the turn is clockwise
/// looking down `axis`. Degenerate vectors give zero.
pub fn signed_angle(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    if from.length_squared() < f32::EPSILON || to.length_squared() < f32::EPSILON {
        return 0.0;
    }
    let unsigned = from.angle_between(to).to_degrees();
    if axis.dot(from.cross(to)) < 0.0 {
        -unsigned
    } else {
        unsigned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_multiple_positive_rounds_down() {
        assert_eq!(nearest_multiple(37.0, 90), 0.0);
    }

    #[test]
    fn test_nearest_multiple_negative_rounds_up() {
        assert_eq!(nearest_multiple(-37.0, 90), 0.0);
    }

    #[test]
    fn test_nearest_multiple_just_past_quarter() {
        assert_eq!(nearest_multiple(91.0, 90), 90.0);
        assert_eq!(nearest_multiple(134.0, 90), 90.0);
        assert_eq!(nearest_multiple(136.0, 90), 180.0);
    }

    #[test]
    fn test_nearest_multiple_exact_values_are_kept() {
        assert_eq!(nearest_multiple(0.0, 90), 0.0);
        assert_eq!(nearest_multiple(90.0, 90), 90.0);
        assert_eq!(nearest_multiple(-90.0, 90), -90.0);
        assert_eq!(nearest_multiple(180.0, 90), 180.0);
    }

    #[test]
    fn test_nearest_multiple_midpoint_goes_to_lower_bracket() {
        assert_eq!(nearest_multiple(45.0, 90), 0.0);
        assert_eq!(nearest_multiple(-45.0, 90), -90.0);
        assert_eq!(nearest_multiple(-135.0, 90), -180.0);
    }

    #[test]
    fn test_nearest_multiple_truncates_fraction() {
        // 45.9 truncates to 45, which sits on the midpoint
        assert_eq!(nearest_multiple(45.9, 90), 0.0);
        assert_eq!(nearest_multiple(46.2, 90), 90.0);
    }

    #[test]
    fn test_nearest_multiple_survives_huge_inputs() {
        let snapped = nearest_multiple(-3e9, 90);
        assert!((snapped + 3e9).abs() <= 1e3, "{snapped}");
        assert!(nearest_multiple(3e9, 90) > 0.0);
        for value in [f32::MAX, f32::MIN, f32::INFINITY, f32::NEG_INFINITY] {
            assert!(nearest_multiple(value, 90).is_finite());
        }
        assert_eq!(nearest_multiple(f32::NAN, 90), 0.0);
    }

    #[test]
    fn test_twist_degrees_of_z_rotation() {
        let q = Quat::from_rotation_z(30f32.to_radians());
        assert!((twist_degrees(q) - 30.0).abs() < 1e-3);
        let q = Quat::from_rotation_z(-120f32.to_radians());
        assert!((twist_degrees(q) + 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_is_right_angle() {
        assert!(is_right_angle(0.0, 1e-3));
        assert!(is_right_angle(90.0004, 1e-3));
        assert!(is_right_angle(-179.9996, 1e-3));
        assert!(!is_right_angle(45.0, 1e-3));
        assert!(!is_right_angle(90.01, 1e-3));
    }

    #[test]
    fn test_project_onto_plane_hits_in_front() {
        let ray = Ray3d::new(Vec3::new(0.5, 0.5, 10.0), Dir3::NEG_Z);
        let hit = project_onto_plane(ray, Vec3::new(0.0, 0.0, 1.5), Vec3::Z).unwrap();
        assert!((hit - Vec3::new(0.5, 0.5, 1.5)).length() < 1e-5);
    }

    #[test]
    fn test_project_onto_plane_misses_parallel_and_behind() {
        let parallel = Ray3d::new(Vec3::new(0.0, 0.0, 10.0), Dir3::X);
        assert!(project_onto_plane(parallel, Vec3::ZERO, Vec3::Z).is_none());

        let away = Ray3d::new(Vec3::new(0.0, 0.0, 10.0), Dir3::Z);
        assert!(project_onto_plane(away, Vec3::ZERO, Vec3::Z).is_none());
    }

    #[test]
    fn test_signed_angle_sign_follows_axis() {
        assert!((signed_angle(Vec3::X, Vec3::Y, Vec3::Z) - 90.0).abs() < 1e-3);
        assert!((signed_angle(Vec3::Y, Vec3::X, Vec3::Z) + 90.0).abs() < 1e-3);
        assert!((signed_angle(Vec3::X, Vec3::Y, Vec3::NEG_Z) + 90.0).abs() < 1e-3);
        assert_eq!(signed_angle(Vec3::ZERO, Vec3::Y, Vec3::Z), 0.0);
    }
}
