//! Forward kinematics for a chain of parent/child transforms.
//!
//! The locator composes local offsets from the root outwards:
//! `offset += q * node.local_position; q *= orientation(node)`.
use bevy_math::{EulerRot, Quat, Vec3};

/// One link of a transform chain, relative to its parent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformNode {
    pub local_position: Vec3,
    /// Local Euler angles in degrees (x, y, z).
    pub local_euler_degrees: Vec3,
}

impl TransformNode {
    pub fn new(local_position: Vec3, local_euler_degrees: Vec3) -> Self {
        Self {
            local_position,
            local_euler_degrees,
        }
    }
}

/// A node with a link to its parent inside a flat node list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkedNode {
    pub node: TransformNode,
    pub parent: Option<usize>,
}

/// How a node's Euler angles become a rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrientationModel {
    /// Rotation about the single axis with a strictly positive angle, checked
    /// in z, y, x order after wrapping into `[0, 360)`. The other two axes
    /// are dropped, so only single-axis joints come out right.
    #[default]
    DominantAxis,
    /// Full Y-X-Z Euler composition.
    Full,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EndEffectorLocator {
    model: OrientationModel,
}

impl EndEffectorLocator {
    pub fn new(model: OrientationModel) -> Self {
        Self { model }
    }

    pub fn orientation(&self, node: &TransformNode) -> Quat {
        let euler = node.local_euler_degrees;
        match self.model {
            OrientationModel::DominantAxis => {
                let wrapped = Vec3::new(
                    euler.x.rem_euclid(360.0),
                    euler.y.rem_euclid(360.0),
                    euler.z.rem_euclid(360.0),
                );
                if wrapped.z > 0.0 {
                    Quat::from_rotation_z(wrapped.z.to_radians())
                } else if wrapped.y > 0.0 {
                    Quat::from_rotation_y(wrapped.y.to_radians())
                } else if wrapped.x > 0.0 {
                    Quat::from_rotation_x(wrapped.x.to_radians())
                } else {
                    Quat::IDENTITY
                }
            }
            OrientationModel::Full => Quat::from_euler(
                EulerRot::YXZ,
                euler.y.to_radians(),
                euler.x.to_radians(),
                euler.z.to_radians(),
            ),
        }
    }

    /// Position of the last node of `chain` in the frame of the first.
    /// `chain` runs from the root to the end effector.
    pub fn locate(&self, chain: &[TransformNode]) -> Vec3 {
        let mut orientation = Quat::IDENTITY;
        let mut offset = Vec3::ZERO;
        for node in chain {
            offset += orientation * node.local_position;
            orientation *= self.orientation(node);
        }
        offset
    }

    /// Walks parent links up from `end_effector` and locates it in the frame
    /// of the topmost ancestor. `None` for a dangling index or a cycle.
    pub fn locate_from(&self, nodes: &[LinkedNode], end_effector: usize) -> Option<Vec3> {
        let mut chain = Vec::new();
        let mut current = Some(end_effector);
        while let Some(index) = current {
            if chain.len() >= nodes.len() {
                return None;
            }
            let linked = nodes.get(index)?;
            chain.push(linked.node);
            current = linked.parent;
        }
        chain.reverse();
        Some(self.locate(&chain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    fn assert_same_rotation(a: Quat, b: Quat) {
        assert_close(a * Vec3::X, b * Vec3::X);
        assert_close(a * Vec3::Y, b * Vec3::Y);
    }

    #[test]
    fn test_two_node_chain() {
        let locator = EndEffectorLocator::default();
        let chain = [
            TransformNode::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 90.0)),
            TransformNode::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO),
        ];
        // (0,1,0) + Rz(90) * (1,0,0)
        assert_close(locator.locate(&chain), Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_two_node_chain_identity_root() {
        let locator = EndEffectorLocator::default();
        let chain = [
            TransformNode::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO),
            TransformNode::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 90.0)),
        ];
        // The end effector's own rotation never moves its position.
        assert_close(locator.locate(&chain), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_three_node_chain() {
        let locator = EndEffectorLocator::default();
        let chain = [
            TransformNode::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 90.0)),
            TransformNode::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 90.0, 0.0)),
            TransformNode::new(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO),
        ];
        // (1,0,0) + Rz90*(1,0,0) + Rz90*Ry90*(0,0,1) = (1,0,0) + (0,1,0) + (0,1,0)
        assert_close(locator.locate(&chain), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_dominant_axis_drops_other_axes() {
        let locator = EndEffectorLocator::default();
        let node = TransformNode::new(Vec3::ZERO, Vec3::new(45.0, 30.0, 90.0));
        let q = locator.orientation(&node);
        assert_same_rotation(q, Quat::from_rotation_z(90f32.to_radians()));

        let node = TransformNode::new(Vec3::ZERO, Vec3::new(45.0, 0.0, 0.0));
        let q = locator.orientation(&node);
        assert_same_rotation(q, Quat::from_rotation_x(45f32.to_radians()));
    }

    #[test]
    fn test_dominant_axis_wraps_negative_angles() {
        let locator = EndEffectorLocator::default();
        let node = TransformNode::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -90.0));
        assert_close(locator.orientation(&node) * Vec3::X, Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_full_model_composes_all_axes() {
        let locator = EndEffectorLocator::new(OrientationModel::Full);
        let node = TransformNode::new(Vec3::ZERO, Vec3::new(90.0, 90.0, 0.0));
        let expected =
            Quat::from_rotation_y(90f32.to_radians()) * Quat::from_rotation_x(90f32.to_radians());
        assert_same_rotation(locator.orientation(&node), expected);
    }

    #[test]
    fn test_locate_from_parent_links() {
        let locator = EndEffectorLocator::default();
        let nodes = [
            LinkedNode {
                node: TransformNode::new(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO),
                parent: Some(2),
            },
            LinkedNode {
                node: TransformNode::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 90.0)),
                parent: None,
            },
            LinkedNode {
                node: TransformNode::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO),
                parent: Some(1),
            },
        ];
        // chain: 1 -> 2 -> 0
        assert_close(
            locator.locate_from(&nodes, 0).unwrap(),
            Vec3::new(0.0, 2.0, 1.0),
        );
    }

    #[test]
    fn test_locate_from_rejects_cycles_and_bad_indices() {
        let locator = EndEffectorLocator::default();
        let node = TransformNode::default();
        let cyclic = [
            LinkedNode { node, parent: Some(1) },
            LinkedNode { node, parent: Some(0) },
        ];
        assert_eq!(locator.locate_from(&cyclic, 0), None);
        assert_eq!(locator.locate_from(&cyclic, 5), None);
    }
}
