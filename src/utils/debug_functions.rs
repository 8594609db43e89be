//! Debug overlay: face pivots and a demo joint chain drawn with gizmos.
use bevy::prelude::*;

use rubik_core::{CubeScene, EndEffectorLocator, FacePivot, TransformNode};

use crate::log;
use crate::utils::constants::cube_view_constants::sticker_color;
use crate::utils::constants::debug_constants::{JOINT_RADIUS, PIVOT_ARROW_LENGTH};
use crate::utils::inputs::PendingDebugToggle;
use crate::utils::objects::{ArmChain, RubikState};

pub struct DebugFunctionsPlugin;

impl Plugin for DebugFunctionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArmChain>()
            .add_systems(Update, visualize_rubik);
    }
}

/// Positions of every joint of `chain`, root first.
pub fn joint_positions(locator: &EndEffectorLocator, chain: &[TransformNode]) -> Vec<Vec3> {
    (1..=chain.len()).map(|end| locator.locate(&chain[..end])).collect()
}

/// Toggled with 'K'.
fn visualize_rubik(
    mut gizmos: Gizmos,
    pending: Res<PendingDebugToggle>,
    state: Res<RubikState>,
    arm: Res<ArmChain>,
    mut show: Local<bool>,
) {
    let locator = EndEffectorLocator::default();

    if pending.0 {
        *show = !*show;
        info!("Debug overlay: {}", *show);
        if *show {
            let end = locator.locate(&arm.nodes);
            log!("Arm end effector at ({:.3}, {:.3}, {:.3})", end.x, end.y, end.z);
        }
    }
    if !*show {
        return;
    }

    let active = state.engine.active_pivot();
    for pivot in FacePivot::ALL {
        let Some(pose) = state.model.world_pivot_pose(pivot) else {
            continue;
        };
        let centre = Vec3::from(pose.translation);
        let length = if active == Some(pivot) {
            PIVOT_ARROW_LENGTH * 1.5
        } else {
            PIVOT_ARROW_LENGTH
        };
        gizmos.arrow(centre, centre + pose.rotation * Vec3::Z * length, sticker_color(pivot));
    }

    let joints = joint_positions(&locator, &arm.nodes);
    gizmos.linestrip(joints.iter().copied(), Color::WHITE);
    for &joint in &joints {
        gizmos.sphere(joint, JOINT_RADIUS, Color::srgb(1.0, 0.8, 0.2));
    }
}
