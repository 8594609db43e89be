use bevy::prelude::*;

use rubik_core::{CubeScene, FacePivot};

use crate::log;
use crate::utils::constants::camera_3d_constants::{
    CAMERA_3D_INITIAL_X, CAMERA_3D_INITIAL_Y, CAMERA_3D_INITIAL_Z,
};
use crate::utils::constants::cube_view_constants::{
    sticker_color, BODY_COLOR, CUBIE_BODY_SCALE, STICKER_SCALE, STICKER_THICKNESS,
};
use crate::utils::constants::lighting_constants::{AMBIENT_BRIGHTNESS, DIRECTIONAL_ILLUMINANCE};
use crate::utils::objects::{CubeRoot, CubieMarker, RubikState, StickerMarker};

/// Plugin for handling setup
pub struct SetupPlugin;

impl Plugin for SetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup);
    }
}

/// Spawns the camera, the lights and one entity per cubie under a cube root.
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    state: Res<RubikState>,
) {
    // Camera
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(CAMERA_3D_INITIAL_X, CAMERA_3D_INITIAL_Y, CAMERA_3D_INITIAL_Z)
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Light
    commands.spawn((
        DirectionalLight {
            illuminance: DIRECTIONAL_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(3.0, 6.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        affects_lightmapped_meshes: true,
    });

    let model = &state.model;
    let spacing = model.spacing();

    let body_mesh = meshes.add(Cuboid::from_length(spacing * CUBIE_BODY_SCALE));
    let body_material = materials.add(StandardMaterial {
        base_color: BODY_COLOR,
        perceptual_roughness: 0.6,
        ..default()
    });
    let sticker_mesh = meshes.add(Cuboid::new(
        spacing * STICKER_SCALE,
        spacing * STICKER_SCALE,
        spacing * STICKER_THICKNESS,
    ));
    let sticker_materials = FacePivot::ALL.map(|pivot| {
        materials.add(StandardMaterial {
            base_color: sticker_color(pivot),
            perceptual_roughness: 0.4,
            ..default()
        })
    });

    // A sticker sits on every side of a cubie that lies on the outer shell.
    let sticker_offset = spacing * (CUBIE_BODY_SCALE + STICKER_THICKNESS) / 2.0;
    let shell = spacing * 0.5;

    commands
        .spawn((
            Transform::from_isometry(model.cube_pose()),
            Visibility::default(),
            CubeRoot,
        ))
        .with_children(|parent| {
            for index in 0..model.cubie_count() {
                let pose = model.cubie_pose(index);
                let position = Vec3::from(pose.translation);

                parent
                    .spawn((
                        Mesh3d(body_mesh.clone()),
                        MeshMaterial3d(body_material.clone()),
                        Transform::from_isometry(pose),
                        CubieMarker { index },
                    ))
                    .with_children(|cubie| {
                        for pivot in FacePivot::ALL {
                            let axis = pivot.outward_axis();
                            if position.dot(axis) < shell {
                                continue;
                            }
                            cubie.spawn((
                                Mesh3d(sticker_mesh.clone()),
                                MeshMaterial3d(sticker_materials[pivot.index()].clone()),
                                Transform {
                                    translation: axis * sticker_offset,
                                    rotation: pivot.rest_rotation(),
                                    ..default()
                                },
                                StickerMarker,
                            ));
                        }
                    });
            }
        });

    log!("Spawned cube with {} cubies", model.cubie_count());
}
