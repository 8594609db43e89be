//! Input handler
//! Reads mouse and keyboard each frame and fills the `Pending*` resources
//! consumed by the cube systems.
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use rubik_core::constants::rotation_constants::QUARTER_TURN_DEG;
use rubik_core::FacePivot;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceTurn {
    pub pivot: FacePivot,
    pub degrees: f32,
    /// Skip the animation.
    pub instant: bool,
}

#[derive(Resource, Default)]
pub struct PendingFaceTurn(pub Option<FaceTurn>);

#[derive(Resource, Default)]
pub struct PendingSpin(pub Option<Vec3>);

#[derive(Resource, Default)]
pub struct PendingScramble(pub bool);

#[derive(Resource, Default)]
pub struct PendingDebugToggle(pub bool);

/// Left mouse button, as rays through the cursor.
#[derive(Resource, Default)]
pub struct PendingPointer {
    pub press: Option<Ray3d>,
    pub drag: Option<Ray3d>,
    pub release: bool,
}

pub struct InputsPlugin;

impl Plugin for InputsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingFaceTurn>()
            .init_resource::<PendingSpin>()
            .init_resource::<PendingScramble>()
            .init_resource::<PendingDebugToggle>()
            .init_resource::<PendingPointer>()
            .add_systems(
                PreUpdate,
                (clear_pending_actions, (read_keyboard, read_mouse)).chain(),
            );
    }
}

fn clear_pending_actions(
    mut pending_turn: ResMut<PendingFaceTurn>,
    mut pending_spin: ResMut<PendingSpin>,
    mut pending_scramble: ResMut<PendingScramble>,
    mut pending_debug: ResMut<PendingDebugToggle>,
    mut pending_pointer: ResMut<PendingPointer>,
) {
    pending_turn.0 = None;
    pending_spin.0 = None;
    pending_scramble.0 = false;
    pending_debug.0 = false;
    *pending_pointer = PendingPointer::default();
}

/// Digits 1 to 6 pick a face in [`FacePivot::ALL`] order.
pub fn face_for_key(key: KeyCode) -> Option<FacePivot> {
    let index = match key {
        KeyCode::Digit1 => 0,
        KeyCode::Digit2 => 1,
        KeyCode::Digit3 => 2,
        KeyCode::Digit4 => 3,
        KeyCode::Digit5 => 4,
        KeyCode::Digit6 => 5,
        _ => return None,
    };
    FacePivot::from_index(index)
}

/// Arrow keys spin the cube about a world axis, the way a swipe would drag it.
pub fn spin_axis_for_key(key: KeyCode) -> Option<Vec3> {
    match key {
        KeyCode::ArrowRight => Some(Vec3::NEG_Y),
        KeyCode::ArrowLeft => Some(Vec3::Y),
        KeyCode::ArrowUp => Some(Vec3::X),
        KeyCode::ArrowDown => Some(Vec3::NEG_X),
        _ => None,
    }
}

fn read_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut pending_turn: ResMut<PendingFaceTurn>,
    mut pending_spin: ResMut<PendingSpin>,
    mut pending_scramble: ResMut<PendingScramble>,
    mut pending_debug: ResMut<PendingDebugToggle>,
) {
    let reverse = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    let instant = keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]);

    for &key in keyboard.get_just_pressed() {
        if let Some(pivot) = face_for_key(key) {
            let degrees = if reverse { -QUARTER_TURN_DEG } else { QUARTER_TURN_DEG };
            pending_turn.0 = Some(FaceTurn {
                pivot,
                degrees,
                instant,
            });
        } else if let Some(axis) = spin_axis_for_key(key) {
            pending_spin.0 = Some(axis);
        } else if key == KeyCode::KeyS {
            pending_scramble.0 = true;
        } else if key == KeyCode::KeyK {
            pending_debug.0 = true;
        }
    }
}

fn read_mouse(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut pending_pointer: ResMut<PendingPointer>,
) {
    if buttons.just_pressed(MouseButton::Left) {
        pending_pointer.press = cursor_ray(&windows, &cameras);
    } else if buttons.pressed(MouseButton::Left) {
        pending_pointer.drag = cursor_ray(&windows, &cameras);
    }
    if buttons.just_released(MouseButton::Left) {
        pending_pointer.release = true;
    }
}

fn cursor_ray(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<Camera3d>>,
) -> Option<Ray3d> {
    let window = windows.single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, transform) = cameras.single().ok()?;
    camera.viewport_to_world(transform, cursor).ok()
}
