//! Systems that turn pending input into cube commands, advance the
//! animations and mirror the model onto entity transforms.
use bevy::prelude::*;

use rubik_core::geometry::{project_onto_plane, signed_angle};
use rubik_core::{CubeModel, CubeScene, FacePivot, ScrambleProgress, Scrambler, StepStatus};

use crate::utils::config::RubikConfig;
use crate::utils::inputs::{PendingFaceTurn, PendingPointer, PendingScramble, PendingSpin};
use crate::utils::objects::{CubeRoot, CubieMarker, DragState, RandomGen, RubikState};

pub struct SystemsLogicPlugin;

impl Plugin for SystemsLogicPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                handle_pointer,
                handle_face_turn,
                handle_spin,
                handle_scramble_request,
                tick_rubik,
                sync_cube_transforms,
            )
                .chain(),
        );
    }
}

/// Vector from the centre of `pivot` to where `ray` crosses the face plane.
pub fn drag_vector(model: &CubeModel, pivot: FacePivot, ray: Ray3d) -> Option<Vec3> {
    let face = model.world_pivot_pose(pivot)?;
    let centre = Vec3::from(face.translation);
    let hit = project_onto_plane(ray, centre, face.rotation * Vec3::Z)?;
    Some(hit - centre)
}

/// Mouse press grabs a face, motion turns it, release snaps it.
fn handle_pointer(
    pending: Res<PendingPointer>,
    mut state: ResMut<RubikState>,
    mut drag: ResMut<DragState>,
) {
    let state = &mut *state;

    if let Some(ray) = pending.press {
        if !state.is_busy() {
            if let Some(pivot) = state.selector.best_pivot_for_screen_pick(&state.model, ray) {
                match state.engine.begin_drag(&state.model, pivot) {
                    Ok(()) => {
                        drag.pivot = Some(pivot);
                        drag.previous = drag_vector(&state.model, pivot, ray);
                        debug!("Grabbed {pivot}");
                    }
                    Err(err) => info!("Cannot grab {pivot}: {err}"),
                }
            }
        }
    }

    if let (Some(ray), Some(pivot)) = (pending.drag, drag.pivot) {
        if let Some(current) = drag_vector(&state.model, pivot, ray) {
            let face = state.model.world_pivot_pose(pivot);
            if let (Some(previous), Some(face)) = (drag.previous, face) {
                let degrees = signed_angle(previous, current, face.rotation * Vec3::Z);
                if let Err(err) = state.engine.drag(&mut state.model, degrees) {
                    debug!("Drag of {pivot} ignored: {err}");
                }
            }
            drag.previous = Some(current);
        }
    }

    if pending.release {
        drag.previous = None;
        if let Some(pivot) = drag.pivot.take() {
            match state.engine.release(&state.model) {
                Ok(_) => debug!("Released {pivot}"),
                Err(err) => warn!("Release of {pivot} failed: {err}"),
            }
        }
    }
}

fn handle_face_turn(
    pending: Res<PendingFaceTurn>,
    drag: Res<DragState>,
    mut state: ResMut<RubikState>,
) {
    let Some(turn) = pending.0 else {
        return;
    };
    if let Some(held) = drag.pivot {
        info!("Turn of {} ignored while {held} is grabbed", turn.pivot);
        return;
    }
    let state = &mut *state;
    if state.spinner.is_spinning() || state.scrambler.is_some() {
        info!("Turn of {} ignored while the cube is moving", turn.pivot);
        return;
    }

    if turn.instant {
        let turned = state
            .engine
            .rotate_face_instant(&mut state.model, turn.pivot, turn.degrees);
        match turned {
            Ok(moved) => {
                info!("Turned {} by {} degrees ({moved} cubies)", turn.pivot, turn.degrees)
            }
            Err(err) => warn!("Instant turn rejected: {err}"),
        }
        return;
    }

    match state.engine.begin_rotation(&state.model, turn.pivot, turn.degrees) {
        Ok(start) => info!("Turning {} by {} degrees ({start:?})", turn.pivot, turn.degrees),
        Err(err) => warn!("Turn rejected: {err}"),
    }
}

fn handle_spin(pending: Res<PendingSpin>, mut state: ResMut<RubikState>) {
    let Some(axis) = pending.0 else {
        return;
    };
    let state = &mut *state;
    if state.engine.active_pivot().is_some() || state.scrambler.is_some() {
        info!("Cube spin ignored while a face is turning");
        return;
    }
    if let Err(err) = state.spinner.begin(&state.model, axis) {
        warn!("Cube spin rejected: {err}");
    }
}

fn handle_scramble_request(
    pending: Res<PendingScramble>,
    config: Res<RubikConfig>,
    mut state: ResMut<RubikState>,
) {
    if !pending.0 {
        return;
    }
    if state.scrambler.is_some() {
        info!("Already scrambling");
        return;
    }
    info!("Scrambling with {} turns", config.scramble_rotations);
    state.scrambler = Some(Scrambler::new(config.scramble_rotations));
}

/// Advances the face turn, the cube spin and the scramble by one frame.
fn tick_rubik(time: Res<Time>, mut state: ResMut<RubikState>, mut random_gen: ResMut<RandomGen>) {
    let dt = time.delta_secs();
    let state = &mut *state;

    if state.engine.step(&mut state.model, dt) == StepStatus::JustCompleted {
        debug!("Face turn finished ({} total)", state.engine.completed_sessions());
    }
    state.spinner.step(&mut state.model, dt);

    if state.spinner.is_spinning() {
        return;
    }
    if let Some(scrambler) = state.scrambler.as_mut() {
        let progress = scrambler.poll(&mut state.engine, &state.model, &mut random_gen.random_gen);
        if progress == ScrambleProgress::Finished {
            info!("Scramble finished");
            state.scrambler = None;
        }
    }
}

fn sync_cube_transforms(
    state: Res<RubikState>,
    mut roots: Query<&mut Transform, (With<CubeRoot>, Without<CubieMarker>)>,
    mut cubies: Query<(&CubieMarker, &mut Transform), Without<CubeRoot>>,
) {
    if !state.is_changed() {
        return;
    }
    let model = &state.model;

    if let Ok(mut transform) = roots.single_mut() {
        *transform = Transform::from_isometry(model.cube_pose());
    }
    for (marker, mut transform) in &mut cubies {
        if marker.index < model.cubie_count() {
            *transform = Transform::from_isometry(model.cubie_pose(marker.index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::math::Isometry3d;

    use crate::utils::inputs::FaceTurn;

    /// World holding a cube whose Blue face is grabbed and dragged 37 degrees.
    fn world_with_grabbed_blue() -> World {
        let mut state = RubikState::from_config(&RubikConfig::default());
        state.engine.begin_drag(&state.model, FacePivot::Blue).unwrap();
        state.engine.drag(&mut state.model, 37.0).unwrap();

        let mut world = World::new();
        world.insert_resource(state);
        world.insert_resource(DragState {
            pivot: Some(FacePivot::Blue),
            previous: None,
        });
        world.insert_resource(PendingPointer::default());
        world.insert_resource(PendingFaceTurn(Some(FaceTurn {
            pivot: FacePivot::Blue,
            degrees: 90.0,
            instant: false,
        })));
        world
    }

    #[test]
    fn test_key_turn_ignored_while_face_is_grabbed() {
        let mut world = world_with_grabbed_blue();
        world.run_system_once(handle_face_turn).unwrap();

        let state = world.resource::<RubikState>();
        assert!(!state.engine.is_rotating());
        assert_eq!(state.engine.active_pivot(), Some(FacePivot::Blue));
    }

    #[test]
    fn test_release_after_ignored_key_turn_frees_the_cube() {
        let mut world = world_with_grabbed_blue();
        world.run_system_once(handle_face_turn).unwrap();

        world.insert_resource(PendingPointer {
            release: true,
            ..default()
        });
        world.run_system_once(handle_pointer).unwrap();
        assert_eq!(world.resource::<DragState>().pivot, None);

        let mut state = world.resource_mut::<RubikState>();
        let state = &mut *state;
        assert!(state.engine.is_rotating());
        for _ in 0..600 {
            state.engine.step(&mut state.model, 1.0 / 60.0);
        }
        assert_eq!(state.engine.active_pivot(), None);
        assert!(state.engine.begin_rotation(&state.model, FacePivot::Red, 90.0).is_ok());
    }

    #[test]
    fn test_drag_vector_lies_in_face_plane() {
        let model = CubeModel::standard(1.0);
        // Straight down onto the White face (y = 1).
        let ray = Ray3d::new(Vec3::new(0.5, 5.0, 0.25), Dir3::NEG_Y);
        let v = drag_vector(&model, FacePivot::White, ray).unwrap();
        assert!((v - Vec3::new(0.5, 0.0, 0.25)).length() < 1e-5);
    }

    #[test]
    fn test_drag_vector_follows_cube_pose() {
        let mut model = CubeModel::standard(1.0);
        model.set_cube_pose(Isometry3d::from_translation(Vec3::new(0.0, 0.0, -4.0)));
        // Blue now faces +Z at z = -3.
        let ray = Ray3d::new(Vec3::new(0.2, 0.0, 3.0), Dir3::NEG_Z);
        let v = drag_vector(&model, FacePivot::Blue, ray).unwrap();
        assert!((v - Vec3::new(0.2, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_drag_vector_misses_parallel_ray() {
        let model = CubeModel::standard(1.0);
        let ray = Ray3d::new(Vec3::new(0.0, 2.0, 0.0), Dir3::X);
        assert_eq!(drag_vector(&model, FacePivot::White, ray), None);
    }

    #[test]
    fn test_state_busy_while_scrambling() {
        let mut state = RubikState::from_config(&RubikConfig::default());
        assert!(!state.is_busy());
        state.scrambler = Some(Scrambler::new(3));
        assert!(state.is_busy());
    }
}
