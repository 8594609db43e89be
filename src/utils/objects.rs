//! Objects, resources, and components used by the app.
use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand::SeedableRng;

use rubik_core::{
    CubeModel, CubeSpinner, FacePivot, FaceRotationEngine, PivotSelector, Scrambler, TransformNode,
};
use rubik_core::constants::scramble_constants::SEED;

use crate::utils::config::RubikConfig;
use crate::utils::constants::debug_constants::ARM_LINKS;

/// Random number generator
#[derive(Resource)]
pub struct RandomGen {
    pub random_gen: ChaCha8Rng,
}

impl RandomGen {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            random_gen: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomGen {
    fn default() -> Self {
        Self::from_seed(SEED)
    }
}

/// Everything that moves the cube. Entities only mirror `model`.
#[derive(Resource)]
pub struct RubikState {
    pub model: CubeModel,
    pub engine: FaceRotationEngine,
    pub spinner: CubeSpinner,
    pub selector: PivotSelector,
    pub scrambler: Option<Scrambler>,
}

impl RubikState {
    pub fn from_config(config: &RubikConfig) -> Self {
        Self {
            model: CubeModel::standard(config.cubie_spacing),
            engine: FaceRotationEngine::with_curve(
                config.rotation_curve(),
                config.engine_settings(),
            ),
            spinner: CubeSpinner::new(config.cube_spin_secs),
            selector: PivotSelector::new(config.grab_radius),
            scrambler: None,
        }
    }

    /// True while an animation or a scramble owns the cube.
    pub fn is_busy(&self) -> bool {
        self.engine.is_rotating() || self.spinner.is_spinning() || self.scrambler.is_some()
    }
}

/// The face grabbed with the mouse and the last plane hit, relative to the
/// face centre, in world space.
#[derive(Resource, Default)]
pub struct DragState {
    pub pivot: Option<FacePivot>,
    pub previous: Option<Vec3>,
}

/// Joint chain shown by the debug overlay, root first.
#[derive(Resource)]
pub struct ArmChain {
    pub nodes: Vec<TransformNode>,
}

impl Default for ArmChain {
    fn default() -> Self {
        Self {
            nodes: ARM_LINKS
                .iter()
                .map(|&(position, euler)| TransformNode::new(position, euler))
                .collect(),
        }
    }
}

/// Parent of all cubie entities, follows the cube pose.
#[derive(Component)]
pub struct CubeRoot;

/// A cubie entity and its slot in the model.
#[derive(Component)]
pub struct CubieMarker {
    pub index: usize,
}

/// A colored sticker on a cubie.
#[derive(Component)]
pub struct StickerMarker;
