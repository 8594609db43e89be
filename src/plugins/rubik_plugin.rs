use bevy::prelude::*;

use crate::utils::config::RubikConfig;
use crate::utils::debug_functions::DebugFunctionsPlugin;
use crate::utils::inputs::InputsPlugin;
use crate::utils::objects::{DragState, RandomGen, RubikState};
use crate::utils::setup::SetupPlugin;
use crate::utils::systems_logic::SystemsLogicPlugin;

/// Loads the config and wires every cube system into the app.
/// Add after `DefaultPlugins` so config problems reach the log.
pub struct RubikPlugin;

impl Plugin for RubikPlugin {
    fn build(&self, app: &mut App) {
        let config = RubikConfig::load_or_default();

        app.insert_resource(RubikState::from_config(&config))
            .insert_resource(RandomGen::from_seed(config.seed))
            .insert_resource(config)
            .init_resource::<DragState>()
            .add_plugins((InputsPlugin, SetupPlugin, SystemsLogicPlugin, DebugFunctionsPlugin));
    }
}
