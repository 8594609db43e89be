use bevy::prelude::*;

use rubik_robot::plugins::rubik_plugin::RubikPlugin;

/// Main application function
fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Rubik the Robot".into(),
                fit_canvas_to_parent: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RubikPlugin)
        .run();
}
