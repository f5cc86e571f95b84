//! Standalone levelkit editor binary
//!
//! Run with: levelkit_editor [LEVEL_PATH]

use bevy::prelude::*;
use bevy::window::WindowResolution;
use levelkit_editor::LevelEditorPlugin;
use std::path::PathBuf;

fn main() {
    let level_path = std::env::args_os().nth(1).map(PathBuf::from);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "levelkit".to_string(),
                        // Device coordinates must match the window's pixels
                        // for render-scale conversion to line up
                        resolution: WindowResolution::new(2000, 1000)
                            .with_scale_factor_override(1.0),
                        ..default()
                    }),
                    ..default()
                })
                // Pixel art: nearest sampling when upscaling
                .set(ImagePlugin::default_nearest()),
        )
        .add_plugins(LevelEditorPlugin { level_path })
        .add_systems(Startup, spawn_camera)
        .run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
