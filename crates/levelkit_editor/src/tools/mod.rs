//! Editor tools - painting, erasing, scrolling
//!
//! Handles viewport input. Cursor positions are passed to the session as
//! device points; the session applies render scale and scroll itself.

use bevy::ecs::message::MessageReader;
use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use levelkit_core::{DevicePoint, EditorSession, PlacementMode};

use crate::{EditorCatalog, EditorState};

/// Scroll speed in world pixels per second (5 px per frame at 60 fps)
pub const SCROLL_SPEED: f32 = 300.0;

/// Plugin for viewport input
pub struct EditorToolsPlugin;

impl Plugin for EditorToolsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (handle_scroll_input, handle_viewport_input, handle_variant_wheel),
        );
    }
}

/// Move the view with WASD / arrow keys
pub fn handle_scroll_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut session: ResMut<EditorSession>,
) {
    // Ctrl+S and friends share keys with scrolling
    if keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight) {
        return;
    }

    let held = |a: KeyCode, b: KeyCode| (keyboard.pressed(a) || keyboard.pressed(b)) as i32 as f32;
    let x = held(KeyCode::KeyD, KeyCode::ArrowRight) - held(KeyCode::KeyA, KeyCode::ArrowLeft);
    let y = held(KeyCode::KeyS, KeyCode::ArrowDown) - held(KeyCode::KeyW, KeyCode::ArrowUp);
    if x == 0.0 && y == 0.0 {
        return;
    }

    let step = SCROLL_SPEED * time.delta_secs();
    session.scroll_by(x * step, y * step);
}

/// Paint with the left button, erase with the right
pub fn handle_viewport_input(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut session: ResMut<EditorSession>,
    mut editor_state: ResMut<EditorState>,
    catalog: Res<EditorCatalog>,
) {
    if !mouse.pressed(MouseButton::Left) {
        editor_state.last_painted_cell = None;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let device = DevicePoint::new(cursor.x, cursor.y);

    if mouse.pressed(MouseButton::Left) {
        match session.mode {
            PlacementMode::Grid => {
                // Skip repeats while the cursor stays in one cell
                let cell = session.cursor_cell(device);
                if editor_state.last_painted_cell != Some(cell) {
                    session.paint(device);
                    editor_state.last_painted_cell = Some(cell);
                }
            }
            // Freeform tiles stack, so place one per click
            PlacementMode::Freeform => {
                if mouse.just_pressed(MouseButton::Left) {
                    session.paint(device);
                }
            }
        }
    } else if mouse.pressed(MouseButton::Right) {
        session.erase(device, &catalog.0);
    }
}

/// Mouse wheel cycles the brush variant
pub fn handle_variant_wheel(
    mut wheel: MessageReader<MouseWheel>,
    mut session: ResMut<EditorSession>,
    catalog: Res<EditorCatalog>,
) {
    let step: i32 = wheel
        .read()
        .map(|event| {
            if event.y > 0.0 {
                -1
            } else if event.y < 0.0 {
                1
            } else {
                0
            }
        })
        .sum();
    if step != 0 {
        session.cycle_variant(step, &catalog.0);
    }
}
