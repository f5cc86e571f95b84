//! Keyboard shortcut handling

use bevy::prelude::*;
use levelkit_core::EditorSession;

use crate::{EditorCatalog, EditorState, PendingAction};

/// Handle keyboard shortcuts
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut editor_state: ResMut<EditorState>,
    mut session: ResMut<EditorSession>,
    catalog: Res<EditorCatalog>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    if ctrl {
        // Ctrl+Shift+S - Save As, Ctrl+S - Save
        if keyboard.just_pressed(KeyCode::KeyS) {
            editor_state.pending_action = Some(if shift {
                PendingAction::SaveAs
            } else {
                PendingAction::Save
            });
        }
        // Ctrl+O - Open
        if keyboard.just_pressed(KeyCode::KeyO) {
            editor_state.pending_action = Some(PendingAction::Open);
        }
        // Ctrl+R - Reload from disk
        if keyboard.just_pressed(KeyCode::KeyR) {
            editor_state.pending_action = Some(PendingAction::Reload);
        }
        return;
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        editor_state.pending_action = Some(PendingAction::Quit);
    }

    // T - autotile the whole level
    if keyboard.just_pressed(KeyCode::KeyT) {
        editor_state.pending_action = Some(PendingAction::Autotile);
    }

    // G - toggle grid / freeform placement
    if keyboard.just_pressed(KeyCode::KeyG) {
        session.toggle_mode();
        editor_state.last_painted_cell = None;
    }

    // Tab - next kind, Shift+Tab - previous kind
    if keyboard.just_pressed(KeyCode::Tab) {
        session.cycle_kind(if shift { -1 } else { 1 });
    }

    // Q / E - previous / next variant
    if keyboard.just_pressed(KeyCode::KeyQ) {
        session.cycle_variant(-1, &catalog.0);
    }
    if keyboard.just_pressed(KeyCode::KeyE) {
        session.cycle_variant(1, &catalog.0);
    }
}
