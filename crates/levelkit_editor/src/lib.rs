//! levelkit_editor - Bevy front end for the levelkit tile engine
//!
//! The editor owns the window and input. All level data lives in an
//! [`EditorSession`] resource from `levelkit_core`; systems here translate
//! keys and mouse buttons into session calls. Drawing the level is left to
//! whatever renderer the host app adds.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use levelkit_editor::LevelEditorPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(LevelEditorPlugin::default())
//!         .run();
//! }
//! ```

pub mod commands;
pub mod preferences;
pub mod tools;

pub use levelkit_core;

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use levelkit_core::{EditorSession, GridCoord, LevelError, SheetCatalog};
use std::path::{Path, PathBuf};

use commands::handle_keyboard_shortcuts;
use preferences::EditorPreferences;
use tools::EditorToolsPlugin;

/// Level opened when neither the command line nor preferences name one
pub const DEFAULT_LEVEL_PATH: &str = "0.json";

/// Asset metadata used for hit-testing and variant cycling
#[derive(Resource, Debug, Clone, Copy)]
pub struct EditorCatalog(pub SheetCatalog);

/// Actions requested by shortcuts, run once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Save,
    SaveAs,
    Open,
    Reload,
    Autotile,
    Quit,
}

/// Transient input state
#[derive(Resource, Default)]
pub struct EditorState {
    pub pending_action: Option<PendingAction>,
    /// Last cell painted during the current grid stroke
    pub last_painted_cell: Option<GridCoord>,
}

/// Main editor plugin
#[derive(Default)]
pub struct LevelEditorPlugin {
    /// Level to open; falls back to the last level from preferences
    pub level_path: Option<PathBuf>,
}

impl Plugin for LevelEditorPlugin {
    fn build(&self, app: &mut App) {
        let preferences = EditorPreferences::load();
        let path = self
            .level_path
            .clone()
            .or_else(|| preferences.last_level.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LEVEL_PATH));

        let session = match EditorSession::open(preferences.level, &path) {
            Ok(session) => {
                info!(
                    "Opened level {:?} ({} tiles, {} off-grid)",
                    path,
                    session.tiles.len(),
                    session.off_grid.len()
                );
                session
            }
            Err(e) => {
                // No level path, so saving asks for a new file instead of
                // clobbering the unreadable one
                error!("Failed to open level {:?}: {}", path, e);
                EditorSession::new(preferences.level)
            }
        };

        let catalog = SheetCatalog::new(preferences.level.tile_size)
            .with_decor_variants(preferences.decor_variants);

        app.insert_resource(session)
            .insert_resource(EditorCatalog(catalog))
            .insert_resource(preferences)
            .init_resource::<EditorState>()
            .add_plugins(EditorToolsPlugin)
            .add_systems(
                Update,
                (
                    handle_keyboard_shortcuts,
                    process_pending_actions,
                    update_window_title,
                )
                    .chain(),
            );
    }
}

/// Run the action queued by shortcuts
pub fn process_pending_actions(
    mut editor_state: ResMut<EditorState>,
    mut session: ResMut<EditorSession>,
    mut preferences: ResMut<EditorPreferences>,
    mut exit: MessageWriter<AppExit>,
) {
    let Some(action) = editor_state.pending_action.take() else {
        return;
    };

    match action {
        PendingAction::Save => match session.save() {
            Ok(()) => remember_level(&mut preferences, session.level_path.as_deref()),
            Err(LevelError::NoPath) => save_as(&mut session, &mut preferences),
            Err(e) => error!("Failed to save level: {}", e),
        },
        PendingAction::SaveAs => save_as(&mut session, &mut preferences),
        PendingAction::Open => {
            let Some(path) = pick_level_file(false) else {
                return;
            };
            if session.dirty {
                warn!("Discarding unsaved changes");
            }
            match session.load(&path) {
                Ok(()) => remember_level(&mut preferences, Some(&path)),
                Err(e) => error!("Failed to open level {:?}: {}", path, e),
            }
        }
        PendingAction::Reload => {
            if let Err(e) = session.reload() {
                error!("Failed to reload level: {}", e);
            }
        }
        PendingAction::Autotile => {
            let changed = session.autotile();
            info!("Autotile updated {} tiles", changed);
        }
        PendingAction::Quit => {
            if session.dirty {
                warn!("Quitting with unsaved changes");
            }
            exit.write(AppExit::Success);
        }
    }
}

fn save_as(session: &mut EditorSession, preferences: &mut EditorPreferences) {
    let Some(path) = pick_level_file(true) else {
        return;
    };
    match session.save_as(&path) {
        Ok(()) => remember_level(preferences, Some(&path)),
        Err(e) => error!("Failed to save level to {:?}: {}", path, e),
    }
}

fn remember_level(preferences: &mut EditorPreferences, path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };
    if preferences.last_level.as_deref() == Some(path) {
        return;
    }
    preferences.last_level = Some(path.to_path_buf());
    if let Err(e) = preferences.save() {
        warn!("Could not save preferences: {}", e);
    }
}

/// Ask the user for a level file
#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
fn pick_level_file(save: bool) -> Option<PathBuf> {
    let dialog = rfd::FileDialog::new().add_filter("Level", &["json"]);
    if save {
        dialog.save_file()
    } else {
        dialog.pick_file()
    }
}

#[cfg(not(all(feature = "native", not(target_arch = "wasm32"))))]
fn pick_level_file(_save: bool) -> Option<PathBuf> {
    warn!("File dialogs are not available in this build");
    None
}

/// Show the level path, mode and brush in the window title
pub fn update_window_title(
    session: Res<EditorSession>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !session.is_changed() {
        return;
    }
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    let level = session
        .level_path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "untitled".to_string());
    let title = format!(
        "levelkit - {}{} | {} | {} #{}",
        level,
        if session.dirty { "*" } else { "" },
        session.mode.display_name(),
        session.brush.kind,
        session.brush.variant
    );
    if window.title != title {
        window.title = title;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelkit_core::{LevelConfig, Tile, TileKind};

    fn test_app(session: EditorSession) -> App {
        let mut app = App::new();
        app.insert_resource(session)
            .insert_resource(EditorPreferences::default())
            .init_resource::<EditorState>()
            .add_systems(Update, process_pending_actions);
        app
    }

    #[test]
    fn test_autotile_action() {
        let mut session = EditorSession::new(LevelConfig::default());
        session
            .tiles
            .place(GridCoord::new(0, 0), Tile::new(TileKind::Grass, 0));
        session
            .tiles
            .place(GridCoord::new(1, 0), Tile::new(TileKind::Grass, 0));

        let mut app = test_app(session);
        app.world_mut().resource_mut::<EditorState>().pending_action = Some(PendingAction::Autotile);
        app.update();

        let session = app.world().resource::<EditorSession>();
        assert_eq!(session.tiles.get(GridCoord::new(0, 0)).map(|t| t.variant), Some(1));
        assert_eq!(session.tiles.get(GridCoord::new(1, 0)).map(|t| t.variant), Some(3));
        assert!(session.dirty);
        assert!(app.world().resource::<EditorState>().pending_action.is_none());
    }

    #[test]
    fn test_reload_action_discards_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.json");
        let mut session = EditorSession::open(LevelConfig::default(), &path).unwrap();
        session
            .tiles
            .place(GridCoord::new(3, 3), Tile::new(TileKind::Sand, 0));
        session.dirty = true;

        let mut app = test_app(session);
        app.world_mut().resource_mut::<EditorState>().pending_action = Some(PendingAction::Reload);
        app.update();

        let session = app.world().resource::<EditorSession>();
        assert!(session.tiles.is_empty());
        assert!(!session.dirty);
    }
}
