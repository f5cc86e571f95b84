//! Editor preferences
//!
//! Level geometry and the last opened level, persisted between runs.

mod file;

pub use file::*;

use bevy::prelude::Resource;
use levelkit_core::LevelConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct EditorPreferences {
    /// Geometry used for new sessions
    pub level: LevelConfig,
    /// Level opened when no path is given on the command line
    pub last_level: Option<PathBuf>,
    /// Number of sprites in the decor sheet
    pub decor_variants: u32,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            level: LevelConfig::default(),
            last_level: None,
            decor_variants: 8,
        }
    }
}
