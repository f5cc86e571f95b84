//! Reading and writing `preferences.json`

use super::EditorPreferences;
use directories::ProjectDirs;
use std::io;
use std::path::{Path, PathBuf};

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug)]
pub enum PreferencesError {
    /// The preferences file exists but could not be read
    Read(PathBuf, String),
    /// The preferences file could not be written
    Write(PathBuf, String),
    /// The preferences file is not valid preferences JSON
    Malformed(PathBuf, String),
    Encode(String),
    /// No per-user config directory on this platform
    NoConfigDir,
}

impl std::fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferencesError::Read(path, e) => write!(f, "cannot read {}: {}", path.display(), e),
            PreferencesError::Write(path, e) => {
                write!(f, "cannot write {}: {}", path.display(), e)
            }
            PreferencesError::Malformed(path, e) => {
                write!(f, "{} is not valid preferences: {}", path.display(), e)
            }
            PreferencesError::Encode(e) => write!(f, "cannot encode preferences: {}", e),
            PreferencesError::NoConfigDir => write!(f, "no user config directory available"),
        }
    }
}

impl std::error::Error for PreferencesError {}

impl EditorPreferences {
    /// Platform config directory, e.g. `~/.config/levelkit_editor` on Linux
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "levelkit", "levelkit_editor")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn preferences_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(PREFERENCES_FILE))
    }

    /// Preferences from the config directory, or defaults when unavailable
    ///
    /// A broken file is logged and left alone; the next save replaces it.
    pub fn load() -> Self {
        Self::preferences_path()
            .ok_or(PreferencesError::NoConfigDir)
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_else(|e| {
                bevy::log::warn!("Using default preferences ({})", e);
                Self::default()
            })
    }

    /// Load preferences from `path`; a missing file gives defaults
    pub fn load_from(path: &Path) -> Result<Self, PreferencesError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(PreferencesError::Read(path.to_path_buf(), e.to_string())),
        };

        serde_json::from_str(&content)
            .map_err(|e| PreferencesError::Malformed(path.to_path_buf(), e.to_string()))
    }

    /// Save preferences to the config directory
    pub fn save(&self) -> Result<(), PreferencesError> {
        let path = Self::preferences_path().ok_or(PreferencesError::NoConfigDir)?;
        self.save_to(&path)?;
        bevy::log::debug!("Preferences written to {}", path.display());
        Ok(())
    }

    /// Save preferences to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), PreferencesError> {
        let write_err = |e: io::Error| PreferencesError::Write(path.to_path_buf(), e.to_string());

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(write_err)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| PreferencesError::Encode(e.to_string()))?;
        std::fs::write(path, content).map_err(write_err)
    }
}
