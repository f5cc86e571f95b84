//! Level file errors

use crate::TileKind;
use std::path::PathBuf;

#[derive(Debug)]
pub enum LevelError {
    /// The level file was still missing after creating a default one
    Missing(PathBuf),
    IoError(String),
    /// The file exists but is not a valid level document
    ParseError(String),
    SerializeError(String),
    /// A persisted type code has no tile kind
    UnknownTypeCode(i64),
    /// A tile kind has no persisted type code
    UnknownSemanticType(TileKind),
    NoPath,
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::Missing(path) => write!(f, "Level file not found: {}", path.display()),
            LevelError::IoError(e) => write!(f, "IO error: {}", e),
            LevelError::ParseError(e) => write!(f, "Parse error: {}", e),
            LevelError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            LevelError::UnknownTypeCode(code) => write!(f, "Unknown tile type code: {}", code),
            LevelError::UnknownSemanticType(kind) => {
                write!(f, "Tile type '{}' has no type code", kind)
            }
            LevelError::NoPath => write!(f, "No level path set"),
        }
    }
}

impl std::error::Error for LevelError {}
