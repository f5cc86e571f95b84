//! Level file format
//!
//! A level is stored as one JSON document:
//!
//! ```json
//! {
//!   "level": {
//!     "tiles":    [ { "pos": [0, 0], "type": 0, "variant": 5 } ],
//!     "off_grid": [ { "pos": [13, -4], "type": 2, "variant": 1 } ]
//!   }
//! }
//! ```
//!
//! `pos` is a grid cell for `tiles` and a world pixel for `off_grid`. Tile
//! kinds are written as small integer codes (see [`TypeCodes`]).

use crate::{GridCoord, LevelError, OffGridStore, OffGridTile, PixelPos, Tile, TileKind, TileStore};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Bidirectional mapping between tile kinds and their persisted codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCodes {
    entries: Vec<(u32, TileKind)>,
}

impl Default for TypeCodes {
    /// The fixed table every level file uses: grass 0, sand 1, decor 2
    fn default() -> Self {
        Self::new([(0, TileKind::Grass), (1, TileKind::Sand), (2, TileKind::Decor)])
    }
}

impl TypeCodes {
    pub fn new(entries: impl IntoIterator<Item = (u32, TileKind)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Kind for a persisted code; codes outside the table (negative ones
    /// included) are `UnknownTypeCode`
    pub fn kind_for(&self, code: i64) -> Result<TileKind, LevelError> {
        self.entries
            .iter()
            .find(|(c, _)| i64::from(*c) == code)
            .map(|(_, kind)| *kind)
            .ok_or(LevelError::UnknownTypeCode(code))
    }

    pub fn code_for(&self, kind: TileKind) -> Result<u32, LevelError> {
        self.entries
            .iter()
            .find(|(_, k)| *k == kind)
            .map(|(code, _)| *code)
            .ok_or(LevelError::UnknownSemanticType(kind))
    }
}

/// One tile as written to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTile {
    pub pos: [i32; 2],
    #[serde(rename = "type")]
    pub code: i64,
    pub variant: u32,
}

/// Contents of the `level` object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBody {
    #[serde(default)]
    pub tiles: Vec<PersistedTile>,
    #[serde(default)]
    pub off_grid: Vec<PersistedTile>,
}

/// The whole level file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDocument {
    pub level: LevelBody,
}

impl LevelDocument {
    /// Build a document from in-memory stores
    ///
    /// Grid tiles are written in row-major order so saves are stable;
    /// off-grid tiles keep their insertion order.
    pub fn from_stores(
        tiles: &TileStore,
        off_grid: &OffGridStore,
        codes: &TypeCodes,
    ) -> Result<Self, LevelError> {
        let tiles = tiles
            .sorted()
            .into_iter()
            .map(|(coord, tile)| {
                Ok(PersistedTile {
                    pos: coord.into(),
                    code: codes.code_for(tile.kind)?.into(),
                    variant: tile.variant,
                })
            })
            .collect::<Result<Vec<_>, LevelError>>()?;

        let off_grid = off_grid
            .iter()
            .map(|tile| {
                Ok(PersistedTile {
                    pos: tile.pos.into(),
                    code: codes.code_for(tile.kind)?.into(),
                    variant: tile.variant,
                })
            })
            .collect::<Result<Vec<_>, LevelError>>()?;

        Ok(Self {
            level: LevelBody { tiles, off_grid },
        })
    }

    /// Rebuild the stores described by this document
    pub fn to_stores(&self, codes: &TypeCodes) -> Result<(TileStore, OffGridStore), LevelError> {
        let mut tiles = TileStore::new();
        for persisted in &self.level.tiles {
            let kind = codes.kind_for(persisted.code)?;
            tiles.place(
                GridCoord::from(persisted.pos),
                Tile::new(kind, persisted.variant),
            );
        }

        let off_grid = self
            .level
            .off_grid
            .iter()
            .map(|persisted| {
                let kind = codes.kind_for(persisted.code)?;
                Ok(OffGridTile::new(
                    PixelPos::from(persisted.pos),
                    kind,
                    persisted.variant,
                ))
            })
            .collect::<Result<OffGridStore, LevelError>>()?;

        Ok((tiles, off_grid))
    }
}

/// Load a level, creating an empty one at `path` if it does not exist
pub fn load_level(
    path: &Path,
    codes: &TypeCodes,
) -> Result<(TileStore, OffGridStore), LevelError> {
    let document = load_document(path)?;
    let (tiles, off_grid) = document.to_stores(codes)?;
    info!(
        "Loaded level {:?}: {} tiles, {} off-grid",
        path,
        tiles.len(),
        off_grid.len()
    );
    Ok((tiles, off_grid))
}

/// Save a level, replacing `path` in one step
pub fn save_level(
    path: &Path,
    tiles: &TileStore,
    off_grid: &OffGridStore,
    codes: &TypeCodes,
) -> Result<(), LevelError> {
    let document = LevelDocument::from_stores(tiles, off_grid, codes)?;
    write_document(path, &document)?;
    info!(
        "Saved level {:?}: {} tiles, {} off-grid",
        path,
        document.level.tiles.len(),
        document.level.off_grid.len()
    );
    Ok(())
}

/// Read a level document; a missing file is replaced by an empty level once
pub fn load_document(path: &Path) -> Result<LevelDocument, LevelError> {
    if let Some(document) = read_document(path)? {
        return Ok(document);
    }

    warn!("Level file {:?} not found, creating an empty level", path);
    write_document(path, &LevelDocument::default())?;

    read_document(path)?.ok_or_else(|| LevelError::Missing(path.to_path_buf()))
}

/// `Ok(None)` when the file does not exist
fn read_document(path: &Path) -> Result<Option<LevelDocument>, LevelError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(LevelError::IoError(e.to_string())),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| LevelError::ParseError(e.to_string()))
}

/// Write through a sibling temp file and rename it over `path`
pub fn write_document(path: &Path, document: &LevelDocument) -> Result<(), LevelError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| LevelError::IoError(e.to_string()))?;
    }

    let tmp_path = temp_path_for(path);
    let result = write_temp(&tmp_path, document).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|e| LevelError::IoError(e.to_string()))
    });

    if result.is_err() {
        // Leftover temp file is harmless, the target was never touched
        let _ = fs::remove_file(&tmp_path);
    } else {
        debug!("Wrote level document to {:?}", path);
    }
    result
}

fn write_temp(tmp_path: &Path, document: &LevelDocument) -> Result<(), LevelError> {
    let file = File::create(tmp_path).map_err(|e| LevelError::IoError(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)
        .map_err(|e| LevelError::SerializeError(e.to_string()))?;
    writer
        .flush()
        .map_err(|e| LevelError::IoError(e.to_string()))?;
    let file = writer
        .into_inner()
        .map_err(|e| LevelError::IoError(e.to_string()))?;
    file.sync_all()
        .map_err(|e| LevelError::IoError(e.to_string()))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_creates_empty_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("0.json");

        let (tiles, off_grid) = load_level(&path, &TypeCodes::default()).unwrap();
        assert!(tiles.is_empty());
        assert!(off_grid.is_empty());

        let content = fs::read_to_string(&path).unwrap();
        let document: LevelDocument = serde_json::from_str(&content).unwrap();
        assert_eq!(document, LevelDocument::default());
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_missing_parent_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("levels").join("world").join("1.json");

        load_level(&path, &TypeCodes::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_malformed_file_is_not_repaired() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let result = load_level(&path, &TypeCodes::default());
        assert!(matches!(result, Err(LevelError::ParseError(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_missing_level_object_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "{}").unwrap();

        let result = load_level(&path, &TypeCodes::default());
        assert!(matches!(result, Err(LevelError::ParseError(_))));
    }

    #[test]
    fn test_missing_arrays_default_to_empty() {
        let document: LevelDocument =
            serde_json::from_str(r#"{"level": {"tiles": [{"pos": [1, 2], "type": 1, "variant": 3}]}}"#)
                .unwrap();
        assert_eq!(document.level.tiles.len(), 1);
        assert!(document.level.off_grid.is_empty());
    }

    #[test]
    fn test_unknown_type_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odd.json");
        fs::write(
            &path,
            r#"{"level": {"tiles": [], "off_grid": [{"pos": [0, 0], "type": 9, "variant": 0}]}}"#,
        )
        .unwrap();

        let result = load_level(&path, &TypeCodes::default());
        assert!(matches!(result, Err(LevelError::UnknownTypeCode(9))));
    }

    #[test]
    fn test_out_of_range_type_codes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("negative.json");
        fs::write(
            &path,
            r#"{"level": {"tiles": [{"pos": [0, 0], "type": -1, "variant": 0}], "off_grid": []}}"#,
        )
        .unwrap();
        let result = load_level(&path, &TypeCodes::default());
        assert!(matches!(result, Err(LevelError::UnknownTypeCode(-1))));

        let path = dir.path().join("huge.json");
        fs::write(
            &path,
            r#"{"level": {"tiles": [{"pos": [0, 0], "type": 4294967296, "variant": 0}]}}"#,
        )
        .unwrap();
        let result = load_level(&path, &TypeCodes::default());
        assert!(matches!(result, Err(LevelError::UnknownTypeCode(4294967296))));
    }

    #[test]
    fn test_unknown_semantic_type_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.json");
        fs::write(&path, "original").unwrap();

        let mut tiles = TileStore::new();
        tiles.place(GridCoord::new(0, 0), Tile::new(TileKind::Decor, 0));
        let codes = TypeCodes::new([(0, TileKind::Grass), (1, TileKind::Sand)]);

        let result = save_level(&path, &tiles, &OffGridStore::new(), &codes);
        assert!(matches!(
            result,
            Err(LevelError::UnknownSemanticType(TileKind::Decor))
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn test_document_shape() {
        let mut tiles = TileStore::new();
        tiles.place(GridCoord::new(2, 0), Tile::new(TileKind::Sand, 4));
        tiles.place(GridCoord::new(-1, 0), Tile::new(TileKind::Grass, 0));
        let mut off_grid = OffGridStore::new();
        off_grid.append(OffGridTile::new(PixelPos::new(13, -4), TileKind::Decor, 1));

        let document = LevelDocument::from_stores(&tiles, &off_grid, &TypeCodes::default()).unwrap();
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "level": {
                    "tiles": [
                        { "pos": [-1, 0], "type": 0, "variant": 0 },
                        { "pos": [2, 0], "type": 1, "variant": 4 }
                    ],
                    "off_grid": [
                        { "pos": [13, -4], "type": 2, "variant": 1 }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_type_codes() {
        let codes = TypeCodes::default();
        assert_eq!(codes.kind_for(0).unwrap(), TileKind::Grass);
        assert_eq!(codes.kind_for(1).unwrap(), TileKind::Sand);
        assert_eq!(codes.kind_for(2).unwrap(), TileKind::Decor);
        assert_eq!(codes.code_for(TileKind::Decor).unwrap(), 2);
        assert!(codes.kind_for(3).is_err());
    }
}
