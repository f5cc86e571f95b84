//! Core data structures for the levelkit editor
//!
//! This crate provides the tile-map data engine behind the editor:
//! - `TileStore` - Sparse grid of placed tiles keyed by `GridCoord`
//! - `OffGridStore` - Freeform decoration tiles with topmost-first hit testing
//! - `autotile` - Neighbor-driven variant selection from a fixed rule table
//! - `CoordinateTransform` - Device to world to grid conversions
//! - `level` - The JSON level file format (load creates missing files)
//! - `EditorSession` - The editing context that ties everything together

pub mod autotile;
mod catalog;
mod config;
mod coords;
mod error;
pub mod level;
mod off_grid;
mod session;
mod store;
mod tile;

pub use catalog::{AssetCatalog, ClipRect, SheetCatalog, AUTOTILE_SHEET_COLUMNS, DECOR_SIZE};
pub use config::LevelConfig;
pub use coords::{CoordinateTransform, DevicePoint, GridCoord, LevelBounds, PixelPos, WorldPoint};
pub use error::LevelError;
pub use level::{load_level, save_level, LevelDocument, PersistedTile, TypeCodes};
pub use off_grid::{OffGridStore, OffGridTile};
pub use session::{Brush, EditorSession, PlacementMode};
pub use store::TileStore;
pub use tile::{Tile, TileKind};
