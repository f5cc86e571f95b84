//! The editing session
//!
//! `EditorSession` owns everything one open level needs: both tile stores,
//! the scroll offset, the placement mode and the active brush. Input layers
//! hand it device coordinates and it does the rest.

use crate::level::{load_level, save_level, TypeCodes};
use crate::{
    autotile, AssetCatalog, CoordinateTransform, DevicePoint, GridCoord, LevelBounds,
    LevelConfig, LevelError, OffGridStore, OffGridTile, Tile, TileKind, TileStore, WorldPoint,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// How painting and erasing resolve the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementMode {
    /// Snap to grid cells and edit the `TileStore`
    #[default]
    Grid,
    /// Use raw world pixels and edit the `OffGridStore`
    Freeform,
}

impl PlacementMode {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            PlacementMode::Grid => "Grid",
            PlacementMode::Freeform => "Freeform",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            PlacementMode::Grid => PlacementMode::Freeform,
            PlacementMode::Freeform => PlacementMode::Grid,
        }
    }
}

/// The tile that painting places
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    pub kind: TileKind,
    pub variant: u32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            kind: TileKind::Grass,
            variant: 0,
        }
    }
}

/// One open level and its editing state
#[derive(Debug, Clone)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct EditorSession {
    pub config: LevelConfig,
    pub tiles: TileStore,
    pub off_grid: OffGridStore,
    /// World-pixel offset of the view's top-left corner
    pub scroll: WorldPoint,
    pub mode: PlacementMode,
    pub brush: Brush,
    pub codes: TypeCodes,
    pub level_path: Option<PathBuf>,
    /// Unsaved changes since the last load or save
    pub dirty: bool,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(LevelConfig::default())
    }
}

impl EditorSession {
    /// Create a session with an empty, unsaved level
    pub fn new(config: LevelConfig) -> Self {
        Self {
            config,
            tiles: TileStore::new(),
            off_grid: OffGridStore::new(),
            scroll: WorldPoint::default(),
            mode: PlacementMode::default(),
            brush: Brush::default(),
            codes: TypeCodes::default(),
            level_path: None,
            dirty: false,
        }
    }

    /// Create a session for the level at `path`, creating the file if needed
    pub fn open(config: LevelConfig, path: &Path) -> Result<Self, LevelError> {
        let mut session = Self::new(config);
        session.load(path)?;
        Ok(session)
    }

    pub fn transform(&self) -> CoordinateTransform {
        self.config.transform()
    }

    pub fn bounds(&self) -> LevelBounds {
        self.config.bounds()
    }

    /// World position under a device point at the current scroll
    pub fn cursor_world(&self, device: DevicePoint) -> WorldPoint {
        self.transform().device_to_world(device, self.scroll)
    }

    /// Grid cell under a device point at the current scroll
    pub fn cursor_cell(&self, device: DevicePoint) -> GridCoord {
        self.transform().world_to_cell(self.cursor_world(device))
    }

    /// Grid tile under a device point
    pub fn tile_at(&self, device: DevicePoint) -> Option<(GridCoord, &Tile)> {
        let cell = self.cursor_cell(device);
        self.tiles.get(cell).map(|tile| (cell, tile))
    }

    /// Place the brush at a device point
    ///
    /// Grid placement outside the level bounds is ignored. Returns whether
    /// anything changed.
    pub fn paint(&mut self, device: DevicePoint) -> bool {
        let world = self.cursor_world(device);
        let changed = match self.mode {
            PlacementMode::Grid => {
                let cell = self.transform().world_to_cell(world);
                if !self.bounds().contains(cell) {
                    return false;
                }
                self.tiles
                    .place(cell, Tile::new(self.brush.kind, self.brush.variant))
            }
            PlacementMode::Freeform => {
                let pos = self.transform().world_to_pixel(world);
                self.off_grid
                    .append(OffGridTile::new(pos, self.brush.kind, self.brush.variant));
                true
            }
        };
        self.dirty |= changed;
        changed
    }

    /// Erase at a device point
    ///
    /// Grid mode clears the cell (ignored outside the level bounds).
    /// Freeform mode removes the most recently placed tile under the cursor.
    pub fn erase(&mut self, device: DevicePoint, catalog: &impl AssetCatalog) -> bool {
        let world = self.cursor_world(device);
        let changed = match self.mode {
            PlacementMode::Grid => {
                let cell = self.transform().world_to_cell(world);
                if !self.bounds().contains(cell) {
                    return false;
                }
                self.tiles.remove(cell).is_some()
            }
            PlacementMode::Freeform => {
                let pos = self.transform().world_to_pixel(world);
                self.off_grid.remove_topmost_at(pos, catalog).is_some()
            }
        };
        self.dirty |= changed;
        changed
    }

    /// Run a full autotile pass over the grid tiles
    pub fn autotile(&mut self) -> usize {
        let changed = autotile::run(&mut self.tiles);
        self.dirty |= changed > 0;
        changed
    }

    pub fn scroll_by(&mut self, dx: f32, dy: f32) {
        self.scroll.x += dx;
        self.scroll.y += dy;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Step through tile kinds; the variant resets to 0
    pub fn cycle_kind(&mut self, step: i32) {
        let kinds = TileKind::all();
        let current = kinds
            .iter()
            .position(|kind| *kind == self.brush.kind)
            .unwrap_or(0) as i32;
        let next = (current + step).rem_euclid(kinds.len() as i32) as usize;
        self.brush = Brush {
            kind: kinds[next],
            variant: 0,
        };
    }

    /// Step through the brush kind's variants, wrapping at both ends
    pub fn cycle_variant(&mut self, step: i32, catalog: &impl AssetCatalog) {
        let count = catalog.variant_count(self.brush.kind) as i64;
        if count == 0 {
            self.brush.variant = 0;
            return;
        }
        let next = (self.brush.variant as i64 + step as i64).rem_euclid(count);
        self.brush.variant = next as u32;
    }

    /// Chunks overlapping a view of `view_size` world pixels at the current
    /// scroll, clipped to the level
    pub fn visible_chunks(&self, view_size: WorldPoint) -> Vec<GridCoord> {
        let chunk_pixels = self.config.chunk_pixels().max(1) as f32;
        let first_x = ((self.scroll.x / chunk_pixels).floor() as i32).max(0);
        let first_y = ((self.scroll.y / chunk_pixels).floor() as i32).max(0);
        let last_x = (((self.scroll.x + view_size.x) / chunk_pixels).floor() as i32)
            .min(i32::try_from(self.config.width_chunks).unwrap_or(i32::MAX) - 1);
        let last_y = (((self.scroll.y + view_size.y) / chunk_pixels).floor() as i32)
            .min(i32::try_from(self.config.height_chunks).unwrap_or(i32::MAX) - 1);

        let mut chunks = Vec::new();
        for y in first_y..=last_y {
            for x in first_x..=last_x {
                chunks.push(GridCoord::new(x, y));
            }
        }
        chunks
    }

    /// Replace the level with the one at `path`
    ///
    /// A missing file is created empty. On error the session is unchanged.
    pub fn load(&mut self, path: &Path) -> Result<(), LevelError> {
        let (tiles, off_grid) = load_level(path, &self.codes)?;
        self.tiles = tiles;
        self.off_grid = off_grid;
        self.level_path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Reload the current level from disk, discarding unsaved changes
    pub fn reload(&mut self) -> Result<(), LevelError> {
        let path = self.level_path.clone().ok_or(LevelError::NoPath)?;
        self.load(&path)
    }

    /// Save to the current level path
    pub fn save(&mut self) -> Result<(), LevelError> {
        let path = self.level_path.clone().ok_or(LevelError::NoPath)?;
        self.save_as(&path)
    }

    /// Save to `path` and make it the current level path
    pub fn save_as(&mut self, path: &Path) -> Result<(), LevelError> {
        save_level(path, &self.tiles, &self.off_grid, &self.codes)?;
        if self.level_path.as_deref() != Some(path) {
            info!("Level path is now {:?}", path);
        }
        self.level_path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PixelPos, SheetCatalog};

    fn session() -> EditorSession {
        EditorSession::new(LevelConfig {
            tile_size: 12,
            chunk_size: 9,
            width_chunks: 2,
            height_chunks: 2,
            render_scale: 2,
        })
    }

    #[test]
    fn test_paint_uses_scroll_and_scale() {
        let mut session = session();
        session.scroll = WorldPoint::new(100.0, 50.0);
        session.brush = Brush {
            kind: TileKind::Sand,
            variant: 2,
        };

        assert!(session.paint(DevicePoint::new(40.0, 20.0)));
        assert_eq!(
            session.tiles.get(GridCoord::new(10, 5)),
            Some(&Tile::new(TileKind::Sand, 2))
        );
        assert!(session.dirty);
    }

    #[test]
    fn test_paint_out_of_bounds_is_ignored() {
        let mut session = session();
        // 2 chunks * 9 cells = 18 cells wide; cell 18 starts at world x 216
        let device = DevicePoint::new(216.0 * 2.0, 0.0);
        assert_eq!(session.cursor_cell(device), GridCoord::new(18, 0));

        assert!(!session.paint(device));
        assert!(session.tiles.is_empty());
        assert!(!session.dirty);

        assert!(!session.paint(DevicePoint::new(-2.0, 0.0)));
        assert!(session.tiles.is_empty());
    }

    #[test]
    fn test_repaint_same_tile_is_not_a_change() {
        let mut session = session();
        assert!(session.paint(DevicePoint::new(0.0, 0.0)));
        session.dirty = false;
        assert!(!session.paint(DevicePoint::new(4.0, 4.0)));
        assert!(!session.dirty);
    }

    #[test]
    fn test_grid_erase() {
        let mut session = session();
        session.paint(DevicePoint::new(30.0, 30.0));
        assert!(session.tile_at(DevicePoint::new(30.0, 30.0)).is_some());

        assert!(session.erase(DevicePoint::new(30.0, 30.0), &SheetCatalog::new(12)));
        assert!(session.tiles.is_empty());
        assert!(!session.erase(DevicePoint::new(30.0, 30.0), &SheetCatalog::new(12)));
    }

    #[test]
    fn test_freeform_paint_and_erase() {
        let catalog = SheetCatalog::new(12);
        let mut session = session();
        session.mode = PlacementMode::Freeform;
        session.brush = Brush {
            kind: TileKind::Decor,
            variant: 0,
        };
        session.scroll = WorldPoint::new(-500.0, 0.0);

        // Freeform placement is not bounded by the level
        assert!(session.paint(DevicePoint::new(21.0, 9.0)));
        session.brush.variant = 1;
        assert!(session.paint(DevicePoint::new(21.0, 9.0)));
        assert_eq!(
            session.off_grid.get(0).map(|t| t.pos),
            Some(PixelPos::new(-490, 4))
        );
        assert!(session.tiles.is_empty());

        assert!(session.erase(DevicePoint::new(30.0, 30.0), &catalog));
        let remaining: Vec<_> = session.off_grid.iter().map(|t| t.variant).collect();
        assert_eq!(remaining, vec![0]);
    }

    #[test]
    fn test_cycle_kind_wraps_and_resets_variant() {
        let mut session = session();
        session.brush.variant = 5;
        session.cycle_kind(-1);
        assert_eq!(
            session.brush,
            Brush {
                kind: TileKind::Decor,
                variant: 0
            }
        );
        session.cycle_kind(1);
        assert_eq!(session.brush.kind, TileKind::Grass);
    }

    #[test]
    fn test_cycle_variant_wraps() {
        let catalog = SheetCatalog::new(12);
        let mut session = session();
        session.cycle_variant(-1, &catalog);
        assert_eq!(session.brush.variant, 15);
        session.cycle_variant(1, &catalog);
        assert_eq!(session.brush.variant, 0);
    }

    #[test]
    fn test_visible_chunks_clip_to_level() {
        let mut session = session();
        // chunk = 9 * 12 = 108 px
        session.scroll = WorldPoint::new(-50.0, 100.0);
        let chunks = session.visible_chunks(WorldPoint::new(200.0, 50.0));
        assert_eq!(
            chunks,
            vec![
                GridCoord::new(0, 0),
                GridCoord::new(1, 0),
                GridCoord::new(0, 1),
                GridCoord::new(1, 1),
            ]
        );

        session.scroll = WorldPoint::new(1000.0, 0.0);
        assert!(session.visible_chunks(WorldPoint::new(100.0, 100.0)).is_empty());
    }

    #[test]
    fn test_visible_chunks_with_oversized_level() {
        let mut session = EditorSession::new(LevelConfig {
            tile_size: 1,
            chunk_size: 1,
            width_chunks: u32::MAX,
            height_chunks: 1 << 31,
            render_scale: 1,
        });
        session.scroll = WorldPoint::new(10.0, 10.0);
        let chunks = session.visible_chunks(WorldPoint::new(1.0, 0.0));
        assert_eq!(chunks, vec![GridCoord::new(10, 10), GridCoord::new(11, 10)]);
        assert_eq!(session.bounds(), LevelBounds::new(i32::MAX, i32::MAX));
    }

    #[test]
    fn test_save_without_path() {
        let mut session = session();
        assert!(matches!(session.save(), Err(LevelError::NoPath)));
        assert!(matches!(session.reload(), Err(LevelError::NoPath)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.json");
        let mut session = session();
        session.paint(DevicePoint::new(0.0, 0.0));
        session.save_as(&path).unwrap();
        assert!(!session.dirty);

        session.paint(DevicePoint::new(30.0, 0.0));
        session.reload().unwrap();
        assert_eq!(session.tiles.len(), 1);
        assert_eq!(session.level_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_failed_load_keeps_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "42").unwrap();

        let mut session = session();
        session.paint(DevicePoint::new(0.0, 0.0));
        assert!(session.load(&path).is_err());
        assert_eq!(session.tiles.len(), 1);
        assert!(session.dirty);
        assert_eq!(session.level_path, None);
    }
}
