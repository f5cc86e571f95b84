//! Freeform decoration placed at arbitrary pixel positions

use crate::{AssetCatalog, PixelPos, TileKind};

/// A tile placed off the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffGridTile {
    /// Top-left corner in world pixels
    pub pos: PixelPos,
    pub kind: TileKind,
    pub variant: u32,
}

impl OffGridTile {
    pub fn new(pos: PixelPos, kind: TileKind, variant: u32) -> Self {
        Self { pos, kind, variant }
    }

    /// Whether `point` falls inside this tile's rectangle (half-open)
    fn contains(&self, point: PixelPos, catalog: &impl AssetCatalog) -> bool {
        let Some((width, height)) = catalog.variant_size(self.kind, self.variant) else {
            return false;
        };
        let (x, y) = (self.pos.x as i64, self.pos.y as i64);
        let (px, py) = (point.x as i64, point.y as i64);
        px >= x && px < x + width as i64 && py >= y && py < y + height as i64
    }
}

/// Off-grid tiles in insertion order
///
/// Insertion order is also paint order, so later tiles are drawn on top and
/// are the first candidates for deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffGridStore {
    tiles: Vec<OffGridTile>,
}

impl OffGridStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, tile: OffGridTile) {
        self.tiles.push(tile);
    }

    /// Index of the most recently added tile covering `point`
    pub fn topmost_at(&self, point: PixelPos, catalog: &impl AssetCatalog) -> Option<usize> {
        self.tiles
            .iter()
            .rposition(|tile| tile.contains(point, catalog))
    }

    /// Remove the most recently added tile covering `point`
    pub fn remove_topmost_at(
        &mut self,
        point: PixelPos,
        catalog: &impl AssetCatalog,
    ) -> Option<OffGridTile> {
        self.topmost_at(point, catalog)
            .map(|index| self.tiles.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&OffGridTile> {
        self.tiles.get(index)
    }

    /// Tiles in insertion (paint) order
    pub fn iter(&self) -> impl Iterator<Item = &OffGridTile> + '_ {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}

impl FromIterator<OffGridTile> for OffGridStore {
    fn from_iter<I: IntoIterator<Item = OffGridTile>>(iter: I) -> Self {
        Self {
            tiles: iter.into_iter().collect(),
        }
    }
}
