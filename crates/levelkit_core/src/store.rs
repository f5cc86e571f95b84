//! Sparse storage for grid-aligned tiles

use crate::{GridCoord, Tile};
use std::collections::HashMap;

/// Tiles placed on the grid, keyed by cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileStore {
    tiles: HashMap<GridCoord, Tile>,
}

impl TileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the tile at `coord`
    ///
    /// Returns `false` if the identical tile was already there.
    pub fn place(&mut self, coord: GridCoord, tile: Tile) -> bool {
        if self.tiles.get(&coord) == Some(&tile) {
            return false;
        }
        self.tiles.insert(coord, tile);
        true
    }

    /// Remove the tile at `coord`, if any
    pub fn remove(&mut self, coord: GridCoord) -> Option<Tile> {
        self.tiles.remove(&coord)
    }

    pub fn get(&self, coord: GridCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    pub fn get_mut(&mut self, coord: GridCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(&coord)
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        self.tiles.contains_key(&coord)
    }

    /// All placed tiles, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &Tile)> + '_ {
        self.tiles.iter().map(|(coord, tile)| (*coord, tile))
    }

    /// All placed tiles ordered by cell, top row first
    pub fn sorted(&self) -> Vec<(GridCoord, Tile)> {
        let mut tiles: Vec<_> = self.tiles.iter().map(|(c, t)| (*c, *t)).collect();
        tiles.sort_by_key(|(coord, _)| *coord);
        tiles
    }

    /// Tiles inside the inclusive cell rectangle `min..=max`
    pub fn tiles_in_region(&self, min: GridCoord, max: GridCoord) -> Vec<(GridCoord, Tile)> {
        let mut tiles: Vec<_> = self
            .tiles
            .iter()
            .filter(|(c, _)| c.x >= min.x && c.x <= max.x && c.y >= min.y && c.y <= max.y)
            .map(|(c, t)| (*c, *t))
            .collect();
        tiles.sort_by_key(|(coord, _)| *coord);
        tiles
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
