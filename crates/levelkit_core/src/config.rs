//! Level geometry settings

use crate::{CoordinateTransform, LevelBounds};
use serde::{Deserialize, Serialize};

/// Grid geometry and display scale for a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Edge length of a grid cell in world pixels
    pub tile_size: u32,
    /// Edge length of a chunk in grid cells
    pub chunk_size: u32,
    /// Level width in chunks
    pub width_chunks: u32,
    /// Level height in chunks
    pub height_chunks: u32,
    /// Integer upscale from the render surface to the window
    pub render_scale: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            tile_size: 8,
            chunk_size: 9,
            width_chunks: 20,
            height_chunks: 20,
            render_scale: 2,
        }
    }
}

impl LevelConfig {
    /// Placement bounds in grid cells
    pub fn bounds(&self) -> LevelBounds {
        LevelBounds::new(
            cells(self.width_chunks, self.chunk_size),
            cells(self.height_chunks, self.chunk_size),
        )
    }

    pub fn transform(&self) -> CoordinateTransform {
        CoordinateTransform::new(self.render_scale, self.tile_size)
    }

    /// Edge length of a chunk in world pixels
    pub fn chunk_pixels(&self) -> u32 {
        self.chunk_size.saturating_mul(self.tile_size)
    }
}

// Oversized levels clamp to the largest grid an i32 coordinate can address
fn cells(chunks: u32, chunk_size: u32) -> i32 {
    chunks
        .checked_mul(chunk_size)
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or(i32::MAX)
}
