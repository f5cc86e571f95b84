//! Coordinate spaces and the conversions between them
//!
//! Input arrives in device space (the window at full display resolution).
//! The level is drawn to a smaller surface that is upscaled by
//! `render_scale`, so device points are divided by the scale and offset by
//! the scroll to reach world-pixel space. World pixels snap to grid cells by
//! flooring against the tile size.

use std::cmp::Ordering;
use std::fmt;

/// A cell of the unbounded tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbor to the left, `None` past the edge of the grid
    pub fn left(self) -> Option<Self> {
        Some(Self::new(self.x.checked_sub(1)?, self.y))
    }

    /// Neighbor above, `None` past the edge of the grid
    pub fn up(self) -> Option<Self> {
        Some(Self::new(self.x, self.y.checked_sub(1)?))
    }

    /// Neighbor to the right, `None` past the edge of the grid
    pub fn right(self) -> Option<Self> {
        Some(Self::new(self.x.checked_add(1)?, self.y))
    }

    /// Neighbor below, `None` past the edge of the grid
    pub fn down(self) -> Option<Self> {
        Some(Self::new(self.x, self.y.checked_add(1)?))
    }
}

// Row-major, so sorted output reads top to bottom
impl Ord for GridCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for GridCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.x, self.y)
    }
}

impl From<[i32; 2]> for GridCoord {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<GridCoord> for [i32; 2] {
    fn from(coord: GridCoord) -> Self {
        [coord.x, coord.y]
    }
}

/// An integer position in world-pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for PixelPos {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<PixelPos> for [i32; 2] {
    fn from(pos: PixelPos) -> Self {
        [pos.x, pos.y]
    }
}

/// A continuous position in world-pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A raw input position at full display resolution
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DevicePoint {
    pub x: f32,
    pub y: f32,
}

impl DevicePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Conversions between device, world and grid space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateTransform {
    /// Integer upscale between the render surface and the display
    pub render_scale: u32,
    /// Edge length of a grid cell in world pixels
    pub tile_size: u32,
}

impl CoordinateTransform {
    pub fn new(render_scale: u32, tile_size: u32) -> Self {
        Self {
            render_scale: render_scale.max(1),
            tile_size: tile_size.max(1),
        }
    }

    /// Map a device point into world space for the given scroll offset
    pub fn device_to_world(&self, device: DevicePoint, scroll: WorldPoint) -> WorldPoint {
        let scale = self.render_scale as f32;
        WorldPoint::new(device.x / scale + scroll.x, device.y / scale + scroll.y)
    }

    /// Grid cell containing a world point (grid-snap mode)
    pub fn world_to_cell(&self, world: WorldPoint) -> GridCoord {
        let size = self.tile_size as f32;
        GridCoord::new(
            (world.x / size).floor() as i32,
            (world.y / size).floor() as i32,
        )
    }

    /// World point floored to whole pixels (freeform mode)
    pub fn world_to_pixel(&self, world: WorldPoint) -> PixelPos {
        PixelPos::new(world.x.floor() as i32, world.y.floor() as i32)
    }

    /// Chunk containing a grid cell
    pub fn cell_to_chunk(cell: GridCoord, chunk_size: u32) -> GridCoord {
        let size = chunk_size.max(1) as i32;
        GridCoord::new(cell.x.div_euclid(size), cell.y.div_euclid(size))
    }
}

/// Placement limits of a level in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelBounds {
    pub width_cells: i32,
    pub height_cells: i32,
}

impl LevelBounds {
    pub fn new(width_cells: i32, height_cells: i32) -> Self {
        Self {
            width_cells,
            height_cells,
        }
    }

    /// Whether grid placement is allowed at `cell`
    pub fn contains(&self, cell: GridCoord) -> bool {
        0 <= cell.x && cell.x < self.width_cells && 0 <= cell.y && cell.y < self.height_cells
    }
}
