//! Asset catalog seam
//!
//! The editor never loads images itself. It only needs to know how many
//! variants a kind has and how large each variant is, so that freeform
//! decoration can be hit-tested and brushes can cycle within range.

use crate::TileKind;

/// Columns in an autotile sheet (4x4 variants)
pub const AUTOTILE_SHEET_COLUMNS: u32 = 4;

/// Edge length of a decor sprite in pixels
pub const DECOR_SIZE: u32 = 32;

/// Variant count of an autotile sheet
const AUTOTILE_VARIANTS: u32 = AUTOTILE_SHEET_COLUMNS * AUTOTILE_SHEET_COLUMNS;

/// Source of per-kind variant metadata
pub trait AssetCatalog {
    /// Number of variants available for `kind`
    fn variant_count(&self, kind: TileKind) -> u32;

    /// Pixel width and height of a variant, `None` if it does not exist
    fn variant_size(&self, kind: TileKind, variant: u32) -> Option<(u32, u32)>;
}

/// Region of a sprite sheet holding one variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Catalog for the stock sprite sheets
///
/// Grass and sand are 4x4 sheets of `tile_size` squares, one per autotile
/// rule. Decor is a single row of 32x32 sprites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetCatalog {
    pub tile_size: u32,
    pub decor_variants: u32,
}

impl SheetCatalog {
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size,
            decor_variants: 8,
        }
    }

    pub fn with_decor_variants(mut self, count: u32) -> Self {
        self.decor_variants = count;
        self
    }

    /// Where a variant sits in its kind's sheet
    pub fn clip_rect(&self, kind: TileKind, variant: u32) -> Option<ClipRect> {
        if variant >= self.variant_count(kind) {
            return None;
        }
        let rect = match kind {
            TileKind::Grass | TileKind::Sand => ClipRect {
                x: variant % AUTOTILE_SHEET_COLUMNS * self.tile_size,
                y: variant / AUTOTILE_SHEET_COLUMNS * self.tile_size,
                width: self.tile_size,
                height: self.tile_size,
            },
            TileKind::Decor => ClipRect {
                x: variant * DECOR_SIZE,
                y: 0,
                width: DECOR_SIZE,
                height: DECOR_SIZE,
            },
        };
        Some(rect)
    }
}

impl AssetCatalog for SheetCatalog {
    fn variant_count(&self, kind: TileKind) -> u32 {
        match kind {
            TileKind::Grass | TileKind::Sand => AUTOTILE_VARIANTS,
            TileKind::Decor => self.decor_variants,
        }
    }

    fn variant_size(&self, kind: TileKind, variant: u32) -> Option<(u32, u32)> {
        self.clip_rect(kind, variant)
            .map(|rect| (rect.width, rect.height))
    }
}
