//! Tile kinds and placed tiles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The semantic type of a tile, as named by the asset catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Grass,
    Sand,
    Decor,
}

impl TileKind {
    /// Catalog name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Grass => "grass",
            TileKind::Sand => "sand",
            TileKind::Decor => "decor",
        }
    }

    /// Whether this kind takes part in autotiling
    pub fn is_autotiled(&self) -> bool {
        matches!(self, TileKind::Grass | TileKind::Sand)
    }

    /// Returns all kinds in brush order
    pub fn all() -> &'static [TileKind] {
        &[TileKind::Grass, TileKind::Sand, TileKind::Decor]
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grass" => Ok(TileKind::Grass),
            "sand" => Ok(TileKind::Sand),
            "decor" => Ok(TileKind::Decor),
            other => Err(format!("unknown tile kind '{}'", other)),
        }
    }
}

/// A tile placed on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub kind: TileKind,
    /// Index into the kind's variant list
    pub variant: u32,
}

impl Tile {
    pub fn new(kind: TileKind, variant: u32) -> Self {
        Self { kind, variant }
    }
}
