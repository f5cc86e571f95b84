//! Neighbor-driven autotiling
//!
//! Each autotiled tile looks at its four cardinal neighbors in the order
//! left, up, right, down. A neighbor counts when it exists and is itself
//! autotiled. Reading the four answers as a binary number (left is the most
//! significant bit) gives a mask in `0..16`, which indexes [`RULES`].
//!
//! Rule ids are 1-based positions in the 4x4 autotile sheet; the stored
//! variant is `rule id - 1`.

use crate::{GridCoord, TileStore};
use tracing::debug;

/// Mask bit for a left neighbor
pub const LEFT: u8 = 0b1000;
/// Mask bit for a neighbor above
pub const UP: u8 = 0b0100;
/// Mask bit for a right neighbor
pub const RIGHT: u8 = 0b0010;
/// Mask bit for a neighbor below
pub const DOWN: u8 = 0b0001;

/// Rule id for every neighbor mask
///
/// Sheet layout, row by row:
/// - isolated, horizontal run start / middle / end
/// - vertical run start, top-left / top / top-right corner pieces
/// - vertical run middle, left edge / center / right edge
/// - vertical run end, bottom-left / bottom / bottom-right corner pieces
pub const RULES: [u8; 16] = [
    1,  // 0000 isolated
    5,  // 0001 down
    2,  // 0010 right
    6,  // 0011 right, down
    13, // 0100 up
    9,  // 0101 up, down
    14, // 0110 up, right
    10, // 0111 up, right, down
    4,  // 1000 left
    8,  // 1001 left, down
    3,  // 1010 left, right
    7,  // 1011 left, right, down
    16, // 1100 left, up
    12, // 1101 left, up, down
    15, // 1110 left, up, right
    11, // 1111 surrounded
];

/// Rule id (`1..=16`) for a neighbor mask
pub fn rule_id(mask: u8) -> u8 {
    RULES[(mask & 0b1111) as usize]
}

/// Rule id for a bitstring such as `"1010"` (left, up, right, down)
pub fn rule_id_for_bits(bits: &str) -> Option<u8> {
    if bits.len() != 4 || !bits.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    u8::from_str_radix(bits, 2).ok().map(rule_id)
}

/// Bitstring form of a mask, left neighbor first
pub fn mask_bits(mask: u8) -> String {
    format!("{:04b}", mask & 0b1111)
}

/// Neighbor mask for the cell at `coord`
pub fn neighbor_mask(store: &TileStore, coord: GridCoord) -> u8 {
    // Cells past the edge of the grid count as empty
    let autotiled = |c: Option<GridCoord>| {
        c.and_then(|c| store.get(c))
            .is_some_and(|t| t.kind.is_autotiled())
    };

    let mut mask = 0;
    if autotiled(coord.left()) {
        mask |= LEFT;
    }
    if autotiled(coord.up()) {
        mask |= UP;
    }
    if autotiled(coord.right()) {
        mask |= RIGHT;
    }
    if autotiled(coord.down()) {
        mask |= DOWN;
    }
    mask
}

/// Recompute the variant of every autotiled tile in `store`
///
/// Masks only depend on tile kinds, which this pass never changes, so the
/// result does not depend on iteration order and a second run is a no-op.
/// Returns how many tiles changed variant.
pub fn run(store: &mut TileStore) -> usize {
    let updates: Vec<(GridCoord, u32)> = store
        .iter()
        .filter(|(_, tile)| tile.kind.is_autotiled())
        .map(|(coord, _)| {
            let variant = u32::from(rule_id(neighbor_mask(store, coord))) - 1;
            (coord, variant)
        })
        .collect();

    let mut changed = 0;
    for (coord, variant) in updates {
        if let Some(tile) = store.get_mut(coord) {
            if tile.variant != variant {
                tile.variant = variant;
                changed += 1;
            }
        }
    }

    debug!("Autotile pass updated {} of {} tiles", changed, store.len());
    changed
}
