//! Carving primitives shared by the layout algorithms.

use crate::grid::TileGrid;
use crate::types::{TileKind, TilePos};

/// Opens a `width`×`width` square centred on `center`.
pub(super) fn carve_square(grid: &mut TileGrid, center: TilePos, width: usize) {
    let half = (width / 2) as i32;
    for dy in -half..=half {
        for dx in -half..=half {
            grid.set_tile(center.offset(dx, dy), TileKind::Floor);
        }
    }
}

/// L-shaped corridor: full-width horizontal run on `from.y`, then a
/// full-width vertical run on `to.x`.
pub(super) fn carve_l_path(grid: &mut TileGrid, from: TilePos, to: TilePos, width: usize) {
    let half = (width / 2) as i32;
    for x in from.x.min(to.x)..=from.x.max(to.x) {
        for dy in -half..=half {
            grid.set_tile(TilePos::new(x, from.y + dy), TileKind::Floor);
        }
    }
    for y in from.y.min(to.y)..=from.y.max(to.y) {
        for dx in -half..=half {
            grid.set_tile(TilePos::new(to.x + dx, y), TileKind::Floor);
        }
    }
}

pub(super) fn carve_rect(grid: &mut TileGrid, origin: TilePos, width: usize, height: usize) {
    for y in origin.y..origin.y + height as i32 {
        for x in origin.x..origin.x + width as i32 {
            grid.set_tile(TilePos::new(x, y), TileKind::Floor);
        }
    }
}
