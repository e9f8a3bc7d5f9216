//! Cave-like layout from random noise smoothed by a cellular automaton.

use crate::config::CellularParams;
use crate::grid::TileGrid;
use crate::types::{TileKind, TilePos};

use super::seed::ArenaRng;

pub(super) fn carve_caves(grid: &mut TileGrid, params: &CellularParams, rng: &mut ArenaRng) {
    grid.fill(TileKind::Wall);

    let (width, height) = (grid.width() as i32, grid.height() as i32);
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let kind =
                if rng.chance(params.wall_density) { TileKind::Wall } else { TileKind::Floor };
            grid.set_tile(TilePos::new(x, y), kind);
        }
    }

    for _ in 0..params.smoothing_passes {
        smooth(grid);
    }

    grid.stamp_border();
}

/// One automaton step, read from a snapshot so updates do not cascade.
fn smooth(grid: &mut TileGrid) {
    let snapshot = grid.clone();
    let (width, height) = (grid.width() as i32, grid.height() as i32);
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let pos = TilePos::new(x, y);
            let walls = snapshot.count_wall_neighbors(pos);
            if walls > 4 {
                grid.set_tile(pos, TileKind::Wall);
            } else if walls < 4 {
                grid.set_tile(pos, TileKind::Floor);
            }
        }
    }
}
