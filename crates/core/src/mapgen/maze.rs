//! Plaza-plus-corridors maze layout: a randomized depth-first spanning tree over
//! a coarse node lattice, radial spokes out of the plaza, and random openings
//! that add cycles.

use std::collections::BTreeSet;
use std::f64::consts::TAU;

use crate::config::MazeParams;
use crate::grid::TileGrid;
use crate::types::{TileKind, TilePos};

use super::carve::{carve_l_path, carve_square};
use super::seed::ArenaRng;

/// Carves the maze into `grid` and returns the objective markers it registers.
///
/// Needs at least one lattice node, i.e. both dimensions above
/// `2 * lattice_inset`; with fewer than two nodes per axis the result is the
/// plaza and its radial spokes only.
pub(super) fn carve_maze(
    grid: &mut TileGrid,
    params: &MazeParams,
    rng: &mut ArenaRng,
) -> Vec<TilePos> {
    grid.fill(TileKind::Wall);

    let center = grid.center();
    carve_plaza(grid, center, params.plaza_size);

    carve_lattice_corridors(grid, params, rng);
    carve_radial_corridors(grid, center, params);
    punch_openings(grid, params.opening_density, rng);

    grid.stamp_border();
    vec![center]
}

fn carve_plaza(grid: &mut TileGrid, center: TilePos, size: usize) {
    let half = (size / 2) as i32;
    for y in center.y - half..center.y - half + size as i32 {
        for x in center.x - half..center.x - half + size as i32 {
            grid.set_tile(TilePos::new(x, y), TileKind::Floor);
        }
    }
}

fn lattice_axis(extent: usize, inset: usize, step: usize) -> Vec<i32> {
    (inset..extent.saturating_sub(inset)).step_by(step).map(|v| v as i32).collect()
}

fn carve_lattice_corridors(grid: &mut TileGrid, params: &MazeParams, rng: &mut ArenaRng) {
    let nodes_x = lattice_axis(grid.width(), params.lattice_inset, params.lattice_step);
    let nodes_y = lattice_axis(grid.height(), params.lattice_inset, params.lattice_step);
    if nodes_x.is_empty() || nodes_y.is_empty() {
        log::debug!("arena too small for a corridor lattice; plaza only");
        return;
    }

    let inset = params.lattice_inset as i32;
    let max_x = grid.width() as i32 - inset;
    let max_y = grid.height() as i32 - inset;
    let step = params.lattice_step as i32;
    let on_lattice =
        |pos: TilePos| pos.x >= inset && pos.x < max_x && pos.y >= inset && pos.y < max_y;

    let start = TilePos::new(nodes_x[nodes_x.len() / 2], nodes_y[nodes_y.len() / 2]);
    let mut visited = BTreeSet::from([start]);
    let mut stack = vec![start];

    while let Some(&node) = stack.last() {
        carve_square(grid, node, params.corridor_width);

        let mut directions = [(0, -step), (step, 0), (0, step), (-step, 0)];
        rng.shuffle(&mut directions);

        let next = directions
            .into_iter()
            .map(|(dx, dy)| node.offset(dx, dy))
            .find(|&candidate| on_lattice(candidate) && !visited.contains(&candidate));

        match next {
            Some(next) => {
                carve_l_path(grid, node, next, params.corridor_width);
                visited.insert(next);
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }
}

fn carve_radial_corridors(grid: &mut TileGrid, center: TilePos, params: &MazeParams) {
    if params.radial_paths == 0 {
        return;
    }
    let reach_x = grid.width() as f64 * params.radial_reach;
    let reach_y = grid.height() as f64 * params.radial_reach;
    for spoke in 0..params.radial_paths {
        let angle = TAU / params.radial_paths as f64 * spoke as f64;
        let end = TilePos::new(
            center.x + (angle.cos() * reach_x).floor() as i32,
            center.y + (angle.sin() * reach_y).floor() as i32,
        );
        carve_l_path(grid, center, end, params.corridor_width);
    }
}

/// Opens sampled wall tiles that already touch at least two floor tiles, so
/// no isolated floor pockets appear.
fn punch_openings(grid: &mut TileGrid, density: f64, rng: &mut ArenaRng) {
    let samples = (grid.width() as f64 * grid.height() as f64 * density).floor() as usize;
    let span_x = grid.width().saturating_sub(4);
    let span_y = grid.height().saturating_sub(4);

    for _ in 0..samples {
        let (Some(x), Some(y)) = (rng.coordinate(2, span_x), rng.coordinate(2, span_y)) else {
            return;
        };
        let pos = TilePos::new(x, y);
        if grid.tile_at(pos) != TileKind::Wall {
            continue;
        }
        let floor_neighbors =
            pos.neighbors().into_iter().filter(|&n| grid.tile_at(n) == TileKind::Floor).count();
        if floor_neighbors >= 2 {
            grid.set_tile(pos, TileKind::Floor);
        }
    }
}
