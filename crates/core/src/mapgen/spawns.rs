//! Spawn, cover, and decoration placement over a carved grid.

use std::collections::{BTreeSet, VecDeque};

use crate::config::ZoneParams;
use crate::grid::TileGrid;
use crate::types::{DecorationKind, TileKind, TilePos};

use super::model::{Decoration, ZoneSets};
use super::seed::ArenaRng;

pub(super) fn allocate_zones(
    grid: &mut TileGrid,
    params: &ZoneParams,
    rng: &mut ArenaRng,
    zones: &mut ZoneSets,
) {
    place_player_spawn(grid, params, zones);
    place_enemy_spawns(grid, params, zones);
    place_powerup_spawns(grid, params, rng, zones);
    place_bushes(grid, params, rng, zones);
    place_decorations(grid, params, rng, zones);
}

/// Breadth-first search from `origin` for the nearest `Floor` tile whose eight
/// neighbours hold no wall, giving up beyond `max_radius` steps.
fn nearest_open_floor(
    grid: &TileGrid,
    origin: TilePos,
    max_radius: u32,
) -> Option<TilePos> {
    if !grid.in_bounds(origin) {
        return None;
    }
    let mut open = VecDeque::from([(origin, 0_u32)]);
    let mut seen = BTreeSet::from([origin]);

    while let Some((pos, distance)) = open.pop_front() {
        if grid.tile_at(pos) == TileKind::Floor && grid.has_clear_surroundings(pos) {
            return Some(pos);
        }
        if distance >= max_radius {
            continue;
        }
        for next in pos.neighbors() {
            if grid.in_bounds(next) && seen.insert(next) {
                open.push_back((next, distance + 1));
            }
        }
    }
    None
}

fn place_player_spawn(grid: &mut TileGrid, params: &ZoneParams, zones: &mut ZoneSets) {
    let Some(spawn) = nearest_open_floor(grid, grid.center(), params.player_search_radius) else {
        log::warn!("no open floor within {} tiles of the centre", params.player_search_radius);
        return;
    };

    let reach = params.player_clearance;
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let pos = spawn.offset(dx, dy);
            if !grid.is_border(pos) && grid.tile_at(pos).blocks_movement() {
                grid.set_tile(pos, TileKind::Floor);
            }
        }
    }

    grid.set_tile(spawn, TileKind::SpawnPlayer);
    zones.player_spawns.push(spawn);
}

/// Four corners and four edge midpoints, pulled in by `inset`.
fn enemy_anchors(grid: &TileGrid, inset: usize) -> [TilePos; 8] {
    let near = inset as i32;
    let far_x = grid.width() as i32 - 1 - near;
    let far_y = grid.height() as i32 - 1 - near;
    let mid_x = (grid.width() / 2) as i32;
    let mid_y = (grid.height() / 2) as i32;
    [
        TilePos::new(near, near),
        TilePos::new(far_x, near),
        TilePos::new(near, far_y),
        TilePos::new(far_x, far_y),
        TilePos::new(mid_x, near),
        TilePos::new(mid_x, far_y),
        TilePos::new(near, mid_y),
        TilePos::new(far_x, mid_y),
    ]
}

fn place_enemy_spawns(grid: &mut TileGrid, params: &ZoneParams, zones: &mut ZoneSets) {
    for anchor in enemy_anchors(grid, params.enemy_anchor_inset) {
        if let Some(spawn) = nearest_open_floor(grid, anchor, params.enemy_search_radius) {
            grid.set_tile(spawn, TileKind::SpawnEnemy);
            zones.enemy_spawns.push(spawn);
        }
    }
}

fn place_powerup_spawns(
    grid: &mut TileGrid,
    params: &ZoneParams,
    rng: &mut ArenaRng,
    zones: &mut ZoneSets,
) {
    let attempts = rng.range_inclusive(params.powerup_attempts.min, params.powerup_attempts.max);
    let span_x = grid.width().saturating_sub(2 * params.powerup_inset);
    let span_y = grid.height().saturating_sub(2 * params.powerup_inset);

    for _ in 0..attempts {
        let x = rng.coordinate(params.powerup_inset, span_x);
        let y = rng.coordinate(params.powerup_inset, span_y);
        let (Some(x), Some(y)) = (x, y) else {
            return;
        };
        let pos = TilePos::new(x, y);
        if grid.tile_at(pos) == TileKind::Floor
            && grid.count_wall_neighbors(pos) < params.powerup_max_wall_neighbors
        {
            grid.set_tile(pos, TileKind::SpawnPowerup);
            zones.powerup_spawns.push(pos);
        }
    }
}

fn place_bushes(
    grid: &mut TileGrid,
    params: &ZoneParams,
    rng: &mut ArenaRng,
    zones: &mut ZoneSets,
) {
    let clusters = rng.range_inclusive(params.bush_clusters.min, params.bush_clusters.max);
    let span_x = grid.width().saturating_sub(2 * params.bush_inset);
    let span_y = grid.height().saturating_sub(2 * params.bush_inset);

    for _ in 0..clusters {
        let x = rng.coordinate(params.bush_inset, span_x);
        let y = rng.coordinate(params.bush_inset, span_y);
        let (Some(x), Some(y)) = (x, y) else {
            return;
        };
        let anchor = TilePos::new(x, y);
        if grid.tile_at(anchor) != TileKind::Floor {
            continue;
        }

        let size = rng.range_inclusive(params.bush_cluster_size.min, params.bush_cluster_size.max)
            as i32;
        for dy in 0..size {
            for dx in 0..size {
                let pos = anchor.offset(dx, dy);
                if rng.chance(params.bush_fill_chance) && grid.get(pos) == Some(TileKind::Floor) {
                    grid.set_tile(pos, TileKind::Bush);
                    zones.bush_tiles.push(pos);
                }
            }
        }
    }
}

/// Marks `floor(floor_tiles * density)` distinct floor tiles, picked by shuffling
/// every floor tile in row-major order.
fn place_decorations(
    grid: &mut TileGrid,
    params: &ZoneParams,
    rng: &mut ArenaRng,
    zones: &mut ZoneSets,
) {
    let mut floor =
        grid.positions().filter(|&pos| grid.tile_at(pos) == TileKind::Floor).collect::<Vec<_>>();
    let count = (floor.len() as f64 * params.decoration_density).floor() as usize;
    rng.shuffle(&mut floor);

    for pos in floor.into_iter().take(count) {
        let kind = DecorationKind::ALL[rng.below(DecorationKind::ALL.len())];
        let size =
            params.decoration_size_min + rng.next_f64() as f32 * params.decoration_size_spread;
        grid.set_tile(pos, TileKind::Decoration);
        zones.decorations.push(Decoration { pos, kind, size });
    }
}
