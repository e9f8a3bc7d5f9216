//! Circle-versus-tile collision, axis-separated movement, and wall pushback.
//! Everything here is a pure query over a frozen grid; callers own entity state.

use serde::Serialize;

use crate::grid::TileGrid;
use crate::types::{TilePos, WorldPos};

/// Fraction of the way toward the free position covered by one pushback call.
const PUSHBACK_STRENGTH: f32 = 0.25;
/// Pushback search radius as a multiple of the entity radius.
const PUSHBACK_SEARCH_SCALE: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CollisionResult {
    Clear,
    Blocked(TilePos),
}

impl CollisionResult {
    pub fn collided(&self) -> bool {
        matches!(self, CollisionResult::Blocked(_))
    }

    pub fn tile(&self) -> Option<TilePos> {
        match self {
            CollisionResult::Blocked(tile) => Some(*tile),
            CollisionResult::Clear => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PushbackResult {
    pub pos: WorldPos,
    pub pushed: bool,
}

/// First blocking tile, in row-major order, that overlaps the circle. The
/// first hit is not necessarily the nearest one.
pub fn check_collision(grid: &TileGrid, center: WorldPos, radius: f32) -> CollisionResult {
    let min = grid.world_to_tile(WorldPos::new(center.x - radius, center.y - radius));
    let max = grid.world_to_tile(WorldPos::new(center.x + radius, center.y + radius));

    for y in min.y..=max.y {
        for x in min.x..=max.x {
            let tile = TilePos::new(x, y);
            if grid.is_walkable(tile) {
                continue;
            }
            if circle_overlaps_tile(grid, center, radius, tile) {
                return CollisionResult::Blocked(tile);
            }
        }
    }
    CollisionResult::Clear
}

/// Closest-point test; touching edges do not count as overlap.
fn circle_overlaps_tile(grid: &TileGrid, center: WorldPos, radius: f32, tile: TilePos) -> bool {
    let size = grid.tile_size();
    let left = tile.x as f32 * size;
    let top = tile.y as f32 * size;
    let closest_x = center.x.clamp(left, left + size);
    let closest_y = center.y.clamp(top, top + size);
    let dx = center.x - closest_x;
    let dy = center.y - closest_y;
    dx * dx + dy * dy < radius * radius
}

/// Resolves X then Y independently so a blocked axis is cancelled while the
/// other keeps moving, then clamps to the map inset by `radius`.
pub fn move_with_collision(
    grid: &TileGrid,
    pos: WorldPos,
    dx: f32,
    dy: f32,
    radius: f32,
) -> WorldPos {
    let mut next = WorldPos::new(pos.x + dx, pos.y);
    if check_collision(grid, next, radius).collided() {
        next.x = pos.x;
    }

    next.y = pos.y + dy;
    if check_collision(grid, next, radius).collided() {
        next.y = pos.y;
    }

    WorldPos::new(
        clamp_to_extent(next.x, radius, grid.pixel_width()),
        clamp_to_extent(next.y, radius, grid.pixel_height()),
    )
}

fn clamp_to_extent(value: f32, radius: f32, extent: f32) -> f32 {
    value.min(extent - radius).max(radius)
}

/// Nudges an overlapping entity a quarter of the way toward the nearest free
/// sample on a `tile_size / 4` lattice within `4 * radius`. A position that is
/// already clear, or has no free sample in reach, comes back unchanged.
pub fn pushback_from_walls(grid: &TileGrid, pos: WorldPos, radius: f32) -> PushbackResult {
    let unchanged = PushbackResult { pos, pushed: false };
    if !check_collision(grid, pos, radius).collided() {
        return unchanged;
    }

    let max_reach = radius * PUSHBACK_SEARCH_SCALE;
    let step = grid.tile_size() / 4.0;
    let samples = (2.0 * max_reach / step).floor() as i32;

    let mut best: Option<(f32, WorldPos)> = None;
    for row in 0..=samples {
        let dy = -max_reach + row as f32 * step;
        for col in 0..=samples {
            let dx = -max_reach + col as f32 * step;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > max_reach {
                continue;
            }
            let candidate = WorldPos::new(pos.x + dx, pos.y + dy);
            if check_collision(grid, candidate, radius).collided() {
                continue;
            }
            if best.is_none_or(|(best_dist, _)| dist < best_dist) {
                best = Some((dist, candidate));
            }
        }
    }

    let Some((_, target)) = best else {
        return unchanged;
    };
    PushbackResult {
        pos: WorldPos::new(
            pos.x + (target.x - pos.x) * PUSHBACK_STRENGTH,
            pos.y + (target.y - pos.y) * PUSHBACK_STRENGTH,
        ),
        pushed: true,
    }
}
