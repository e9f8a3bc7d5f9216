//! Pixel-stepped DDA line traces for projectiles and sight lines.

use serde::Serialize;

use crate::grid::TileGrid;
use crate::types::{TilePos, WorldPos};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RayHit {
    /// Sample point that landed in the blocking tile.
    pub point: WorldPos,
    pub tile: TilePos,
}

/// Samples one point per pixel along the dominant axis, start included, and
/// returns the first sample whose tile blocks movement. A zero-length ray
/// never hits.
pub fn raycast(grid: &TileGrid, from: WorldPos, to: WorldPos) -> Option<RayHit> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let steps = dx.abs().max(dy.abs());
    if steps == 0.0 {
        return None;
    }

    let step_x = dx / steps;
    let step_y = dy / steps;
    let mut point = from;
    let mut sample = 0_u32;

    while sample as f32 <= steps {
        let tile = grid.world_to_tile(point);
        if !grid.is_walkable(tile) {
            return Some(RayHit { point, tile });
        }
        point.x += step_x;
        point.y += step_y;
        sample += 1;
    }
    None
}

/// True when nothing blocks the segment.
pub fn has_line_of_sight(grid: &TileGrid, from: WorldPos, to: WorldPos) -> bool {
    raycast(grid, from, to).is_none()
}
