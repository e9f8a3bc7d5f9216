//! Query surface over a generated arena.
//! Gameplay systems hold an `Arena` and ask it about movement, sight, and routes.
//! It does not own entities or decide what to do with the answers.

use serde::Serialize;

use crate::collision::{self, CollisionResult, PushbackResult};
use crate::grid::TileGrid;
use crate::mapgen::ZoneSets;
use crate::pathfinding;
use crate::raycast::{self, RayHit};
use crate::types::{TileKind, TilePos, WorldPos};
use crate::validate::{self, ValidationOutcome};

mod spawn_points;

/// Tile grid plus the zone sets placed on it. The grid's shape never changes;
/// destructible-wall removal is the only content change after generation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Arena {
    grid: TileGrid,
    zones: ZoneSets,
}

impl Arena {
    pub fn new(grid: TileGrid, zones: ZoneSets) -> Self {
        Self { grid, zones }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn zones(&self) -> &ZoneSets {
        &self.zones
    }

    pub fn tile_at(&self, tile: TilePos) -> TileKind {
        self.grid.tile_at(tile)
    }

    pub fn is_walkable(&self, tile: TilePos) -> bool {
        self.grid.is_walkable(tile)
    }

    pub fn world_to_tile(&self, world: WorldPos) -> TilePos {
        self.grid.world_to_tile(world)
    }

    pub fn tile_to_world(&self, tile: TilePos) -> WorldPos {
        self.grid.tile_to_world(tile)
    }

    pub fn is_in_bush(&self, world: WorldPos) -> bool {
        self.grid.is_in_bush(world)
    }

    pub fn remove_destructible_wall(&mut self, tile: TilePos) -> bool {
        self.grid.remove_destructible_wall(tile)
    }

    pub fn check_collision(&self, center: WorldPos, radius: f32) -> CollisionResult {
        collision::check_collision(&self.grid, center, radius)
    }

    pub fn move_with_collision(&self, pos: WorldPos, dx: f32, dy: f32, radius: f32) -> WorldPos {
        collision::move_with_collision(&self.grid, pos, dx, dy, radius)
    }

    pub fn pushback_from_walls(&self, pos: WorldPos, radius: f32) -> PushbackResult {
        collision::pushback_from_walls(&self.grid, pos, radius)
    }

    pub fn raycast(&self, from: WorldPos, to: WorldPos) -> Option<RayHit> {
        raycast::raycast(&self.grid, from, to)
    }

    pub fn find_path(&self, start: TilePos, goal: TilePos) -> Vec<TilePos> {
        pathfinding::find_path(&self.grid, start, goal)
    }

    pub fn validate(&self, min_ratio: f64) -> ValidationOutcome {
        validate::validate(&self.grid, &self.zones, min_ratio)
    }
}
