//! Tile grid storage, coordinate conversion, and per-tile queries.

use std::hash::Hasher;

use serde::Serialize;
use xxhash_rust::xxh3::Xxh3;

use crate::error::ArenaError;
use crate::types::{TileKind, TilePos, WorldPos};

/// Row-major tile storage with a fixed shape and a pixel scale.
///
/// Everything outside the grid reads as [`TileKind::Wall`], so callers never
/// need a separate bounds check before asking about walkability.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tile_size: f32,
    cells: Vec<TileKind>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize, tile_size: f32) -> Result<Self, ArenaError> {
        Self::filled(width, height, tile_size, TileKind::Empty)
    }

    pub fn filled(
        width: usize,
        height: usize,
        tile_size: f32,
        kind: TileKind,
    ) -> Result<Self, ArenaError> {
        if width == 0 || height == 0 {
            return Err(ArenaError::InvalidDimensions { width, height, min: 1 });
        }
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(ArenaError::InvalidTileSize(tile_size));
        }
        Ok(Self { width, height, tile_size, cells: vec![kind; width * height] })
    }

    /// Solid wall ring with an all-floor interior.
    pub fn walled(width: usize, height: usize, tile_size: f32) -> Result<Self, ArenaError> {
        let mut grid = Self::filled(width, height, tile_size, TileKind::Floor)?;
        grid.stamp_border();
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn cells(&self) -> &[TileKind] {
        &self.cells
    }

    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.tile_size
    }

    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.tile_size
    }

    pub fn center(&self) -> TilePos {
        TilePos::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    pub fn is_border(&self, pos: TilePos) -> bool {
        self.in_bounds(pos)
            && (pos.x == 0
                || pos.y == 0
                || pos.x as usize == self.width - 1
                || pos.y as usize == self.height - 1)
    }

    pub fn get(&self, pos: TilePos) -> Option<TileKind> {
        self.in_bounds(pos).then(|| self.cells[self.index(pos)])
    }

    pub fn tile_at(&self, pos: TilePos) -> TileKind {
        self.get(pos).unwrap_or(TileKind::Wall)
    }

    pub fn set_tile(&mut self, pos: TilePos, kind: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.cells[idx] = kind;
    }

    pub fn fill(&mut self, kind: TileKind) {
        self.cells.fill(kind);
    }

    pub fn stamp_border(&mut self) {
        let (width, height) = (self.width as i32, self.height as i32);
        for x in 0..width {
            self.set_tile(TilePos::new(x, 0), TileKind::Wall);
            self.set_tile(TilePos::new(x, height - 1), TileKind::Wall);
        }
        for y in 0..height {
            self.set_tile(TilePos::new(0, y), TileKind::Wall);
            self.set_tile(TilePos::new(width - 1, y), TileKind::Wall);
        }
    }

    pub fn is_walkable(&self, pos: TilePos) -> bool {
        self.tile_at(pos).is_walkable()
    }

    /// Downgrades a destructible wall to floor. Returns whether the tile changed.
    pub fn remove_destructible_wall(&mut self, pos: TilePos) -> bool {
        if self.get(pos) != Some(TileKind::WallDestructible) {
            return false;
        }
        self.set_tile(pos, TileKind::Floor);
        true
    }

    pub fn world_to_tile(&self, world: WorldPos) -> TilePos {
        debug_assert!(world.is_finite(), "world coordinate must be finite: {world:?}");
        TilePos::new(
            (world.x / self.tile_size).floor() as i32,
            (world.y / self.tile_size).floor() as i32,
        )
    }

    /// Centre of the tile in pixel space.
    pub fn tile_to_world(&self, tile: TilePos) -> WorldPos {
        WorldPos::new(
            tile.x as f32 * self.tile_size + self.tile_size / 2.0,
            tile.y as f32 * self.tile_size + self.tile_size / 2.0,
        )
    }

    pub fn is_in_bush(&self, world: WorldPos) -> bool {
        self.get(self.world_to_tile(world)).is_some_and(TileKind::conceals)
    }

    pub fn positions(&self) -> impl Iterator<Item = TilePos> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| TilePos::new(x, y)))
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.cells.iter().filter(|&&cell| cell == kind).count()
    }

    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_walkable()).count()
    }

    /// Plain `Wall` tiles among the 8 surrounding tiles; out-of-bounds counts as wall.
    pub fn count_wall_neighbors(&self, pos: TilePos) -> usize {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.tile_at(pos.offset(dx, dy)) == TileKind::Wall {
                    count += 1;
                }
            }
        }
        count
    }

    /// True when none of the in-bounds 8 neighbours blocks movement.
    pub fn has_clear_surroundings(&self, pos: TilePos) -> bool {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.get(pos.offset(dx, dy)).is_some_and(TileKind::blocks_movement) {
                    return false;
                }
            }
        }
        true
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + 4 + self.cells.len());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend(self.tile_size.to_le_bytes());
        bytes.extend(self.cells.iter().map(|cell| cell.code()));
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write(&self.canonical_bytes());
        hasher.finish()
    }

    pub fn render_ascii(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width) {
            text.extend(row.iter().map(|cell| cell.glyph()));
            text.push('\n');
        }
        text
    }

    fn index(&self, pos: TilePos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions_and_bad_tile_size() {
        assert!(matches!(
            TileGrid::new(0, 5, 32.0),
            Err(ArenaError::InvalidDimensions { width: 0, height: 5, .. })
        ));
        assert!(matches!(TileGrid::new(5, 5, 0.0), Err(ArenaError::InvalidTileSize(_))));
        assert!(matches!(TileGrid::new(5, 5, f32::NAN), Err(ArenaError::InvalidTileSize(_))));
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let grid = TileGrid::filled(4, 4, 16.0, TileKind::Floor).unwrap();
        assert_eq!(grid.tile_at(TilePos::new(-1, 0)), TileKind::Wall);
        assert_eq!(grid.tile_at(TilePos::new(0, 4)), TileKind::Wall);
        assert!(!grid.is_walkable(TilePos::new(4, 0)));
        assert!(grid.is_walkable(TilePos::new(3, 3)));
    }

    #[test]
    fn walled_grid_has_solid_border_and_floor_interior() {
        let grid = TileGrid::walled(6, 5, 10.0).unwrap();
        for pos in grid.positions() {
            let expected = if grid.is_border(pos) { TileKind::Wall } else { TileKind::Floor };
            assert_eq!(grid.tile_at(pos), expected, "unexpected tile at {pos:?}");
        }
        assert_eq!(grid.walkable_count(), 4 * 3);
    }

    #[test]
    fn world_and_tile_coordinates_round_trip_through_tile_centres() {
        let grid = TileGrid::walled(10, 10, 64.0).unwrap();
        assert_eq!(grid.world_to_tile(WorldPos::new(0.0, 63.9)), TilePos::new(0, 0));
        assert_eq!(grid.world_to_tile(WorldPos::new(64.0, 128.0)), TilePos::new(1, 2));
        assert_eq!(grid.world_to_tile(WorldPos::new(-0.5, 10.0)), TilePos::new(-1, 0));

        let centre = grid.tile_to_world(TilePos::new(3, 4));
        assert_eq!(centre, WorldPos::new(224.0, 288.0));
        assert_eq!(grid.world_to_tile(centre), TilePos::new(3, 4));
    }

    #[test]
    fn destructible_wall_removal_only_touches_destructible_tiles() {
        let mut grid = TileGrid::walled(5, 5, 8.0).unwrap();
        let breakable = TilePos::new(2, 2);
        grid.set_tile(breakable, TileKind::WallDestructible);

        assert!(!grid.remove_destructible_wall(TilePos::new(0, 0)));
        assert_eq!(grid.tile_at(TilePos::new(0, 0)), TileKind::Wall);
        assert!(grid.remove_destructible_wall(breakable));
        assert_eq!(grid.tile_at(breakable), TileKind::Floor);
        assert!(!grid.remove_destructible_wall(breakable));
    }

    #[test]
    fn bush_membership_follows_world_position() {
        let mut grid = TileGrid::walled(5, 5, 10.0).unwrap();
        grid.set_tile(TilePos::new(2, 3), TileKind::Bush);
        assert!(grid.is_in_bush(WorldPos::new(25.0, 35.0)));
        assert!(!grid.is_in_bush(WorldPos::new(15.0, 35.0)));
        assert!(!grid.is_in_bush(WorldPos::new(-100.0, 35.0)));
    }

    #[test]
    fn wall_neighbors_count_out_of_bounds_as_walls() {
        let grid = TileGrid::filled(3, 3, 1.0, TileKind::Floor).unwrap();
        assert_eq!(grid.count_wall_neighbors(TilePos::new(1, 1)), 0);
        assert_eq!(grid.count_wall_neighbors(TilePos::new(0, 0)), 5);
    }

    #[test]
    fn clear_surroundings_ignores_out_of_bounds_but_not_destructible_walls() {
        let mut grid = TileGrid::filled(4, 4, 1.0, TileKind::Floor).unwrap();
        assert!(grid.has_clear_surroundings(TilePos::new(0, 0)));
        grid.set_tile(TilePos::new(2, 2), TileKind::WallDestructible);
        assert!(!grid.has_clear_surroundings(TilePos::new(1, 1)));
        assert!(grid.has_clear_surroundings(TilePos::new(0, 0)));
    }

    #[test]
    fn fingerprint_tracks_cell_changes() {
        let mut grid = TileGrid::walled(8, 8, 32.0).unwrap();
        let before = grid.fingerprint();
        assert_eq!(before, grid.clone().fingerprint());
        grid.set_tile(TilePos::new(3, 3), TileKind::Bush);
        assert_ne!(before, grid.fingerprint());
    }

    #[test]
    fn ascii_rendering_has_one_line_per_row() {
        let grid = TileGrid::walled(4, 3, 1.0).unwrap();
        assert_eq!(grid.render_ascii(), "####\n#..#\n####\n");
    }
}
