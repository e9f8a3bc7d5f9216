//! Tunable generation parameters, loadable from TOML.

use serde::{Deserialize, Serialize};

use crate::error::ArenaError;

/// Smallest arena the zone allocator can place anchors in.
pub const MIN_ARENA_DIMENSION: usize = 12;

/// Connectivity ratio below which a generated arena is rejected.
pub const MIN_CONNECTIVITY: f64 = 0.8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationAlgorithm {
    #[default]
    Maze,
    Rooms,
    Cellular,
}

/// Inclusive count range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    pub algorithm: GenerationAlgorithm,
    pub min_connectivity: f64,
    pub maze: MazeParams,
    pub rooms: RoomParams,
    pub cellular: CellularParams,
    pub zones: ZoneParams,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeParams {
    pub plaza_size: usize,
    pub lattice_step: usize,
    pub lattice_inset: usize,
    pub corridor_width: usize,
    pub radial_paths: usize,
    /// Radial corridor length as a fraction of the map extent.
    pub radial_reach: f64,
    pub opening_density: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomParams {
    pub room_count: usize,
    pub min_room_size: usize,
    pub max_room_size: usize,
    /// Rooms at least this wide and tall get an objective marker.
    pub objective_room_size: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellularParams {
    pub wall_density: f64,
    pub smoothing_passes: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneParams {
    pub player_search_radius: u32,
    pub player_clearance: i32,
    pub enemy_search_radius: u32,
    pub enemy_anchor_inset: usize,
    pub powerup_attempts: CountRange,
    pub powerup_inset: usize,
    /// Power-ups need fewer wall neighbours than this.
    pub powerup_max_wall_neighbors: usize,
    pub bush_clusters: CountRange,
    pub bush_cluster_size: CountRange,
    pub bush_inset: usize,
    pub bush_fill_chance: f64,
    pub decoration_density: f64,
    pub decoration_size_min: f32,
    pub decoration_size_spread: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 35,
            height: 35,
            tile_size: 64.0,
            algorithm: GenerationAlgorithm::Maze,
            min_connectivity: MIN_CONNECTIVITY,
            maze: MazeParams::default(),
            rooms: RoomParams::default(),
            cellular: CellularParams::default(),
            zones: ZoneParams::default(),
        }
    }
}

impl Default for MazeParams {
    fn default() -> Self {
        Self {
            plaza_size: 8,
            lattice_step: 6,
            lattice_inset: 3,
            corridor_width: 3,
            radial_paths: 4,
            radial_reach: 0.4,
            opening_density: 0.15,
        }
    }
}

impl Default for RoomParams {
    fn default() -> Self {
        Self { room_count: 6, min_room_size: 5, max_room_size: 10, objective_room_size: 7 }
    }
}

impl Default for CellularParams {
    fn default() -> Self {
        Self { wall_density: 0.3, smoothing_passes: 4 }
    }
}

impl Default for ZoneParams {
    fn default() -> Self {
        Self {
            player_search_radius: 10,
            player_clearance: 2,
            enemy_search_radius: 15,
            enemy_anchor_inset: 5,
            powerup_attempts: CountRange::new(5, 9),
            powerup_inset: 5,
            powerup_max_wall_neighbors: 4,
            bush_clusters: CountRange::new(8, 12),
            bush_cluster_size: CountRange::new(2, 4),
            bush_inset: 3,
            bush_fill_chance: 0.7,
            decoration_density: 0.05,
            decoration_size_min: 0.3,
            decoration_size_spread: 0.5,
        }
    }
}

impl ArenaConfig {
    pub fn with_dimensions(width: usize, height: usize, tile_size: f32) -> Self {
        Self { width, height, tile_size, ..Self::default() }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ArenaError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.width < MIN_ARENA_DIMENSION || self.height < MIN_ARENA_DIMENSION {
            return Err(ArenaError::InvalidDimensions {
                width: self.width,
                height: self.height,
                min: MIN_ARENA_DIMENSION,
            });
        }
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(ArenaError::InvalidTileSize(self.tile_size));
        }
        check_fraction("min_connectivity", self.min_connectivity)?;

        let maze = &self.maze;
        if maze.lattice_step == 0 {
            return Err(ArenaError::parameter("maze.lattice_step", "must be positive"));
        }
        if maze.corridor_width == 0 || maze.corridor_width % 2 == 0 {
            return Err(ArenaError::parameter(
                "maze.corridor_width",
                format!("must be odd and positive, got {}", maze.corridor_width),
            ));
        }
        if maze.plaza_size > self.width.min(self.height) - 2 {
            return Err(ArenaError::parameter(
                "maze.plaza_size",
                format!("{} does not fit inside the border", maze.plaza_size),
            ));
        }
        check_fraction("maze.radial_reach", maze.radial_reach)?;
        check_fraction("maze.opening_density", maze.opening_density)?;

        let rooms = &self.rooms;
        if rooms.min_room_size == 0 || rooms.min_room_size > rooms.max_room_size {
            return Err(ArenaError::parameter(
                "rooms.min_room_size",
                format!(
                    "must be positive and not exceed max_room_size ({} > {})",
                    rooms.min_room_size, rooms.max_room_size
                ),
            ));
        }
        check_fraction("cellular.wall_density", self.cellular.wall_density)?;

        let zones = &self.zones;
        check_range("zones.powerup_attempts", zones.powerup_attempts)?;
        check_range("zones.bush_clusters", zones.bush_clusters)?;
        check_range("zones.bush_cluster_size", zones.bush_cluster_size)?;
        check_fraction("zones.bush_fill_chance", zones.bush_fill_chance)?;
        check_fraction("zones.decoration_density", zones.decoration_density)?;
        if zones.player_clearance < 0 {
            return Err(ArenaError::parameter("zones.player_clearance", "must not be negative"));
        }
        Ok(())
    }
}

fn check_fraction(name: &'static str, value: f64) -> Result<(), ArenaError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ArenaError::parameter(name, format!("{value} is outside 0..=1")))
    }
}

fn check_range(name: &'static str, range: CountRange) -> Result<(), ArenaError> {
    if range.min <= range.max {
        Ok(())
    } else {
        Err(ArenaError::parameter(name, format!("min {} exceeds max {}", range.min, range.max)))
    }
}
