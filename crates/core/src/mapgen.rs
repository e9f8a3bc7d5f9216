//! Procedural arena generation split into layout carving and zone placement.

pub mod model;

mod carve;
mod cellular;
mod generator;
mod maze;
mod rooms;
mod seed;
mod spawns;

pub use generator::{GeneratedArena, MapGenerator};
pub use model::{Decoration, ZoneSets};
pub use seed::{ArenaRng, mix_seed_stream};

use crate::config::ArenaConfig;
use crate::error::ArenaError;

/// Single-attempt generation with a throwaway generator.
pub fn generate_arena(seed: u64, config: &ArenaConfig) -> Result<GeneratedArena, ArenaError> {
    Ok(MapGenerator::new(config.clone())?.generate(seed))
}
