pub mod arena;
pub mod collision;
pub mod config;
pub mod error;
pub mod grid;
pub mod mapgen;
pub mod pathfinding;
pub mod raycast;
pub mod types;
pub mod validate;

pub use arena::Arena;
pub use collision::{CollisionResult, PushbackResult};
pub use config::{ArenaConfig, GenerationAlgorithm, MIN_ARENA_DIMENSION, MIN_CONNECTIVITY};
pub use error::ArenaError;
pub use grid::TileGrid;
pub use mapgen::{
    ArenaRng, Decoration, GeneratedArena, MapGenerator, ZoneSets, generate_arena, mix_seed_stream,
};
pub use raycast::RayHit;
pub use types::*;
pub use validate::{ConnectivityReport, ValidationOutcome};
