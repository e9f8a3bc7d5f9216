//! Generation orchestration: carve a layout, place zones, then validate.

use serde::Serialize;

use crate::arena::Arena;
use crate::config::{ArenaConfig, GenerationAlgorithm};
use crate::error::ArenaError;
use crate::grid::TileGrid;
use crate::types::TileKind;
use crate::validate::{ValidationOutcome, validate};

use super::cellular::carve_caves;
use super::maze::carve_maze;
use super::model::ZoneSets;
use super::rooms::carve_rooms;
use super::seed::{ArenaRng, mix_seed_stream};
use super::spawns::allocate_zones;

#[derive(Debug)]
pub struct MapGenerator {
    config: ArenaConfig,
    blank: TileGrid,
}

/// An arena together with the seed that produced it and its validation verdict.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeneratedArena {
    pub arena: Arena,
    pub seed: u64,
    pub attempts: u32,
    pub outcome: ValidationOutcome,
}

impl GeneratedArena {
    pub fn is_accepted(&self) -> bool {
        self.outcome.is_accepted()
    }
}

impl MapGenerator {
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let blank = TileGrid::new(config.width, config.height, config.tile_size)?;
        Ok(Self { config, blank })
    }

    /// One attempt. A rejected arena is still returned; whether to use it is
    /// the caller's call.
    pub fn generate(&self, seed: u64) -> GeneratedArena {
        let generated = self.attempt(seed, 1);
        if !generated.is_accepted() {
            log::warn!("arena from seed {seed} rejected: {:?}", generated.outcome);
        }
        generated
    }

    /// Regenerates with derived seeds until an attempt validates, returning
    /// the last attempt when none does. Attempt zero uses `seed` itself.
    pub fn generate_with_retries(&self, seed: u64, max_attempts: u32) -> GeneratedArena {
        let max_attempts = max_attempts.max(1);
        let mut attempt = 0_u32;
        loop {
            let attempt_seed =
                if attempt == 0 { seed } else { mix_seed_stream(seed, u64::from(attempt)) };
            let generated = self.attempt(attempt_seed, attempt + 1);
            if generated.is_accepted() {
                return generated;
            }
            attempt += 1;
            if attempt >= max_attempts {
                log::warn!(
                    "no acceptable arena after {max_attempts} attempts from seed {seed}: {:?}",
                    generated.outcome
                );
                return generated;
            }
            log::warn!(
                "attempt {attempt} (seed {attempt_seed}) rejected: {:?}; retrying",
                generated.outcome
            );
        }
    }

    fn attempt(&self, seed: u64, attempts: u32) -> GeneratedArena {
        let arena = self.build(seed);
        let outcome = validate(arena.grid(), arena.zones(), self.config.min_connectivity);
        GeneratedArena { arena, seed, attempts, outcome }
    }

    fn build(&self, seed: u64) -> Arena {
        let mut rng = ArenaRng::from_seed(seed);
        let mut grid = self.blank.clone();

        let objectives = match self.config.algorithm {
            GenerationAlgorithm::Maze => carve_maze(&mut grid, &self.config.maze, &mut rng),
            GenerationAlgorithm::Rooms => carve_rooms(&mut grid, &self.config.rooms, &mut rng),
            GenerationAlgorithm::Cellular => {
                carve_caves(&mut grid, &self.config.cellular, &mut rng);
                Vec::new()
            }
        };
        for &objective in &objectives {
            grid.set_tile(objective, TileKind::Objective);
        }

        let mut zones = ZoneSets { objectives, ..ZoneSets::default() };
        allocate_zones(&mut grid, &self.config.zones, &mut rng, &mut zones);

        log::info!(
            "generated {:?} arena {}x{} from seed {seed}: {} player, {} enemy, {} power-up spawns, \
             {} bush tiles, {} decorations",
            self.config.algorithm,
            grid.width(),
            grid.height(),
            zones.player_spawns.len(),
            zones.enemy_spawns.len(),
            zones.powerup_spawns.len(),
            zones.bush_tiles.len(),
            zones.decorations.len(),
        );
        Arena::new(grid, zones)
    }
}
