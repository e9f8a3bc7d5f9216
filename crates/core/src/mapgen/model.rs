//! Public data models for zone sets produced alongside the tile grid.

use serde::{Deserialize, Serialize};

use crate::types::{DecorationKind, TilePos};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub pos: TilePos,
    pub kind: DecorationKind,
    /// Relative scale, opaque to the engine.
    pub size: f32,
}

/// Placement results, in placement order. Read-only once generation finishes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneSets {
    pub player_spawns: Vec<TilePos>,
    pub enemy_spawns: Vec<TilePos>,
    pub powerup_spawns: Vec<TilePos>,
    pub bush_tiles: Vec<TilePos>,
    pub decorations: Vec<Decoration>,
    pub objectives: Vec<TilePos>,
}

impl ZoneSets {
    pub fn player_spawn(&self) -> Option<TilePos> {
        self.player_spawns.first().copied()
    }

    pub fn with_player_spawn(pos: TilePos) -> Self {
        Self { player_spawns: vec![pos], ..Self::default() }
    }
}
