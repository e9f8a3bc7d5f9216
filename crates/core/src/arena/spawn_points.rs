//! World-space spawn positions for gameplay.

use super::*;
use crate::mapgen::ArenaRng;

impl Arena {
    /// Centre of the first player spawn, or of the whole map when there is none.
    pub fn player_spawn_position(&self) -> WorldPos {
        match self.zones.player_spawn() {
            Some(spawn) => self.grid.tile_to_world(spawn),
            None => WorldPos::new(self.grid.pixel_width() / 2.0, self.grid.pixel_height() / 2.0),
        }
    }

    pub fn random_enemy_spawn_position(&self, rng: &mut ArenaRng) -> Option<WorldPos> {
        rng.pick(&self.zones.enemy_spawns).map(|&spawn| self.grid.tile_to_world(spawn))
    }

    /// Prefers enemy spawns with no wall among their eight neighbours, then
    /// the first open floor tile in row-major order, then the first enemy
    /// spawn regardless of walls.
    pub fn smart_enemy_spawn_position(&self, rng: &mut ArenaRng) -> Option<WorldPos> {
        let roomy = self
            .zones
            .enemy_spawns
            .iter()
            .copied()
            .filter(|&spawn| self.grid.has_clear_surroundings(spawn))
            .collect::<Vec<_>>();
        if let Some(&spawn) = rng.pick(&roomy) {
            return Some(self.grid.tile_to_world(spawn));
        }

        let open_floor = self.grid.positions().find(|&pos| {
            !self.grid.is_border(pos)
                && self.grid.tile_at(pos) == TileKind::Floor
                && self.grid.has_clear_surroundings(pos)
        });
        open_floor
            .or_else(|| self.zones.enemy_spawns.first().copied())
            .map(|tile| self.grid.tile_to_world(tile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_spawn_position_falls_back_to_map_centre() {
        let grid = TileGrid::walled(10, 8, 32.0).unwrap();
        let arena = Arena::new(grid.clone(), ZoneSets::default());
        assert_eq!(arena.player_spawn_position(), WorldPos::new(160.0, 128.0));

        let arena = Arena::new(grid, ZoneSets::with_player_spawn(TilePos::new(2, 3)));
        assert_eq!(arena.player_spawn_position(), WorldPos::new(80.0, 112.0));
    }

    #[test]
    fn random_enemy_spawn_is_drawn_from_zone_set() {
        let grid = TileGrid::walled(10, 10, 32.0).unwrap();
        let spawns = vec![TilePos::new(2, 2), TilePos::new(7, 7)];
        let zones = ZoneSets { enemy_spawns: spawns.clone(), ..ZoneSets::default() };
        let arena = Arena::new(grid, zones);
        let mut rng = ArenaRng::from_seed(3);

        for _ in 0..20 {
            let pos = arena.random_enemy_spawn_position(&mut rng).expect("spawns exist");
            assert!(spawns.contains(&arena.world_to_tile(pos)));
        }
        let empty = Arena::new(TileGrid::walled(10, 10, 32.0).unwrap(), ZoneSets::default());
        assert_eq!(empty.random_enemy_spawn_position(&mut rng), None);
    }

    #[test]
    fn smart_spawn_prefers_roomy_enemy_spawns() {
        let grid = TileGrid::walled(10, 10, 32.0).unwrap();
        let cramped = TilePos::new(1, 1);
        let roomy = TilePos::new(5, 5);
        let zones = ZoneSets { enemy_spawns: vec![cramped, roomy], ..ZoneSets::default() };
        let arena = Arena::new(grid, zones);
        let mut rng = ArenaRng::from_seed(8);

        for _ in 0..10 {
            let pos = arena.smart_enemy_spawn_position(&mut rng).expect("a spawn exists");
            assert_eq!(arena.world_to_tile(pos), roomy);
        }
    }

    #[test]
    fn smart_spawn_scans_for_open_floor_when_spawns_are_cramped() {
        let grid = TileGrid::walled(10, 10, 32.0).unwrap();
        let zones = ZoneSets { enemy_spawns: vec![TilePos::new(1, 1)], ..ZoneSets::default() };
        let arena = Arena::new(grid, zones);

        let pos = arena.smart_enemy_spawn_position(&mut ArenaRng::from_seed(0));
        assert_eq!(pos.map(|p| arena.world_to_tile(p)), Some(TilePos::new(2, 2)));
    }

    #[test]
    fn smart_spawn_falls_back_to_first_enemy_spawn_in_solid_rock() {
        let mut grid = TileGrid::filled(6, 6, 32.0, TileKind::Wall).unwrap();
        grid.set_tile(TilePos::new(2, 2), TileKind::SpawnEnemy);
        let zones = ZoneSets { enemy_spawns: vec![TilePos::new(2, 2)], ..ZoneSets::default() };
        let arena = Arena::new(grid, zones);

        let pos = arena.smart_enemy_spawn_position(&mut ArenaRng::from_seed(0));
        assert_eq!(pos, Some(WorldPos::new(80.0, 80.0)));
    }
}
