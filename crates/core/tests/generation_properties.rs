use arena::validate::reachable_walkable_tiles;
use arena::{
    Arena, ArenaConfig, GenerationAlgorithm, MapGenerator, TileKind, TilePos, ValidationOutcome,
};
use proptest::prelude::*;

fn algorithm() -> impl Strategy<Value = GenerationAlgorithm> {
    prop_oneof![
        Just(GenerationAlgorithm::Maze),
        Just(GenerationAlgorithm::Rooms),
        Just(GenerationAlgorithm::Cellular),
    ]
}

fn generate(algorithm: GenerationAlgorithm, width: usize, height: usize, seed: u64) -> Arena {
    let config = ArenaConfig { algorithm, ..ArenaConfig::with_dimensions(width, height, 32.0) };
    MapGenerator::new(config).expect("dimensions are above the minimum").generate(seed).arena
}

fn assert_marked(arena: &Arena, tiles: &[TilePos], kind: TileKind) -> Result<(), TestCaseError> {
    for &tile in tiles {
        prop_assert_eq!(arena.tile_at(tile), kind, "zone tile {:?}", tile);
    }
    prop_assert_eq!(arena.grid().count(kind), tiles.len(), "stray {:?} cells", kind);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn border_is_always_solid_wall(
        algorithm in algorithm(),
        width in 12_usize..48,
        height in 12_usize..48,
        seed in any::<u64>(),
    ) {
        let arena = generate(algorithm, width, height, seed);
        let grid = arena.grid();
        for pos in grid.positions().filter(|&pos| grid.is_border(pos)) {
            prop_assert_eq!(grid.tile_at(pos), TileKind::Wall, "border opened at {:?}", pos);
        }
    }

    #[test]
    fn accepted_arenas_reach_most_walkable_tiles(algorithm in algorithm(), seed in any::<u64>()) {
        let arena = generate(algorithm, 35, 35, seed);
        let outcome = arena.validate(0.8);
        if let ValidationOutcome::Accepted(report) = outcome {
            let spawn = arena.zones().player_spawn().expect("accepted arenas have a spawn");
            let reached = reachable_walkable_tiles(arena.grid(), spawn).len();
            prop_assert_eq!(reached, report.reachable);
            prop_assert!(reached as f64 >= 0.8 * arena.grid().walkable_count() as f64);
        }
    }

    #[test]
    fn default_mazes_always_validate(seed in any::<u64>()) {
        let arena = generate(GenerationAlgorithm::Maze, 35, 35, seed);
        let outcome = arena.validate(0.8);
        prop_assert!(outcome.is_accepted(), "seed {} rejected: {:?}", seed, outcome);
    }

    #[test]
    fn zone_sets_match_stamped_markers(algorithm in algorithm(), seed in any::<u64>()) {
        let arena = generate(algorithm, 35, 35, seed);
        let zones = arena.zones();

        prop_assert!(zones.player_spawns.len() <= 1);
        prop_assert!(zones.enemy_spawns.len() <= 8);
        prop_assert!(zones.powerup_spawns.len() <= 9);
        assert_marked(&arena, &zones.player_spawns, TileKind::SpawnPlayer)?;
        assert_marked(&arena, &zones.enemy_spawns, TileKind::SpawnEnemy)?;
        assert_marked(&arena, &zones.powerup_spawns, TileKind::SpawnPowerup)?;
        assert_marked(&arena, &zones.bush_tiles, TileKind::Bush)?;
        assert_marked(&arena, &zones.objectives, TileKind::Objective)?;
        let decorations = zones.decorations.iter().map(|d| d.pos).collect::<Vec<_>>();
        assert_marked(&arena, &decorations, TileKind::Decoration)?;

        for &bush in &zones.bush_tiles {
            prop_assert!(arena.is_in_bush(arena.tile_to_world(bush)));
        }
    }

    #[test]
    fn decorations_cover_five_percent_of_floor(algorithm in algorithm(), seed in any::<u64>()) {
        let arena = generate(algorithm, 35, 35, seed);
        let decorated = arena.zones().decorations.len();
        // Decorations are placed last, so every decorated tile was floor just before.
        let floor_before = arena.grid().count(TileKind::Floor) + decorated;
        let density = ArenaConfig::default().zones.decoration_density;
        prop_assert_eq!(decorated, (floor_before as f64 * density).floor() as usize);
    }

    #[test]
    fn player_spawn_has_open_surroundings(seed in any::<u64>()) {
        let arena = generate(GenerationAlgorithm::Maze, 35, 35, seed);
        let spawn = arena.zones().player_spawn().expect("maze plaza always yields a spawn");
        for dy in -1..=1 {
            for dx in -1..=1 {
                let neighbor = spawn.offset(dx, dy);
                prop_assert!(arena.is_walkable(neighbor), "{:?} blocks the spawn", neighbor);
            }
        }
        prop_assert!(!arena.check_collision(arena.player_spawn_position(), 20.0).collided());
    }
}

#[test]
fn marker_tiles_are_all_walkable() {
    for kind in [
        TileKind::Floor,
        TileKind::Bush,
        TileKind::SpawnPlayer,
        TileKind::SpawnEnemy,
        TileKind::SpawnPowerup,
        TileKind::Decoration,
        TileKind::Objective,
    ] {
        assert!(kind.is_walkable(), "{kind:?} must be walkable");
    }
    assert!(TileKind::Wall.blocks_movement());
    assert!(TileKind::WallDestructible.blocks_movement());
}
