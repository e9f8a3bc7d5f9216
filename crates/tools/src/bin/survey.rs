use anyhow::{Result, ensure};
use arena::{ArenaConfig, MapGenerator, TileKind, TilePos, ValidationOutcome};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

/// Sweep a range of seeds, checking generation invariants on each arena.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of consecutive seeds to generate
    #[arg(short, long, default_value_t = 100)]
    seeds: u64,
    /// First seed of the sweep
    #[arg(long, default_value_t = 0)]
    start: u64,
    /// Random routes checked per arena
    #[arg(short, long, default_value_t = 8)]
    routes: u32,
}

#[derive(Default)]
struct Tally {
    accepted: u64,
    low_connectivity: u64,
    missing_spawn: u64,
    ratio_sum: f64,
    routes_found: u64,
    routes_blocked: u64,
}

fn choose(rng: &mut ChaCha8Rng, tiles: &[TilePos]) -> TilePos {
    tiles[rng.next_u64() as usize % tiles.len()]
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Surveying {} seeds starting at {}...", args.seeds, args.start);
    let generator = MapGenerator::new(ArenaConfig::default())?;
    let mut tally = Tally::default();

    for seed in args.start..args.start.saturating_add(args.seeds) {
        let generated = generator.generate(seed);
        let arena = &generated.arena;
        let grid = arena.grid();

        for pos in grid.positions().filter(|&pos| grid.is_border(pos)) {
            ensure!(grid.tile_at(pos) == TileKind::Wall, "seed {seed}: border opened at {pos:?}");
        }

        match generated.outcome {
            ValidationOutcome::Accepted(report) => {
                tally.accepted += 1;
                tally.ratio_sum += report.ratio();
            }
            ValidationOutcome::LowConnectivity(report) => {
                tally.low_connectivity += 1;
                tally.ratio_sum += report.ratio();
            }
            ValidationOutcome::MissingPlayerSpawn => {
                tally.missing_spawn += 1;
                continue;
            }
        }

        let walkable = grid.positions().filter(|&pos| grid.is_walkable(pos)).collect::<Vec<_>>();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..args.routes {
            let (from, to) = (choose(&mut rng, &walkable), choose(&mut rng, &walkable));
            let path = arena.find_path(from, to);
            if path.is_empty() {
                tally.routes_blocked += 1;
                continue;
            }
            ensure!(
                path.first() == Some(&from) && path.last() == Some(&to),
                "seed {seed}: route {from:?} -> {to:?} has wrong endpoints"
            );
            ensure!(
                path.len() as u32 > from.manhattan(to),
                "seed {seed}: route {from:?} -> {to:?} is shorter than the Manhattan distance"
            );
            ensure!(
                path.windows(2).all(|pair| pair[0].manhattan(pair[1]) == 1),
                "seed {seed}: route {from:?} -> {to:?} skips a tile"
            );
            tally.routes_found += 1;
        }
        log::debug!("seed {seed}: {:?}", generated.outcome);
    }

    let rated = tally.accepted + tally.low_connectivity;
    let mean_ratio = if rated == 0 { 0.0 } else { tally.ratio_sum / rated as f64 };
    println!("Accepted: {} / {}", tally.accepted, args.seeds);
    println!("Low connectivity: {}", tally.low_connectivity);
    println!("Missing player spawn: {}", tally.missing_spawn);
    println!("Mean connectivity: {mean_ratio:.3}");
    println!("Routes found: {}, blocked: {}", tally.routes_found, tally.routes_blocked);
    println!("Survey completed successfully.");
    Ok(())
}
