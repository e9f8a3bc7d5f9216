use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use arena::{ArenaConfig, GeneratedArena, MapGenerator, TilePos};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

mod seed;

use seed::SeedChoice;

/// Generate arenas and query them from the command line.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an arena and print it with its validation outcome
    Generate {
        /// Seed to generate from; a runtime seed is used when omitted
        #[arg(long)]
        seed: Option<u64>,
        /// TOML file overriding the default generation parameters
        #[arg(long)]
        config: Option<PathBuf>,
        /// Maximum attempts before giving up on a validated arena
        #[arg(long, default_value_t = 1)]
        retries: u32,
        #[arg(long, value_enum, default_value_t = OutputFormat::Ascii)]
        format: OutputFormat,
    },
    /// Route between two tiles of a generated arena
    Path {
        #[arg(long)]
        seed: u64,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Start tile as `X,Y`
        #[arg(long, value_parser = parse_tile)]
        from: TilePos,
        /// Goal tile as `X,Y`
        #[arg(long, value_parser = parse_tile)]
        to: TilePos,
        #[arg(long, value_enum, default_value_t = OutputFormat::Ascii)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
}

#[derive(Serialize)]
struct PathReport {
    seed: u64,
    from: TilePos,
    to: TilePos,
    steps: usize,
    path: Vec<TilePos>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate { seed, config, retries, format } => {
            let seed = SeedChoice::resolve(seed);
            let generator = build_generator(config.as_deref())?;
            let generated = generator.generate_with_retries(seed.value(), retries);
            print_generated(seed, &generated, format)
        }
        Commands::Path { seed, config, from, to, format } => {
            let generator = build_generator(config.as_deref())?;
            let generated = generator.generate(seed);
            print_path(&generated, from, to, format)
        }
    }
}

fn build_generator(config_path: Option<&Path>) -> Result<MapGenerator> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => ArenaConfig::default(),
    };
    MapGenerator::new(config).context("invalid arena configuration")
}

fn load_config(path: &Path) -> Result<ArenaConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    ArenaConfig::from_toml_str(&text)
        .with_context(|| format!("Failed to load config file: {}", path.display()))
}

fn parse_tile(raw: &str) -> Result<TilePos, String> {
    let Some((x, y)) = raw.split_once(',') else {
        return Err(format!("tile '{raw}' must be written as X,Y"));
    };
    let parse = |part: &str| {
        part.trim().parse::<i32>().map_err(|_| format!("tile '{raw}' has a non-numeric coordinate"))
    };
    Ok(TilePos::new(parse(x)?, parse(y)?))
}

fn print_generated(
    seed: SeedChoice,
    generated: &GeneratedArena,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(generated)
                .context("Failed to serialize generated arena")?;
            println!("{json}");
        }
        OutputFormat::Ascii => {
            println!("Seed: {} ({})", seed.value(), seed.source());
            if generated.seed != seed.value() {
                println!("Accepted attempt seed: {}", generated.seed);
            }
            println!("Attempts: {}", generated.attempts);
            println!("Outcome: {:?}", generated.outcome);
            print!("{}", generated.arena.grid().render_ascii());
        }
    }
    Ok(())
}

fn print_path(
    generated: &GeneratedArena,
    from: TilePos,
    to: TilePos,
    format: OutputFormat,
) -> Result<()> {
    let arena = &generated.arena;
    for tile in [from, to] {
        if !arena.grid().in_bounds(tile) {
            bail!("tile ({}, {}) is outside the arena", tile.x, tile.y);
        }
    }

    let path = arena.find_path(from, to);
    let report = PathReport {
        seed: generated.seed,
        from,
        to,
        steps: path.len().saturating_sub(1),
        path,
    };
    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize path report")?;
            println!("{json}");
        }
        OutputFormat::Ascii if report.path.is_empty() => {
            println!("No route from ({}, {}) to ({}, {})", from.x, from.y, to.x, to.y);
        }
        OutputFormat::Ascii => {
            println!("Route of {} steps:", report.steps);
            let tiles =
                report.path.iter().map(|t| format!("({},{})", t.x, t.y)).collect::<Vec<_>>();
            println!("{}", tiles.join(" -> "));
        }
    }
    Ok(())
}
