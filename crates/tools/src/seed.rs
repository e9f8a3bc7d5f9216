use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use arena::mix_seed_stream;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn resolve(cli_seed: Option<u64>) -> Self {
        match cli_seed {
            Some(seed) => Self::Cli(seed),
            None => Self::Generated(generate_runtime_seed()),
        }
    }

    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            Self::Cli(_) => "cli",
            Self::Generated(_) => "generated",
        }
    }
}

static RUNTIME_SEED_CALLS: AtomicU64 = AtomicU64::new(0);

/// Wall-clock nanoseconds mixed with a per-process stream. The stream folds in
/// the process id and a call counter, so two calls within one clock tick differ.
pub fn generate_runtime_seed() -> u64 {
    let clock = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64);
    let call = RUNTIME_SEED_CALLS.fetch_add(1, Ordering::Relaxed);
    let stream = u64::from(process::id()).rotate_left(32) ^ call;
    mix_seed_stream(clock, stream)
}
