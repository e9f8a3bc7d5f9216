use thiserror::Error;

/// Precondition failures. Everything the engine can legitimately report at
/// runtime (low connectivity, no route, no free pushback cell) is a value, not
/// an error.
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("arena dimensions {width}x{height} are below the {min}x{min} minimum")]
    InvalidDimensions { width: usize, height: usize, min: usize },
    #[error("tile size must be finite and positive, got {0}")]
    InvalidTileSize(f32),
    #[error("invalid `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("failed to parse arena config: {0}")]
    Config(#[from] toml::de::Error),
}

impl ArenaError {
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }
}
