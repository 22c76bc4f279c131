//! Grid configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Grid must have a positive size, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("Window bounds on the {axis} axis must be finite with min < max")]
    InvalidWindow { axis: &'static str },

    #[error("Color depth {0} does not fit in one byte")]
    ColorDepth(u32),

    #[error("Iteration bound must be at least 1")]
    ZeroIterations,

    #[error("Iteration bound {0} exceeds the limit of {limit}", limit = crate::config::MAX_ITERS_LIMIT)]
    IterationLimit(u32),

    #[error("Failed to parse grid config: {0}")]
    Json(#[from] serde_json::Error),
}
