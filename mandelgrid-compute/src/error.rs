//! Render dispatch errors.

use mandelgrid_core::{ConfigError, RowBand};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Output buffer holds {actual} bytes, band needs {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Rows {}..{} fall outside a grid of height {height}", band.start, band.end)]
    BandOutOfRange { band: RowBand, height: u32 },

    #[error("Invalid grid config: {0}")]
    Config(#[from] ConfigError),

    #[error("Render cancelled")]
    Cancelled,
}
