//! GPU error types.

use mandelgrid_core::{ConfigError, RowBand};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GpuError {
    #[error("No GPU adapter found")]
    NoAdapter,

    #[error("Failed to create device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),

    #[error("Buffer mapping failed: {0}")]
    BufferMap(#[from] wgpu::BufferAsyncError),

    #[error("Rows {}..{} fall outside a grid of height {height}", band.start, band.end)]
    BandOutOfRange { band: RowBand, height: u32 },

    #[error("Invalid grid config: {0}")]
    Config(#[from] ConfigError),

    #[error("Grid width {width} exceeds the {max} columns one dispatch can cover")]
    GridTooWide { width: u32, max: u32 },

    #[error("GPU unavailable: {0}")]
    Unavailable(String),
}
