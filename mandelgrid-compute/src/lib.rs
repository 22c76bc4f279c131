//! CPU dispatch of the per-pixel evaluator across a thread pool.

pub mod cancellation;
pub mod error;
pub mod grid_render;
pub mod partition;
pub mod tile_render;

pub use cancellation::{AtomicBoolChecker, CancellationChecker, GenerationChecker, NeverCancel};
pub use error::RenderError;
pub use grid_render::{render_band, render_grid, RenderStats};
pub use partition::{generate_tiles, split_rows};
pub use tile_render::render_tile;

// Re-export core types for convenience
pub use mandelgrid_core::*;
