//! Fixed sampling domain and per-pixel escape-time evaluator for the
//! multi-device Mandelbrot grid.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod pixel_rect;
pub mod row_band;

pub use config::{
    Domain, GridConfig, DX, DY, HEIGHT, LECTURE_GRID, MAX_COLOR, MAX_ITERS,
    MAX_ITERS_LIMIT, WIDTH, XMAX, XMIN, YMAX, YMIN,
};
pub use error::ConfigError;
pub use evaluator::{escape_time, mandelbrot, PixelEvaluator, ESCAPE_RADIUS_SQ, LECTURE_EVALUATOR};
pub use pixel_rect::PixelRect;
pub use row_band::RowBand;
