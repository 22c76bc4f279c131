//! Data-parallel rendering of row bands into caller-owned byte buffers.
//!
//! Rows are the unit of work: `par_chunks_mut` hands each task a disjoint
//! `&mut [u8]` for exactly one row, so no two tasks can touch the same
//! pixel slot and no locking is needed. The evaluator is `Copy` and is
//! captured by value in every task.

use crate::cancellation::CancellationChecker;
use crate::error::RenderError;
use mandelgrid_core::{GridConfig, RowBand};
use rayon::prelude::*;
use std::time::Instant;

/// Summary of a finished band render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderStats {
    pub band: RowBand,
    pub pixels: usize,
    /// Pixels that never escaped within the iteration bound.
    pub interior_pixels: usize,
    pub compute_time_ms: f64,
}

/// Render rows `band` of `config` into `out`, row-major.
///
/// `out` must hold exactly `band.len() * config.width` bytes; row `py` of
/// the band lands at offset `(py - band.start) * width`. The checker is
/// polled before each row, so a cancelled render leaves the remaining rows
/// untouched.
pub fn render_band(
    config: &GridConfig,
    band: RowBand,
    out: &mut [u8],
    cancel: &impl CancellationChecker,
) -> Result<RenderStats, RenderError> {
    config.validate()?;
    if band.start > band.end || band.end > config.height {
        return Err(RenderError::BandOutOfRange {
            band,
            height: config.height,
        });
    }

    let expected = band.byte_len(config.width);
    if out.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: out.len(),
        });
    }

    let start = Instant::now();
    let evaluator = config.evaluator();
    let interior = evaluator.max_color() as u8;
    let width = config.width as usize;

    let interior_pixels = if expected == 0 {
        0
    } else {
        out.par_chunks_mut(width)
            .zip(band.rows())
            .map(|(row, py)| {
                if cancel.is_cancelled() {
                    return Err(RenderError::Cancelled);
                }
                let mut interior_in_row = 0;
                for (px, slot) in row.iter_mut().enumerate() {
                    let value = evaluator.evaluate(px as i32, py as i32);
                    interior_in_row += usize::from(value == interior);
                    *slot = value;
                }
                Ok(interior_in_row)
            })
            .try_reduce(|| 0, |a, b| Ok(a + b))?
    };

    let compute_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    log::debug!(
        "Rendered rows {}..{} ({} pixels) in {:.1}ms",
        band.start,
        band.end,
        expected,
        compute_time_ms
    );

    Ok(RenderStats {
        band,
        pixels: expected,
        interior_pixels,
        compute_time_ms,
    })
}

/// Render the whole grid into a fresh row-major buffer.
pub fn render_grid(
    config: &GridConfig,
    cancel: &impl CancellationChecker,
) -> Result<Vec<u8>, RenderError> {
    let mut out = vec![0u8; config.pixel_count()];
    let stats = render_band(config, RowBand::full(config.height), &mut out, cancel)?;
    log::info!(
        "Rendered {}x{} grid, {} interior pixels, {:.1}ms",
        config.width,
        config.height,
        stats.interior_pixels,
        stats.compute_time_ms
    );
    Ok(out)
}
