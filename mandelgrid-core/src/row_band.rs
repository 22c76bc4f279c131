// mandelgrid-core/src/row_band.rs

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Contiguous range of grid rows `[start, end)` handed to one execution unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowBand {
    pub start: u32,
    pub end: u32,
}

impl RowBand {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "band start {start} after end {end}");
        Self { start, end }
    }

    /// Every row of a grid with `height` rows.
    pub fn full(height: u32) -> Self {
        Self::new(0, height)
    }

    /// Number of rows in the band.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// True when the band holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row indices `start..end`, for iterating alongside output rows.
    pub fn rows(&self) -> Range<u32> {
        self.start..self.end
    }

    /// Bytes needed to hold this band at one byte per pixel.
    pub fn byte_len(&self, width: u32) -> usize {
        self.len() as usize * width as usize
    }
}
