use mandelgrid_core::{PixelRect, RowBand};

/// Split `height` rows into at most `parts` contiguous bands.
///
/// The first `height % parts` bands get one extra row. Empty bands are
/// dropped, so asking for more parts than rows yields one band per row.
pub fn split_rows(height: u32, parts: u32) -> Vec<RowBand> {
    let parts = parts.clamp(1, height.max(1));
    let base = height / parts;
    let extra = height % parts;

    let mut bands = Vec::with_capacity(parts as usize);
    let mut start = 0;
    for i in 0..parts {
        let len = base + u32::from(i < extra);
        if len == 0 {
            continue;
        }
        bands.push(RowBand::new(start, start + len));
        start += len;
    }
    bands
}

/// Tiles covering a `width` x `height` grid exactly, in row-major order.
/// Edge tiles are clipped to the grid.
pub fn generate_tiles(width: u32, height: u32, tile_size: u32) -> Vec<PixelRect> {
    let tile_size = tile_size.max(1);
    let mut tiles = Vec::new();

    for y_start in (0..height).step_by(tile_size as usize) {
        for x_start in (0..width).step_by(tile_size as usize) {
            let w = tile_size.min(width - x_start);
            let h = tile_size.min(height - y_start);
            tiles.push(PixelRect::new(x_start, y_start, w, h));
        }
    }

    tiles
}
