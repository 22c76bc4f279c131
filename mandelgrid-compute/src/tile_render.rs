//! Sequential tile evaluation for callers that schedule tiles themselves.

use mandelgrid_core::{PixelEvaluator, PixelRect};

/// Evaluate every pixel of `rect`, row-major, one byte per pixel.
///
/// The evaluator is taken by value: each tile worker owns its copy of the
/// window origin and step sizes.
pub fn render_tile(evaluator: PixelEvaluator, rect: PixelRect) -> Vec<u8> {
    let mut data = Vec::with_capacity(rect.area());

    for py in rect.y..rect.y + rect.height {
        for px in rect.x..rect.x + rect.width {
            data.push(evaluator.evaluate(px as i32, py as i32));
        }
    }

    data
}
