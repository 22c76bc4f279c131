use crate::config::{DX, DY, HEIGHT, MAX_COLOR, MAX_ITERS, WIDTH, XMIN, YMIN};

/// Escape radius 2, compared squared.
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Evaluator bound to the lecture grid.
pub const LECTURE_EVALUATOR: PixelEvaluator = PixelEvaluator {
    xmin: XMIN,
    ymin: YMIN,
    dx: DX,
    dy: DY,
    max_iters: MAX_ITERS,
    max_color: MAX_COLOR,
};

/// Escape value of one pixel of the lecture grid.
///
/// `px` must lie in `[0, WIDTH)` and `py` in `[0, HEIGHT)`. Coordinates
/// outside the grid are the caller's mistake; release builds still return
/// the value for the extrapolated point.
pub fn mandelbrot(px: i32, py: i32) -> u8 {
    debug_assert!(
        (0..WIDTH as i32).contains(&px) && (0..HEIGHT as i32).contains(&py),
        "pixel ({px}, {py}) outside {WIDTH}x{HEIGHT} grid"
    );
    LECTURE_EVALUATOR.evaluate(px, py)
}

/// Number of `z = z^2 + c` steps from `z = 0` before `|z|` reaches 2,
/// capped at `max_iters`.
#[inline]
pub fn escape_time(cx: f64, cy: f64, max_iters: u32) -> u32 {
    let mut x = 0.0_f64;
    let mut y = 0.0_f64;
    let mut i = 0;

    while x * x + y * y < ESCAPE_RADIUS_SQ && i < max_iters {
        let x_next = x * x - y * y + cx;
        y = 2.0 * x * y + cy;
        x = x_next;
        i += 1;
    }

    i
}

/// Read-only view of a grid: window origin, step sizes and bounds.
///
/// The value is `Copy` so each worker thread or device receives its own
/// copy rather than sharing a reference. Build one with
/// [`GridConfig::evaluator`](crate::GridConfig::evaluator).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelEvaluator {
    xmin: f64,
    ymin: f64,
    dx: f64,
    dy: f64,
    max_iters: u32,
    max_color: u32,
}

impl PixelEvaluator {
    pub(crate) fn new(
        xmin: f64,
        ymin: f64,
        dx: f64,
        dy: f64,
        max_iters: u32,
        max_color: u32,
    ) -> Self {
        Self {
            xmin,
            ymin,
            dx,
            dy,
            max_iters,
            max_color,
        }
    }

    pub fn origin(&self) -> (f64, f64) {
        (self.xmin, self.ymin)
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn dy(&self) -> f64 {
        self.dy
    }

    pub fn max_iters(&self) -> u32 {
        self.max_iters
    }

    pub fn max_color(&self) -> u32 {
        self.max_color
    }

    /// Complex-plane point sampled by pixel `(px, py)`.
    #[inline]
    pub fn point(&self, px: i32, py: i32) -> (f64, f64) {
        (
            self.xmin + px as f64 * self.dx,
            self.ymin + py as f64 * self.dy,
        )
    }

    #[inline]
    pub fn escape_iterations(&self, px: i32, py: i32) -> u32 {
        let (cx, cy) = self.point(px, py);
        escape_time(cx, cy, self.max_iters)
    }

    /// Linear scaling of an iteration count onto `[0, max_color]`, truncated.
    /// Only points that never escape reach `max_color`.
    #[inline]
    pub fn color_for(&self, iterations: u32) -> u8 {
        let capped = iterations.min(self.max_iters) as u64;
        (self.max_color as u64 * capped / self.max_iters as u64) as u8
    }

    #[inline]
    pub fn evaluate(&self, px: i32, py: i32) -> u8 {
        self.color_for(self.escape_iterations(px, py))
    }
}
