//! Sampling domain configuration.
//!
//! The lecture grid is fixed at compile time. Every constant is exposed
//! both as a `pub const` and through the [`LECTURE_GRID`] static, which is
//! the single source of truth the renderers read from. Other grids can be
//! built at runtime through [`GridConfig::new`] or [`GridConfig::from_json`],
//! which enforce the same invariants.

use crate::error::ConfigError;
use crate::evaluator::PixelEvaluator;
use serde::{Deserialize, Serialize};

pub const WIDTH: u32 = 16384;
pub const HEIGHT: u32 = 16384;
pub const MAX_ITERS: u32 = 100;
pub const MAX_COLOR: u32 = 255;
pub const XMIN: f64 = -1.7;
pub const XMAX: f64 = 0.5;
pub const YMIN: f64 = -1.2;
pub const YMAX: f64 = 1.2;

/// Horizontal distance between neighbouring pixel samples.
pub const DX: f64 = (XMAX - XMIN) / WIDTH as f64;
/// Vertical distance between neighbouring pixel samples.
pub const DY: f64 = (YMAX - YMIN) / HEIGHT as f64;

/// Largest accepted iteration bound. The device kernel computes
/// `max_color * i` in u32, which must not overflow for any `i <= max_iters`.
pub const MAX_ITERS_LIMIT: u32 = u32::MAX / u8::MAX as u32;

/// Rectangular window of the complex plane being sampled.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Domain {
    /// Extent along the real axis.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Extent along the imaginary axis.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let ordered = |min: f64, max: f64| min.is_finite() && max.is_finite() && min < max;
        if !ordered(self.xmin, self.xmax) {
            return Err(ConfigError::InvalidWindow { axis: "real" });
        }
        if !ordered(self.ymin, self.ymax) {
            return Err(ConfigError::InvalidWindow { axis: "imaginary" });
        }
        Ok(())
    }
}

/// Pixel grid laid over a [`Domain`], plus the escape-time bounds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
    pub max_iters: u32,
    pub max_color: u32,
    pub domain: Domain,
}

/// The 16384x16384 grid over [-1.7, 0.5] x [-1.2, 1.2].
pub static LECTURE_GRID: GridConfig = GridConfig {
    width: WIDTH,
    height: HEIGHT,
    max_iters: MAX_ITERS,
    max_color: MAX_COLOR,
    domain: Domain {
        xmin: XMIN,
        xmax: XMAX,
        ymin: YMIN,
        ymax: YMAX,
    },
};

impl GridConfig {
    /// Build a validated config.
    pub fn new(
        width: u32,
        height: u32,
        max_iters: u32,
        max_color: u32,
        domain: Domain,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            width,
            height,
            max_iters,
            max_color,
            domain,
        };
        config.validate()?;
        Ok(config)
    }

    /// Same window and bounds as `self`, sampled at a different resolution.
    pub fn with_size(&self, width: u32, height: u32) -> Result<Self, ConfigError> {
        Self::new(width, height, self.max_iters, self.max_color, self.domain)
    }

    /// Parse a config from JSON and check its invariants.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!(
            "Loaded grid config {}x{}, {} iterations",
            config.width,
            config.height,
            config.max_iters
        );
        Ok(config)
    }

    /// Check the grid, bound and window invariants. Renderers call this on
    /// entry, since the public fields and `Deserialize` bypass [`Self::new`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_iters == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.max_iters > MAX_ITERS_LIMIT {
            return Err(ConfigError::IterationLimit(self.max_iters));
        }
        if self.max_color > u8::MAX as u32 {
            return Err(ConfigError::ColorDepth(self.max_color));
        }
        self.domain.validate()
    }

    /// Horizontal step between pixel samples.
    pub fn dx(&self) -> f64 {
        self.domain.width() / self.width as f64
    }

    /// Vertical step between pixel samples.
    pub fn dy(&self) -> f64 {
        self.domain.height() / self.height as f64
    }

    /// Total pixels in the grid, computed in `usize` so 16384x16384 fits.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Read-only copy of the window origin and step sizes, handed to each
    /// parallel execution context.
    pub fn evaluator(&self) -> PixelEvaluator {
        PixelEvaluator::new(
            self.domain.xmin,
            self.domain.ymin,
            self.dx(),
            self.dy(),
            self.max_iters,
            self.max_color,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_domain() -> Domain {
        Domain {
            xmin: -2.0,
            xmax: 1.0,
            ymin: -1.5,
            ymax: 1.5,
        }
    }

    #[test]
    fn step_sizes_match_definition() {
        assert_eq!(DX, (XMAX - XMIN) / WIDTH as f64);
        assert_eq!(DY, (YMAX - YMIN) / HEIGHT as f64);
        assert!((DX - 2.2 / 16384.0).abs() < 1e-18);
        assert!((DY - 2.4 / 16384.0).abs() < 1e-18);
        assert!(DX > 0.0 && DY > 0.0);
    }

    #[test]
    fn lecture_grid_agrees_with_constants() {
        assert_eq!(LECTURE_GRID.width, 16384);
        assert_eq!(LECTURE_GRID.height, 16384);
        assert_eq!(LECTURE_GRID.max_iters, 100);
        assert_eq!(LECTURE_GRID.max_color, 255);
        assert_eq!(LECTURE_GRID.dx(), DX);
        assert_eq!(LECTURE_GRID.dy(), DY);
        assert!(LECTURE_GRID.validate().is_ok());
    }

    #[test]
    fn pixel_count_does_not_overflow_u32() {
        assert_eq!(LECTURE_GRID.pixel_count(), 16384 * 16384);
    }

    #[test]
    fn new_rejects_empty_grid() {
        let err = GridConfig::new(0, 10, 100, 255, small_domain()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyGrid { width: 0, height: 10 }));
    }

    #[test]
    fn new_rejects_inverted_window() {
        let mut domain = small_domain();
        domain.ymin = 2.0;
        let err = GridConfig::new(10, 10, 100, 255, domain).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWindow { axis: "imaginary" }));

        let mut domain = small_domain();
        domain.xmax = f64::NAN;
        let err = GridConfig::new(10, 10, 100, 255, domain).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWindow { axis: "real" }));
    }

    #[test]
    fn new_rejects_wide_color_depth() {
        let err = GridConfig::new(10, 10, 100, 256, small_domain()).unwrap_err();
        assert!(matches!(err, ConfigError::ColorDepth(256)));
    }

    #[test]
    fn new_rejects_zero_iterations() {
        let err = GridConfig::new(10, 10, 0, 255, small_domain()).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroIterations));
    }

    #[test]
    fn new_rejects_iterations_past_the_limit() {
        assert!(GridConfig::new(1, 1, MAX_ITERS_LIMIT, 255, small_domain()).is_ok());
        let err = GridConfig::new(1, 1, 20_000_000, 255, small_domain()).unwrap_err();
        assert!(matches!(err, ConfigError::IterationLimit(20_000_000)));
        // Largest product the device kernel forms must stay within u32
        assert!((MAX_ITERS_LIMIT as u64) * (u8::MAX as u64) <= u32::MAX as u64);
    }

    #[test]
    fn deserialized_config_is_caught_by_validate() {
        let json = r#"{
            "width": 4, "height": 4, "max_iters": 0, "max_color": 300,
            "domain": { "xmin": -2.0, "xmax": 1.0, "ymin": -1.5, "ymax": 1.5 }
        }"#;
        let unchecked: GridConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(unchecked.validate(), Err(ConfigError::ZeroIterations)));

        let unchecked = GridConfig {
            max_iters: 100,
            ..unchecked
        };
        assert!(matches!(unchecked.validate(), Err(ConfigError::ColorDepth(300))));
    }

    #[test]
    fn with_size_keeps_window() {
        let preview = LECTURE_GRID.with_size(220, 240).unwrap();
        assert_eq!(preview.domain, LECTURE_GRID.domain);
        assert!((preview.dx() - 0.01).abs() < 1e-12);
        assert!((preview.dy() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn from_json_parses_and_validates() {
        let json = r#"{
            "width": 64,
            "height": 32,
            "max_iters": 50,
            "max_color": 15,
            "domain": { "xmin": -2.0, "xmax": 1.0, "ymin": -1.5, "ymax": 1.5 }
        }"#;
        let config = GridConfig::from_json(json).unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.max_color, 15);

        let bad = json.replace("\"max_iters\": 50", "\"max_iters\": 0");
        assert!(matches!(
            GridConfig::from_json(&bad),
            Err(ConfigError::ZeroIterations)
        ));
        assert!(matches!(
            GridConfig::from_json("{"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn config_serialization_roundtrip() {
        let json = serde_json::to_string(&LECTURE_GRID).unwrap();
        let restored = GridConfig::from_json(&json).unwrap();
        assert_eq!(restored, LECTURE_GRID);
    }
}
