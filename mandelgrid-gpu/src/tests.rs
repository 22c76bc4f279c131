//! Tests for the GPU renderer. Each test returns early when no adapter is present.

use crate::{GpuAvailability, GpuContext, GpuError, GpuRenderer};
use mandelgrid_core::{ConfigError, Domain, GridConfig, RowBand, LECTURE_GRID, MAX_ITERS_LIMIT};

fn preview() -> GridConfig {
    LECTURE_GRID.with_size(128, 96).unwrap()
}

/// Test that GPU initialization doesn't panic.
#[test]
fn gpu_init_does_not_panic() {
    pollster::block_on(async {
        match GpuContext::try_init().await {
            GpuAvailability::Available(ctx) => {
                println!("GPU available: {}", ctx.adapter_info.name);
            }
            GpuAvailability::Unavailable(reason) => {
                println!("GPU unavailable: {reason}");
            }
        }
    });
}

#[test]
fn gpu_output_has_one_byte_per_pixel() {
    pollster::block_on(async {
        let GpuAvailability::Available(ctx) = GpuContext::try_init().await else {
            println!("Skipping test: no GPU available");
            return;
        };
        let mut renderer = GpuRenderer::new(ctx);
        let config = preview();

        let result = renderer
            .render_grid(&config)
            .await
            .expect("GPU render should succeed");

        assert_eq!(result.data.len(), config.pixel_count());
        assert_eq!(result.band, RowBand::full(config.height));
        assert!(result.dispatches >= 1);
    });
}

#[test]
fn gpu_interior_and_exterior_pixels() {
    pollster::block_on(async {
        let GpuAvailability::Available(ctx) = GpuContext::try_init().await else {
            println!("Skipping test: no GPU available");
            return;
        };
        let mut renderer = GpuRenderer::new(ctx);
        // 220x240 puts c = 0 exactly on pixel (170, 120)
        let config = LECTURE_GRID.with_size(220, 240).unwrap();

        let result = renderer.render_grid(&config).await.unwrap();
        let at = |px: usize, py: usize| result.data[py * 220 + px];

        assert_eq!(at(170, 120), 255, "c = 0 should never escape");
        assert_eq!(at(0, 0), 2, "c = (-1.7, -1.2) escapes after one step");
    });
}

#[test]
fn gpu_band_out_of_range_is_rejected() {
    pollster::block_on(async {
        let GpuAvailability::Available(ctx) = GpuContext::try_init().await else {
            println!("Skipping test: no GPU available");
            return;
        };
        let mut renderer = GpuRenderer::new(ctx);
        let config = preview();

        let err = renderer
            .render_band(&config, RowBand::new(90, 100))
            .await
            .err()
            .expect("band past the grid should fail");
        assert!(matches!(err, GpuError::BandOutOfRange { height: 96, .. }));
    });
}

#[test]
fn gpu_empty_band_returns_no_data() {
    pollster::block_on(async {
        let GpuAvailability::Available(ctx) = GpuContext::try_init().await else {
            println!("Skipping test: no GPU available");
            return;
        };
        let mut renderer = GpuRenderer::new(ctx);

        let result = renderer
            .render_band(&preview(), RowBand::new(10, 10))
            .await
            .unwrap();
        assert!(result.data.is_empty());
        assert_eq!(result.dispatches, 0);
    });
}

#[test]
fn gpu_rejects_unvalidated_config() {
    pollster::block_on(async {
        let GpuAvailability::Available(ctx) = GpuContext::try_init().await else {
            println!("Skipping test: no GPU available");
            return;
        };
        let mut renderer = GpuRenderer::new(ctx);

        let zero_iters = GridConfig {
            max_iters: 0,
            ..preview()
        };
        let err = renderer.render_grid(&zero_iters).await.err().expect("zero iterations");
        assert!(matches!(err, GpuError::Config(ConfigError::ZeroIterations)));

        let wide_color = GridConfig {
            max_color: 300,
            ..preview()
        };
        let err = renderer.render_grid(&wide_color).await.err().expect("color past u8");
        assert!(matches!(err, GpuError::Config(ConfigError::ColorDepth(300))));
    });
}

#[test]
fn gpu_rejects_grid_wider_than_one_dispatch() {
    pollster::block_on(async {
        let GpuAvailability::Available(ctx) = GpuContext::try_init().await else {
            println!("Skipping test: no GPU available");
            return;
        };
        let Some(width) = ctx.max_dispatch_width().checked_add(1) else {
            println!("Skipping test: dispatch width is unbounded");
            return;
        };
        let mut renderer = GpuRenderer::new(ctx);
        let config = GridConfig::new(width, 1, 1, 255, LECTURE_GRID.domain).unwrap();

        let err = renderer.render_grid(&config).await.err().expect("grid is too wide");
        assert!(matches!(
            err,
            GpuError::GridTooWide { width: w, max } if w == width && max == width - 1
        ));
    });
}

#[test]
fn gpu_interior_color_holds_at_iteration_limit() {
    pollster::block_on(async {
        let GpuAvailability::Available(ctx) = GpuContext::try_init().await else {
            println!("Skipping test: no GPU available");
            return;
        };
        let mut renderer = GpuRenderer::new(ctx);
        // Single pixel at c = -0.1 - 0.1i, deep inside the main cardioid
        let domain = Domain {
            xmin: -0.1,
            xmax: 0.0,
            ymin: -0.1,
            ymax: 0.0,
        };
        let config = GridConfig::new(1, 1, MAX_ITERS_LIMIT, 255, domain).unwrap();

        let gpu = renderer.render_grid(&config).await.unwrap();
        assert_eq!(config.evaluator().evaluate(0, 0), 255);
        assert_eq!(gpu.data, vec![255]);
    });
}

#[test]
fn gpu_capped_dispatches_match_single_dispatch() {
    pollster::block_on(async {
        let GpuAvailability::Available(ctx) = GpuContext::try_init().await else {
            println!("Skipping test: no GPU available");
            return;
        };
        let config = preview();
        let mut renderer = GpuRenderer::new(ctx);
        let whole = renderer.render_grid(&config).await.unwrap();
        assert_eq!(whole.dispatches, 1);

        let mut renderer = renderer.with_max_rows_per_dispatch(10);
        let chunked = renderer.render_grid(&config).await.unwrap();
        assert_eq!(chunked.dispatches, 10, "96 rows in chunks of 10");
        assert_eq!(chunked.data, whole.data);

        // Offset band whose last chunk is shorter than the cap
        let band = RowBand::new(13, 77);
        let part = renderer.render_band(&config, band).await.unwrap();
        assert_eq!(part.dispatches, 7);
        let width = config.width as usize;
        assert_eq!(
            part.data,
            whole.data[band.start as usize * width..band.end as usize * width]
        );
    });
}
