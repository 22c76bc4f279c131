//! High-level GPU renderer API.

use crate::buffers::{GridBuffers, GridUniforms};
use crate::device::GpuContext;
use crate::error::GpuError;
use crate::pipeline::{GridPipeline, WORKGROUP_SIZE};
use mandelgrid_core::{GridConfig, RowBand};
use std::time::Instant;

/// Result of a GPU band render.
pub struct GpuRenderResult {
    pub band: RowBand,
    /// One byte per pixel, row-major, `band.len() * width` long.
    pub data: Vec<u8>,
    pub dispatches: u32,
    pub compute_time_ms: f64,
}

/// Renders row bands of a grid on one device.
///
/// Bands larger than a single storage binding are split into several
/// dispatches; buffers are reused while the width stays the same.
pub struct GpuRenderer {
    context: GpuContext,
    pipeline: GridPipeline,
    buffers: Option<GridBuffers>,
    row_cap: Option<u32>,
}

impl GpuRenderer {
    pub fn new(context: GpuContext) -> Self {
        let pipeline = GridPipeline::new(&context.device);
        Self {
            context,
            pipeline,
            buffers: None,
            row_cap: None,
        }
    }

    /// Never put more than `rows` rows in one dispatch, even when the device
    /// could take more. Useful to keep individual submissions short.
    pub fn with_max_rows_per_dispatch(mut self, rows: u32) -> Self {
        self.row_cap = Some(rows.max(1));
        self
    }

    pub fn context(&self) -> &GpuContext {
        &self.context
    }

    pub async fn render_grid(&mut self, config: &GridConfig) -> Result<GpuRenderResult, GpuError> {
        self.render_band(config, RowBand::full(config.height)).await
    }

    /// Evaluate rows `band` of `config` on the device and read them back.
    pub async fn render_band(
        &mut self,
        config: &GridConfig,
        band: RowBand,
    ) -> Result<GpuRenderResult, GpuError> {
        config.validate()?;
        let max_width = self.context.max_dispatch_width();
        if config.width > max_width {
            return Err(GpuError::GridTooWide {
                width: config.width,
                max: max_width,
            });
        }
        if band.start > band.end || band.end > config.height {
            return Err(GpuError::BandOutOfRange {
                band,
                height: config.height,
            });
        }

        let start = Instant::now();
        let rows_per_dispatch = self.rows_per_dispatch(config.width);
        let mut data = Vec::with_capacity(band.byte_len(config.width));
        let mut dispatches = 0;

        let mut row = band.start;
        while row < band.end {
            let chunk = RowBand::new(row, band.end.min(row.saturating_add(rows_per_dispatch)));
            let values = self.dispatch(config, chunk).await?;
            // Kernel output never exceeds max_color, which config validation keeps within a byte
            data.extend(values.iter().map(|&v| v as u8));
            dispatches += 1;
            row = chunk.end;
        }

        let compute_time_ms = start.elapsed().as_secs_f64() * 1000.0;
        log::info!(
            "GPU rendered rows {}..{} in {} dispatches, {:.1}ms",
            band.start,
            band.end,
            dispatches,
            compute_time_ms
        );

        Ok(GpuRenderResult {
            band,
            data,
            dispatches,
            compute_time_ms,
        })
    }

    fn rows_per_dispatch(&self, width: u32) -> u32 {
        let device_max = self.context.max_rows_per_dispatch(width);
        self.row_cap.map_or(device_max, |cap| cap.min(device_max))
    }

    async fn dispatch(&mut self, config: &GridConfig, chunk: RowBand) -> Result<Vec<u32>, GpuError> {
        let width = config.width;
        let rows = chunk.len();

        if !self.buffers.as_ref().is_some_and(|b| b.fits(width, rows)) {
            let capacity = self.rows_per_dispatch(width).min(config.height);
            log::debug!("Allocating GPU buffers for {width}x{capacity}");
            self.buffers = Some(GridBuffers::new(&self.context.device, width, capacity.max(rows)));
        }
        let buffers = self
            .buffers
            .as_ref()
            .ok_or_else(|| GpuError::Unavailable("buffers not allocated".into()))?;

        let uniforms = GridUniforms::new(config, chunk);
        self.context
            .queue
            .write_buffer(&buffers.uniforms, 0, bytemuck::bytes_of(&uniforms));

        let bind_group = self
            .context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("grid_bind_group"),
                layout: &self.pipeline.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffers.uniforms.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: buffers.results.as_entire_binding(),
                    },
                ],
            });

        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("grid_encoder"),
                });

        {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("grid_pass"),
                timestamp_writes: None,
            });
            compute_pass.set_pipeline(&self.pipeline.compute_pipeline);
            compute_pass.set_bind_group(0, &bind_group, &[]);
            compute_pass.dispatch_workgroups(
                width.div_ceil(WORKGROUP_SIZE),
                rows.div_ceil(WORKGROUP_SIZE),
                1,
            );
        }

        let byte_size = width as u64 * rows as u64 * std::mem::size_of::<u32>() as u64;
        encoder.copy_buffer_to_buffer(&buffers.results, 0, &buffers.staging_results, 0, byte_size);

        self.context.queue.submit(std::iter::once(encoder.finish()));

        self.read_buffer(&buffers.staging_results, byte_size).await
    }

    async fn read_buffer(&self, buffer: &wgpu::Buffer, byte_size: u64) -> Result<Vec<u32>, GpuError> {
        if byte_size == 0 {
            return Ok(Vec::new());
        }
        let slice = buffer.slice(..byte_size);

        let (tx, rx) = futures_channel::oneshot::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        self.context.device.poll(wgpu::Maintain::Wait);

        rx.await
            .map_err(|_| GpuError::Unavailable("Channel closed".into()))?
            .map_err(GpuError::BufferMap)?;

        let data = {
            let view = slice.get_mapped_range();
            bytemuck::cast_slice(&view).to_vec()
        };
        buffer.unmap();

        Ok(data)
    }
}
