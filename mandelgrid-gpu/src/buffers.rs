//! Uniform and storage buffers for the grid kernel.

use bytemuck::{Pod, Zeroable};
use mandelgrid_core::{GridConfig, RowBand};

/// Read-only constants copied to the device before each dispatch.
///
/// The device works in f32: the window origin and step sizes are narrowed
/// from the f64 config here.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct GridUniforms {
    pub width: u32,
    pub row_start: u32,
    pub row_count: u32,
    pub max_iters: u32,
    pub max_color: u32,
    pub _pad0: [u32; 3],
    pub xmin: f32,
    pub ymin: f32,
    pub dx: f32,
    pub dy: f32,
}

impl GridUniforms {
    pub fn new(config: &GridConfig, band: RowBand) -> Self {
        let evaluator = config.evaluator();
        let (xmin, ymin) = evaluator.origin();
        Self {
            width: config.width,
            row_start: band.start,
            row_count: band.len(),
            max_iters: evaluator.max_iters(),
            max_color: evaluator.max_color(),
            _pad0: [0; 3],
            xmin: xmin as f32,
            ymin: ymin as f32,
            dx: evaluator.dx() as f32,
            dy: evaluator.dy() as f32,
        }
    }
}

/// Buffers sized for one dispatch of `width` x `row_capacity` pixels.
pub struct GridBuffers {
    pub uniforms: wgpu::Buffer,
    /// One u32 per pixel, written by exactly one invocation.
    pub results: wgpu::Buffer,
    pub staging_results: wgpu::Buffer,
    pub width: u32,
    pub row_capacity: u32,
}

impl GridBuffers {
    pub fn new(device: &wgpu::Device, width: u32, row_capacity: u32) -> Self {
        let pixel_count = width as u64 * row_capacity as u64;
        let result_bytes = pixel_count * std::mem::size_of::<u32>() as u64;

        let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grid_uniforms"),
            size: std::mem::size_of::<GridUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let results = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grid_results"),
            size: result_bytes,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        let staging_results = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grid_staging_results"),
            size: result_bytes,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            uniforms,
            results,
            staging_results,
            width,
            row_capacity,
        }
    }

    /// True if a dispatch of `width` x `rows` fits without reallocating.
    pub fn fits(&self, width: u32, rows: u32) -> bool {
        self.width == width && rows <= self.row_capacity
    }
}
