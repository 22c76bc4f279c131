//! Offload of the per-pixel evaluator to a GPU compute shader using wgpu.

mod buffers;
mod device;
mod error;
mod pipeline;
mod renderer;
#[cfg(test)]
mod tests;

pub use buffers::{GridBuffers, GridUniforms};
pub use device::{GpuAvailability, GpuContext};
pub use error::GpuError;
pub use pipeline::GridPipeline;
pub use renderer::{GpuRenderResult, GpuRenderer};
