//! Adapter selection and device creation.

use crate::error::GpuError;
use crate::pipeline::WORKGROUP_SIZE;

/// Device and queue of the adapter the grid is offloaded to.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub adapter_info: wgpu::AdapterInfo,
}

/// Outcome of [`GpuContext::try_init`].
pub enum GpuAvailability {
    Available(GpuContext),
    Unavailable(String),
}

impl GpuContext {
    /// Try to open the high-performance adapter. Any failure is logged and
    /// reported as `Unavailable` so callers can fall back to the CPU path.
    pub async fn try_init() -> GpuAvailability {
        match Self::init_internal().await {
            Ok(ctx) => GpuAvailability::Available(ctx),
            Err(e) => {
                log::warn!("GPU initialization failed: {e}");
                GpuAvailability::Unavailable(e.to_string())
            }
        }
    }

    async fn init_internal() -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let adapter_info = adapter.get_info();
        log::info!(
            "GPU adapter: {} ({:?}, {:?})",
            adapter_info.name,
            adapter_info.backend,
            adapter_info.device_type
        );

        let (device, queue) = Self::open_device(&adapter).await?;

        Ok(Self {
            device,
            queue,
            adapter_info,
        })
    }

    /// Request a device with every limit the adapter supports.
    ///
    /// A 16384-pixel row is 64 KiB of `u32` results, so the default 128 MiB
    /// storage binding holds only 2048 rows. Asking for the adapter's real
    /// limits lets [`Self::max_rows_per_dispatch`] size bands from what the
    /// hardware allows, and the WebGL2 downlevel defaults would not expose
    /// compute storage at all.
    async fn open_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue), GpuError> {
        let limits = adapter.limits();
        log::debug!(
            "Requesting storage binding {} bytes, {} workgroups per dimension",
            limits.max_storage_buffer_binding_size,
            limits.max_compute_workgroups_per_dimension
        );
        let device = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("mandelgrid"),
                    required_features: wgpu::Features::empty(),
                    required_limits: limits,
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await?;
        Ok(device)
    }

    fn max_binding_bytes(&self) -> u64 {
        let limits = self.device.limits();
        (limits.max_storage_buffer_binding_size as u64).min(limits.max_buffer_size)
    }

    /// Widest grid a single dispatch can cover: one workgroup column per
    /// 8 pixels, and one full row of results within a storage binding.
    pub fn max_dispatch_width(&self) -> u32 {
        let by_workgroups = self.device.limits().max_compute_workgroups_per_dimension as u64
            * WORKGROUP_SIZE as u64;
        let by_bytes = self.max_binding_bytes() / std::mem::size_of::<u32>() as u64;
        by_workgroups.min(by_bytes).min(u32::MAX as u64) as u32
    }

    /// Largest number of full-width rows one dispatch can write, bounded by
    /// the storage binding size at 4 bytes per pixel.
    pub fn max_rows_per_dispatch(&self, width: u32) -> u32 {
        let row_bytes = width as u64 * std::mem::size_of::<u32>() as u64;
        let by_bytes = (self.max_binding_bytes() / row_bytes.max(1)).max(1);
        let by_workgroups =
            self.device.limits().max_compute_workgroups_per_dimension as u64 * WORKGROUP_SIZE as u64;
        by_bytes.min(by_workgroups).min(u32::MAX as u64) as u32
    }
}
