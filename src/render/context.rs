//! The `wgpu` device the GPU renderer runs on.

use log::debug;

use crate::error::{Error, Result};

/// A headless device and its queue.
///
/// Created once per run and handed to every [`GpuRenderer`](super::GpuRenderer)
/// call; nothing in the crate keeps a global device.
pub struct RenderContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    adapter_info: wgpu::AdapterInfo,
}

impl RenderContext {
    /// Blocks until an adapter and device are available.
    pub fn new() -> Result<Self> {
        pollster::block_on(Self::request(wgpu::PowerPreference::HighPerformance))
    }

    pub async fn request(power_preference: wgpu::PowerPreference) -> Result<Self> {
        let instance = wgpu::Instance::new(wgpu::Backends::all());

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                force_fallback_adapter: false,
                compatible_surface: None,
            })
            .await
            .ok_or(Error::NoAdapter)?;

        let adapter_info = adapter.get_info();
        debug!(
            "using adapter {} ({:?})",
            adapter_info.name, adapter_info.backend
        );

        // A 4K surface of vec4<f32> is larger than the default storage binding limit.
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("device"),
                    features: wgpu::Features::empty(),
                    limits: adapter.limits(),
                },
                None,
            )
            .await?;

        Ok(Self {
            device,
            queue,
            adapter_info,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.adapter_info
    }
}
