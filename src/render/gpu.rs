//! Field renderer running `field.wgsl` on a `wgpu` device.

use std::{mem::size_of, time::Instant};

use log::{debug, info, trace};

use super::{
    buffer::{self, Buffer, Uniform},
    context::RenderContext,
    kernel,
    params::{Colour, Falloff, RenderParameters, Resolution, Root},
    root_buffer_contents, root_count, FieldRenderer,
};
use crate::{
    accumulate::RootSet,
    error::{Error, Result},
    raster::Raster,
};

/// Device resources for one output resolution.
///
/// The surface, its readback copy and the two uniform blocks live as long as
/// the renderer. The root buffer is destroyed and recreated on every call
/// because its length follows the root count.
pub struct GpuRenderer {
    resolution: Resolution,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    surface: Buffer<Colour>,
    readback: Buffer<Colour>,
    parameters: Uniform<RenderParameters>,
    falloff: Uniform<Falloff>,
    roots: Option<Buffer<Root>>,
}

impl GpuRenderer {
    /// Compiles the field shader and allocates the surface.
    ///
    /// Shader or pipeline validation errors are returned as
    /// [`Error::ShaderCompilation`] instead of reaching the device's uncaptured
    /// error handler.
    pub fn new(context: &RenderContext, resolution: Resolution, falloff: Falloff) -> Result<Self> {
        let device = context.device();

        let surface_bytes = resolution.pixel_count() as u64 * size_of::<Colour>() as u64;
        let limit = u64::from(device.limits().max_storage_buffer_binding_size);
        if surface_bytes > limit {
            return Err(Error::SurfaceTooLarge {
                bytes: surface_bytes,
                limit,
            });
        }

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("field-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("field.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("field-bind-group-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("field-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("field-pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader_module,
            entry_point: "field",
        });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(Error::ShaderCompilation(error.to_string()));
        }
        debug!("field pipeline ready");

        let pixel_count = resolution.pixel_count() as u64;

        let surface = buffer::Builder::new(pixel_count)
            .with_label("surface")
            .with_usage(wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC)
            .create(device);

        let readback = buffer::Builder::new(pixel_count)
            .with_label("surface-readback")
            .with_usage(wgpu::BufferUsages::MAP_READ)
            .create(device);

        let parameters = Uniform::create(
            device,
            "parameters",
            RenderParameters::new(resolution, [0.0; 4], 1.0, 0),
        );
        let falloff = Uniform::create(device, "falloff", falloff);

        Ok(Self {
            resolution,
            pipeline,
            bind_group_layout,
            surface,
            readback,
            parameters,
            falloff,
            roots: None,
        })
    }

    /// Releases every device resource the renderer owns.
    pub fn destroy(self) {
        self.surface.destroy();
        self.readback.destroy();
        self.parameters.destroy();
        self.falloff.destroy();
        if let Some(roots) = self.roots {
            roots.destroy();
        }
    }

    /// Destroys the previous root buffer and uploads `roots` into a new one.
    fn upload_roots(&mut self, context: &RenderContext, roots: &RootSet) -> Buffer<Root> {
        if let Some(previous) = self.roots.take() {
            previous.destroy();
        }

        let contents = root_buffer_contents(roots);
        let buffer = buffer::Builder::from(&contents[..])
            .with_label("roots")
            .with_usage(wgpu::BufferUsages::STORAGE)
            .create(context.device());
        debug!(
            "root buffer recreated with {} elements ({} bytes)",
            buffer.len(),
            buffer.size_in_bytes()
        );

        buffer
    }
}

impl FieldRenderer for GpuRenderer {
    type Context = RenderContext;

    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn render(
        &mut self,
        context: &RenderContext,
        roots: &RootSet,
        colour: Colour,
        scale: f32,
    ) -> Result<Raster> {
        trace!("begin gpu render");

        let root_count = root_count(roots.len())?;
        let root_buffer = self.upload_roots(context, roots);
        self.parameters.write(
            context.queue(),
            RenderParameters::new(self.resolution, colour, scale, root_count),
        );

        let bind_group = context
            .device()
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("field-bind-group"),
                layout: &self.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: self.surface.binding_resource(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: root_buffer.binding_resource(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: self.parameters.binding_resource(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: self.falloff.binding_resource(),
                    },
                ],
            });

        let (x, y, z) = kernel::dispatch_size(self.resolution);
        debug!("dispatching {}x{}x{} workgroups for {} roots", x, y, z, root_count);

        let mut command_encoder =
            context
                .device()
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("field-commands"),
                });

        command_encoder.push_debug_group("field-pass");
        {
            let mut compute_pass =
                command_encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                    label: Some("field-pass"),
                });
            compute_pass.set_pipeline(&self.pipeline);
            compute_pass.set_bind_group(0, &bind_group, &[]);
            compute_pass.insert_debug_marker("field");
            compute_pass.dispatch_workgroups(x, y, z);
        }
        command_encoder.pop_debug_group();

        buffer::copy_buffer_to_buffer(
            &mut command_encoder,
            &self.surface,
            &self.readback,
            self.surface.len(),
        );

        let start = Instant::now();
        context.queue().submit([command_encoder.finish()]);
        self.roots = Some(root_buffer);
        let pixels = self.readback.read(context.device())?;
        info!(
            "field shader completed in {}ms",
            start.elapsed().as_millis()
        );

        trace!("end gpu render");

        Raster::from_pixels(self.resolution, pixels)
    }
}
