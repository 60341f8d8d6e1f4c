/*!
Typed `wgpu` buffers.

[`bytemuck`](https://docs.rs/bytemuck/latest/bytemuck/) casts the host records
in [`params`](super::params) to the bytes the field shader reads. A raw
`wgpu::Buffer` accepts any bytes, so the root buffer, the output surface and
its readback copy go through [`Buffer`], which remembers its element type and
counts copies in elements rather than bytes. The two uniform blocks go through
[`Uniform`], which holds exactly one record.
*/

use std::{marker::PhantomData, mem::size_of, sync::mpsc};

use wgpu::util::DeviceExt;

use crate::error::{Error, Result};

pub struct Buffer<A> {
    buffer: wgpu::Buffer,
    len: u64,
    phantom_data: PhantomData<A>,
}

impl<A: bytemuck::Pod> Buffer<A> {
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Number of `A`s the buffer holds.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn size_in_bytes(&self) -> u64 {
        self.len * size_of::<A>() as u64
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }

    /// Maps a `MAP_READ` buffer, waits for the device to get there, and copies
    /// the contents out. The buffer is unmapped again before returning.
    pub fn read(&self, device: &wgpu::Device) -> Result<Vec<A>> {
        let slice = self.buffer.slice(..);
        let (sender, receiver) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            sender.send(result).ok();
        });

        device.poll(wgpu::Maintain::Wait);
        receiver.recv().map_err(|_| Error::ReadbackDropped)??;

        let contents = bytemuck::cast_slice(&slice.get_mapped_range()).to_vec();
        self.buffer.unmap();
        Ok(contents)
    }

    pub fn destroy(self) {
        self.buffer.destroy()
    }
}

/// Records a copy of `len` elements from the start of `source` to the start
/// of `destination`.
pub fn copy_buffer_to_buffer<A: bytemuck::Pod>(
    command_encoder: &mut wgpu::CommandEncoder,
    source: &Buffer<A>,
    destination: &Buffer<A>,
    len: u64,
) {
    debug_assert!(len <= source.len() && len <= destination.len());
    command_encoder.copy_buffer_to_buffer(
        source.buffer(),
        0,
        destination.buffer(),
        0,
        len * size_of::<A>() as u64,
    )
}

enum Contents<'a> {
    Contents(&'a [u8]),
    Len(u64),
}

pub struct Builder<'a, A> {
    label: Option<&'a str>,
    contents: Contents<'a>,
    usage: wgpu::BufferUsages,
    phantom_data: PhantomData<A>,
}

impl<'a, A: bytemuck::Pod> From<&'a [A]> for Builder<'a, A> {
    fn from(value: &'a [A]) -> Self {
        Self {
            label: None,
            contents: Contents::Contents(bytemuck::cast_slice(value)),
            usage: wgpu::BufferUsages::COPY_DST,
            phantom_data: PhantomData,
        }
    }
}

impl<'a, A: bytemuck::Pod> Builder<'a, A> {
    /// An uninitialised buffer of `len` elements.
    pub fn new(len: u64) -> Self {
        Self {
            label: None,
            contents: Contents::Len(len),
            usage: wgpu::BufferUsages::COPY_DST,
            phantom_data: PhantomData,
        }
    }

    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_usage(mut self, usage: wgpu::BufferUsages) -> Self {
        self.usage |= usage;
        self
    }

    pub fn create(self, device: &wgpu::Device) -> Buffer<A> {
        let (buffer, len) = match self.contents {
            Contents::Contents(contents) => (
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: self.label,
                    contents,
                    usage: self.usage,
                }),
                (contents.len() / size_of::<A>()) as u64,
            ),
            Contents::Len(len) => (
                device.create_buffer(&wgpu::BufferDescriptor {
                    label: self.label,
                    size: len * size_of::<A>() as u64,
                    usage: self.usage,
                    mapped_at_creation: false,
                }),
                len,
            ),
        };

        Buffer {
            buffer,
            len,
            phantom_data: PhantomData,
        }
    }
}

/// A uniform buffer holding one `A`, rewritable through the queue.
pub struct Uniform<A> {
    buffer: wgpu::Buffer,
    phantom_data: PhantomData<A>,
}

impl<A: bytemuck::Pod> Uniform<A> {
    pub fn create(device: &wgpu::Device, label: &str, contents: A) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&contents),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            buffer,
            phantom_data: PhantomData,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, contents: A) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&contents));
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }

    pub fn destroy(self) {
        self.buffer.destroy()
    }
}
