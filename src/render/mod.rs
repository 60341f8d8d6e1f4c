//! Rendering a root set as a distance field.
//!
//! Two backends draw the same picture: [`GpuRenderer`] runs `field.wgsl` through
//! `wgpu`, [`CpuRenderer`] runs [`kernel::shade`] on a rayon pool. Both keep
//! one surface for their lifetime and overwrite every pixel of it on each call,
//! so a returned layer never contains anything from an earlier call.

pub mod buffer;
pub mod context;
pub mod cpu;
pub mod gpu;
pub mod kernel;
pub mod params;

pub use context::RenderContext;
pub use cpu::CpuRenderer;
pub use gpu::GpuRenderer;
pub use params::{Colour, Falloff, RenderParameters, Resolution, Root};

use crate::{
    accumulate::RootSet,
    error::{Error, Result},
    raster::Raster,
};

pub trait FieldRenderer {
    /// What the renderer executes on, created once by the caller and passed to
    /// every call.
    type Context;

    fn resolution(&self) -> Resolution;

    /// Draws one layer. Blocks until the whole surface has been written and
    /// read back.
    fn render(
        &mut self,
        context: &Self::Context,
        roots: &RootSet,
        colour: Colour,
        scale: f32,
    ) -> Result<Raster>;
}

/// The root buffer contents for `roots`.
///
/// Never empty: bindings can't be zero-sized, so an empty set is padded with
/// one root that `root_count = 0` keeps the kernel from reading.
pub(crate) fn root_buffer_contents(roots: &RootSet) -> Vec<Root> {
    if roots.is_empty() {
        vec![Root::ZERO]
    } else {
        roots.iter().map(Root::from).collect()
    }
}

/// The `root_count` field for a set of `len` roots.
pub(crate) fn root_count(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::TooManyRoots { count: len })
}
