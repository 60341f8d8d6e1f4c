//! Host-side field renderer.

use log::{debug, trace};
use rayon::{
    prelude::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
    ThreadPool,
};

use super::{
    kernel::{self, TILE_SIZE},
    params::{Colour, Falloff, RenderParameters, Resolution, Root},
    root_buffer_contents, root_count, FieldRenderer,
};
use crate::{accumulate::RootSet, error::Result, raster::Raster};

/// Runs [`kernel::shade`] for every pixel on a rayon pool.
///
/// Work is split into bands of `TILE_SIZE` rows, each band is walked one
/// `TILE_SIZE` x `TILE_SIZE` tile at a time, mirroring the GPU workgroups.
pub struct CpuRenderer {
    resolution: Resolution,
    falloff: Falloff,
    surface: Vec<Colour>,
    roots: Vec<Root>,
}

impl CpuRenderer {
    pub fn new(resolution: Resolution, falloff: Falloff) -> Self {
        Self {
            resolution,
            falloff,
            surface: vec![[0.0; 4]; resolution.pixel_count()],
            roots: Vec::new(),
        }
    }
}

impl FieldRenderer for CpuRenderer {
    type Context = ThreadPool;

    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn render(
        &mut self,
        pool: &ThreadPool,
        roots: &RootSet,
        colour: Colour,
        scale: f32,
    ) -> Result<Raster> {
        trace!("begin cpu render");

        let root_count = root_count(roots.len())?;
        self.roots = root_buffer_contents(roots);
        let parameters = RenderParameters::new(self.resolution, colour, scale, root_count);
        debug!(
            "rendering {} roots at {}x{} on {} threads",
            roots.len(),
            self.resolution.width,
            self.resolution.height,
            pool.current_num_threads()
        );

        let width = self.resolution.width as usize;
        let band_len = (width * TILE_SIZE as usize).max(1);
        let (falloff, roots) = (&self.falloff, &self.roots);

        pool.install(|| {
            self.surface
                .par_chunks_mut(band_len)
                .enumerate()
                .for_each(|(band, pixels)| {
                    let band_height = pixels.len() / width;
                    for tile_x in (0..width).step_by(TILE_SIZE as usize) {
                        let tile_end = (tile_x + TILE_SIZE as usize).min(width);
                        for local_y in 0..band_height {
                            let y = (band * TILE_SIZE as usize + local_y) as u32;
                            for x in tile_x..tile_end {
                                pixels[local_y * width + x] =
                                    kernel::shade(x as u32, y, &parameters, falloff, roots);
                            }
                        }
                    }
                });
        });

        trace!("end cpu render");

        Raster::from_pixels(self.resolution, self.surface.clone())
    }
}
