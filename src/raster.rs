//! Floating point RGBA images.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::{
    error::{Error, Result},
    render::{Colour, Resolution},
};

/// Row-major RGBA pixels, row 0 at the top.
///
/// Used both for the layer a renderer returns and for the accumulated output.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    resolution: Resolution,
    pixels: Vec<Colour>,
}

impl Raster {
    pub fn filled(resolution: Resolution, colour: Colour) -> Self {
        Self {
            resolution,
            pixels: vec![colour; resolution.pixel_count()],
        }
    }

    pub fn from_pixels(resolution: Resolution, pixels: Vec<Colour>) -> Result<Self> {
        if pixels.len() != resolution.pixel_count() {
            return Err(Error::PixelCount {
                expected: resolution.pixel_count(),
                found: pixels.len(),
            });
        }
        Ok(Self { resolution, pixels })
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn pixels(&self) -> &[Colour] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Colour] {
        &mut self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Colour {
        self.pixels[y as usize * self.resolution.width as usize + x as usize]
    }

    /// Quantises every channel with `clamp(v * 255, 0, 255)`.
    pub fn to_rgba8(&self) -> RgbaImage {
        RgbaImage::from_fn(self.resolution.width, self.resolution.height, |x, y| {
            Rgba(self.pixel(x, y).map(|channel| (channel * 255.0).clamp(0.0, 255.0) as u8))
        })
    }

    /// Encodes the raster as 8-bit RGBA, format chosen by the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_rgba8().save(path)?;
        Ok(())
    }
}
