//! Host mirrors of the records `field.wgsl` reads.
//!
//! Field order and padding follow WGSL's uniform layout rules. A mismatch does
//! not fail anywhere, it just renders garbage, so the sizes are pinned by tests.

use bytemuck::{Pod, Zeroable};
use num::complex::Complex64;

/// RGBA, each channel in `0.0..=1.0`.
pub type Colour = [f32; 4];

#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// `field.wgsl#Parameters`, 48 bytes:
///
/// | offset | field |
/// |---|---|
/// | 0 | `resolution: vec2<f32>` |
/// | 16 | `colour: vec4<f32>` |
/// | 32 | `scale: f32` |
/// | 36 | `root_count: u32` |
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct RenderParameters {
    pub resolution: [f32; 2],
    _padding: [f32; 2],
    pub colour: Colour,
    pub scale: f32,
    pub root_count: u32,
    _tail: [u32; 2],
}

impl RenderParameters {
    pub fn new(resolution: Resolution, colour: Colour, scale: f32, root_count: u32) -> Self {
        Self {
            resolution: [resolution.width as f32, resolution.height as f32],
            _padding: [0.0; 2],
            colour,
            scale,
            root_count,
            _tail: [0; 2],
        }
    }
}

pub const DEFAULT_FALLOFF_NUMERATOR: f32 = 1.0;
pub const DEFAULT_FALLOFF_DISTANCE_SCALE: f32 = 50.0;
pub const DEFAULT_FALLOFF_DIVISOR: f32 = 14.0;

/// Smallest denominator [`Falloff::intensity`] divides by, so a pixel sitting
/// exactly on a root stays finite.
pub const MIN_FALLOFF_DENOMINATOR: f32 = f32::MIN_POSITIVE;

/// `field.wgsl#Falloff`: intensity is `numerator / (distance_scale * d)` and
/// the output colour is `colour.rgb * intensity / divisor`.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct Falloff {
    pub numerator: f32,
    pub distance_scale: f32,
    pub divisor: f32,
    _padding: f32,
}

impl Falloff {
    pub fn new(numerator: f32, distance_scale: f32, divisor: f32) -> Self {
        Self {
            numerator,
            distance_scale,
            divisor,
            _padding: 0.0,
        }
    }

    /// `None` stands for "no roots", which has zero intensity.
    pub fn intensity(&self, min_distance: Option<f32>) -> f32 {
        match min_distance {
            Some(distance) => {
                self.numerator / (self.distance_scale * distance).max(MIN_FALLOFF_DENOMINATOR)
            }
            None => 0.0,
        }
    }
}

impl Default for Falloff {
    fn default() -> Self {
        Self::new(
            DEFAULT_FALLOFF_NUMERATOR,
            DEFAULT_FALLOFF_DISTANCE_SCALE,
            DEFAULT_FALLOFF_DIVISOR,
        )
    }
}

/// One element of `field.wgsl#roots`.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct Root {
    pub real: f32,
    pub imaginary: f32,
}

impl Root {
    pub const ZERO: Self = Root {
        real: 0.0,
        imaginary: 0.0,
    };
}

impl From<&Complex64> for Root {
    fn from(value: &Complex64) -> Self {
        Self {
            real: value.re as f32,
            imaginary: value.im as f32,
        }
    }
}
