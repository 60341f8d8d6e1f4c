//! Additive blending of rendered layers.

use log::trace;
use rayon::prelude::{
    IndexedParallelIterator, IntoParallelRefIterator, IntoParallelRefMutIterator, ParallelIterator,
};

use crate::{
    error::{Error, Result},
    raster::Raster,
    render::Resolution,
};

/// The largest value a channel can hold.
pub const CHANNEL_MAX: f32 = 1.0;

/// Sums layers into one raster, clamping each channel at [`CHANNEL_MAX`].
///
/// Nothing is normalised: every extra layer can only make the image brighter.
/// The raster starts as opaque black, so adding a layer whose colour channels
/// are all zero leaves it untouched.
pub struct Compositor {
    raster: Raster,
}

impl Compositor {
    pub fn new(resolution: Resolution) -> Self {
        Self {
            raster: Raster::filled(resolution, [0.0, 0.0, 0.0, CHANNEL_MAX]),
        }
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn blend(&mut self, layer: &Raster) -> Result<()> {
        let (expected, found) = (self.raster.resolution(), layer.resolution());
        if expected != found {
            return Err(Error::RasterSize {
                expected: (expected.width, expected.height),
                found: (found.width, found.height),
            });
        }

        trace!("begin blend");
        self.raster
            .pixels_mut()
            .par_iter_mut()
            .zip(layer.pixels().par_iter())
            .for_each(|(accumulated, added)| {
                for (channel, value) in accumulated.iter_mut().zip(added) {
                    *channel = saturating_add(*channel, *value);
                }
            });
        trace!("end blend");

        Ok(())
    }

    /// The final raster, ready for [`Raster::save`].
    pub fn finish(self) -> Raster {
        self.raster
    }
}

/// `min(a + b, CHANNEL_MAX)`, where anything that isn't a number adds nothing.
fn saturating_add(accumulated: f32, value: f32) -> f32 {
    if value.is_nan() {
        return accumulated;
    }
    (accumulated + value).min(CHANNEL_MAX)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn starts_opaque_black() {
        let compositor = Compositor::new(Resolution::new(4, 3));
        assert!(compositor
            .raster()
            .pixels()
            .iter()
            .all(|p| *p == [0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn blending_saturates_at_channel_max() {
        let resolution = Resolution::new(3, 2);
        let layer = Raster::filled(resolution, [0.3, 0.05, 0.0, 1.0]);
        let mut compositor = Compositor::new(resolution);

        for k in 1..=5 {
            compositor.blend(&layer).unwrap();
            let pixel = compositor.raster().pixel(1, 1);
            assert_abs_diff_eq!(pixel[0], (k as f32 * 0.3).min(CHANNEL_MAX), epsilon = 1e-6);
            assert_abs_diff_eq!(pixel[1], k as f32 * 0.05, epsilon = 1e-6);
            assert_eq!(pixel[2], 0.0);
            assert_eq!(pixel[3], CHANNEL_MAX);
        }
    }

    #[test]
    fn black_layer_changes_nothing() {
        let resolution = Resolution::new(5, 5);
        let mut compositor = Compositor::new(resolution);
        compositor
            .blend(&Raster::filled(resolution, [0.25, 0.5, 0.75, 1.0]))
            .unwrap();
        let before = compositor.raster().clone();

        compositor
            .blend(&Raster::filled(resolution, [0.0, 0.0, 0.0, 1.0]))
            .unwrap();
        assert_eq!(compositor.finish(), before);
    }

    #[test]
    fn infinite_channels_saturate() {
        let resolution = Resolution::new(1, 1);
        let mut compositor = Compositor::new(resolution);
        let layer =
            Raster::from_pixels(resolution, vec![[f32::INFINITY, f32::NAN, 0.5, 1.0]]).unwrap();
        compositor.blend(&layer).unwrap();
        assert_eq!(compositor.raster().pixel(0, 0), [1.0, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn rejects_mismatched_layer() {
        let mut compositor = Compositor::new(Resolution::new(4, 4));
        let result = compositor.blend(&Raster::filled(Resolution::new(4, 3), [0.0; 4]));
        assert!(matches!(
            result,
            Err(Error::RasterSize {
                expected: (4, 4),
                found: (4, 3)
            })
        ));
    }
}
