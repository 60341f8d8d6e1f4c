//! The per-pixel field function, shared by both backends.
//!
//! [`shade`] is the host copy of `field.wgsl#field`. The two must stay in step;
//! `gpu::tests` compares them when an adapter is present.

use super::params::{Colour, Falloff, RenderParameters, Resolution, Root};

/// Corresponds to `@workgroup_size(16, 16, 1)` in `field.wgsl`.
pub const TILE_SIZE: u32 = 16;

/**
Dispatch size for `field.wgsl#field`.

Each workgroup covers one `TILE_SIZE` x `TILE_SIZE` tile of the output, so the
grid is the resolution divided by the tile size, rounded up. Tiles on the right
and bottom edges can hang over the image; invocations outside it return without
writing.
*/
pub fn dispatch_size(resolution: Resolution) -> (u32, u32, u32) {
    (
        (resolution.width + TILE_SIZE - 1) / TILE_SIZE,
        (resolution.height + TILE_SIZE - 1) / TILE_SIZE,
        1,
    )
}

/// Maps a pixel to the complex plane.
///
/// The vertical axis spans `[-scale, scale]` and the horizontal axis is
/// stretched by the aspect ratio. Row 0 is the top of the image.
pub fn pixel_coordinate(x: u32, y: u32, parameters: &RenderParameters) -> [f32; 2] {
    let [width, height] = parameters.resolution;
    let row = height - 1.0 - y as f32;
    [
        (x as f32 / height - 0.5 * width / height) * 2.0 * parameters.scale,
        (row / height - 0.5) * 2.0 * parameters.scale,
    ]
}

/// Distance from `point` to the closest of `roots`, `None` if there are none.
pub fn min_distance(point: [f32; 2], roots: &[Root]) -> Option<f32> {
    roots
        .iter()
        .map(|root| {
            let dx = point[0] - root.real;
            let dy = point[1] - root.imaginary;
            (dx * dx + dy * dy).sqrt()
        })
        .reduce(f32::min)
}

/// The colour of pixel `(x, y)`.
///
/// Only the first `parameters.root_count` entries of `roots` are read.
pub fn shade(
    x: u32,
    y: u32,
    parameters: &RenderParameters,
    falloff: &Falloff,
    roots: &[Root],
) -> Colour {
    let count = (parameters.root_count as usize).min(roots.len());
    let point = pixel_coordinate(x, y, parameters);
    let intensity = falloff.intensity(min_distance(point, &roots[..count]));
    let [r, g, b, _] = parameters.colour;
    [
        r * intensity / falloff.divisor,
        g * intensity / falloff.divisor,
        b * intensity / falloff.divisor,
        1.0,
    ]
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn parameters(width: u32, height: u32, root_count: u32) -> RenderParameters {
        RenderParameters::new(
            Resolution::new(width, height),
            [1.0, 0.5, 0.25, 1.0],
            2.0,
            root_count,
        )
    }

    #[test]
    fn dispatch_covers_partial_tiles() {
        assert_eq!(dispatch_size(Resolution::new(16, 16)), (1, 1, 1));
        assert_eq!(dispatch_size(Resolution::new(17, 15)), (2, 1, 1));
        assert_eq!(dispatch_size(Resolution::new(4096, 2160)), (256, 135, 1));
    }

    #[test]
    fn coordinates_are_centred_and_aspect_corrected() {
        let p = parameters(200, 100, 0);
        let [u, v] = pixel_coordinate(100, 50, &p);
        assert_abs_diff_eq!(u, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(v, -0.04, epsilon = 1e-6);

        // left edge is -aspect * scale, top row is close to +scale
        let [u, v] = pixel_coordinate(0, 0, &p);
        assert_abs_diff_eq!(u, -4.0, epsilon = 1e-6);
        assert_abs_diff_eq!(v, 1.96, epsilon = 1e-6);
    }

    #[test]
    fn no_roots_is_black() {
        let p = parameters(8, 8, 0);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(shade(x, y, &p, &Falloff::default(), &[]), [0.0, 0.0, 0.0, 1.0]);
            }
        }
    }

    #[test]
    fn padding_roots_beyond_count_are_ignored() {
        let p = parameters(8, 8, 0);
        let colour = shade(3, 3, &p, &Falloff::default(), &[Root::ZERO]);
        assert_eq!(colour, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn brightness_follows_nearest_root() {
        let p = parameters(64, 64, 2);
        let near = pixel_coordinate(10, 10, &p);
        let roots = [
            Root {
                real: near[0],
                imaginary: near[1] + 0.1,
            },
            Root {
                real: 100.0,
                imaginary: 100.0,
            },
        ];
        let falloff = Falloff::default();
        let colour = shade(10, 10, &p, &falloff, &roots);
        let expected = falloff.intensity(Some(0.1)) / falloff.divisor;
        assert_abs_diff_eq!(colour[0], expected, epsilon = 1e-3);
        assert_abs_diff_eq!(colour[1], 0.5 * expected, epsilon = 1e-3);
        assert_abs_diff_eq!(colour[2], 0.25 * expected, epsilon = 1e-3);
        assert_eq!(colour[3], 1.0);

        let far = shade(60, 60, &p, &falloff, &roots);
        assert!(far[0] < colour[0]);
    }

    #[test]
    fn pixel_on_a_root_stays_finite() {
        let p = parameters(16, 16, 1);
        let [real, imaginary] = pixel_coordinate(4, 4, &p);
        let colour = shade(4, 4, &p, &Falloff::default(), &[Root { real, imaginary }]);
        assert!(colour.iter().all(|c| c.is_finite()));
    }
}
