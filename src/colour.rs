//! Colouring layers by degree.

use crate::render::Colour;

/// Hue of the first degree, in degrees.
pub const HUE_OFFSET: f32 = 100.0;
pub const SATURATION: f32 = 0.5;
pub const LIGHTNESS: f32 = 0.3;

/// The colour for `degree` out of a run over degrees `1..degree_count`.
///
/// Hues are spread evenly around the wheel starting at [`HUE_OFFSET`], at a
/// fixed saturation and lightness.
pub fn degree_colour(degree: usize, degree_count: usize) -> Colour {
    let span = degree_count.saturating_sub(1).max(1) as f32;
    let hue = ((degree.saturating_sub(1)) as f32 / span * 360.0 + HUE_OFFSET) % 360.0;
    let [r, g, b] = hsl_to_rgb(hue, SATURATION, LIGHTNESS);
    [r, g, b, 1.0]
}

/// `hue` in degrees, `saturation` and `lightness` in `0.0..=1.0`.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    [r + m, g + m, b + m]
}
