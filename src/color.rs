use palette::{Hsl, IntoColor, Srgb};
use serde::Serialize;

use crate::data::model::Outcome;

/// 8-bit sRGB colour, independent of any UI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// CSS `green`.
pub const MAKE_GREEN: Rgb = Rgb::new(0, 128, 0);
/// CSS `red`.
pub const MISS_RED: Rgb = Rgb::new(255, 0, 0);

/// Make is always drawn green, Miss always red.
pub fn outcome_color(outcome: Outcome) -> Rgb {
    match outcome {
        Outcome::Make => MAKE_GREEN,
        Outcome::Miss => MISS_RED,
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb::new(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}
