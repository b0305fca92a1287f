pub mod panels;
pub mod plot;

use eframe::egui::Color32;

use crate::color::Rgb;

pub fn color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}
