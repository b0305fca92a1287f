use eframe::egui::{self, RichText, Ui};
use egui_plot::{uniform_grid_spacer, Legend, Line, LineStyle, Plot, PlotPoints, VLine};

use crate::data::model::Outcome;
use crate::report::curves::{Figure, PairedFigure};

use super::color32;

pub const COMBINED_HEIGHT: f32 = 360.0;
pub const PAIRED_HEIGHT: f32 = 240.0;

// ---------------------------------------------------------------------------
// Figure rendering
// ---------------------------------------------------------------------------

/// Draw one figure description with egui_plot.
pub fn figure_plot(ui: &mut Ui, id: impl std::hash::Hash, figure: &Figure, height: f32) {
    if let Some(title) = &figure.title {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.heading(title);
        });
    }
    if figure.show_legend {
        if let Some(legend_title) = &figure.legend_title {
            ui.label(RichText::new(legend_title).small());
        }
    }

    let step = figure.x_grid_step;
    let mut plot = Plot::new(id)
        .height(height)
        .x_axis_label(figure.x_label.clone())
        .y_axis_label(figure.y_label.clone())
        .include_x(0.0)
        .include_x(100.0)
        .x_grid_spacer(uniform_grid_spacer(move |_| [step, step * 2.0, step * 10.0]))
        .allow_scroll(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true);
    if figure.show_legend {
        plot = plot.legend(Legend::default());
    }

    plot.show(ui, |plot_ui| {
        for curve in &figure.curves {
            let points: PlotPoints = curve.points.iter().copied().collect();
            plot_ui.line(
                Line::new(points)
                    .name(&curve.name)
                    .color(color32(curve.color))
                    .width(1.5),
            );
        }
        for marker in &figure.markers {
            let mut line = VLine::new(marker.x)
                .color(color32(marker.color))
                .width(marker.width);
            if marker.dashed {
                line = line.style(LineStyle::dashed_loose());
            }
            plot_ui.vline(line);
        }
    });
}

/// Make sub-plot on the left, miss sub-plot on the right.
pub fn paired_plot(ui: &mut Ui, id: &str, pair: &PairedFigure) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.columns(2, |cols| {
            for (col, outcome) in cols.iter_mut().zip(Outcome::ALL) {
                let (signal, word, color) = pair.heading(outcome);
                col.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new(signal).strong().size(16.0));
                    ui.label(RichText::new(word).strong().size(16.0).color(color32(color)));
                });
                figure_plot(
                    col,
                    format!("{id}_{}", outcome.label()),
                    pair.subplot(outcome),
                    PAIRED_HEIGHT,
                );
            }
        });
    });
}
