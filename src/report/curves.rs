use std::ops::Range;

use serde::Serialize;

use crate::color::{generate_palette, outcome_color, Rgb};
use crate::data::model::{Outcome, ShotTables, ShotType, SignalTable};

use super::marker::SetPointMarker;

pub const ANGLE_SIGNALS: [&str; 7] = [
    "Right Wrist Angle",
    "Right Elbow Angle",
    "Right Shoulder Angle",
    "Torso Angle",
    "Right Hip Angle",
    "Right Knee Angle",
    "Right Ankle Angle",
];

pub const VELOCITY_SIGNALS: [&str; 6] = [
    "Right Wrist Velocity",
    "Right Elbow Velocity",
    "Right Shoulder Velocity",
    "Torso Velocity",
    "Right Hip Velocity",
    "Right Knee Velocity",
];

pub const X_LABEL: &str = "Percent Shot %";
pub const X_GRID_STEP: f64 = 5.0;
pub const LEGEND_TITLE: &str = "Signal:";

const COMBINED_MARKER_WIDTH: f32 = 3.0;
const PAIRED_MARKER_WIDTH: f32 = 2.0;

/// Which block of signal-table rows a figure draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SignalGroup {
    Angles,
    Velocities,
}

impl SignalGroup {
    /// Rows 0–6 are angles, rows 7–12 velocities.
    pub fn rows(self) -> Range<usize> {
        match self {
            SignalGroup::Angles => 0..ANGLE_SIGNALS.len(),
            SignalGroup::Velocities => {
                ANGLE_SIGNALS.len()..ANGLE_SIGNALS.len() + VELOCITY_SIGNALS.len()
            }
        }
    }

    pub fn names(self) -> &'static [&'static str] {
        match self {
            SignalGroup::Angles => &ANGLE_SIGNALS,
            SignalGroup::Velocities => &VELOCITY_SIGNALS,
        }
    }

    pub fn y_label(self) -> &'static str {
        match self {
            SignalGroup::Angles => "Degrees \u{00B0}",
            SignalGroup::Velocities => "Velocity m/s",
        }
    }

    fn title(self, shot: ShotType) -> String {
        match self {
            SignalGroup::Angles => format!("{shot} Kinematic Signals"),
            SignalGroup::Velocities => format!("{shot} Timing Signals"),
        }
    }
}

// ---------------------------------------------------------------------------
// Figure description
// ---------------------------------------------------------------------------

/// One named signal over percent-of-shot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    pub name: String,
    pub shot: ShotType,
    pub outcome: Outcome,
    pub color: Rgb,
    /// `[percent, value]` pairs, percent 0..=100.
    pub points: Vec<[f64; 2]>,
}

/// Vertical dashed line at a percent-of-shot position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub x: f64,
    pub outcome: Outcome,
    pub color: Rgb,
    pub width: f32,
    pub dashed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub x_grid_step: f64,
    pub curves: Vec<Curve>,
    pub markers: Vec<Marker>,
    pub show_legend: bool,
    pub legend_title: Option<String>,
}

/// Make and miss sub-plots for a single signal, shown side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairedFigure {
    pub signal: String,
    pub make: Figure,
    pub miss: Figure,
}

impl PairedFigure {
    pub fn subplot(&self, outcome: Outcome) -> &Figure {
        match outcome {
            Outcome::Make => &self.make,
            Outcome::Miss => &self.miss,
        }
    }

    /// Sub-plot heading: signal name plus the outcome word in its colour.
    pub fn heading(&self, outcome: Outcome) -> (&str, &'static str, Rgb) {
        (&self.signal, outcome.label(), outcome_color(outcome))
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn curve(
    name: &str,
    shot: ShotType,
    outcome: Outcome,
    color: Rgb,
    signals: &SignalTable,
    row: usize,
) -> Curve {
    Curve {
        name: name.to_string(),
        shot,
        outcome,
        color,
        points: signals
            .row(row)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(pct, value)| [pct as f64, *value])
            .collect(),
    }
}

fn marker(marker: &SetPointMarker, outcome: Outcome, width: f32) -> Marker {
    Marker {
        x: marker.percent(outcome),
        outcome,
        color: outcome_color(outcome),
        width,
        dashed: true,
    }
}

/// Every signal of `group` from the make-outcome table on one set of axes,
/// with both set-point markers and a legend.
pub fn combined_figure(
    shot: ShotType,
    group: SignalGroup,
    signals_make: &SignalTable,
    set_point: &SetPointMarker,
) -> Figure {
    let names = group.names();
    let palette = generate_palette(names.len());
    let curves = group
        .rows()
        .zip(names.iter())
        .zip(palette)
        .map(|((row, name), color)| curve(name, shot, Outcome::Make, color, signals_make, row))
        .collect();

    Figure {
        title: Some(group.title(shot)),
        x_label: X_LABEL.to_string(),
        y_label: group.y_label().to_string(),
        x_grid_step: X_GRID_STEP,
        curves,
        markers: Outcome::ALL
            .iter()
            .map(|outcome| marker(set_point, *outcome, COMBINED_MARKER_WIDTH))
            .collect(),
        show_legend: true,
        legend_title: Some(LEGEND_TITLE.to_string()),
    }
}

fn subplot(
    shot: ShotType,
    group: SignalGroup,
    name: &str,
    row: usize,
    outcome: Outcome,
    tables: &ShotTables,
    set_point: &SetPointMarker,
) -> Figure {
    let color = outcome_color(outcome);
    Figure {
        title: None,
        x_label: X_LABEL.to_string(),
        y_label: group.y_label().to_string(),
        x_grid_step: X_GRID_STEP,
        curves: vec![curve(name, shot, outcome, color, tables.signals(outcome), row)],
        markers: vec![marker(set_point, outcome, PAIRED_MARKER_WIDTH)],
        show_legend: false,
        legend_title: None,
    }
}

/// One make/miss pair per signal of `group`, in row order.
pub fn paired_figures(
    shot: ShotType,
    group: SignalGroup,
    tables: &ShotTables,
    set_point: &SetPointMarker,
) -> Vec<PairedFigure> {
    group
        .rows()
        .zip(group.names().iter())
        .map(|(row, name)| PairedFigure {
            signal: name.to_string(),
            make: subplot(shot, group, name, row, Outcome::Make, tables, set_point),
            miss: subplot(shot, group, name, row, Outcome::Miss, tables, set_point),
        })
        .collect()
}
