//! Derivation of per-shot-type reports from raw tables.
//!
//! ```text
//!  ShotTables ──► marker::derive_set_point ──► SetPointMarker
//!      │                                          │
//!      ├──► tables::assemble_*  ──► cards         │
//!      └──► curves::*_figure(s) ◄─────────────────┘
//!                     │
//!                     ▼
//!            DerivedReportBundle ──► project(ViewMode) ──► SignalView
//! ```

pub mod curves;
pub mod marker;
pub mod tables;

use serde::Serialize;
use thiserror::Error;

use crate::data::model::{ShotTables, ShotType};

use curves::{combined_figure, paired_figures, Figure, PairedFigure, SignalGroup};
use marker::{derive_set_point, SetPointMarker, TimingError};
use tables::{assemble_phase_cards, assemble_timing_card, PhaseCard, TimingCard};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    /// The shot type was excluded at load time.
    #[error("{shot} data could not be loaded: {reason}")]
    DatasetLoadFailure { shot: ShotType, reason: String },

    #[error("no report available for {shot}: {source}")]
    InvalidTimingData {
        shot: ShotType,
        #[source]
        source: TimingError,
    },

    #[error("no shot type selected")]
    MissingSelection,
}

/// Secondary selection choosing which signal group is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ViewMode {
    #[default]
    Kinematics,
    Timing,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Kinematics, ViewMode::Timing];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Kinematics => "Kinematics",
            ViewMode::Timing => "Timing",
        }
    }
}

/// Borrowed projection of a bundle for one view mode.
#[derive(Debug, Clone, Copy)]
pub struct SignalView<'a> {
    pub combined: &'a Figure,
    pub pairs: &'a [PairedFigure],
}

/// Everything rendered for one shot type. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedReportBundle {
    pub shot: ShotType,
    pub set_point: SetPointMarker,
    pub phase_cards: Vec<PhaseCard>,
    pub timing_card: TimingCard,
    pub kinematic_figure: Figure,
    pub timing_figure: Figure,
    pub angle_figures: Vec<PairedFigure>,
    pub velocity_figures: Vec<PairedFigure>,
}

impl DerivedReportBundle {
    /// Derive the full bundle, or nothing if the timing data is unusable.
    pub fn derive(shot: ShotType, tables: &ShotTables) -> Result<Self, ReportError> {
        let set_point = derive_set_point(&tables.timing)
            .map_err(|source| ReportError::InvalidTimingData { shot, source })?;

        Ok(Self {
            shot,
            set_point,
            phase_cards: assemble_phase_cards(tables),
            timing_card: assemble_timing_card(&tables.timing),
            kinematic_figure: combined_figure(
                shot,
                SignalGroup::Angles,
                &tables.signals_make,
                &set_point,
            ),
            timing_figure: combined_figure(
                shot,
                SignalGroup::Velocities,
                &tables.signals_make,
                &set_point,
            ),
            angle_figures: paired_figures(shot, SignalGroup::Angles, tables, &set_point),
            velocity_figures: paired_figures(shot, SignalGroup::Velocities, tables, &set_point),
        })
    }

    pub fn project(&self, mode: ViewMode) -> SignalView<'_> {
        match mode {
            ViewMode::Kinematics => SignalView {
                combined: &self.kinematic_figure,
                pairs: &self.angle_figures,
            },
            ViewMode::Timing => SignalView {
                combined: &self.timing_figure,
                pairs: &self.velocity_figures,
            },
        }
    }
}
