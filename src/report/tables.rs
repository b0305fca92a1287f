use serde::Serialize;

use crate::color::{outcome_color, Rgb};
use crate::data::model::{
    ColumnKey, MeasurementTable, Phase, PhaseTables, ShotTables, View, CANONICAL_COLUMNS,
};

pub const TIMING_TITLE: &str = "Timing Table";

// ---------------------------------------------------------------------------
// Report table description
// ---------------------------------------------------------------------------

/// A label spanning `span` columns of the outer header row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderGroup {
    pub label: String,
    pub span: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderCell {
    pub text: String,
    pub color: Option<Rgb>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub label: String,
    pub cells: Vec<String>,
}

/// A raw table re-presented in canonical column order with coloured outcome
/// labels. Cell text is never altered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    pub outer_header: Vec<HeaderGroup>,
    pub inner_header: Vec<HeaderCell>,
    pub columns: Vec<ColumnKey>,
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewTable {
    pub view: View,
    pub heading: String,
    pub table: ReportTable,
}

/// Front- and side-view tables for one phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseCard {
    pub phase: Phase,
    pub title: String,
    /// Front view first, then side view.
    pub views: Vec<ViewTable>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingCard {
    pub title: String,
    pub table: ReportTable,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

pub fn assemble_table(raw: &MeasurementTable) -> ReportTable {
    let mut side_groups: Vec<HeaderGroup> = Vec::new();
    for key in CANONICAL_COLUMNS {
        match side_groups.last_mut() {
            Some(group) if group.label == key.side.label() => group.span += 1,
            _ => side_groups.push(HeaderGroup {
                label: key.side.label().to_string(),
                span: 1,
            }),
        }
    }
    let mut outer_header = vec![HeaderGroup {
        label: raw.side_caption.clone(),
        span: 1,
    }];
    outer_header.extend(side_groups);

    let mut inner_header = vec![HeaderCell {
        text: raw.metric_caption.clone(),
        color: None,
    }];
    inner_header.extend(CANONICAL_COLUMNS.iter().map(|key| HeaderCell {
        text: key.outcome.label().to_string(),
        color: Some(outcome_color(key.outcome)),
    }));

    let rows = raw
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| ReportRow {
            label: row.label.clone(),
            cells: CANONICAL_COLUMNS
                .iter()
                .map(|key| raw.cell(i, *key).unwrap_or_default().to_string())
                .collect(),
        })
        .collect();

    ReportTable {
        outer_header,
        inner_header,
        columns: CANONICAL_COLUMNS.to_vec(),
        rows,
    }
}

pub fn assemble_phase_card(tables: &PhaseTables) -> PhaseCard {
    PhaseCard {
        phase: tables.phase,
        title: tables.phase.title().to_string(),
        views: View::ALL
            .iter()
            .map(|view| ViewTable {
                view: *view,
                heading: view.heading().to_string(),
                table: assemble_table(tables.view(*view)),
            })
            .collect(),
    }
}

pub fn assemble_timing_card(timing: &MeasurementTable) -> TimingCard {
    TimingCard {
        title: TIMING_TITLE.to_string(),
        table: assemble_table(timing),
    }
}

/// Phase cards in `Phase::ALL` order, regardless of how the raw tables are
/// stored.
pub fn assemble_phase_cards(tables: &ShotTables) -> Vec<PhaseCard> {
    Phase::ALL
        .iter()
        .filter_map(|phase| tables.phases.iter().find(|p| p.phase == *phase))
        .map(assemble_phase_card)
        .collect()
}
