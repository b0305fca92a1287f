use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of data columns in every tabular (phase / timing) resource.
pub const DATA_COLUMNS: usize = 4;

/// Percent-of-shot columns in a signal table: 0..=100.
pub const PERCENT_COLUMNS: usize = 101;

/// Rows in a signal table: 7 angle signals followed by 6 velocity signals.
pub const SIGNAL_ROWS: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseLabelError {
    kind: &'static str,
    value: String,
}

impl ParseLabelError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// ShotType
// ---------------------------------------------------------------------------

/// One of the four tracked shot categories.
///
/// Ordering follows declaration order, which is also the order shot types are
/// loaded and offered for selection.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ShotType {
    #[serde(rename = "Three", alias = "ThreePoint")]
    ThreePoint,
    #[default]
    Set,
    Jumper,
    #[serde(rename = "Free", alias = "FreeThrow")]
    FreeThrow,
}

impl ShotType {
    pub const ALL: [ShotType; 4] = [
        ShotType::ThreePoint,
        ShotType::Set,
        ShotType::Jumper,
        ShotType::FreeThrow,
    ];

    /// Short label used for selection buttons, figure titles and as the
    /// resource directory name.
    pub fn label(self) -> &'static str {
        match self {
            ShotType::ThreePoint => "Three",
            ShotType::Set => "Set",
            ShotType::Jumper => "Jumper",
            ShotType::FreeThrow => "Free",
        }
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShotType {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "three" | "threepoint" | "three-point" | "three_point" => Ok(ShotType::ThreePoint),
            "set" => Ok(ShotType::Set),
            "jumper" => Ok(ShotType::Jumper),
            "free" | "freethrow" | "free-throw" | "free_throw" => Ok(ShotType::FreeThrow),
            _ => Err(ParseLabelError::new("shot type", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Phase / View
// ---------------------------------------------------------------------------

/// A discrete moment in the shooting motion at which measurements are taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Phase {
    StartOfShot,
    SetPoint,
    BallRelease,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::StartOfShot, Phase::SetPoint, Phase::BallRelease];

    /// Abbreviation used in resource names (`SS_front`, `SP_side`, ...).
    pub fn code(self) -> &'static str {
        match self {
            Phase::StartOfShot => "SS",
            Phase::SetPoint => "SP",
            Phase::BallRelease => "BR",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Phase::StartOfShot => "Start of Shot (SS)",
            Phase::SetPoint => "Set Point (SP)",
            Phase::BallRelease => "Ball Release (BR)",
        }
    }
}

/// Camera view a phase table was measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum View {
    Front,
    Side,
}

impl View {
    /// Front precedes Side everywhere a pair is shown.
    pub const ALL: [View; 2] = [View::Front, View::Side];

    pub fn suffix(self) -> &'static str {
        match self {
            View::Front => "front",
            View::Side => "side",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            View::Front => "Front View",
            View::Side => "Side View",
        }
    }
}

// ---------------------------------------------------------------------------
// Two-level column header
// ---------------------------------------------------------------------------

/// Outer header level: which side of the body a column describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SideCategory {
    Shooting,
    NonShooting,
}

impl SideCategory {
    pub fn label(self) -> &'static str {
        match self {
            SideCategory::Shooting => "Shooting",
            SideCategory::NonShooting => "Non-shooting",
        }
    }
}

impl FromStr for SideCategory {
    type Err = ParseLabelError;

    /// Accepts `Shooting`, `Non-shooting`, optionally suffixed with ` Side`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let bare = lower.strip_suffix("side").unwrap_or(&lower).trim();
        match bare {
            "shooting" => Ok(SideCategory::Shooting),
            "non-shooting" | "non shooting" | "nonshooting" | "non_shooting" => {
                Ok(SideCategory::NonShooting)
            }
            _ => Err(ParseLabelError::new("side category", s)),
        }
    }
}

/// Inner header level: whether the shot went in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Outcome {
    Make,
    Miss,
}

impl Outcome {
    pub const ALL: [Outcome; 2] = [Outcome::Make, Outcome::Miss];

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Make => "Make",
            Outcome::Miss => "Miss",
        }
    }
}

impl FromStr for Outcome {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "make" => Ok(Outcome::Make),
            "miss" => Ok(Outcome::Miss),
            _ => Err(ParseLabelError::new("outcome", s)),
        }
    }
}

/// Structural address of a data column. Columns are always resolved by
/// equality on this key, never by raw position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ColumnKey {
    pub side: SideCategory,
    pub outcome: Outcome,
}

impl ColumnKey {
    pub const fn new(side: SideCategory, outcome: Outcome) -> Self {
        Self { side, outcome }
    }
}

/// Report column order.
pub const CANONICAL_COLUMNS: [ColumnKey; DATA_COLUMNS] = [
    ColumnKey::new(SideCategory::Shooting, Outcome::Make),
    ColumnKey::new(SideCategory::Shooting, Outcome::Miss),
    ColumnKey::new(SideCategory::NonShooting, Outcome::Make),
    ColumnKey::new(SideCategory::NonShooting, Outcome::Miss),
];

// ---------------------------------------------------------------------------
// Raw tables
// ---------------------------------------------------------------------------

/// One labelled row of a phase or timing table. Cells keep their source text.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    pub label: String,
    pub cells: Vec<String>,
}

/// A phase or timing table with a two-level header over four data columns.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementTable {
    /// Caption of the label column on the outer header row (`Side`).
    pub side_caption: String,
    /// Caption of the label column on the inner header row (`Shot Metric`).
    pub metric_caption: String,
    /// Column keys in raw source order.
    pub columns: Vec<ColumnKey>,
    pub rows: Vec<MeasurementRow>,
}

impl MeasurementTable {
    pub fn column_index(&self, key: ColumnKey) -> Option<usize> {
        self.columns.iter().position(|c| *c == key)
    }

    pub fn cell(&self, row: usize, key: ColumnKey) -> Option<&str> {
        let col = self.column_index(key)?;
        self.rows.get(row)?.cells.get(col).map(String::as_str)
    }
}

/// Signals sampled over percent-of-shot: `SIGNAL_ROWS` × `PERCENT_COLUMNS`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalTable {
    pub rows: Vec<Vec<f64>>,
}

impl SignalTable {
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }
}

/// Front and side tables for one phase.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTables {
    pub phase: Phase,
    pub front: MeasurementTable,
    pub side: MeasurementTable,
}

impl PhaseTables {
    pub fn view(&self, view: View) -> &MeasurementTable {
        match view {
            View::Front => &self.front,
            View::Side => &self.side,
        }
    }
}

/// Every raw table for one shot type. Only ever built complete.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotTables {
    /// One entry per phase, in `Phase::ALL` order.
    pub phases: Vec<PhaseTables>,
    pub timing: MeasurementTable,
    pub signals_make: SignalTable,
    pub signals_miss: SignalTable,
}

impl ShotTables {
    pub fn signals(&self, outcome: Outcome) -> &SignalTable {
        match outcome {
            Outcome::Make => &self.signals_make,
            Outcome::Miss => &self.signals_miss,
        }
    }
}

// ---------------------------------------------------------------------------
// DatasetRegistry
// ---------------------------------------------------------------------------

/// Immutable set of raw tables, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct DatasetRegistry {
    /// Human-readable description of where the tables came from.
    pub origin: String,
    shots: BTreeMap<ShotType, ShotTables>,
    excluded: BTreeMap<ShotType, String>,
}

impl DatasetRegistry {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Default::default()
        }
    }

    pub(crate) fn insert(&mut self, shot: ShotType, tables: ShotTables) {
        self.excluded.remove(&shot);
        self.shots.insert(shot, tables);
    }

    pub(crate) fn exclude(&mut self, shot: ShotType, reason: String) {
        self.shots.remove(&shot);
        self.excluded.insert(shot, reason);
    }

    /// Selectable shot types, in canonical order.
    pub fn available(&self) -> Vec<ShotType> {
        self.shots.keys().copied().collect()
    }

    pub fn is_available(&self, shot: ShotType) -> bool {
        self.shots.contains_key(&shot)
    }

    pub fn tables(&self, shot: ShotType) -> Option<&ShotTables> {
        self.shots.get(&shot)
    }

    /// Shot types that failed to load, with the failure reason.
    pub fn excluded(&self) -> &BTreeMap<ShotType, String> {
        &self.excluded
    }

    pub fn load_failure(&self, shot: ShotType) -> Option<&str> {
        self.excluded.get(&shot).map(String::as_str)
    }
}
