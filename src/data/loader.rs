use csv::StringRecord;
use thiserror::Error;

use super::model::{
    ColumnKey, DatasetRegistry, MeasurementRow, MeasurementTable, Outcome, Phase, PhaseTables,
    ShotTables, ShotType, SideCategory, SignalTable, View, DATA_COLUMNS, PERCENT_COLUMNS,
    SIGNAL_ROWS,
};
use super::source::{phase_resource, signal_resource, timing_resource, TableSource};

/// Why a single resource could not be turned into a table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("{resource}: fetch failed: {reason}")]
    Fetch { resource: String, reason: String },

    #[error("{resource}: unexpected shape: {reason}")]
    Shape { resource: String, reason: String },

    #[error("{resource}: {reason}")]
    Parse { resource: String, reason: String },
}

impl LoadError {
    fn shape(resource: &str, reason: impl Into<String>) -> Self {
        LoadError::Shape {
            resource: resource.to_string(),
            reason: reason.into(),
        }
    }

    fn parse(resource: &str, reason: impl Into<String>) -> Self {
        LoadError::Parse {
            resource: resource.to_string(),
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load every shot type from `source`, one at a time.
///
/// A shot type whose tables fail to fetch or validate is recorded as excluded
/// and never exposed; the remaining shot types are unaffected.
pub fn load_registry(source: &dyn TableSource) -> DatasetRegistry {
    let mut registry = DatasetRegistry::new(source.describe());

    for shot in ShotType::ALL {
        match load_shot(source, shot) {
            Ok(tables) => {
                log::info!("Loaded shot type {shot} from {}", source.describe());
                registry.insert(shot, tables);
            }
            Err(e) => {
                log::warn!("Excluding shot type {shot}: {e:#}");
                registry.exclude(shot, e.to_string());
            }
        }
    }

    registry
}

/// Fetch and validate all nine tables for one shot type. The first failure
/// aborts the whole shot type.
pub fn load_shot(source: &dyn TableSource, shot: ShotType) -> Result<ShotTables, LoadError> {
    let mut phases = Vec::with_capacity(Phase::ALL.len());
    for phase in Phase::ALL {
        let front = fetch_measurement(source, &phase_resource(shot, phase, View::Front))?;
        let side = fetch_measurement(source, &phase_resource(shot, phase, View::Side))?;
        phases.push(PhaseTables { phase, front, side });
    }

    let timing = fetch_measurement(source, &timing_resource(shot))?;
    let signals_make = fetch_signals(source, &signal_resource(shot, Outcome::Make))?;
    let signals_miss = fetch_signals(source, &signal_resource(shot, Outcome::Miss))?;

    Ok(ShotTables {
        phases,
        timing,
        signals_make,
        signals_miss,
    })
}

fn fetch(source: &dyn TableSource, resource: &str) -> Result<String, LoadError> {
    source.fetch(resource).map_err(|e| LoadError::Fetch {
        resource: resource.to_string(),
        reason: format!("{e:#}"),
    })
}

fn fetch_measurement(source: &dyn TableSource, resource: &str) -> Result<MeasurementTable, LoadError> {
    let text = fetch(source, resource)?;
    parse_measurement_table(resource, &text)
}

fn fetch_signals(source: &dyn TableSource, resource: &str) -> Result<SignalTable, LoadError> {
    let text = fetch(source, resource)?;
    parse_signal_table(resource, &text)
}

fn read_records(resource: &str, text: &str) -> Result<Vec<StringRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    reader
        .records()
        .enumerate()
        .map(|(row_no, result)| {
            result.map_err(|e| LoadError::parse(resource, format!("CSV row {row_no}: {e}")))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Phase / timing tables
// ---------------------------------------------------------------------------

/// Layout:
/// ```text
/// Side,Shooting,Shooting,Non-shooting,Non-shooting
/// Shot Metric,Make,Miss,Make,Miss
/// Knee Flexion (deg),121.4,118.9,119.0,117.2
/// ...
/// ```
/// Data columns may arrive in any order; each is identified by its
/// (side, outcome) pair, and all four pairs must be present exactly once.
pub fn parse_measurement_table(resource: &str, text: &str) -> Result<MeasurementTable, LoadError> {
    let records = read_records(resource, text)?;
    let (outer, inner, body) = match records.as_slice() {
        [outer, inner, body @ ..] => (outer, inner, body),
        _ => return Err(LoadError::shape(resource, "expected a two-row header")),
    };

    if outer.len() != DATA_COLUMNS + 1 {
        return Err(LoadError::shape(
            resource,
            format!(
                "expected a label column and {DATA_COLUMNS} data columns, found {} columns",
                outer.len()
            ),
        ));
    }

    let mut columns = Vec::with_capacity(DATA_COLUMNS);
    for (side_label, outcome_label) in outer.iter().zip(inner.iter()).skip(1) {
        let side: SideCategory = side_label
            .parse()
            .map_err(|e| LoadError::shape(resource, format!("outer header: {e}")))?;
        let outcome: Outcome = outcome_label
            .parse()
            .map_err(|e| LoadError::shape(resource, format!("inner header: {e}")))?;
        let key = ColumnKey::new(side, outcome);
        if columns.contains(&key) {
            return Err(LoadError::shape(
                resource,
                format!("duplicate column {} / {}", side.label(), outcome.label()),
            ));
        }
        columns.push(key);
    }

    let rows = body
        .iter()
        .map(|record| {
            let mut fields = record.iter();
            let label = fields.next().unwrap_or_default().to_string();
            MeasurementRow {
                label,
                cells: fields.map(str::to_string).collect(),
            }
        })
        .collect();

    Ok(MeasurementTable {
        side_caption: outer.get(0).unwrap_or_default().to_string(),
        metric_caption: inner.get(0).unwrap_or_default().to_string(),
        columns,
        rows,
    })
}

// ---------------------------------------------------------------------------
// Signal tables
// ---------------------------------------------------------------------------

/// Layout: an index column followed by percent columns `00`..`100`, then one
/// row per signal.
pub fn parse_signal_table(resource: &str, text: &str) -> Result<SignalTable, LoadError> {
    let records = read_records(resource, text)?;
    let (header, body) = records
        .split_first()
        .ok_or_else(|| LoadError::shape(resource, "empty signal table"))?;

    if header.len() != PERCENT_COLUMNS + 1 {
        return Err(LoadError::shape(
            resource,
            format!(
                "expected an index column and {PERCENT_COLUMNS} percent columns, found {} columns",
                header.len()
            ),
        ));
    }

    for (expected, label) in header.iter().skip(1).enumerate() {
        match label.parse::<usize>() {
            Ok(pct) if pct == expected => {}
            _ => {
                return Err(LoadError::shape(
                    resource,
                    format!("percent column {expected} is labelled '{label}'"),
                ))
            }
        }
    }

    if body.len() != SIGNAL_ROWS {
        return Err(LoadError::shape(
            resource,
            format!("expected {SIGNAL_ROWS} signal rows, found {}", body.len()),
        ));
    }

    let rows = body
        .iter()
        .enumerate()
        .map(|(row_no, record)| {
            record
                .iter()
                .skip(1)
                .enumerate()
                .map(|(pct, tok)| match tok.parse::<f64>() {
                    Ok(value) if value.is_finite() => Ok(value),
                    _ => Err(LoadError::parse(
                        resource,
                        format!("row {row_no}, column {pct:02}: '{tok}' is not a finite number"),
                    )),
                })
                .collect::<Result<Vec<f64>, LoadError>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SignalTable { rows })
}
