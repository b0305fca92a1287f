use serde::Serialize;
use thiserror::Error;

use crate::data::model::{ColumnKey, MeasurementTable, Outcome, SideCategory};

/// Timing-table row holding the Set-Point timestamp.
pub const SET_POINT_ROW: usize = 5;
/// Timing-table row the Set-Point timestamp is normalised against.
pub const NORMALISING_ROW: usize = 6;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimingError {
    #[error("timing table has no row {0}")]
    MissingRow(usize),

    #[error("timing row {row} ({column}) is not a number: '{value}'")]
    NotNumeric {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("normalising row is zero for {0}")]
    ZeroDenominator(&'static str),

    #[error("set point for {column} is {value}, outside 0..=100")]
    OutOfRange { column: &'static str, value: f64 },
}

/// Percent-of-shot position of the Set Point, one value per outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SetPointMarker {
    pub make_percent: f64,
    pub miss_percent: f64,
}

impl SetPointMarker {
    pub fn percent(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Make => self.make_percent,
            Outcome::Miss => self.miss_percent,
        }
    }
}

/// `timing[5] / timing[6] * 100`, taken independently from the shooting-side
/// make and miss columns.
pub fn derive_set_point(timing: &MeasurementTable) -> Result<SetPointMarker, TimingError> {
    Ok(SetPointMarker {
        make_percent: side_percent(timing, Outcome::Make)?,
        miss_percent: side_percent(timing, Outcome::Miss)?,
    })
}

fn side_percent(timing: &MeasurementTable, outcome: Outcome) -> Result<f64, TimingError> {
    let key = ColumnKey::new(SideCategory::Shooting, outcome);
    let column = match outcome {
        Outcome::Make => "shooting make",
        Outcome::Miss => "shooting miss",
    };

    let numerator = timing_value(timing, SET_POINT_ROW, key, column)?;
    let denominator = timing_value(timing, NORMALISING_ROW, key, column)?;
    if denominator == 0.0 {
        return Err(TimingError::ZeroDenominator(column));
    }

    let percent = numerator * 100.0 / denominator;
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(TimingError::OutOfRange {
            column,
            value: percent,
        });
    }
    Ok(percent)
}

fn timing_value(
    timing: &MeasurementTable,
    row: usize,
    key: ColumnKey,
    column: &'static str,
) -> Result<f64, TimingError> {
    let raw = timing.cell(row, key).ok_or(TimingError::MissingRow(row))?;
    raw.parse::<f64>().map_err(|_| TimingError::NotNumeric {
        row,
        column,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{measurement_csv, timing_csv};
    use crate::data::loader::parse_measurement_table;

    fn timing(set_point: [f64; 2], total: [f64; 2]) -> MeasurementTable {
        parse_measurement_table("timing", &timing_csv(set_point, total)).unwrap()
    }

    #[test]
    fn ratio_of_rows_five_and_six() {
        let marker = derive_set_point(&timing([30.0, 28.0], [100.0, 100.0])).unwrap();
        assert_eq!(marker.make_percent, 30.0);
        assert_eq!(marker.miss_percent, 28.0);
        assert_eq!(marker.percent(Outcome::Miss), 28.0);
    }

    #[test]
    fn ratio_is_normalised_per_side() {
        let marker = derive_set_point(&timing([0.6, 0.45], [1.2, 1.5])).unwrap();
        assert!((marker.make_percent - 50.0).abs() < 1e-9);
        assert!((marker.miss_percent - 30.0).abs() < 1e-9);
    }

    #[test]
    fn zero_denominator_is_invalid_not_infinite() {
        let err = derive_set_point(&timing([30.0, 28.0], [100.0, 0.0])).unwrap_err();
        assert_eq!(err, TimingError::ZeroDenominator("shooting miss"));

        let err = derive_set_point(&timing([0.0, 28.0], [0.0, 100.0])).unwrap_err();
        assert_eq!(err, TimingError::ZeroDenominator("shooting make"));
    }

    #[test]
    fn missing_rows_are_invalid() {
        let short = measurement_csv(&[
            ("a", [1.0, 1.0, 1.0, 1.0]),
            ("b", [1.0, 1.0, 1.0, 1.0]),
            ("c", [1.0, 1.0, 1.0, 1.0]),
            ("d", [1.0, 1.0, 1.0, 1.0]),
            ("e", [1.0, 1.0, 1.0, 1.0]),
            ("f", [1.0, 1.0, 1.0, 1.0]),
        ]);
        let table = parse_measurement_table("timing", &short).unwrap();
        assert_eq!(derive_set_point(&table).unwrap_err(), TimingError::MissingRow(6));
    }

    #[test]
    fn text_in_normalising_row_is_invalid() {
        let csv = timing_csv([30.0, 28.0], [100.0, 100.0])
            .replacen("Total,100,100", "Total,100,n/a", 1);
        let table = parse_measurement_table("timing", &csv).unwrap();
        assert_eq!(
            derive_set_point(&table).unwrap_err(),
            TimingError::NotNumeric {
                row: NORMALISING_ROW,
                column: "shooting miss",
                value: "n/a".to_string(),
            }
        );
    }

    #[test]
    fn ratio_above_hundred_is_rejected() {
        let err = derive_set_point(&timing([130.0, 28.0], [100.0, 100.0])).unwrap_err();
        assert!(matches!(err, TimingError::OutOfRange { .. }));
    }

    #[test]
    fn columns_are_resolved_by_label() {
        let csv = "Side,Shooting,Non-shooting,Shooting,Non-shooting\n\
                   Shot Metric,Miss,Make,Make,Miss\n\
                   r0,0,0,0,0\nr1,0,0,0,0\nr2,0,0,0,0\nr3,0,0,0,0\nr4,0,0,0,0\n\
                   r5,28,99,30,99\n\
                   r6,100,1,100,1\n";
        let table = parse_measurement_table("timing", csv).unwrap();
        let marker = derive_set_point(&table).unwrap();
        assert_eq!(marker.make_percent, 30.0);
        assert_eq!(marker.miss_percent, 28.0);
    }
}
