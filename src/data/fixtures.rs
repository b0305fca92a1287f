//! CSV builders shared by unit tests.

use super::loader::load_shot;
use super::model::{Outcome, Phase, ShotTables, ShotType, View, PERCENT_COLUMNS, SIGNAL_ROWS};
use super::source::{phase_resource, signal_resource, timing_resource, MemorySource};

pub const HEADER: &str = "Side,Shooting,Shooting,Non-shooting,Non-shooting\n\
                          Shot Metric,Make,Miss,Make,Miss\n";

/// Table in canonical column order.
pub fn measurement_csv(rows: &[(&str, [f64; 4])]) -> String {
    let mut out = HEADER.to_string();
    for (label, cells) in rows {
        out.push_str(&format!(
            "{label},{},{},{},{}\n",
            cells[0], cells[1], cells[2], cells[3]
        ));
    }
    out
}

/// Timing table whose rows 5 and 6 hold the set-point time and the total
/// duration for the make and miss columns.
pub fn timing_csv(set_point: [f64; 2], total: [f64; 2]) -> String {
    measurement_csv(&[
        ("Start", [0.0, 0.0, 0.0, 0.0]),
        ("Dip", [8.0, 9.0, 8.5, 9.5]),
        ("Knee Max", [12.0, 13.0, 12.0, 13.0]),
        ("Elbow Max", [18.0, 19.0, 18.0, 19.0]),
        ("Hip Max", [22.0, 21.0, 22.0, 21.0]),
        ("Set Point", [set_point[0], set_point[1], set_point[0], set_point[1]]),
        ("Total", [total[0], total[1], total[0], total[1]]),
        ("Release", [95.0, 94.0, 95.0, 94.0]),
    ])
}

pub fn signal_csv(value: impl Fn(usize, usize) -> f64) -> String {
    let mut out = String::from("signal");
    for pct in 0..PERCENT_COLUMNS {
        out.push_str(&format!(",{pct:02}"));
    }
    out.push('\n');
    for row in 0..SIGNAL_ROWS {
        out.push_str(&format!("signal {row}"));
        for pct in 0..PERCENT_COLUMNS {
            out.push_str(&format!(",{}", value(row, pct)));
        }
        out.push('\n');
    }
    out
}

fn phase_csv(phase: Phase, view: View) -> String {
    let base = (phase as usize * 10 + view as usize) as f64;
    measurement_csv(&[
        ("Knee Angle", [base, base + 1.0, base + 2.0, base + 3.0]),
        ("Elbow Angle", [base + 0.5, base + 1.5, base + 2.5, base + 3.5]),
    ])
}

/// Adds every resource for `shot` with the given timing rows.
pub fn insert_shot(source: &mut MemorySource, shot: ShotType, set_point: [f64; 2], total: [f64; 2]) {
    for phase in Phase::ALL {
        for view in View::ALL {
            source.insert(phase_resource(shot, phase, view), phase_csv(phase, view));
        }
    }
    source.insert(timing_resource(shot), timing_csv(set_point, total));
    source.insert(
        signal_resource(shot, Outcome::Make),
        signal_csv(|row, pct| row as f64 * 10.0 + pct as f64 * 0.5),
    );
    source.insert(
        signal_resource(shot, Outcome::Miss),
        signal_csv(|row, pct| row as f64 * 10.0 - pct as f64 * 0.25),
    );
}

/// All four shot types, each with set point (30, 28) over a total of 100.
pub fn complete_source() -> MemorySource {
    let mut source = MemorySource::new();
    for shot in ShotType::ALL {
        insert_shot(&mut source, shot, [30.0, 28.0], [100.0, 100.0]);
    }
    source
}

pub fn sample_tables() -> ShotTables {
    load_shot(&complete_source(), ShotType::Set).expect("fixture tables load")
}
