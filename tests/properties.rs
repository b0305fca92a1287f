//! Property tests for the table and marker invariants.
//!
//! 1. Column order: assembled tables always use the canonical column order
//!    and keep each cell under its own (side, outcome) key.
//! 2. Set-Point range: any accepted marker is finite and inside 0..=100.

use proptest::prelude::*;

use shot_report::data::loader::parse_measurement_table;
use shot_report::data::model::CANONICAL_COLUMNS;
use shot_report::report::marker::derive_set_point;
use shot_report::report::tables::assemble_table;

const SIDES: [&str; 4] = ["Shooting", "Shooting", "Non-shooting", "Non-shooting"];
const OUTCOMES: [&str; 4] = ["Make", "Miss", "Make", "Miss"];

// ── Strategies ───────────────────────────────────────────────────────

fn arb_column_order() -> impl Strategy<Value = Vec<usize>> {
    Just(vec![0, 1, 2, 3]).prop_shuffle()
}

fn arb_cell() -> impl Strategy<Value = f64> {
    (-500.0..500.0_f64).prop_map(|v| (v * 100.0).round() / 100.0)
}

fn arb_timing_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        (-50.0..250.0_f64).prop_map(|v| (v * 1000.0).round() / 1000.0),
    ]
}

fn table_csv(order: &[usize], rows: &[(String, [f64; 4])]) -> String {
    let pick = |labels: &[&str; 4]| -> String {
        order.iter().map(|&i| labels[i]).collect::<Vec<_>>().join(",")
    };
    let mut csv = format!("Side,{}\nShot Metric,{}\n", pick(&SIDES), pick(&OUTCOMES));
    for (label, cells) in rows {
        let picked: Vec<String> = order.iter().map(|&i| cells[i].to_string()).collect();
        csv.push_str(&format!("{label},{}\n", picked.join(",")));
    }
    csv
}

// ── 1. Canonical column order ────────────────────────────────────────

proptest! {
    #[test]
    fn assembled_columns_are_canonical(
        order in arb_column_order(),
        cells in prop::collection::vec(prop::array::uniform4(arb_cell()), 1..6),
    ) {
        let rows: Vec<(String, [f64; 4])> = cells
            .into_iter()
            .enumerate()
            .map(|(i, c)| (format!("metric {i}"), c))
            .collect();
        let raw = parse_measurement_table("t", &table_csv(&order, &rows)).unwrap();
        let table = assemble_table(&raw);

        prop_assert_eq!(table.columns, CANONICAL_COLUMNS.to_vec());
        prop_assert_eq!(table.rows.len(), rows.len());
        for (assembled, (label, expected)) in table.rows.iter().zip(&rows) {
            prop_assert_eq!(&assembled.label, label);
            let expected: Vec<String> = expected.iter().map(|v| v.to_string()).collect();
            prop_assert_eq!(&assembled.cells, &expected);
        }
    }
}

// ── 2. Set-Point range ───────────────────────────────────────────────

proptest! {
    #[test]
    fn accepted_set_point_is_finite_and_in_range(
        set_point in prop::array::uniform2(arb_timing_value()),
        total in prop::array::uniform2(arb_timing_value()),
        order in arb_column_order(),
    ) {
        let mut rows: Vec<(String, [f64; 4])> = (0..5)
            .map(|i| (format!("event {i}"), [i as f64; 4]))
            .collect();
        rows.push(("Set Point".into(), [set_point[0], set_point[1], 1.0, 1.0]));
        rows.push(("Duration".into(), [total[0], total[1], 1.0, 1.0]));
        let raw = parse_measurement_table("timing", &table_csv(&order, &rows)).unwrap();

        if let Ok(marker) = derive_set_point(&raw) {
            for percent in [marker.make_percent, marker.miss_percent] {
                prop_assert!(percent.is_finite());
                prop_assert!((0.0..=100.0).contains(&percent), "{}", percent);
            }
            prop_assert_eq!(marker.make_percent, set_point[0] * 100.0 / total[0]);
            prop_assert_eq!(marker.miss_percent, set_point[1] * 100.0 / total[1]);
        }
    }
}
