use std::path::{Path, PathBuf};

use shot_report::data::model::{Outcome, Phase, ShotType, View, PERCENT_COLUMNS};
use shot_report::data::source::{phase_resource, signal_resource, timing_resource};
use shot_report::report::curves::{ANGLE_SIGNALS, VELOCITY_SIGNALS};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const SIDE_HEADER: [&str; 5] = ["Side", "Shooting", "Shooting", "Non-shooting", "Non-shooting"];
const OUTCOME_HEADER: [&str; 5] = ["Shot Metric", "Make", "Miss", "Make", "Miss"];

/// (metric, mean value in degrees)
const PHASE_METRICS: [(&str, f64); 6] = [
    ("Wrist Angle (deg)", 150.0),
    ("Elbow Angle (deg)", 95.0),
    ("Shoulder Angle (deg)", 80.0),
    ("Trunk Lean (deg)", 8.0),
    ("Hip Angle (deg)", 160.0),
    ("Knee Angle (deg)", 125.0),
];

/// (event, fraction of the total shot duration)
const TIMING_EVENTS: [(&str, f64); 8] = [
    ("Start of Shot (s)", 0.0),
    ("Peak Knee Flexion (s)", 0.12),
    ("Peak Hip Flexion (s)", 0.16),
    ("Ball Lift (s)", 0.22),
    ("Elbow Rise (s)", 0.28),
    ("Set Point (s)", 0.36),
    ("Shot Duration (s)", 1.0),
    ("Ball Release (s)", 0.94),
];

fn write_rows(path: &Path, rows: Vec<Vec<String>>) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create output directory");
    }
    let mut writer = csv::Writer::from_path(path).expect("Failed to create output file");
    for row in rows {
        writer.write_record(&row).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush output file");
}

fn header_rows() -> Vec<Vec<String>> {
    vec![
        SIDE_HEADER.iter().map(|s| s.to_string()).collect(),
        OUTCOME_HEADER.iter().map(|s| s.to_string()).collect(),
    ]
}

fn phase_table(phase: Phase, view: View, rng: &mut SimpleRng) -> Vec<Vec<String>> {
    let phase_shift = match phase {
        Phase::StartOfShot => -15.0,
        Phase::SetPoint => 0.0,
        Phase::BallRelease => 20.0,
    };
    let view_shift = match view {
        View::Front => 0.0,
        View::Side => 3.0,
    };

    let mut rows = header_rows();
    for (metric, mean) in PHASE_METRICS {
        let mut row = vec![metric.to_string()];
        for miss_offset in [0.0, -4.0, 2.0, -2.0] {
            let value = rng.gauss(mean + phase_shift + view_shift + miss_offset, 1.5);
            row.push(format!("{value:.1}"));
        }
        rows.push(row);
    }
    rows
}

fn timing_table(duration: [f64; 2], rng: &mut SimpleRng) -> Vec<Vec<String>> {
    let mut rows = header_rows();
    for (event, fraction) in TIMING_EVENTS {
        let mut row = vec![event.to_string()];
        for d in [duration[0], duration[1], duration[0], duration[1]] {
            let jitter = if fraction > 0.0 && fraction < 1.0 {
                rng.gauss(0.0, 0.01)
            } else {
                0.0
            };
            row.push(format!("{:.3}", d * (fraction + jitter)));
        }
        rows.push(row);
    }
    rows
}

fn signal_table(set_point_pct: f64, outcome: Outcome, rng: &mut SimpleRng) -> Vec<Vec<String>> {
    let miss_damping = match outcome {
        Outcome::Make => 1.0,
        Outcome::Miss => 0.85,
    };

    let mut header = vec![String::new()];
    header.extend((0..PERCENT_COLUMNS).map(|pct| format!("{pct:02}")));
    let mut rows = vec![header];

    for (i, name) in ANGLE_SIGNALS.iter().enumerate() {
        let base = 90.0 + 10.0 * i as f64;
        let mut row = vec![name.to_string()];
        for pct in 0..PERCENT_COLUMNS {
            let x = pct as f64;
            let value = base
                - gaussian(x, set_point_pct * 0.6, 12.0, 35.0 * miss_damping)
                + gaussian(x, 90.0, 10.0, 25.0 * miss_damping)
                + rng.gauss(0.0, 0.4);
            row.push(format!("{value:.3}"));
        }
        rows.push(row);
    }

    for (i, name) in VELOCITY_SIGNALS.iter().enumerate() {
        let peak = 70.0 + 4.0 * i as f64;
        let mut row = vec![name.to_string()];
        for pct in 0..PERCENT_COLUMNS {
            let x = pct as f64;
            let value = gaussian(x, peak, 9.0, (6.0 - i as f64 * 0.6) * miss_damping)
                + rng.gauss(0.0, 0.05);
            row.push(format!("{value:.3}"));
        }
        rows.push(row);
    }
    rows
}

fn main() {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    let mut rng = SimpleRng::new(42);
    let path_for = |resource: String| out_dir.join(format!("{resource}.csv"));

    for (n, shot) in ShotType::ALL.into_iter().enumerate() {
        // Make then miss shot duration in seconds.
        let duration = [0.9 + 0.05 * n as f64, 0.95 + 0.05 * n as f64];

        for phase in Phase::ALL {
            for view in View::ALL {
                write_rows(
                    &path_for(phase_resource(shot, phase, view)),
                    phase_table(phase, view, &mut rng),
                );
            }
        }

        write_rows(&path_for(timing_resource(shot)), timing_table(duration, &mut rng));

        for outcome in Outcome::ALL {
            write_rows(
                &path_for(signal_resource(shot, outcome)),
                signal_table(TIMING_EVENTS[5].1 * 100.0, outcome, &mut rng),
            );
        }
    }

    println!(
        "Wrote {} shot types ({} tables each) to {}",
        ShotType::ALL.len(),
        Phase::ALL.len() * View::ALL.len() + 3,
        out_dir.display()
    );
}
