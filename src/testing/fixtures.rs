use crate::core::{Record, Value};
use crate::record;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seven days of golf weather, labelled by `Play`.
pub fn weather() -> Vec<Record> {
    vec![
        record! { "Outlook" => "sunny", "Temperature" => 85.0, "Humidity" => 85.0, "Wind" => false, "Play" => "no" },
        record! { "Outlook" => "sunny", "Temperature" => 80.0, "Humidity" => 90.0, "Wind" => true, "Play" => "no" },
        record! { "Outlook" => "overcast", "Temperature" => 83.0, "Humidity" => 86.0, "Wind" => false, "Play" => "yes" },
        record! { "Outlook" => "rain", "Temperature" => 70.0, "Humidity" => 96.0, "Wind" => false, "Play" => "yes" },
        record! { "Outlook" => "rain", "Temperature" => 68.0, "Humidity" => 80.0, "Wind" => false, "Play" => "yes" },
        record! { "Outlook" => "rain", "Temperature" => 65.0, "Humidity" => 70.0, "Wind" => true, "Play" => "no" },
        record! { "Outlook" => "overcast", "Temperature" => 64.0, "Humidity" => 65.0, "Wind" => true, "Play" => "yes" },
    ]
}

const COLORS: [&str; 4] = ["red", "green", "blue", "teal"];
const LABELS: [&str; 3] = ["a", "b", "c"];

/// Mixed-type records with a `label` attribute on every row.
///
/// Numeric, categorical and boolean columns occasionally hold nulls or are
/// left out entirely, so the same seed always yields the same messy set.
pub fn random_records(seed: u64, n: usize) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let mut r = Record::new();
            if rng.random_bool(0.9) {
                r.insert("size", rng.random_range(0..20) as f64);
            }
            if rng.random_bool(0.9) {
                r.insert("weight", (rng.random_range(0.0..10.0_f64) * 10.0).round() / 10.0);
            }
            match rng.random_range(0..10) {
                0 => {}
                1 => {
                    r.insert("color", Value::Null);
                }
                _ => {
                    r.insert("color", COLORS[rng.random_range(0..COLORS.len())]);
                }
            }
            if rng.random_bool(0.8) {
                r.insert("flag", rng.random_bool(0.5));
            }
            r.insert("label", LABELS[rng.random_range(0..LABELS.len())]);
            r
        })
        .collect()
}
