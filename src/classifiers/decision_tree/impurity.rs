use crate::core::{MISSING_KEY, Record};
use std::collections::{BTreeMap, HashMap};

/// Per-label occurrence counts of a record subset.
pub type ClassCounts = BTreeMap<String, usize>;

/// Occurrence counts of an attribute's distinct values, in the order each
/// value was first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueTally {
    entries: Vec<(String, usize)>,
}

impl ValueTally {
    pub fn of(subset: &[&Record], attribute: &str) -> Self {
        let mut entries: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for record in subset {
            let key = record
                .get(attribute)
                .map(|v| v.count_key())
                .unwrap_or_else(|| MISSING_KEY.to_string());
            match index.get(&key) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(key.clone(), entries.len());
                    entries.push((key, 1));
                }
            }
        }
        Self { entries }
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Most frequent key; ties go to the key seen first. Empty tally gives `""`.
    pub fn most_frequent(&self) -> String {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.entries {
            if best.is_none_or(|b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(k, _)| k.clone()).unwrap_or_default()
    }

    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;
        self.entries
            .iter()
            .map(|(_, c)| {
                let p = *c as f64 / total;
                -p * p.ln()
            })
            .sum()
    }

    pub fn into_class_counts(self) -> ClassCounts {
        self.entries.into_iter().collect()
    }
}

/// Shannon entropy (natural log) of `attribute` over `subset`. Empty subsets have entropy 0.
pub fn entropy(subset: &[&Record], attribute: &str) -> f64 {
    ValueTally::of(subset, attribute).entropy()
}

pub fn class_counts(subset: &[&Record], attribute: &str) -> ClassCounts {
    ValueTally::of(subset, attribute).into_class_counts()
}

/// Majority label of stored counts; ties resolve to the lexically smallest label.
pub fn majority_label(counts: &ClassCounts) -> String {
    let mut best: Option<(&String, usize)> = None;
    for (label, &count) in counts {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((label, count));
        }
    }
    best.map(|(l, _)| l.clone()).unwrap_or_default()
}

/// Normalize counts to probabilities. A zero total yields an empty distribution.
pub fn distribution(counts: &ClassCounts) -> BTreeMap<String, f64> {
    let total: usize = counts.values().sum();
    if total == 0 {
        return BTreeMap::new();
    }
    counts
        .iter()
        .map(|(k, &v)| (k.clone(), v as f64 / total as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use crate::record;

    const EPS: f64 = 1e-12;

    fn refs(records: &[Record]) -> Vec<&Record> {
        records.iter().collect()
    }

    #[test]
    fn counts_unique_values() {
        let rs = vec![
            record! { "param" => "yes" },
            record! { "param" => "no" },
            record! { "param" => "yes" },
            record! { "param" => "yes" },
        ];
        let counts = class_counts(&refs(&rs), "param");
        assert_eq!(counts.get("yes"), Some(&3));
        assert_eq!(counts.get("no"), Some(&1));
    }

    #[test]
    fn entropy_is_positive_for_mixed_labels() {
        let rs = vec![
            record! { "param" => "yes" },
            record! { "param" => "no" },
            record! { "param" => "yes" },
            record! { "param" => "yes" },
        ];
        let e = entropy(&refs(&rs), "param");
        let expected = -(0.75f64 * 0.75f64.ln()) - (0.25f64 * 0.25f64.ln());
        assert!((e - expected).abs() < EPS);
    }

    #[test]
    fn entropy_is_zero_when_pure_or_empty() {
        let rs = vec![record! { "a" => "x" }, record! { "a" => "x" }];
        assert_eq!(entropy(&refs(&rs), "a"), 0.0);
        assert_eq!(entropy(&[], "a"), 0.0);
    }

    #[test]
    fn numeric_noise_does_not_fragment_groups() {
        let rs = vec![
            record! { "a" => 0.1 + 0.2 },
            record! { "a" => 0.3 },
            record! { "a" => 4i64 },
            record! { "a" => 4.0 },
        ];
        let tally = ValueTally::of(&refs(&rs), "a");
        assert_eq!(tally.distinct(), 2);
    }

    #[test]
    fn absent_and_null_share_the_missing_bucket() {
        let rs = vec![
            record! { "a" => Value::Null },
            record! { "b" => 1.0 },
            record! { "a" => "x" },
        ];
        let counts = class_counts(&refs(&rs), "a");
        assert_eq!(counts.get(MISSING_KEY), Some(&2));
        assert_eq!(counts.get("x"), Some(&1));
    }

    #[test]
    fn most_frequent_prefers_first_seen_on_ties() {
        let rs = vec![
            record! { "a" => "no" },
            record! { "a" => "yes" },
            record! { "a" => "yes" },
            record! { "a" => "no" },
        ];
        assert_eq!(ValueTally::of(&refs(&rs), "a").most_frequent(), "no");
        assert_eq!(ValueTally::default().most_frequent(), "");
    }

    #[test]
    fn majority_label_of_stored_counts() {
        let counts: ClassCounts = [("b".to_string(), 2), ("a".to_string(), 2), ("c".to_string(), 1)]
            .into_iter()
            .collect();
        assert_eq!(majority_label(&counts), "a");
        assert_eq!(majority_label(&ClassCounts::new()), "");
    }

    #[test]
    fn distribution_sums_to_one_or_is_empty() {
        let counts: ClassCounts = [("yes".to_string(), 3), ("no".to_string(), 1)]
            .into_iter()
            .collect();
        let d = distribution(&counts);
        assert!((d.values().sum::<f64>() - 1.0).abs() < EPS);
        assert!((d["yes"] - 0.75).abs() < EPS);

        let zero: ClassCounts = [("yes".to_string(), 0)].into_iter().collect();
        assert!(distribution(&zero).is_empty());
    }
}
