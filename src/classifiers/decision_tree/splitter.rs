use crate::classifiers::decision_tree::impurity::entropy;
use crate::core::{Record, Value};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Comparison applied between a record's value and a split pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum Predicate {
    #[serde(rename = "==")]
    #[strum(serialize = "==")]
    Equal,
    #[serde(rename = ">=")]
    #[strum(serialize = ">=")]
    GreaterOrEqual,
}

impl Predicate {
    /// Numeric pivots split by threshold, everything else by equality.
    pub fn for_pivot(pivot: &Value) -> Self {
        if pivot.is_numeric() {
            Predicate::GreaterOrEqual
        } else {
            Predicate::Equal
        }
    }

    /// An absent attribute behaves as null for equality and never passes a threshold.
    pub fn evaluate(self, value: Option<&Value>, pivot: &Value) -> bool {
        match self {
            Predicate::Equal => value.unwrap_or(&Value::Null).equals(pivot),
            Predicate::GreaterOrEqual => value.is_some_and(|v| v.greater_or_equal(pivot)),
        }
    }
}

/// Both sides of a partition, each in the relative order of the input subset.
#[derive(Debug, Default)]
pub struct Split<'a> {
    pub matched: Vec<&'a Record>,
    pub unmatched: Vec<&'a Record>,
}

impl<'a> Split<'a> {
    pub fn len(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `parent_entropy` minus the size-weighted entropy of both branches.
    /// A one-sided partition gains nothing.
    pub fn information_gain(&self, parent_entropy: f64, target: &str) -> f64 {
        if self.matched.is_empty() || self.unmatched.is_empty() {
            return 0.0;
        }
        let total = self.len();
        let weighted = (entropy(&self.matched, target) * self.matched.len() as f64
            + entropy(&self.unmatched, target) * self.unmatched.len() as f64)
            / total as f64;
        parent_entropy - weighted
    }
}

pub fn split<'a>(
    subset: &[&'a Record],
    attribute: &str,
    predicate: Predicate,
    pivot: &Value,
) -> Split<'a> {
    let mut out = Split::default();
    for &record in subset {
        if predicate.evaluate(record.get(attribute), pivot) {
            out.matched.push(record);
        } else {
            out.unmatched.push(record);
        }
    }
    out
}
