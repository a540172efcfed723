use crate::core::errors::DtreeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bucket key used when grouping absent or null values.
pub const MISSING_KEY: &str = "<nil>";

/// A single attribute value. Integers are folded into `Number` on construction,
/// so `4` and `4.0` compare and group identically.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Equality predicate. Numbers compare numerically, everything else by
    /// tag and content; `Null` only equals `Null`.
    pub fn equals(&self, pivot: &Value) -> bool {
        self == pivot
    }

    /// Greater-or-equal predicate. Only defined between two numbers; any other
    /// pairing is `false`.
    pub fn greater_or_equal(&self, pivot: &Value) -> bool {
        match (self, pivot) {
            (Value::Number(a), Value::Number(b)) => a >= b,
            _ => false,
        }
    }

    /// Key used to group values when counting distinct occurrences.
    pub fn count_key(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Number(n) => format_number_key(*n),
            Value::Bool(b) => b.to_string(),
            Value::Null => MISSING_KEY.to_string(),
        }
    }
}

/// Canonical text for a number: integral values print without a fraction,
/// others are rounded to six decimals with trailing zeros trimmed.
pub fn format_number_key(f: f64) -> String {
    if !f.is_finite() {
        return f.to_string();
    }
    if f == f.trunc() {
        if f == 0.0 {
            return "0".to_string();
        }
        return format!("{f:.0}");
    }

    let rounded = (f * 1e6).round() / 1e6;
    if rounded == rounded.trunc() {
        if rounded == 0.0 {
            return "0".to_string();
        }
        return format!("{rounded:.0}");
    }

    let text = format!("{rounded:.6}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = DtreeError;

    fn try_from(v: serde_json::Value) -> Result<Self, Self::Error> {
        match v {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Value::Number)
                .ok_or_else(|| DtreeError::InvalidData(format!("number {n} is not representable"))),
            serde_json::Value::String(s) => Ok(Value::Str(s)),
            other => Err(DtreeError::InvalidData(format!(
                "nested value {other} is not a supported attribute value"
            ))),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_and_floats_are_interchangeable() {
        let int = Value::from(4i64);
        let float = Value::from(4.0);
        assert!(int.equals(&float));
        assert!(int.greater_or_equal(&float));
        assert_eq!(int.count_key(), float.count_key());
    }

    #[test]
    fn equality_requires_matching_tags() {
        assert!(Value::from("a").equals(&Value::from("a")));
        assert!(!Value::from("1").equals(&Value::from(1.0)));
        assert!(!Value::from(true).equals(&Value::from("true")));
        assert!(Value::Null.equals(&Value::Null));
        assert!(!Value::Null.equals(&Value::from(0.0)));
    }

    #[test]
    fn greater_or_equal_is_false_for_non_numeric_operands() {
        assert!(!Value::from("not a number").greater_or_equal(&Value::from(10.0)));
        assert!(!Value::from(10.0).greater_or_equal(&Value::from("10")));
        assert!(!Value::Null.greater_or_equal(&Value::from(1.0)));
        assert!(!Value::from(true).greater_or_equal(&Value::from(false)));
    }

    #[test]
    fn greater_or_equal_includes_the_pivot() {
        let pivot = Value::from(20.0);
        assert!(Value::from(20.0).greater_or_equal(&pivot));
        assert!(Value::from(30.0).greater_or_equal(&pivot));
        assert!(!Value::from(1.0).greater_or_equal(&pivot));
    }

    #[test]
    fn number_keys_are_trimmed_and_stable() {
        assert_eq!(format_number_key(85.0), "85");
        assert_eq!(format_number_key(-3.0), "-3");
        assert_eq!(format_number_key(2.5), "2.5");
        assert_eq!(format_number_key(-1.25), "-1.25");
        assert_eq!(format_number_key(0.1 + 0.2), "0.3");
        assert_eq!(format_number_key(1.0000000001), "1");
        assert_eq!(format_number_key(-0.0), "0");
        assert_eq!(format_number_key(1e-9), "0");
        assert_eq!(format_number_key(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn null_groups_into_missing_bucket() {
        assert_eq!(Value::Null.count_key(), MISSING_KEY);
        assert_eq!(MISSING_KEY, "<nil>");
        assert_eq!(Value::from(None::<f64>), Value::Null);
    }

    #[test]
    fn display_drops_integral_fraction() {
        assert_eq!(Value::from(85.0).to_string(), "85");
        assert_eq!(Value::from(72.5).to_string(), "72.5");
        assert_eq!(Value::from("sunny").to_string(), "sunny");
    }

    #[test]
    fn json_conversion_rejects_nested_values() {
        let v = Value::try_from(serde_json::json!(3)).unwrap();
        assert_eq!(v, Value::Number(3.0));
        let err = Value::try_from(serde_json::json!([1, 2])).unwrap_err();
        assert_eq!(err.kind(), crate::core::errors::ErrorKind::InvalidData);
    }

    #[test]
    fn serde_is_untagged() {
        let json = serde_json::to_string(&vec![
            Value::Null,
            Value::from(true),
            Value::from(1.5),
            Value::from("x"),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,true,1.5,"x"]"#);
        let back: Vec<Value> = serde_json::from_str("[null,false,7,\"y\"]").unwrap();
        assert_eq!(
            back,
            vec![
                Value::Null,
                Value::from(false),
                Value::from(7.0),
                Value::from("y")
            ]
        );
    }
}
