//! Field value module - the tagged value union for extracted/mapped fields

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field value flowing through the pipeline
///
/// Absent boxes are represented by absence from the surrounding map, never
/// by a sentinel like `Amount(0.0)` or an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Free text (names, addresses, identifiers)
    Text(String),

    /// Monetary amount in dollars
    Amount(f64),

    /// Checkbox / boolean flag
    Flag(bool),
}

impl FieldValue {
    /// Get the amount if this is an Amount value
    pub fn as_amount(&self) -> Option<f64> {
        match self {
            FieldValue::Amount(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the text if this is a Text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the flag if this is a Flag value
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Amount(v) => write!(f, "{:.2}", v),
            FieldValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Amount(v)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(FieldValue::Amount(48500.0).as_amount(), Some(48500.0));
        assert_eq!(FieldValue::Amount(48500.0).as_text(), None);
        assert_eq!(FieldValue::Text("Jane".into()).as_text(), Some("Jane"));
        assert_eq!(FieldValue::Flag(true).as_flag(), Some(true));
    }

    #[test]
    fn test_display_amount_two_decimals() {
        assert_eq!(FieldValue::Amount(48500.0).to_string(), "48500.00");
    }

    #[test]
    fn test_serde_round_trip() {
        let v = FieldValue::Amount(6835.0);
        let json = serde_json::to_string(&v).unwrap();
        let back: FieldValue = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
