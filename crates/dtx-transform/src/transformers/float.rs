//! Decimal float conversion.

use dtx_tensor::NdArray;
use serde_json::Value;
use tracing::trace;

use crate::error::Result;
use crate::record::Record;

/// Written when a value cannot be read as a float.
pub const BAD_VALUE: f64 = f64::NAN;

/// Parse a string as a decimal float, returning None for invalid or empty strings.
pub fn parse_float(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Numeric value of one JSON leaf, or `None` when it has none.
pub fn leaf_to_float(leaf: &Value) -> Option<f64> {
    match leaf {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Converts every leaf to a float, writing NaN for anything unparseable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatTransformer;

impl FloatTransformer {
    pub(crate) fn map_record(&self, record: &Record<'_>, array: &mut NdArray) -> Result<()> {
        for (element, leaf) in record.leaves() {
            array.write(element, float_or_bad(element, leaf))?;
        }
        Ok(())
    }
}

pub(crate) fn float_or_bad(element: usize, leaf: &Value) -> f64 {
    leaf_to_float(leaf).unwrap_or_else(|| {
        trace!(element, "value is not a float, writing NaN");
        BAD_VALUE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("123"), Some(123.0));
        assert_eq!(parse_float("  -45.67  "), Some(-45.67));
        assert_eq!(parse_float("1.5E-3"), Some(0.0015));
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("abc"), None);
        assert_eq!(parse_float("12.34.56"), None);
        assert_eq!(parse_float("1,234"), None);
    }

    #[test]
    fn test_leaf_to_float() {
        assert_eq!(leaf_to_float(&json!(2.5)), Some(2.5));
        assert_eq!(leaf_to_float(&json!("7")), Some(7.0));
        assert_eq!(leaf_to_float(&json!(true)), Some(1.0));
        assert_eq!(leaf_to_float(&json!(null)), None);
        assert_eq!(leaf_to_float(&json!({"a": 1})), None);
    }

    #[test]
    fn test_bad_value_is_nan() {
        assert!(float_or_bad(0, &json!("n/a")).is_nan());
    }
}
