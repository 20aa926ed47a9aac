//! # Lenient Field Decoding
//!
//! Facade input records come from loosely typed documents (YAML converted to
//! JSON, form posts). A numeric field may arrive as a number, as a numeric
//! string, or as something unusable. The engines treat the unusable case as
//! a missing value and return `None` instead of failing, so every numeric
//! input field is an `Option<f64>` decoded with [`lenient_f64`].
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Panel {
//!     #[serde(default, deserialize_with = "facade_core::fields::lenient_f64")]
//!     width: Option<f64>,
//! }
//!
//! let a: Panel = serde_json::from_str(r#"{"width": "1200"}"#).unwrap();
//! assert_eq!(a.width, Some(1200.0));
//! let b: Panel = serde_json::from_str(r#"{"width": "wide"}"#).unwrap();
//! assert_eq!(b.width, None);
//! ```

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Deserialize a number, a numeric string, or anything else as `None`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Some(n).filter(|v| v.is_finite()),
        NumberOrText::Text(s) => parse_number(&s),
        NumberOrText::Other(_) => None,
    })
}

/// Parse a numeric string.
///
/// Returns None for empty strings, dashes, or invalid numbers.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == "—" {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Treat zero as missing, like a truthiness check on the raw input.
#[inline]
pub fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Strictly positive value or `None`
#[inline]
pub fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_f64")]
        value: Option<f64>,
    }

    fn decode(json: &str) -> Option<f64> {
        serde_json::from_str::<Probe>(json).unwrap().value
    }

    #[test]
    fn test_lenient_numbers_and_strings() {
        assert_eq!(decode(r#"{"value": 12.5}"#), Some(12.5));
        assert_eq!(decode(r#"{"value": 3}"#), Some(3.0));
        assert_eq!(decode(r#"{"value": " 7.25 "}"#), Some(7.25));
    }

    #[test]
    fn test_lenient_garbage_is_none() {
        assert_eq!(decode(r#"{"value": "abc"}"#), None);
        assert_eq!(decode(r#"{"value": null}"#), None);
        assert_eq!(decode(r#"{"value": true}"#), None);
        assert_eq!(decode(r#"{"value": [1, 2]}"#), None);
        assert_eq!(decode(r#"{}"#), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("123.45"), Some(123.45));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("—"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_nonzero_and_positive() {
        assert_eq!(nonzero(Some(0.0)), None);
        assert_eq!(nonzero(Some(-2.0)), Some(-2.0));
        assert_eq!(positive(Some(-2.0)), None);
        assert_eq!(positive(Some(2.0)), Some(2.0));
    }
}
