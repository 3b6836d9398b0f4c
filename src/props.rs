//! Property access over heterogeneous GeoJSON attribute records.
//!
//! Public datasets rarely agree on field naming (`NAME` vs `SITE_NAME` vs
//! `name`), so every lookup takes a candidate-key list and returns the first
//! present, non-empty value.

use serde_json::Value;
use std::collections::HashMap;

/// Attribute record of a GeoJSON feature
pub type Properties = HashMap<String, Value>;

/// Returns the first candidate key's value that is present and non-empty
/// (not null and not the empty string). Pure, no coercion.
pub fn first_prop<'a>(props: &'a Properties, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| {
        props.get(*key).filter(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
    })
}

/// String view of [`first_prop`]; non-string values resolve to `None`.
pub fn first_str<'a>(props: &'a Properties, keys: &[&str]) -> Option<&'a str> {
    first_prop(props, keys).and_then(Value::as_str)
}

/// Resolves via [`first_prop`] and coerces to a number. Numeric strings are
/// parsed; anything absent or not a finite number yields the fallback.
pub fn number_or(props: &Properties, keys: &[&str], fallback: f64) -> f64 {
    let n = match first_prop(props, keys) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match n {
        Some(n) if n.is_finite() => n,
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Properties {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_first_prop_returns_first_present() {
        let record = props(json!({ "b": 5 }));
        assert_eq!(first_prop(&record, &["a", "b"]), Some(&json!(5)));
    }

    #[test]
    fn test_first_prop_skips_empty_values() {
        let record = props(json!({ "a": "", "b": null, "c": "pool" }));
        assert_eq!(first_prop(&record, &["a", "b", "c"]), Some(&json!("pool")));
        assert_eq!(first_prop(&record, &["a", "b"]), None);
    }

    #[test]
    fn test_first_prop_respects_candidate_order() {
        let record = props(json!({ "NAME": "upper", "name": "lower" }));
        assert_eq!(first_str(&record, &["name", "NAME"]), Some("lower"));
        assert_eq!(first_str(&record, &["NAME", "name"]), Some("upper"));
    }

    #[test]
    fn test_number_or_fallback_on_non_numeric() {
        let record = props(json!({ "score": "x" }));
        assert_eq!(number_or(&record, &["score"], 0.0), 0.0);
    }

    #[test]
    fn test_number_or_parses_numeric_strings() {
        let record = props(json!({ "HVI_SCORE": "3.5" }));
        assert_eq!(number_or(&record, &["hvi_score", "HVI_SCORE"], 0.0), 3.5);
    }

    #[test]
    fn test_number_or_fallback_on_absent() {
        let record = props(json!({}));
        assert_eq!(number_or(&record, &["score"], 7.0), 7.0);
    }
}
