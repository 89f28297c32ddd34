//! Defaulting accessors for loosely-typed JSON.
//!
//! NiceHash returns amounts sometimes as numbers and sometimes as decimal
//! strings, and omits keys freely. Nothing here fails: unusable values
//! collapse to the caller's default.

use serde_json::Value;

/// Reads a number or numeric string. Missing, null, non-numeric and
/// non-finite values yield `0.0`.
pub fn number(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
}

/// Reads an epoch timestamp in milliseconds. Fractional values truncate.
pub fn millis(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    }
}

/// Reads a scalar as text. Missing, null, empty strings and containers
/// yield `None`.
pub fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn text_or(value: Option<&Value>, default: &str) -> String {
    text(value).unwrap_or_else(|| default.to_string())
}

/// Name of the JSON type, for diagnostics.
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_accepts_numbers_and_numeric_strings() {
        let doc = json!({"a": 1.25, "b": "0.00012", "c": " 7 ", "d": 3});

        assert_eq!(number(doc.get("a")), 1.25);
        assert_eq!(number(doc.get("b")), 0.00012);
        assert_eq!(number(doc.get("c")), 7.0);
        assert_eq!(number(doc.get("d")), 3.0);
    }

    #[test]
    fn test_number_defaults_to_zero() {
        let doc = json!({"s": "abc", "n": null, "o": {}, "nan": "NaN", "inf": "inf", "t": true});

        assert_eq!(number(doc.get("missing")), 0.0);
        assert_eq!(number(doc.get("s")), 0.0);
        assert_eq!(number(doc.get("n")), 0.0);
        assert_eq!(number(doc.get("o")), 0.0);
        assert_eq!(number(doc.get("nan")), 0.0);
        assert_eq!(number(doc.get("inf")), 0.0);
        assert_eq!(number(doc.get("t")), 0.0);
    }

    #[test]
    fn test_millis() {
        let doc = json!({"n": 1700000000000_i64, "s": "1700000000001", "f": 1700000000002.9, "bad": "x"});

        assert_eq!(millis(doc.get("n")), 1_700_000_000_000);
        assert_eq!(millis(doc.get("s")), 1_700_000_000_001);
        assert_eq!(millis(doc.get("f")), 1_700_000_000_002);
        assert_eq!(millis(doc.get("bad")), 0);
        assert_eq!(millis(None), 0);
    }

    #[test]
    fn test_text_treats_empty_and_null_as_absent() {
        let doc = json!({"name": "rig-1", "empty": "", "null": null, "num": 12, "list": []});

        assert_eq!(text(doc.get("name")).as_deref(), Some("rig-1"));
        assert_eq!(text(doc.get("num")).as_deref(), Some("12"));
        assert_eq!(text(doc.get("empty")), None);
        assert_eq!(text(doc.get("null")), None);
        assert_eq!(text(doc.get("list")), None);
        assert_eq!(text_or(doc.get("missing"), "unknown"), "unknown");
    }
}
