//! Stringify-on-write / parse-on-read codec for nested entity fields.
//!
//! Graph node properties are flat, so structured fields are stored as JSON
//! strings and parsed back on read. Decoding tolerates plain-string legacy
//! values: a property that does not parse as JSON is kept as-is, never an
//! error.

use serde_json::{Map, Value};

/// Serialize a structured value for storage. Strings pass through unchanged.
pub fn encode_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a stored property back into a structured value. Input that is not
/// valid JSON is returned as a plain string.
pub fn decode_value(raw: String) -> Value {
    match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(_) => Value::String(raw),
    }
}

/// Encode each named field of a JSON object in place. Absent fields and
/// fields that are already strings are left untouched.
pub fn encode_object(props: &mut Map<String, Value>, fields: &[&str]) {
    for &field in fields {
        if let Some(v) = props.get_mut(field) {
            if !v.is_string() {
                *v = Value::String(v.to_string());
            }
        }
    }
}

/// Decode each named field of a JSON object in place. Fields that fail to
/// parse keep their stored string form.
pub fn decode_object(props: &mut Map<String, Value>, fields: &[&str]) {
    for &field in fields {
        if let Some(Value::String(raw)) = props.get(field) {
            if let Ok(parsed) = serde_json::from_str::<Value>(raw) {
                props.insert((*field).to_string(), parsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_value_round_trips() {
        let original = json!({"sections": [{"title": "Intro", "body": "..."}], "count": 2});
        let stored = encode_value(&original);
        assert_eq!(decode_value(stored), original);
    }

    #[test]
    fn test_plain_string_passes_through() {
        // Legacy data stored before the codec existed: not valid JSON, so it
        // must survive decode unchanged.
        let stored = encode_value(&json!("just a sentence, not JSON"));
        assert_eq!(stored, "just a sentence, not JSON");
        assert_eq!(
            decode_value(stored),
            Value::String("just a sentence, not JSON".to_string())
        );
    }

    #[test]
    fn test_encode_leaves_strings_untouched() {
        // A value that is already a string is stored verbatim, even if it
        // happens to look like JSON.
        let already_encoded = json!("[1,2,3]");
        assert_eq!(encode_value(&already_encoded), "[1,2,3]");
    }

    #[test]
    fn test_object_encode_skips_absent_fields() {
        let mut props = json!({"tags": ["a", "b"]}).as_object().unwrap().clone();
        encode_object(&mut props, &["tags", "quiz"]);
        assert_eq!(props.get("tags"), Some(&json!("[\"a\",\"b\"]")));
        assert!(!props.contains_key("quiz"));
    }

    #[test]
    fn test_object_decode_keeps_unparseable_fields() {
        let mut props = json!({
            "quiz": "[{\"q\":\"?\"}]",
            "summary": "plain prose summary"
        })
        .as_object()
        .unwrap()
        .clone();
        decode_object(&mut props, &["quiz", "summary"]);
        assert_eq!(props.get("quiz"), Some(&json!([{"q": "?"}])));
        assert_eq!(props.get("summary"), Some(&json!("plain prose summary")));
    }

    #[test]
    fn test_object_decode_ignores_non_string_fields() {
        // Already-decoded values are left alone.
        let mut props = json!({"tags": ["a"]}).as_object().unwrap().clone();
        decode_object(&mut props, &["tags"]);
        assert_eq!(props.get("tags"), Some(&json!(["a"])));
    }
}
