// src/models/json.rs
// DOCUMENTATION: Lenient field accessors for persisted records
// PURPOSE: Read loosely-typed JSON documents, substituting defaults for missing or mistyped keys

use serde_json::{Map, Value};

/// String field, or "" when absent or not a string
pub fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

/// List of strings; non-string entries are dropped
pub fn string_list_field(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Number from either a JSON number or a numeric string
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Integer field, accepting integral numbers and numeric strings, 0 otherwise
pub fn int_field(obj: &Map<String, Value>, key: &str) -> i64 {
    match obj.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_string_field_defaults() {
        let obj = object(json!({"name": "Da Michele", "phone": 42}));
        assert_eq!(string_field(&obj, "name"), "Da Michele");
        assert_eq!(string_field(&obj, "phone"), "");
        assert_eq!(string_field(&obj, "missing"), "");
    }

    #[test]
    fn test_string_list_drops_non_strings() {
        let obj = object(json!({"tags": ["pizza", 3, null, "napoli"]}));
        assert_eq!(string_list_field(&obj, "tags"), vec!["pizza", "napoli"]);
        assert!(string_list_field(&obj, "other").is_empty());
    }

    #[test]
    fn test_int_field_variants() {
        let obj = object(json!({"a": 3, "b": "4", "c": 2.0, "d": 2.5, "e": "x", "f": true}));
        assert_eq!(int_field(&obj, "a"), 3);
        assert_eq!(int_field(&obj, "b"), 4);
        assert_eq!(int_field(&obj, "c"), 2);
        assert_eq!(int_field(&obj, "d"), 0);
        assert_eq!(int_field(&obj, "e"), 0);
        assert_eq!(int_field(&obj, "f"), 0);
    }

    #[test]
    fn test_as_f64_accepts_strings() {
        assert_eq!(as_f64(&json!("40.85")), Some(40.85));
        assert_eq!(as_f64(&json!(14.27)), Some(14.27));
        assert_eq!(as_f64(&json!("")), None);
        assert_eq!(as_f64(&Value::Null), None);
    }
}
