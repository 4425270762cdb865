//! Null-safe lookups on server JSON payloads.
//!
//! The backend sends numbers where strings are expected, JSON `null` where a
//! field is optional, and sometimes the literal strings `"null"`, `"<null>"`
//! or `"(null)"`. These helpers normalise all of that at the point of use.

use std::mem::discriminant;

use serde_json::{Map, Number, Value};

const NULL_MARKERS: [&str; 3] = ["null", "<null>", "(null)"];

fn is_null_marker(s: &str) -> bool {
    NULL_MARKERS.contains(&s)
}

fn same_kind(a: &Value, b: &Value) -> bool {
    discriminant(a) == discriminant(b)
}

fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

/// Extension methods for JSON objects received from the server.
pub trait JsonObjectExt {
    /// Returns the value under `key` coerced toward the type of `expected`.
    ///
    /// - a number where a string is expected becomes its decimal string
    /// - a number where a float is expected becomes a float
    /// - a null-marker string becomes `""`
    /// - any other type mismatch yields `expected`
    /// - an absent or `null` value yields `""` when `expected` is a string,
    ///   otherwise `expected`
    fn validated(&self, key: &str, expected: &Value) -> Value;

    /// Returns the value under `key`, with absent, `null` and null-marker
    /// strings all mapped to `""`.
    fn not_null(&self, key: &str) -> Value;

    /// Returns the value under `key`, or `expected` when it is absent, `null`
    /// or of a different JSON type.
    fn or_expected(&self, key: &str, expected: &Value) -> Value;

    /// Inserts every pair from `other`, overwriting existing keys.
    fn union_in_place<I>(&mut self, other: I)
    where
        I: IntoIterator<Item = (String, Value)>;
}

impl JsonObjectExt for Map<String, Value> {
    fn validated(&self, key: &str, expected: &Value) -> Value {
        let Some(value) = present(self, key) else {
            return if expected.is_string() {
                Value::String(String::new())
            } else {
                expected.clone()
            };
        };

        match (value, expected) {
            (Value::Number(n), Value::String(_)) => Value::String(n.to_string()),
            (Value::Number(n), Value::Number(e)) if e.is_f64() => n
                .as_f64()
                .and_then(Number::from_f64)
                .map_or_else(|| value.clone(), Value::Number),
            (Value::String(s), Value::String(_)) if is_null_marker(s) => {
                Value::String(String::new())
            }
            _ if same_kind(value, expected) => value.clone(),
            _ => expected.clone(),
        }
    }

    fn not_null(&self, key: &str) -> Value {
        match present(self, key) {
            None => Value::String(String::new()),
            Some(Value::String(s)) if is_null_marker(s) => Value::String(String::new()),
            Some(value) => value.clone(),
        }
    }

    fn or_expected(&self, key: &str, expected: &Value) -> Value {
        match present(self, key) {
            Some(value) if same_kind(value, expected) => value.clone(),
            _ => expected.clone(),
        }
    }

    fn union_in_place<I>(&mut self, other: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        for (key, value) in other {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn payload() -> Map<String, Value> {
        let value = json!({
            "doctor_id": 42,
            "fee": 250,
            "name": "Dr. Rao",
            "note": "<null>",
            "clinic": null,
            "verified": true,
            "slots": ["09:00", "09:30"]
        });
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test_case("doctor_id", json!(""), json!("42") ; "number_to_string")]
    #[test_case("fee", json!(0.0), json!(250.0) ; "number_to_float")]
    #[test_case("fee", json!(0), json!(250) ; "number_stays_integer")]
    #[test_case("name", json!(""), json!("Dr. Rao") ; "string_passes")]
    #[test_case("note", json!(""), json!("") ; "null_marker_cleared")]
    #[test_case("clinic", json!(""), json!("") ; "json_null_string_expected")]
    #[test_case("clinic", json!(7), json!(7) ; "json_null_other_expected")]
    #[test_case("missing", json!("fallback"), json!("") ; "absent_string_expected")]
    #[test_case("missing", json!(false), json!(false) ; "absent_bool_expected")]
    #[test_case("verified", json!(""), json!("") ; "mismatch_yields_expected")]
    #[test_case("slots", json!([]), json!(["09:00", "09:30"]) ; "array_passes")]
    fn test_validated(key: &str, expected: Value, want: Value) {
        assert_eq!(payload().validated(key, &expected), want);
    }

    #[test_case("name", json!("Dr. Rao") ; "plain")]
    #[test_case("note", json!("") ; "marker")]
    #[test_case("clinic", json!("") ; "null")]
    #[test_case("missing", json!("") ; "absent")]
    #[test_case("fee", json!(250) ; "number")]
    fn test_not_null(key: &str, want: Value) {
        assert_eq!(payload().not_null(key), want);
    }

    #[test]
    fn test_or_expected() {
        let map = payload();
        assert_eq!(map.or_expected("verified", &json!(false)), json!(true));
        assert_eq!(map.or_expected("name", &json!(0)), json!(0));
        assert_eq!(map.or_expected("clinic", &json!("none")), json!("none"));
        assert_eq!(map.or_expected("missing", &json!([])), json!([]));
    }

    #[test]
    fn test_union_in_place_overwrites() {
        let mut map = payload();
        let mut extra = Map::new();
        extra.insert("fee".into(), json!(300));
        extra.insert("city".into(), json!("Pune"));

        map.union_in_place(extra);

        assert_eq!(map.get("fee"), Some(&json!(300)));
        assert_eq!(map.get("city"), Some(&json!("Pune")));
        assert_eq!(map.get("name"), Some(&json!("Dr. Rao")));
    }
}
