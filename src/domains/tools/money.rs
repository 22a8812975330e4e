//! Monetary unit conversion.
//!
//! The inFakt API represents every amount as an integer number of grosze
//! (minor currency units). Tool output surfaces amounts as decimal zloty
//! (major units) instead, so responses fetched from the API are passed
//! through [`convert_amount_fields`] exactly once before serialization.
//! Outbound request bodies are never converted; callers supply minor units.

use serde_json::{Map, Number, Value};

/// Field names that carry minor-unit amounts in API responses.
///
/// Matching is by exact key name, at any nesting depth.
pub const AMOUNT_FIELDS: &[&str] = &[
    "net_price",
    "gross_price",
    "tax_price",
    "unit_net_price",
    "unit_gross_price",
    "price",
    "amount",
    "total",
    "value",
];

/// Convert a minor-unit amount (grosze) to a major-unit amount (zloty).
///
/// The value is rounded to the nearest integer minor unit first, guarding
/// against floating-point noise, then divided by 100. The result has at
/// most two decimal places.
pub fn minor_to_major(value: f64) -> f64 {
    value.round() / 100.0
}

/// Convert a major-unit amount (zloty) to an integer minor-unit amount.
pub fn major_to_minor(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// Recursively convert recognized amount fields in an API response.
///
/// Walks arrays element-wise and objects key-wise. A key in
/// [`AMOUNT_FIELDS`] whose value is a number or a numeric-looking string is
/// replaced with its major-unit equivalent; every other value is recursed
/// into or passed through unchanged. The input is not mutated; a new
/// structure is returned.
pub fn convert_amount_fields(data: &Value) -> Value {
    match data {
        Value::Array(items) => Value::Array(items.iter().map(convert_amount_fields).collect()),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, value) in map {
                let converted = if AMOUNT_FIELDS.contains(&key.as_str()) {
                    match as_numeric(value) {
                        Some(n) => number_value(minor_to_major(n)),
                        // Recognized name but non-numeric value: pass through.
                        None => convert_amount_fields(value),
                    }
                } else {
                    convert_amount_fields(value)
                };
                out.insert(key.clone(), converted);
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

/// Extract a numeric amount from a JSON number or numeric string.
fn as_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn number_value(n: f64) -> Value {
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minor_to_major() {
        assert_eq!(minor_to_major(5000.0), 50.0);
        assert_eq!(minor_to_major(12345.0), 123.45);
        assert_eq!(minor_to_major(1.0), 0.01);
        assert_eq!(minor_to_major(0.0), 0.0);
        // Floating noise is rounded away before dividing.
        assert_eq!(minor_to_major(4999.9999999), 50.0);
    }

    #[test]
    fn test_major_to_minor() {
        assert_eq!(major_to_minor(50.0), 5000);
        assert_eq!(major_to_minor(123.45), 12345);
        assert_eq!(major_to_minor(0.01), 1);
        assert_eq!(major_to_minor(0.0), 0);
    }

    #[test]
    fn test_round_trip_on_integers() {
        for g in [0i64, 1, 99, 100, 101, 5000, 12345, 999_999_999] {
            assert_eq!(major_to_minor(minor_to_major(g as f64)), g);
        }
    }

    #[test]
    fn test_convert_flat_object() {
        let input = json!({"net_price": 5000, "name": "Dev"});
        let out = convert_amount_fields(&input);
        assert_eq!(out, json!({"net_price": 50.0, "name": "Dev"}));
    }

    #[test]
    fn test_convert_nested_arrays_and_objects() {
        let input = json!({
            "invoice": {
                "gross_price": 12300,
                "services": [
                    {"unit_net_price": 5000, "name": "Dev", "quantity": 2},
                    {"unit_net_price": "2500", "name": "Ops"}
                ]
            }
        });
        let out = convert_amount_fields(&input);
        assert_eq!(out["invoice"]["gross_price"], json!(123.0));
        assert_eq!(out["invoice"]["services"][0]["unit_net_price"], json!(50.0));
        assert_eq!(out["invoice"]["services"][1]["unit_net_price"], json!(25.0));
        // Unrecognized keys untouched.
        assert_eq!(out["invoice"]["services"][0]["quantity"], json!(2));
    }

    #[test]
    fn test_convert_does_not_mutate_input() {
        let input = json!({"price": 100, "items": [{"amount": 250}]});
        let snapshot = input.clone();
        let _ = convert_amount_fields(&input);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn test_non_numeric_recognized_field_passes_through() {
        let input = json!({"price": null, "amount": true, "total": "n/a"});
        let out = convert_amount_fields(&input);
        assert_eq!(out, input);
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(convert_amount_fields(&json!(null)), json!(null));
        assert_eq!(convert_amount_fields(&json!(42)), json!(42));
        assert_eq!(convert_amount_fields(&json!("price")), json!("price"));
    }

    #[test]
    fn test_numeric_string_amount_converted() {
        let input = json!({"tax_price": "2300"});
        let out = convert_amount_fields(&input);
        assert_eq!(out["tax_price"], json!(23.0));
    }
}
