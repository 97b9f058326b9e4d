//! Shared fixtures for integration tests.
//!
//! Provides the coercion strategies the assembly tests inject: a
//! pass-through strategy for observing pre-coercion values, and a small
//! leaf-type strategy that interprets schema leaves as expected-type
//! descriptors the way an external schema engine would.

use serde_json::{Map, Value};
use strata_config::{CoercionStrategy, FieldViolation};

/// Accepts any mapping unchanged; useful for observing raw merged values.
pub struct PassThrough;

impl CoercionStrategy for PassThrough {
    fn coerce(&self, merged: &Value, _schema: &Value) -> Result<Value, Vec<FieldViolation>> {
        Ok(merged.clone())
    }
}

/// Coerces and validates against a descriptor tree whose mapping nodes
/// mirror the configuration shape and whose string leaves name an expected
/// type: `string`, `boolean`, `integer`, or `positive-integer`.
///
/// Every schema leaf is required. Keys absent from the schema pass through
/// uncoerced. All violations are collected before the call fails.
pub struct LeafTypes;

impl CoercionStrategy for LeafTypes {
    fn coerce(&self, merged: &Value, schema: &Value) -> Result<Value, Vec<FieldViolation>> {
        let mut violations = Vec::new();
        let mut path = Vec::new();
        let coerced = coerce_node(merged, schema, &mut path, &mut violations);
        if violations.is_empty() {
            Ok(coerced)
        } else {
            Err(violations)
        }
    }
}

fn coerce_node(
    value: &Value,
    schema: &Value,
    path: &mut Vec<String>,
    violations: &mut Vec<FieldViolation>,
) -> Value {
    match schema {
        Value::Object(fields) => {
            let mut out: Map<String, Value> = value.as_object().cloned().unwrap_or_default();
            for (key, expected) in fields {
                path.push(key.clone());
                match value.get(key) {
                    Some(present) => {
                        let entry = coerce_node(present, expected, path, violations);
                        out.insert(key.clone(), entry);
                    }
                    // Recurse into absent branches so every required leaf is
                    // reported, not just the top of the missing subtree.
                    None if expected.is_object() => {
                        coerce_node(&Value::Object(Map::new()), expected, path, violations);
                    }
                    None => violations.push(FieldViolation {
                        path: path.join("/"),
                        expected: describe(expected),
                        found: None,
                    }),
                }
                path.pop();
            }
            Value::Object(out)
        }
        Value::String(expected) => coerce_leaf(value, expected, path, violations),
        _ => value.clone(),
    }
}

fn describe(schema: &Value) -> String {
    match schema {
        Value::String(leaf) => leaf.replace('-', " "),
        _ => String::from("mapping"),
    }
}

fn coerce_leaf(
    value: &Value,
    expected: &str,
    path: &[String],
    violations: &mut Vec<FieldViolation>,
) -> Value {
    let coerced = match expected {
        "string" => value.as_str().map(|text| Value::String(text.to_owned())),
        "boolean" => match value {
            Value::Bool(_) => Some(value.clone()),
            Value::String(text) => text.parse::<bool>().ok().map(Value::Bool),
            _ => None,
        },
        "integer" => integer_of(value).map(Value::from),
        "positive-integer" => integer_of(value).filter(|n| *n > 0).map(Value::from),
        _ => Some(value.clone()),
    };
    coerced.unwrap_or_else(|| {
        violations.push(FieldViolation {
            path: path.join("/"),
            expected: expected.replace('-', " "),
            found: Some(value.clone()),
        });
        value.clone()
    })
}

fn integer_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}
