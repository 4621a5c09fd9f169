//! Payload encoder
//!
//! Flattens the flat, dotted-key argument bag of a request into a nested
//! JSON structure matching the chaos CRD spec schemas. Dotted keys denote
//! nesting (`attr.perm` becomes `{"attr": {"perm": ...}}`); repeated
//! prefixes merge into one object.
//!
//! Known fidelity limitation: double quotes inside values are rewritten to
//! single quotes before encoding, because the flatten transform cannot
//! safely escape embedded double quotes. Values containing literal `"`
//! do not round-trip.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// Reserved argument key holding a comma-separated container list
const CONTAINERS_KEY: &str = "Containers";

/// Key the CRD schemas expect the container array under
const CONTAINER_NAMES_KEY: &str = "containerNames";

/// Rewrites the comma-separated `Containers` value into a JSON array
/// literal stored under `containerNames`. The original key is left in
/// place; downstream decoding only looks at the array key.
pub fn containers_to_array(arguments: &mut HashMap<String, String>) {
    if let Some(containers) = arguments.get(CONTAINERS_KEY) {
        let names: Vec<&str> = containers.split(',').collect();
        // serde_json cannot fail on a list of strings
        let literal = serde_json::to_string(&names).unwrap_or_default();
        arguments.insert(CONTAINER_NAMES_KEY.to_string(), literal);
    }
}

/// Flattens the argument bag into a nested JSON object.
///
/// Values that are bracketed JSON array literals (an artifact of
/// [`containers_to_array`]) are restored to proper arrays; everything else
/// stays a string.
pub fn flatten(arguments: &HashMap<String, String>) -> AppResult<Value> {
    let mut root = Map::new();

    // Deterministic insertion order so path conflicts surface consistently
    let mut keys: Vec<&String> = arguments.keys().collect();
    keys.sort();

    for key in keys {
        insert_path(&mut root, key, key, encode_value(&arguments[key]))?;
    }

    Ok(Value::Object(root))
}

fn encode_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        if let Ok(parsed @ Value::Array(_)) = serde_json::from_str(trimmed) {
            return parsed;
        }
    }
    Value::String(raw.replace('"', "'"))
}

fn insert_path(map: &mut Map<String, Value>, key: &str, path: &str, value: Value) -> AppResult<()> {
    match path.split_once('.') {
        None => {
            if path.is_empty() {
                return Err(AppError::MalformedKey(key.to_string()));
            }
            // A leaf cannot replace an object another key already opened
            if matches!(map.get(path), Some(Value::Object(_))) {
                return Err(AppError::MalformedKey(key.to_string()));
            }
            map.insert(path.to_string(), value);
            Ok(())
        }
        Some((head, rest)) => {
            if head.is_empty() || rest.is_empty() {
                return Err(AppError::MalformedKey(key.to_string()));
            }
            let entry = map
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            match entry {
                Value::Object(child) => insert_path(child, key, rest, value),
                _ => Err(AppError::MalformedKey(key.to_string())),
            }
        }
    }
}
