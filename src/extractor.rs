use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::serializer::{serialize, try_serialize};
use crate::{Framework, Live};

/// Bookkeeping entry of one reactive effect that reads a derived value.
///
/// `root_key` is the first property the derived value tracks and
/// `nested_key` the last one; for a single-level read only the root is set.
/// Empty keys are treated as absent.
#[derive(Debug, Clone)]
pub struct DependencyRecord {
    pub root_key: Option<String>,
    pub nested_key: Option<String>,
    pub value: Live,
}

impl DependencyRecord {
    pub fn flat(root_key: impl Into<String>, value: Live) -> Self {
        Self {
            root_key: Some(root_key.into()),
            nested_key: None,
            value,
        }
    }

    pub fn nested(root_key: impl Into<String>, nested_key: impl Into<String>, value: Live) -> Self {
        Self {
            root_key: Some(root_key.into()),
            nested_key: Some(nested_key.into()),
            value,
        }
    }
}

/// Two-part state view of a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedState {
    /// Declared inputs (props).
    pub inputs: Map<String, Value>,
    /// Derived values keyed by root key, at most one level of nesting below.
    pub derived: Map<String, Value>,
}

/// Read a component's inputs and derived values. Never mutates the page.
pub fn extract_state<H: Framework>(host: &H, component: &H::Component) -> ExtractedState {
    ExtractedState {
        inputs: extract_inputs(host.declared_inputs(component)),
        derived: extract_derived(host.dependency_records(component)),
    }
}

fn extract_inputs(inputs: Option<Live>) -> Map<String, Value> {
    let Some(inputs) = inputs else {
        return Map::new();
    };
    match try_serialize(&inputs) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(err) => {
            tracing::warn!(error = %err, "Could not serialize component inputs");
            match json!({ "error": "Could not serialize props" }) {
                Value::Object(map) => map,
                _ => Map::new(),
            }
        }
    }
}

fn extract_derived(records: Vec<DependencyRecord>) -> Map<String, Value> {
    let mut derived = Map::new();
    for record in records {
        let root = record.root_key.filter(|k| !k.is_empty());
        let nested = record.nested_key.filter(|k| !k.is_empty());
        match (root, nested) {
            (Some(root), Some(nested)) => {
                let slot = derived
                    .entry(root)
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(map) = slot {
                    map.insert(nested, serialize(&record.value));
                }
            }
            (Some(root), None) => {
                derived.insert(root, serialize(&record.value));
            }
            (None, _) => {}
        }
    }
    derived
}
