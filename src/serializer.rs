//! Live value graph → JSON.
//!
//! Follows the structural round trip a page would do with
//! `JSON.parse(JSON.stringify(value, replacer))`:
//!
//! - `undefined`, functions and symbols are dropped from objects and become
//!   `null` inside arrays,
//! - non-finite numbers become `null`,
//! - collections serialize as `{}`,
//! - every composite is visited at most once per call. Meeting it again (a
//!   cycle, or plain aliasing) yields [`CIRCULAR_SENTINEL`] instead.
//!
//! Big integers, throwing accessors and composites nested deeper than
//! [`MAX_DEPTH`] cannot be represented at all; they make [`try_serialize`]
//! fail so the caller can pick the sentinel that fits.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::{Map, Number, Value};

use crate::Live;

pub const CIRCULAR_SENTINEL: &str = "[Circular Reference]";
pub const UNSERIALIZABLE_SENTINEL: &str = "[Cannot serialize]";

/// Deepest composite nesting written out. Matches the recursion limit
/// `serde_json` applies when the output is parsed back.
pub const MAX_DEPTH: usize = 128;

/// A value that has no JSON form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerializeError {
    #[error("a {0} value has no JSON representation")]
    Unrepresentable(&'static str),

    #[error("reading a property threw: {0}")]
    Threw(Arc<str>),

    #[error("composites nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Serialize, replacing an unrepresentable value with
/// [`UNSERIALIZABLE_SENTINEL`]. Never fails.
pub fn serialize(value: &Live) -> Value {
    try_serialize(value).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Substituting unserializable value");
        Value::String(UNSERIALIZABLE_SENTINEL.into())
    })
}

/// Serialize with cycle breaking, failing on values JSON cannot carry.
///
/// A top-level `undefined`, function or symbol fails too: the round trip has
/// nothing to parse back.
pub fn try_serialize(value: &Live) -> Result<Value, SerializeError> {
    let mut visited = HashSet::new();
    to_json(value, &mut visited, 0)?.ok_or(SerializeError::Unrepresentable(value.kind()))
}

/// `Ok(None)` marks a value that is skipped rather than written. `depth` is
/// the number of composites enclosing `value`.
fn to_json(
    value: &Live,
    visited: &mut HashSet<usize>,
    depth: usize,
) -> Result<Option<Value>, SerializeError> {
    if let Some(address) = value.address() {
        if !visited.insert(address) {
            return Ok(Some(Value::String(CIRCULAR_SENTINEL.into())));
        }
        if depth >= MAX_DEPTH {
            return Err(SerializeError::TooDeep(MAX_DEPTH));
        }
    }

    let json = match value {
        Live::Undefined | Live::Function(_) | Live::Symbol(_) => return Ok(None),
        Live::Null => Value::Null,
        Live::Bool(b) => Value::Bool(*b),
        Live::Number(n) => number(*n),
        Live::String(s) => Value::String(s.to_string()),
        Live::BigInt(_) => return Err(SerializeError::Unrepresentable(value.kind())),
        Live::Throwing(msg) => return Err(SerializeError::Threw(Arc::from(msg.as_ref()))),
        Live::Collection(_) => Value::Object(Map::new()),
        Live::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items.items() {
                out.push(to_json(&item, visited, depth + 1)?.unwrap_or(Value::Null));
            }
            Value::Array(out)
        }
        Live::Object(obj) => {
            let mut out = Map::new();
            for (key, item) in obj.entries() {
                if let Some(json) = to_json(&item, visited, depth + 1)? {
                    out.insert(key.to_string(), json);
                }
            }
            Value::Object(out)
        }
    };
    Ok(Some(json))
}

fn number(n: f64) -> Value {
    if !n.is_finite() {
        return Value::Null;
    }
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return Value::from(n as i64);
    }
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}
