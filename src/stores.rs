use serde_json::Value;

use crate::{Framework, serializer::try_serialize};

/// Keys of every registered store, in registration order.
pub fn list_stores<H: Framework>(host: &H) -> Vec<String> {
    host.store_keys().unwrap_or_default()
}

/// Serialized state of one store; `None` when there is no registry, no such
/// store, or its state has no JSON form.
pub fn store_state<H: Framework>(host: &H, key: &str) -> Option<Value> {
    let state = host.store_state(key)?;
    match try_serialize(&state) {
        Ok(json) => Some(json),
        Err(err) => {
            tracing::warn!(store = key, error = %err, "Could not serialize store state");
            None
        }
    }
}
