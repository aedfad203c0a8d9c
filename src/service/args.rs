//! Building typed arguments from an open-ended argument bag.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{ServiceError, ServiceResult};

/// Deserialize a JSON object into a service's typed arguments.
///
/// Argument structs are expected to use `#[serde(deny_unknown_fields)]`, so
/// a misspelled key fails here instead of being silently ignored.
pub fn from_bag<A: DeserializeOwned>(bag: Value) -> ServiceResult<A> {
    if !bag.is_object() {
        return Err(ServiceError::arguments("argument bag must be a JSON object"));
    }
    serde_json::from_value(bag).map_err(|e| ServiceError::arguments(e.to_string()))
}
