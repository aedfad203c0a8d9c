//! Presentation helpers for service results.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::ServiceResult;

/// Key filters applied to a presented object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentOptions {
    /// Keep only these keys (empty = keep all)
    pub only: Vec<String>,
    /// Drop these keys
    pub except: Vec<String>,
}

impl PresentOptions {
    pub fn only<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            only: keys.into_iter().map(Into::into).collect(),
            except: Vec::new(),
        }
    }

    pub fn except<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            only: Vec::new(),
            except: keys.into_iter().map(Into::into).collect(),
        }
    }
}

/// Something a service can hand back to its caller.
pub trait Presentable: Serialize {
    /// Named alternative rendering. `None` falls back to plain serialization.
    fn view(&self, _method: &str) -> Option<Value> {
        None
    }
}

impl<T: Presentable> Presentable for Vec<T> {
    fn view(&self, method: &str) -> Option<Value> {
        self.iter()
            .map(|item| item.view(method))
            .collect::<Option<Vec<_>>>()
            .map(Value::Array)
    }
}

/// Render `object`, optionally through a named view, then apply key filters.
pub fn present<T: Presentable + ?Sized>(
    object: &T,
    method: Option<&str>,
    options: &PresentOptions,
) -> ServiceResult<Value> {
    let value = match method.and_then(|m| object.view(m)) {
        Some(value) => value,
        None => serde_json::to_value(object)?,
    };
    Ok(filter(value, options))
}

fn filter(value: Value, options: &PresentOptions) -> Value {
    match value {
        Value::Object(map) => Value::Object(filter_map(map, options)),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|v| filter(v, options)).collect())
        }
        other => other,
    }
}

fn filter_map(map: Map<String, Value>, options: &PresentOptions) -> Map<String, Value> {
    map.into_iter()
        .filter(|(key, _)| options.only.is_empty() || options.only.contains(key))
        .filter(|(key, _)| !options.except.contains(key))
        .collect()
}
