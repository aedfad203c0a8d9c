//! Ordered field -> messages multimap.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::config::MSG_INVALID;

/// Accumulated field errors.
///
/// Fields keep the order in which their first message was added, and each
/// field keeps its messages in insertion order. Nothing is ever removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorSet {
    messages: IndexMap<String, Vec<String>>,
}

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` under `field`
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.messages
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Append every field/message pair of `other`
    pub fn merge(&mut self, other: &ErrorSet) {
        for (field, message) in other.iter() {
            self.add(field, message);
        }
    }

    /// Total number of messages
    pub fn count(&self) -> usize {
        self.messages.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Messages recorded under `field`
    pub fn get(&self, field: &str) -> &[String] {
        self.messages.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fields in first-insertion order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// Flattened `(field, message)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.messages.iter().flat_map(|(field, messages)| {
            messages.iter().map(move |m| (field.as_str(), m.as_str()))
        })
    }

    /// Human readable messages, e.g. `Name can't be blank`
    pub fn full_messages(&self) -> Vec<String> {
        self.iter()
            .map(|(field, message)| format!("{} {}", humanize(field), message))
            .collect()
    }

    /// All full messages joined into one line
    pub fn to_sentence(&self) -> String {
        self.full_messages().join(", ")
    }
}

/// `owner_id` -> `Owner id`
fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<ValidationErrors> for ErrorSet {
    fn from(errors: ValidationErrors) -> Self {
        let mut set = ErrorSet::new();
        collect(&mut set, None, &errors);
        set
    }
}

/// Flatten field, nested struct and list errors. Nested keys are dotted
/// (`item.name`), list entries are indexed (`items[0].name`).
fn collect(set: &mut ErrorSet, prefix: Option<&str>, errors: &ValidationErrors) {
    // validator hands back a HashMap; sort for a stable order
    let mut entries: Vec<_> = errors.errors().iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (field, kind) in entries {
        let key = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                for err in errs {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| MSG_INVALID.to_string());
                    set.add(key.clone(), message);
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(set, Some(&key), inner),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(set, Some(&format!("{}[{}]", key, index)), inner);
                }
            }
        }
    }
}
