// SPDX-License-Identifier: MIT OR Apache-2.0

//! The value of a property: one string, or several for repeated keys.

use serde::{Deserialize, Serialize};

/// Everything stored under one key.
///
/// A key matched by exactly one node is `Single`; repeated elements or repeated
/// additions to the same key make it a `List`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Exactly one value
    Single(String),
    /// Two or more values, in document order
    List(Vec<String>),
}

impl PropertyValue {
    /// Builds a property from collected values, `None` when there are none.
    pub fn from_values(mut values: Vec<String>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => values.pop().map(PropertyValue::Single),
            _ => Some(PropertyValue::List(values)),
        }
    }

    /// The first value.
    pub fn first(&self) -> Option<&str> {
        match self {
            PropertyValue::Single(value) => Some(value),
            PropertyValue::List(values) => values.first().map(String::as_str),
        }
    }

    /// Returns `true` for a `List`.
    pub fn is_list(&self) -> bool {
        matches!(self, PropertyValue::List(_))
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        match self {
            PropertyValue::Single(_) => 1,
            PropertyValue::List(values) => values.len(),
        }
    }

    /// Always `false` for values built by [`PropertyValue::from_values`].
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows the values as a vector of slices.
    pub fn values(&self) -> Vec<&str> {
        match self {
            PropertyValue::Single(value) => vec![value.as_str()],
            PropertyValue::List(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Returns `true` if any value equals `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.values().contains(&needle)
    }

    /// Converts into an owned list of values.
    pub fn into_list(self) -> Vec<String> {
        match self {
            PropertyValue::Single(value) => vec![value],
            PropertyValue::List(values) => values,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Single(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Single(value)
    }
}

impl PartialEq<&str> for PropertyValue {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, PropertyValue::Single(value) if value == other)
    }
}
