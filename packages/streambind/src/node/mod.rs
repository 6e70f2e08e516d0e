//! Generic attribute/value container built for one handled element.
//!
//! A [`Node`] collects the attributes of its element and every value recorded
//! while the element was open: trimmed character data of child elements and
//! the objects produced for nested handled elements. Conversion functions read
//! it through type-checked accessors that return nothing on a shape mismatch.

mod value;

use std::any::Any;
use std::collections::HashMap;

use chrono::NaiveDate;

use crate::config::normalize_name;
use crate::error::ConversionError;

pub(crate) use value::short_type_name;
pub use value::{Slot, Value};

/// Values and attributes read from one XML element.
///
/// All names are case-insensitive.
#[derive(Debug, Default)]
pub struct Node {
    values: HashMap<String, Slot>,
    attributes: HashMap<String, String>,
}

impl Node {
    /// Create an empty node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node from element attributes.
    ///
    /// Attributes with an empty name are skipped.
    pub fn with_attributes<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut node = Self::new();
        for (name, value) in attributes {
            node.set_attribute(name.as_ref(), value);
        }
        node
    }

    /// Record an attribute. Empty names are ignored.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        if name.is_empty() {
            return;
        }
        self.attributes.insert(normalize_name(name), value.into());
    }

    /// Add a value under `name`.
    ///
    /// The first value is stored as is. A second value turns the slot into a
    /// set holding both; later values are appended to that set.
    pub fn add_value(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        let key = normalize_name(name);
        match self.values.get_mut(&key) {
            Some(slot) => slot.push(value),
            None => {
                self.values.insert(key, Slot::Single(value));
            }
        }
    }

    /// Get an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&normalize_name(name))
            .map(String::as_str)
    }

    /// Get an attribute parsed as a base-10 integer.
    ///
    /// Returns `None` when the attribute is absent or not a number.
    /// Surrounding whitespace makes it not a number.
    #[must_use]
    pub fn attribute_as_integer(&self, name: &str) -> Option<i64> {
        self.attribute(name)?.parse().ok()
    }

    /// Get a value as text.
    ///
    /// Returns `None` when the name is absent, holds a set, or holds a
    /// non-text value.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        match self.slot(name)? {
            Slot::Single(value) => value.as_text(),
            Slot::Set(_) => None,
        }
    }

    /// Get a value as an ISO calendar date (`YYYY-MM-DD`).
    ///
    /// Absent names and non-text slots yield `Ok(None)`. Text that is not a
    /// valid date is an error rather than `None`.
    ///
    /// # Errors
    /// Returns `ConversionError::InvalidDate` if the text does not parse.
    pub fn value_as_date(&self, name: &str) -> Result<Option<NaiveDate>, ConversionError> {
        let Some(Slot::Single(value)) = self.slot(name) else {
            return Ok(None);
        };
        match value {
            Value::Date(date) => Ok(Some(*date)),
            Value::Text(text) => text.parse::<NaiveDate>().map(Some).map_err(|source| {
                ConversionError::InvalidDate {
                    name: normalize_name(name),
                    value: text.clone(),
                    source,
                }
            }),
            Value::Object(_) => Ok(None),
        }
    }

    /// Get a single value as `T`.
    ///
    /// Returns `None` when the name is absent, holds a set, or is not a `T`.
    #[must_use]
    pub fn typed_value<T: Any>(&self, name: &str) -> Option<&T> {
        match self.slot(name)? {
            Slot::Single(value) => value.downcast_ref::<T>(),
            Slot::Set(_) => None,
        }
    }

    /// Get all values under `name` as `T`.
    ///
    /// A single value yields a one-element list if it is a `T`. For a set,
    /// only the first value is type-checked: if it is not a `T` the whole set
    /// is discarded, even when later values would match. Otherwise the
    /// members that are a `T` are returned in insertion order.
    #[must_use]
    pub fn typed_values<T: Any>(&self, name: &str) -> Vec<&T> {
        match self.slot(name) {
            None => Vec::new(),
            Some(Slot::Single(value)) => value.downcast_ref::<T>().into_iter().collect(),
            Some(Slot::Set(values)) => match values.first() {
                Some(first) if first.is::<T>() => values
                    .iter()
                    .filter_map(|value| value.downcast_ref::<T>())
                    .collect(),
                _ => Vec::new(),
            },
        }
    }

    /// Get the raw slot recorded under `name`.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.values.get(&normalize_name(name))
    }

    /// Check whether anything was recorded under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.slot(name).is_some()
    }

    /// Iterate over all recorded `(name, slot)` pairs, in no particular order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.values.iter().map(|(name, slot)| (name.as_str(), slot))
    }

    /// Iterate over all `(name, value)` attribute pairs, in no particular order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of distinct value names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether no values were recorded. Attributes are not counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
