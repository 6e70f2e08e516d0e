//! Value slots stored in a node.

use std::any::{type_name, Any};
use std::fmt;

use chrono::NaiveDate;

/// A single value recorded under a name.
///
/// Character data is stored as text. Objects produced by a child element's
/// conversion function are stored as dates or text when they are of those
/// types, and as opaque objects otherwise.
pub enum Value {
    /// Trimmed character data.
    Text(String),
    /// A calendar date.
    Date(NaiveDate),
    /// An object produced by a conversion function.
    Object(Box<dyn Any>),
}

impl Value {
    /// Wrap an object produced by a conversion function.
    ///
    /// `String` and `NaiveDate` objects become [`Value::Text`] and
    /// [`Value::Date`], so plain accessors see them.
    #[must_use]
    pub fn from_object(object: Box<dyn Any>) -> Self {
        let object = match object.downcast::<String>() {
            Ok(text) => return Self::Text(*text),
            Err(object) => object,
        };
        match object.downcast::<NaiveDate>() {
            Ok(date) => Self::Date(*date),
            Err(object) => Self::Object(object),
        }
    }

    /// Return the text if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Check whether the value is an instance of `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Borrow the value as `T` if it is an instance of `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Text(text) => (text as &dyn Any).downcast_ref::<T>(),
            Self::Date(date) => (date as &dyn Any).downcast_ref::<T>(),
            Self::Object(object) => (**object).downcast_ref::<T>(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Date(date) => f.debug_tuple("Date").field(date).finish(),
            Self::Object(_) => f.write_str("Object(..)"),
        }
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<Box<dyn Any>> for Value {
    fn from(object: Box<dyn Any>) -> Self {
        Self::from_object(object)
    }
}

/// The content recorded under one name in a node.
///
/// A name holds a single value until a second value arrives, after which it
/// holds a set of values for the rest of the node's life.
#[derive(Debug)]
pub enum Slot {
    /// Exactly one value was added.
    Single(Value),
    /// Two or more values were added. Equal values are kept, in insertion order.
    Set(Vec<Value>),
}

impl Slot {
    /// Add a value, promoting a single value to a set.
    pub(crate) fn push(&mut self, value: Value) {
        match self {
            Self::Set(values) => values.push(value),
            Self::Single(_) => {
                let previous = std::mem::replace(self, Self::Set(Vec::with_capacity(2)));
                if let (Self::Single(first), Self::Set(values)) = (previous, &mut *self) {
                    values.push(first);
                    values.push(value);
                }
            }
        }
    }

    /// Number of values in the slot.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Set(values) => values.len(),
        }
    }

    /// Always false: a slot exists only once a value was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether the slot has been promoted to a set.
    #[must_use]
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// Iterate over the values in the slot.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        let values: &[Value] = match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Set(values) => values,
        };
        values.iter()
    }
}

/// Name of `T` for error messages.
///
/// Module paths are dropped from every path segment, so
/// `Vec<alloc::string::String>` reads `Vec<String>`.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
    let name = type_name::<T>();
    let mut short = String::with_capacity(name.len());
    let mut segment_start = 0;
    for (index, c) in name.char_indices() {
        if matches!(c, '<' | '>' | ',' | '(' | ')' | '[' | ']' | ';' | '&' | ' ') {
            short.push_str(strip_path(&name[segment_start..index]));
            short.push(c);
            segment_start = index + c.len_utf8();
        }
    }
    short.push_str(strip_path(&name[segment_start..]));
    short
}

fn strip_path(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
