//! Handler registry mapping element names to conversion functions.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use super::handler::{erase_fn, erase_handler, Conversion, NodeHandler};
use crate::config::normalize_name;
use crate::error::ConversionError;
use crate::node::Node;

/// Registry mapping element names to conversion functions.
///
/// Names are case-insensitive. The first registration for a name wins; later
/// registrations under the same name are ignored. The registry is built
/// before parsing and only borrowed immutably while a document is parsed.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Conversion>,
}

impl HandlerRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a conversion closure for an element name.
    ///
    /// ```
    /// use streambind::{ConversionError, HandlerRegistry};
    ///
    /// let registry = HandlerRegistry::new()
    ///     .register("isbn", |node| {
    ///         node.value("value")
    ///             .map(str::to_string)
    ///             .ok_or_else(|| ConversionError::MissingValue("value".to_string()))
    ///     });
    /// assert!(registry.has_handler("ISBN"));
    /// ```
    #[must_use]
    pub fn register<T, F>(self, name: &str, conversion: F) -> Self
    where
        T: Any,
        F: Fn(&Node) -> Result<T, ConversionError> + 'static,
    {
        self.insert(name, || erase_fn(conversion))
    }

    /// Register a [`NodeHandler`] for an element name.
    #[must_use]
    pub fn register_handler<H>(self, name: &str, handler: H) -> Self
    where
        H: NodeHandler + 'static,
    {
        self.insert(name, || erase_handler(handler))
    }

    fn insert(mut self, name: &str, conversion: impl FnOnce() -> Conversion) -> Self {
        let key = normalize_name(name);
        if self.handlers.contains_key(&key) {
            tracing::debug!(element = %key, "Handler already registered, keeping the first");
        } else {
            self.handlers.insert(key, conversion());
        }
        self
    }

    /// Get the conversion function for an element name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Conversion> {
        self.handlers.get(&normalize_name(name))
    }

    /// Check if a handler is registered for an element name.
    #[must_use]
    pub fn has_handler(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Return all registered element names, sorted.
    #[must_use]
    pub fn registered_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check whether no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.registered_names())
            .finish()
    }
}
