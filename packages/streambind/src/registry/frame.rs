//! Parse state of one open handled element.

use std::any::Any;

use super::handler::Conversion;
use crate::config::DEFAULT_VALUE_SLOT;
use crate::error::ConversionError;
use crate::node::{Node, Value};

/// Live state of one open element that has a registered handler.
///
/// The frame owns the node being built and remembers which child name
/// receives the next character data or nested object.
pub struct ActiveFrame<'r> {
    element_name: String,
    node: Node,
    current_slot: String,
    conversion: &'r Conversion,
}

impl<'r> ActiveFrame<'r> {
    /// Open a frame for `element_name` with a node pre-filled with attributes.
    #[must_use]
    pub fn new(element_name: impl Into<String>, node: Node, conversion: &'r Conversion) -> Self {
        Self {
            element_name: element_name.into(),
            node,
            current_slot: DEFAULT_VALUE_SLOT.to_string(),
            conversion,
        }
    }

    /// Name of the element this frame was opened for.
    #[must_use]
    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    /// Name that currently receives character data.
    #[must_use]
    pub fn current_slot(&self) -> &str {
        &self.current_slot
    }

    /// The node built so far.
    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// A child element started: route following data to its name.
    pub fn on_child_start(&mut self, child_name: &str) {
        child_name.clone_into(&mut self.current_slot);
    }

    /// Record character data under the current slot.
    ///
    /// Data that is empty after trimming is dropped and leaves the current
    /// slot untouched.
    pub fn on_character_data(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        tracing::trace!(element = %self.element_name, slot = %self.current_slot, text, "characters");
        self.node.add_value(&self.current_slot, text);
    }

    /// Record the object produced by a closed child element.
    pub fn on_child_value(&mut self, child_name: &str, object: Box<dyn Any>) {
        self.on_child_start(child_name);
        self.node
            .add_value(&self.current_slot, Value::from_object(object));
    }

    /// Close the frame and run its conversion function on the node.
    ///
    /// # Errors
    /// Returns the conversion function's error unchanged.
    pub fn close(mut self) -> Result<Box<dyn Any>, ConversionError> {
        DEFAULT_VALUE_SLOT.clone_into(&mut self.current_slot);
        (self.conversion)(&self.node)
    }
}
