//! Event dispatcher driving the frame stack.

use super::core::HandlerRegistry;
use super::frame::ActiveFrame;
use super::types::BoundObject;
use crate::config::{normalize_name, DEFAULT_MAX_DEPTH};
use crate::error::{BindError, Result};
use crate::node::Node;
use crate::xml::XmlEvent;

/// Dispatcher that turns XML events into converted objects.
///
/// The dispatcher keeps one [`ActiveFrame`] per open element that has a
/// handler, innermost on top. When a handled element closes, its node is
/// converted immediately and the object is recorded on the enclosing frame,
/// so memory use follows nesting depth rather than document size.
///
/// A dispatcher is good for one document: [`Dispatcher::end_document`]
/// consumes it.
pub struct Dispatcher<'r> {
    registry: &'r HandlerRegistry,
    stack: Vec<ActiveFrame<'r>>,
    max_depth: usize,
}

impl<'r> Dispatcher<'r> {
    /// Create a dispatcher over a registry.
    #[must_use]
    pub fn new(registry: &'r HandlerRegistry) -> Self {
        Self {
            registry,
            stack: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit the number of simultaneously open handled elements.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Number of open frames.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Dispatch one event.
    ///
    /// # Errors
    /// See [`Dispatcher::start`] and [`Dispatcher::end`].
    pub fn handle(&mut self, event: XmlEvent) -> Result<()> {
        match event {
            XmlEvent::Start { name, attributes } => self.start(&name, attributes),
            XmlEvent::Characters(text) => {
                self.characters(&text);
                Ok(())
            }
            XmlEvent::End { name } => self.end(&name),
        }
    }

    /// An element started.
    ///
    /// The top frame switches its current slot to the element name whether or
    /// not the element has a handler. A handled element gets a new frame.
    ///
    /// # Errors
    /// Returns `DepthLimitExceeded` if the new frame would exceed the limit.
    pub fn start<I, K, V>(&mut self, name: &str, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let name = normalize_name(name);
        tracing::debug!("<{name}>");

        if let Some(top) = self.stack.last_mut() {
            top.on_child_start(&name);
        }

        let Some(conversion) = self.registry.get(&name) else {
            return Ok(());
        };

        if self.stack.len() >= self.max_depth {
            return Err(BindError::DepthLimitExceeded {
                element: name,
                limit: self.max_depth,
            });
        }

        let node = Node::with_attributes(attributes);
        self.stack.push(ActiveFrame::new(name, node, conversion));
        tracing::debug!(depth = self.stack.len(), "Opened frame");
        Ok(())
    }

    /// Character data arrived. Dropped when no frame is open.
    pub fn characters(&mut self, text: &str) {
        if let Some(top) = self.stack.last_mut() {
            top.on_character_data(text);
        }
    }

    /// An element ended.
    ///
    /// Pops the top frame only if it was opened for this element and is not
    /// the last frame; the last frame is closed by
    /// [`Dispatcher::end_document`]. The produced object is recorded on the
    /// new top frame under the element name. Any other end tag is ignored.
    ///
    /// # Errors
    /// Returns `MalformedDocument` if no frame is open, and `Conversion` if
    /// the element's conversion function fails.
    pub fn end(&mut self, name: &str) -> Result<()> {
        let name = normalize_name(name);
        tracing::debug!("</{name}>");

        let Some(top) = self.stack.last() else {
            return Err(BindError::malformed(format!(
                "end of <{name}> with no handled element open"
            )));
        };

        if self.stack.len() < 2 || top.element_name() != name {
            return Ok(());
        }

        let Some(frame) = self.stack.pop() else {
            return Ok(());
        };
        let object = frame.close().map_err(|source| BindError::Conversion {
            element: name.clone(),
            source,
        })?;
        tracing::debug!(depth = self.stack.len(), "Closed frame <{name}>");

        if let Some(parent) = self.stack.last_mut() {
            parent.on_child_value(&name, object);
        }
        Ok(())
    }

    /// The document ended: close the remaining frame and return its object.
    ///
    /// # Errors
    /// Returns `MalformedDocument` unless exactly one frame is open, and
    /// `Conversion` if the root conversion function fails.
    pub fn end_document(mut self) -> Result<BoundObject> {
        if self.stack.len() != 1 {
            let open: Vec<&str> = self.stack.iter().map(ActiveFrame::element_name).collect();
            return Err(BindError::malformed(match open.as_slice() {
                [] => "document ended without any handled element".to_string(),
                _ => format!(
                    "document ended with {} handled elements open: {}",
                    open.len(),
                    open.join(" > ")
                ),
            }));
        }

        let Some(root) = self.stack.pop() else {
            return Err(BindError::malformed("document ended without any handled element"));
        };
        let element = root.element_name().to_string();
        let object = root
            .close()
            .map_err(|source| BindError::Conversion {
                element: element.clone(),
                source,
            })?;
        tracing::debug!(root = %element, "Document bound");
        Ok(BoundObject::new(element, object))
    }
}
