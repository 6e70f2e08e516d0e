//! XML events consumed by the dispatcher.

use crate::error::Result;

/// One notification from an XML event source, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    /// Start of an element, with its local name and attributes.
    Start {
        name: String,
        attributes: Vec<(String, String)>,
    },
    /// A fragment of character data. One text run may arrive as several
    /// fragments; they are never merged.
    Characters(String),
    /// End of an element.
    End { name: String },
}

/// A pull-based source of XML events.
///
/// Returning `Ok(None)` signals the end of the document.
pub trait EventSource {
    /// Read the next event.
    ///
    /// # Errors
    /// Returns an error if the underlying XML cannot be read.
    fn next_event(&mut self) -> Result<Option<XmlEvent>>;
}

