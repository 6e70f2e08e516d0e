//! Parse engine that binds whole documents using the registry.

use std::io::BufRead;

use super::core::HandlerRegistry;
use super::dispatcher::Dispatcher;
use super::types::BoundObject;
use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::Result;
use crate::xml::{EventSource, StreamSource, TreeSource, XmlEvent};

/// Engine that feeds XML event sources into a fresh dispatcher per document.
///
/// The engine owns the registry; every parse borrows it immutably, so the
/// same engine can bind any number of documents one after another.
#[derive(Debug)]
pub struct ParseEngine {
    registry: HandlerRegistry,
    max_depth: usize,
}

impl ParseEngine {
    /// Create a new engine with the given registry.
    #[must_use]
    pub fn new(registry: HandlerRegistry) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit the number of simultaneously open handled elements.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Get a reference to the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Bind a document read incrementally from `reader`.
    ///
    /// # Errors
    /// Returns an error if the XML is not well-formed, the handled elements
    /// are unbalanced, or a conversion function fails.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<BoundObject> {
        self.run(StreamSource::new(reader))
    }

    /// Bind a document held in memory.
    ///
    /// ```
    /// use streambind::{HandlerRegistry, ParseEngine};
    ///
    /// let engine = ParseEngine::new(HandlerRegistry::new().register("greeting", |node| {
    ///     Ok(node.value("value").unwrap_or_default().to_uppercase())
    /// }));
    ///
    /// let root = engine.parse_str("<greeting>hello</greeting>").unwrap();
    /// assert_eq!(root.downcast::<String>().unwrap(), "HELLO");
    /// ```
    ///
    /// # Errors
    /// See [`ParseEngine::parse_reader`].
    pub fn parse_str(&self, xml: &str) -> Result<BoundObject> {
        self.parse_reader(xml.as_bytes())
    }

    /// Bind a document already parsed by `roxmltree`.
    ///
    /// # Errors
    /// Returns an error if the handled elements are unbalanced or a
    /// conversion function fails.
    pub fn parse_document(&self, document: &roxmltree::Document<'_>) -> Result<BoundObject> {
        self.run(TreeSource::new(document))
    }

    /// Bind a document given as a sequence of events.
    ///
    /// # Errors
    /// See [`ParseEngine::parse_document`].
    pub fn parse_events<I>(&self, events: I) -> Result<BoundObject>
    where
        I: IntoIterator<Item = XmlEvent>,
    {
        let mut dispatcher = self.dispatcher();
        for event in events {
            dispatcher.handle(event)?;
        }
        dispatcher.end_document()
    }

    /// Drain an event source into a fresh dispatcher.
    ///
    /// The source being exhausted is the end of the document.
    ///
    /// # Errors
    /// Returns the first error from the source or the dispatcher; no further
    /// events are read after it.
    pub fn run<S: EventSource>(&self, mut source: S) -> Result<BoundObject> {
        let mut dispatcher = self.dispatcher();
        let mut events = 0_usize;
        while let Some(event) = source.next_event()? {
            dispatcher.handle(event)?;
            events += 1;
        }
        tracing::debug!(events, "End of document");
        dispatcher.end_document()
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(&self.registry).with_max_depth(self.max_depth)
    }
}
