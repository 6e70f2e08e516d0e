//! Streambind - bind streaming XML documents to domain objects.
//!
//! Conversion functions are registered for element names. While a document
//! is read, each handled element collects its attributes, its text and the
//! objects converted from its handled children into a [`Node`]; when the
//! element closes, its conversion runs and the result is recorded on the
//! enclosing element's node under the child's name. The object produced for
//! the outermost element is the result of the parse.
//!
//! # Example
//!
//! ```
//! use streambind::{ConversionError, HandlerRegistry, ParseEngine};
//!
//! let registry = HandlerRegistry::new()
//!     .register("title", |node| {
//!         node.value("value")
//!             .map(str::to_string)
//!             .ok_or_else(|| ConversionError::MissingValue("value".to_string()))
//!     });
//!
//! let root = ParseEngine::new(registry)
//!     .parse_str("<title>Dune</title>")
//!     .unwrap();
//! assert_eq!(root.downcast::<String>().unwrap(), "Dune");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and name validation
//! - [`error`]: Error types and Result alias
//! - [`node`]: Multi-valued node collected per handled element
//! - [`xml`]: XML event model, streaming and tree event sources
//! - [`registry`]: Handler registry, active frames and the dispatcher
//! - [`snapshot`]: Generic serializable capture of nodes
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod node;
pub mod registry;
pub mod snapshot;
pub mod xml;

// Re-export commonly used items
pub use error::{BindError, ConversionError, Result};
pub use node::{Node, Slot, Value};
pub use registry::{
    ActiveFrame, BoundObject, Conversion, Dispatcher, HandlerRegistry, NodeHandler, ParseEngine,
};
pub use snapshot::{NodeSnapshot, SnapshotHandler};
pub use xml::{EventSource, StreamSource, TreeSource, XmlEvent};
