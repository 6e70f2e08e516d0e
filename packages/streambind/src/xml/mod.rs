//! XML event model and event sources.
//!
//! The binder consumes four primitive notifications: element start, character
//! data, element end and end of document. [`StreamSource`] produces them
//! incrementally with `quick-xml`; [`TreeSource`] replays a document already
//! parsed with `roxmltree`.

mod events;
mod stream;
mod tree;

pub use events::{EventSource, XmlEvent};
pub use stream::StreamSource;
pub use tree::TreeSource;
