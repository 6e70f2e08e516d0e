//! Node handler trait and the erased conversion type.

use std::any::Any;

use crate::error::ConversionError;
use crate::node::Node;

/// Erased conversion function stored in the registry.
pub type Conversion = Box<dyn Fn(&Node) -> Result<Box<dyn Any>, ConversionError>>;

/// Trait for node handlers.
///
/// A handler turns the node built for one element into a domain object once
/// the element is closed. Handlers should be pure: the node they receive is
/// complete and is discarded afterwards.
///
/// Closures are registered directly with
/// [`HandlerRegistry::register`](super::HandlerRegistry::register); this trait
/// is for handlers that carry configuration or are reused across registries.
pub trait NodeHandler {
    /// Object produced for the element.
    type Output: Any;

    /// Convert the completed node.
    ///
    /// # Errors
    /// Returns a `ConversionError` if the node cannot be converted, which
    /// aborts the whole parse.
    fn process(&self, node: &Node) -> Result<Self::Output, ConversionError>;
}

/// Erase a typed conversion closure.
pub(crate) fn erase_fn<T, F>(conversion: F) -> Conversion
where
    T: Any,
    F: Fn(&Node) -> Result<T, ConversionError> + 'static,
{
    Box::new(move |node: &Node| conversion(node).map(|object| Box::new(object) as Box<dyn Any>))
}

/// Erase a [`NodeHandler`].
pub(crate) fn erase_handler<H>(handler: H) -> Conversion
where
    H: NodeHandler + 'static,
{
    erase_fn(move |node| handler.process(node))
}
