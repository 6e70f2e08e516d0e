//! Handler registry system for streaming XML binding.
//!
//! Conversion functions are registered for element names. While a document
//! streams through the [`Dispatcher`], every open handled element has an
//! [`ActiveFrame`] building its node; on the closing tag the node is converted
//! and the object is recorded on the enclosing element's node.

mod core;
mod dispatcher;
mod engine;
mod frame;
mod handler;
mod types;

pub use self::core::HandlerRegistry;
pub use dispatcher::Dispatcher;
pub use engine::ParseEngine;
pub use frame::ActiveFrame;
pub use handler::{Conversion, NodeHandler};
pub use types::BoundObject;
