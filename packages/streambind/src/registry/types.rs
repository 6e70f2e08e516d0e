//! Types for the result of a parse.

use std::any::Any;
use std::fmt;

use crate::error::{BindError, Result};
use crate::node::short_type_name;

/// The object produced for the document's outermost handled element.
pub struct BoundObject {
    element: String,
    object: Box<dyn Any>,
}

impl BoundObject {
    pub(crate) fn new(element: String, object: Box<dyn Any>) -> Self {
        Self { element, object }
    }

    /// Name of the element the object was produced for.
    #[must_use]
    pub fn element(&self) -> &str {
        &self.element
    }

    /// Check whether the object is a `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.object.is::<T>()
    }

    /// Borrow the object as `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.object.downcast_ref::<T>()
    }

    /// Take the object as `T`.
    ///
    /// # Errors
    /// Returns `RootTypeMismatch` if the object is not a `T`.
    pub fn downcast<T: Any>(self) -> Result<T> {
        self.object
            .downcast::<T>()
            .map(|object| *object)
            .map_err(|_| BindError::RootTypeMismatch {
                expected: short_type_name::<T>(),
            })
    }

    /// Take the erased object.
    #[must_use]
    pub fn into_inner(self) -> Box<dyn Any> {
        self.object
    }
}

impl fmt::Debug for BoundObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundObject")
            .field("element", &self.element)
            .finish_non_exhaustive()
    }
}
