//! Configuration constants and name handling for the binder.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{BindError, Result};

/// Slot that receives character data before any child element has started.
///
/// Leaf elements whose whole content is text end up under this key, so a
/// handler for `<title lang="en">Text</title>` reads `node.value("value")`.
pub const DEFAULT_VALUE_SLOT: &str = "value";

/// Default maximum number of simultaneously open handled elements.
///
/// Memory use of a parse grows with the number of open frames, not with the
/// document size. This caps it for hostile, deeply nested input.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Initial capacity of the streaming reader's event buffer in bytes.
pub const READ_BUFFER_CAPACITY: usize = 4096;

/// Element name pattern: an XML local name without prefix.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ELEMENT_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9._-]*$").expect("valid regex"));

/// Normalize an element, attribute or value name for storage and lookup.
///
/// All keys are case-insensitive, so every name is stored lower-cased.
///
/// # Examples
/// ```
/// use streambind::config::normalize_name;
///
/// assert_eq!(normalize_name("releaseDate"), "releasedate");
/// ```
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

/// Validate an element name given on the command line.
///
/// # Examples
/// ```
/// use streambind::config::validate_element_name;
///
/// assert!(validate_element_name("book").is_ok());
/// assert!(validate_element_name("li.nr").is_ok());
/// assert!(validate_element_name("<book>").is_err());
/// ```
pub fn validate_element_name(name: &str) -> Result<()> {
    if ELEMENT_NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(BindError::InvalidElementName(name.to_string()))
    }
}
