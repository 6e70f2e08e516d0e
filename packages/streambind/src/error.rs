//! Error types for the binder.
//!
//! Uses the dual-error pattern: `BindError` for library consumers with the
//! context of the failed parse, and `ConversionError` for the conversion
//! functions that turn a completed node into a domain object.

use thiserror::Error;

/// Error raised by a conversion function (or a node accessor used by one).
#[derive(Debug, Error)]
pub enum ConversionError {
    /// A required value was not present on the node.
    #[error("Missing required value <{0}>")]
    MissingValue(String),

    /// A required attribute was not present on the node.
    #[error("Missing required attribute '{0}'")]
    MissingAttribute(String),

    /// A value requested as a date is not an ISO calendar date.
    #[error("Invalid date in <{name}>: '{value}'")]
    InvalidDate {
        name: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Any other reason the node cannot be converted.
    #[error("{0}")]
    Invalid(String),
}

/// Main error type for the binder library.
#[derive(Debug, Error)]
pub enum BindError {
    /// Unbalanced tags: the handler stack does not line up with the document.
    #[error("Malformed document: {reason}")]
    MalformedDocument { reason: String },

    /// A registered conversion function failed while closing its element.
    #[error("Conversion of <{element}> failed: {source}")]
    Conversion {
        element: String,
        #[source]
        source: ConversionError,
    },

    /// More handled elements are open at once than the configured limit.
    #[error("Nesting limit of {limit} handled elements exceeded at <{element}>")]
    DepthLimitExceeded { element: String, limit: usize },

    /// Streaming XML reader failed.
    #[error("XML parsing failed: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Tree XML parser failed.
    #[error("XML parsing failed: {0}")]
    XmlTree(#[from] roxmltree::Error),

    /// Element name or character data is not valid UTF-8.
    #[error("Invalid UTF-8 in XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The root object is not of the requested type.
    #[error("Root object is not a {expected}")]
    RootTypeMismatch { expected: String },

    /// Element name rejected before parsing.
    #[error("Invalid element name: '{0}'")]
    InvalidElementName(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl BindError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            reason: reason.into(),
        }
    }
}

/// Result type alias for binder operations.
pub type Result<T> = std::result::Result<T, BindError>;
