//! Error types and error handling

use std::path::PathBuf;

use thiserror::Error;

/// Result type for xmlsynth operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Library error type
#[derive(Debug, Error)]
pub enum SynthError {
    /// Reading an input or writing an output failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },

    /// XML parse or serialization error
    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    /// A dotted path names no known category or field
    #[error("unknown data path: '{0}'")]
    UnknownPath(String),

    /// A classification rule pattern failed to compile
    #[error("invalid classification pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern as written
        pattern: String,
        /// Regex compiler error
        #[source]
        source: regex::Error,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Built-in defaults could not be serialized for layering
    #[error("failed to serialize default configuration: {0}")]
    Defaults(#[from] toml::ser::Error),

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A finished output could not be moved to its final name
    #[error("failed to persist output: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl SynthError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<figment::Error> for SynthError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

/// Errors raised while reading or writing XML documents.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Malformed markup
    #[error("syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// Malformed attribute
    #[error("attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Invalid entity or character reference
    #[error("escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// Writing the serialized document failed
    #[error("write error: {0}")]
    Write(#[from] std::io::Error),

    /// More than one top-level element
    #[error("document has more than one root element")]
    MultipleRoots,

    /// No top-level element at all
    #[error("document has no root element")]
    MissingRoot,

    /// Non-whitespace text before or after the root element
    #[error("text outside the root element: '{0}'")]
    TextOutsideRoot(String),

    /// End of input reached inside an element
    #[error("element <{0}> is never closed")]
    UnclosedElement(String),

    /// A closing tag with no matching open element
    #[error("unexpected closing tag </{0}>")]
    UnexpectedEnd(String),

    /// Serialized output was not valid UTF-8
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
