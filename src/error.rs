//! Error types for xmlprint
//!
//! This module defines all error types used throughout the library.
//! Policy rejections (an attribute dropped by the sanitizer) are NOT
//! errors: they are silent by contract. Everything that can actually
//! fail a render is surfaced here.

use thiserror::Error;

/// Result type alias using xmlprint Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xmlprint operations
#[derive(Error, Debug)]
pub enum Error {
    /// Writer/sink I/O failure. Callers rendering security-sensitive
    /// output must treat this as render-invalidating.
    #[error("write error: {0}")]
    Write(#[from] std::io::Error),

    /// Printer contract violation (unbalanced tags, CDATA misuse)
    #[error("printer misuse: {0}")]
    Misuse(#[from] MisuseError),

    /// Encoding error (object to XML conversion)
    #[error("encoding error: {0}")]
    Encode(String),

    /// Decoding error (XML to object conversion)
    #[error("decoding error: {0}")]
    Decode(String),

    /// XML parsing error (malformed element-tree input)
    #[error("XML error: {0}")]
    Xml(String),
}

/// Printer contract violations
///
/// These indicate a caller bug, not bad data: the printer refuses to
/// emit malformed output and reports the violation instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MisuseError {
    /// An end tag did not match the innermost open element
    #[error("unbalanced end element: expected '</{expected}>', got '</{found}>'")]
    UnbalancedEndElement {
        /// The innermost open element name
        expected: String,
        /// The name passed to the end-element call
        found: String,
    },

    /// An end tag was requested with no element open
    #[error("end element '</{0}>' with no open element")]
    EndElementWithoutStart(String),

    /// A CDATA section was started while one is already open
    #[error("nested CDATA sections are not supported")]
    NestedCData,

    /// A CDATA section was ended while none is open
    #[error("end of CDATA section with no open CDATA section")]
    CDataNotStarted,

    /// The stream ended with elements still open
    #[error("unclosed element '<{0}>' at end of output")]
    UnclosedElement(String),
}
