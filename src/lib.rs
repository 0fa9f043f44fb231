//! # xmlprint
//!
//! A streaming, sanitizing XML/XHTML printer for rendering markup
//! derived from untrusted or semi-trusted content (wiki pages,
//! user-supplied links) without becoming an XSS vector.
//!
//! ## Features
//!
//! - Attribute sanitization: a fixed whitelist of cosmetic attributes
//!   plus a safe-prefix test for URL-bearing ones; everything else is
//!   dropped before emission
//! - One sanitization funnel for every attribute input shape (pair
//!   lists, mappings, prebuilt sets)
//! - Stateful printer with CDATA mode tracking and comment escaping
//! - Tag-balance and CDATA-nesting enforcement, reported as typed
//!   errors instead of malformed output
//! - XHTML flavor with `&nbsp;`-aware whitespace handling
//! - Serde-based parameter codec whose output passes through the same
//!   sanitized printing path
//!
//! ## Example
//!
//! ```rust
//! use xmlprint::XmlPrinter;
//!
//! let mut printer = XmlPrinter::to_sink(Vec::new());
//! printer.start_element_with("a", [("href", "/Main"), ("onclick", "alert(1)")])?;
//! printer.print_text("home")?;
//! printer.end_element("a")?;
//!
//! let html = String::from_utf8(printer.into_sink()).unwrap();
//! assert_eq!(html, "<a href=\"/Main\">home</a>");
//! # Ok::<(), xmlprint::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;

// Sanitization policy and attribute handling
pub mod sanitize;
pub mod attributes;

// Output pipeline
pub mod writer;
pub mod printer;
pub mod xhtml;

// Parameter (de)serialization
pub mod parameter;

// Configuration surface
pub mod config;

// Re-exports for convenience
pub use attributes::AttributeSet;
pub use config::{PrinterFlavor, RenderingConfig};
pub use error::{Error, MisuseError, Result};
pub use parameter::{ElementNode, ParameterCodec, SerdeParameterCodec};
pub use printer::XmlPrinter;
pub use sanitize::is_clean;
pub use writer::{MarkupWriter, StreamWriter};
pub use xhtml::XhtmlPrinter;

/// Version of the xmlprint library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
