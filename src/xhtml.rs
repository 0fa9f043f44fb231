//! XHTML printer flavor
//!
//! [`XhtmlPrinter`] wraps an [`XmlPrinter`] and handles whitespace the
//! XHTML way: it prints `&nbsp;` when spaces sit at the beginning or
//! the end of an element's content, or when there is more than one
//! contiguous space. A single space between two pieces of text stays a
//! normal space. Inside CDATA sections and `pre` elements spaces pass
//! through verbatim.
//!
//! Spaces are buffered by [`XhtmlPrinter::print_space`] and flushed on
//! the next print operation, which is when the printer knows what kind
//! of content the run borders on.

use crate::error::Result;
use crate::printer::{XmlPrinter, NO_ATTRIBUTES};
use crate::writer::{MarkupWriter, StreamWriter};
use std::io::Write;

/// Elements whose text content preserves whitespace
const PRESERVE_ELEMENTS: &[&str] = &["pre"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastPrinted {
    Nothing,
    Text,
    Tag,
}

/// Sanitizing printer with XHTML whitespace handling
///
/// A decorator over [`XmlPrinter`]: every operation flushes any pending
/// space run and then delegates, so all sanitization and balancing
/// guarantees of the wrapped printer apply unchanged.
#[derive(Debug)]
pub struct XhtmlPrinter<M: MarkupWriter> {
    inner: XmlPrinter<M>,
    space_count: usize,
    last_printed: LastPrinted,
    preserve_depth: usize,
}

impl<W: Write> XhtmlPrinter<StreamWriter<W>> {
    /// Create a printer emitting to the given sink
    pub fn to_sink(sink: W) -> Self {
        Self::new(XmlPrinter::to_sink(sink))
    }

    /// Consume the printer and return the sink
    pub fn into_sink(self) -> W {
        self.inner.into_sink()
    }
}

impl<M: MarkupWriter> XhtmlPrinter<M> {
    /// Wrap an existing XML printer
    pub fn new(inner: XmlPrinter<M>) -> Self {
        Self {
            inner,
            space_count: 0,
            last_printed: LastPrinted::Nothing,
            preserve_depth: 0,
        }
    }

    /// Consume the decorator and return the wrapped printer
    ///
    /// Pending spaces that were never followed by content are dropped.
    pub fn into_inner(self) -> XmlPrinter<M> {
        self.inner
    }

    /// Access the wrapped printer
    pub fn xml_printer(&self) -> &XmlPrinter<M> {
        &self.inner
    }

    /// Buffer one space for XHTML-aware emission
    pub fn print_space(&mut self) -> Result<()> {
        self.space_count += 1;
        Ok(())
    }

    /// Emit a buffered space run before content of the given kind
    fn flush_spaces(&mut self, before_text: bool) -> Result<()> {
        if self.space_count == 0 {
            return Ok(());
        }
        let count = self.space_count;
        self.space_count = 0;

        if self.preserve_depth > 0 || !self.inner.escaping_enabled() {
            // pre element or CDATA section: whitespace is significant
            // as-is.
            for _ in 0..count {
                self.inner.print_text(" ")?;
            }
        } else if count == 1 && before_text && self.last_printed == LastPrinted::Text {
            // A lone space between two pieces of text collapses safely
            // in XHTML rendering.
            self.inner.print_text(" ")?;
        } else {
            for _ in 0..count {
                self.inner.print_entity("nbsp")?;
            }
        }
        Ok(())
    }

    /// Print text without escaping anything
    pub fn print_raw(&mut self, text: &str) -> Result<()> {
        self.flush_spaces(true)?;
        self.last_printed = LastPrinted::Text;
        self.inner.print_raw(text)
    }

    /// Print text content, taking care of XML escaping
    pub fn print_text(&mut self, text: &str) -> Result<()> {
        self.flush_spaces(true)?;
        self.last_printed = LastPrinted::Text;
        self.inner.print_text(text)
    }

    /// Print an empty element, `<name/>`
    pub fn print_element(&mut self, name: &str) -> Result<()> {
        self.print_element_with(name, NO_ATTRIBUTES)
    }

    /// Print an empty element with sanitized attributes
    pub fn print_element_with<I, K, V>(&mut self, name: &str, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.flush_spaces(false)?;
        self.last_printed = LastPrinted::Tag;
        self.inner.print_element_with(name, attributes)
    }

    /// Print the start tag of an element
    pub fn start_element(&mut self, name: &str) -> Result<()> {
        self.start_element_with(name, NO_ATTRIBUTES)
    }

    /// Print the start tag of an element with sanitized attributes
    pub fn start_element_with<I, K, V>(&mut self, name: &str, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.flush_spaces(false)?;
        self.last_printed = LastPrinted::Tag;
        if PRESERVE_ELEMENTS.contains(&name) {
            self.preserve_depth += 1;
        }
        self.inner.start_element_with(name, attributes)
    }

    /// Print the end tag of an element
    pub fn end_element(&mut self, name: &str) -> Result<()> {
        self.flush_spaces(false)?;
        self.last_printed = LastPrinted::Tag;
        if PRESERVE_ELEMENTS.contains(&name) && self.preserve_depth > 0 {
            self.preserve_depth -= 1;
        }
        self.inner.end_element(name)
    }

    /// Print an XML comment; content must already be comment-safe
    pub fn print_comment(&mut self, content: &str) -> Result<()> {
        self.flush_spaces(false)?;
        self.last_printed = LastPrinted::Tag;
        self.inner.print_comment(content)
    }

    /// Print an XML comment, escaping content unsafe in comments
    pub fn print_comment_escaped(&mut self, content: &str) -> Result<()> {
        self.flush_spaces(false)?;
        self.last_printed = LastPrinted::Tag;
        self.inner.print_comment_escaped(content)
    }

    /// Start a CDATA section
    pub fn start_cdata(&mut self) -> Result<()> {
        self.flush_spaces(false)?;
        self.last_printed = LastPrinted::Tag;
        self.inner.start_cdata()
    }

    /// End the current CDATA section
    pub fn end_cdata(&mut self) -> Result<()> {
        self.flush_spaces(false)?;
        self.last_printed = LastPrinted::Tag;
        self.inner.end_cdata()
    }

    /// Print a named entity reference
    pub fn print_entity(&mut self, name: &str) -> Result<()> {
        self.flush_spaces(true)?;
        self.last_printed = LastPrinted::Text;
        self.inner.print_entity(name)
    }
}
