//! Low-level markup writer
//!
//! The [`MarkupWriter`] trait is the seam between the printer facade
//! and the character stream: it owns character-level escaping and tag
//! balancing, while the printer owns attribute sanitization and CDATA
//! mode tracking. [`StreamWriter`] is the default implementation over
//! any [`std::io::Write`] sink.

use crate::attributes::AttributeSet;
use crate::error::{MisuseError, Result};
use quick_xml::escape::{escape, partial_escape};
use std::io::Write;

/// Writer abstraction consumed by the printers
///
/// Implementations must enforce well-formedness concerns: character
/// escaping, start/end tag balancing, and CDATA section integrity. The
/// printers only supply sanitized inputs and mode toggles.
pub trait MarkupWriter {
    /// Write text verbatim, no escaping
    fn write_raw(&mut self, text: &str) -> Result<()>;

    /// Write text content, escaped per XML text rules unless escaping
    /// has been turned off (CDATA mode)
    fn write_text(&mut self, text: &str) -> Result<()>;

    /// Write an empty element, `<name att="value"/>`
    fn write_empty_element(&mut self, name: &str, attributes: &AttributeSet) -> Result<()>;

    /// Write a start tag, `<name att="value">`, opening the element
    fn start_element(&mut self, name: &str, attributes: &AttributeSet) -> Result<()>;

    /// Write the end tag of the innermost open element
    ///
    /// Fails with [`MisuseError::UnbalancedEndElement`] if `name` does
    /// not match the innermost open element.
    fn end_element(&mut self, name: &str) -> Result<()>;

    /// Write a comment, `<!--text-->`; the content must already be
    /// comment-safe
    fn write_comment(&mut self, text: &str) -> Result<()>;

    /// Open a CDATA section
    fn start_cdata(&mut self) -> Result<()>;

    /// Close the current CDATA section
    fn end_cdata(&mut self) -> Result<()>;

    /// Toggle text escaping (turned off inside CDATA sections)
    fn set_escape_text(&mut self, escape: bool);

    /// Current text escaping mode
    fn escape_text(&self) -> bool;

    /// Write a named entity reference, `&name;`
    fn write_entity(&mut self, name: &str) -> Result<()>;
}

/// Streaming writer over an [`std::io::Write`] sink
///
/// Escaping uses `quick_xml::escape`; tag balancing is tracked with an
/// explicit element stack so misuse is reported instead of producing
/// malformed output.
#[derive(Debug)]
pub struct StreamWriter<W: Write> {
    sink: W,
    open_elements: Vec<String>,
    in_cdata: bool,
    escape_text: bool,
}

impl<W: Write> StreamWriter<W> {
    /// Create a writer over the given sink
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            open_elements: Vec::new(),
            in_cdata: false,
            escape_text: true,
        }
    }

    /// Swap the destination sink, returning the previous one
    ///
    /// The element stack and escaping mode carry over: output continues
    /// mid-stream on the new sink.
    pub fn set_sink(&mut self, sink: W) -> W {
        std::mem::replace(&mut self.sink, sink)
    }

    /// Get a reference to the sink
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Get a mutable reference to the sink
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Consume the writer and return the sink
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Check that every open element has been closed
    pub fn finish(&self) -> Result<()> {
        if let Some(name) = self.open_elements.last() {
            return Err(MisuseError::UnclosedElement(name.clone()).into());
        }
        Ok(())
    }

    /// Number of currently open elements
    pub fn depth(&self) -> usize {
        self.open_elements.len()
    }

    fn write_tag_open(&mut self, name: &str, attributes: &AttributeSet) -> Result<()> {
        self.sink.write_all(b"<")?;
        self.sink.write_all(name.as_bytes())?;
        for (attr_name, attr_value) in attributes.iter() {
            self.sink.write_all(b" ")?;
            self.sink.write_all(attr_name.as_bytes())?;
            self.sink.write_all(b"=\"")?;
            self.sink.write_all(escape(attr_value).as_bytes())?;
            self.sink.write_all(b"\"")?;
        }
        Ok(())
    }
}

impl<W: Write> MarkupWriter for StreamWriter<W> {
    fn write_raw(&mut self, text: &str) -> Result<()> {
        self.sink.write_all(text.as_bytes())?;
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.escape_text {
            self.sink.write_all(partial_escape(text).as_bytes())?;
        } else {
            self.sink.write_all(text.as_bytes())?;
        }
        Ok(())
    }

    fn write_empty_element(&mut self, name: &str, attributes: &AttributeSet) -> Result<()> {
        self.write_tag_open(name, attributes)?;
        self.sink.write_all(b"/>")?;
        Ok(())
    }

    fn start_element(&mut self, name: &str, attributes: &AttributeSet) -> Result<()> {
        self.write_tag_open(name, attributes)?;
        self.sink.write_all(b">")?;
        self.open_elements.push(name.to_string());
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> Result<()> {
        match self.open_elements.last() {
            None => return Err(MisuseError::EndElementWithoutStart(name.to_string()).into()),
            Some(open) if open != name => {
                return Err(MisuseError::UnbalancedEndElement {
                    expected: open.clone(),
                    found: name.to_string(),
                }
                .into())
            }
            Some(_) => {}
        }
        self.open_elements.pop();
        self.sink.write_all(b"</")?;
        self.sink.write_all(name.as_bytes())?;
        self.sink.write_all(b">")?;
        Ok(())
    }

    fn write_comment(&mut self, text: &str) -> Result<()> {
        self.sink.write_all(b"<!--")?;
        self.sink.write_all(text.as_bytes())?;
        self.sink.write_all(b"-->")?;
        Ok(())
    }

    fn start_cdata(&mut self) -> Result<()> {
        if self.in_cdata {
            return Err(MisuseError::NestedCData.into());
        }
        self.sink.write_all(b"<![CDATA[")?;
        self.in_cdata = true;
        Ok(())
    }

    fn end_cdata(&mut self) -> Result<()> {
        if !self.in_cdata {
            return Err(MisuseError::CDataNotStarted.into());
        }
        self.sink.write_all(b"]]>")?;
        self.in_cdata = false;
        Ok(())
    }

    fn set_escape_text(&mut self, escape: bool) {
        self.escape_text = escape;
    }

    fn escape_text(&self) -> bool {
        self.escape_text
    }

    fn write_entity(&mut self, name: &str) -> Result<()> {
        self.sink.write_all(b"&")?;
        self.sink.write_all(name.as_bytes())?;
        self.sink.write_all(b";")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn collect(writer: StreamWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_text_is_escaped() {
        let mut writer = StreamWriter::new(Vec::new());
        writer.write_text("a < b & c").unwrap();
        assert_eq!(collect(writer), "a &lt; b &amp; c");
    }

    #[test]
    fn test_text_escaping_can_be_disabled() {
        let mut writer = StreamWriter::new(Vec::new());
        writer.set_escape_text(false);
        writer.write_text("a < b").unwrap();
        assert_eq!(collect(writer), "a < b");
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let mut attrs = AttributeSet::new();
        attrs.set("title", "say \"hi\" & <go>");
        let mut writer = StreamWriter::new(Vec::new());
        writer.write_empty_element("span", &attrs).unwrap();
        assert_eq!(
            collect(writer),
            "<span title=\"say &quot;hi&quot; &amp; &lt;go&gt;\"/>"
        );
    }

    #[test]
    fn test_balanced_elements() {
        let mut writer = StreamWriter::new(Vec::new());
        writer.start_element("p", &AttributeSet::new()).unwrap();
        writer.write_text("hello").unwrap();
        writer.end_element("p").unwrap();
        writer.finish().unwrap();
        assert_eq!(collect(writer), "<p>hello</p>");
    }

    #[test]
    fn test_unbalanced_end_is_reported() {
        let mut writer = StreamWriter::new(Vec::new());
        writer.start_element("p", &AttributeSet::new()).unwrap();
        let err = writer.end_element("div").unwrap_err();
        assert!(matches!(
            err,
            Error::Misuse(MisuseError::UnbalancedEndElement { .. })
        ));
    }

    #[test]
    fn test_end_without_start_is_reported() {
        let mut writer = StreamWriter::new(Vec::new());
        let err = writer.end_element("p").unwrap_err();
        assert!(matches!(
            err,
            Error::Misuse(MisuseError::EndElementWithoutStart(_))
        ));
    }

    #[test]
    fn test_nested_cdata_is_reported() {
        let mut writer = StreamWriter::new(Vec::new());
        writer.start_cdata().unwrap();
        let err = writer.start_cdata().unwrap_err();
        assert!(matches!(err, Error::Misuse(MisuseError::NestedCData)));
    }

    #[test]
    fn test_finish_reports_unclosed_element() {
        let mut writer = StreamWriter::new(Vec::new());
        writer.start_element("div", &AttributeSet::new()).unwrap();
        let err = writer.finish().unwrap_err();
        assert!(matches!(
            err,
            Error::Misuse(MisuseError::UnclosedElement(_))
        ));
    }

    #[test]
    fn test_sink_swap_continues_stream() {
        let mut writer = StreamWriter::new(Vec::new());
        writer.write_raw("first").unwrap();
        let old = writer.set_sink(Vec::new());
        writer.write_raw("second").unwrap();
        assert_eq!(String::from_utf8(old).unwrap(), "first");
        assert_eq!(collect(writer), "second");
    }
}
