//! XML printer facade
//!
//! [`XmlPrinter`] is the stateful entry point renderers print through.
//! Every attribute input, whatever its shape, is normalized and
//! sanitized through [`AttributeSet::sanitize`] before it reaches the
//! writer, so the whitelist/guarded-set policy is applied exactly once
//! and cannot be bypassed by choosing a different operation.
//!
//! All operations return a [`Result`]: writer failures propagate to the
//! caller instead of silently truncating output.

use crate::attributes::AttributeSet;
use crate::error::Result;
use crate::writer::{MarkupWriter, StreamWriter};
use std::io::Write;

/// Attribute pairs accepted with no attributes at all
pub const NO_ATTRIBUTES: [(&str, &str); 0] = [];

/// Stateful, sanitizing XML printer
///
/// Not safe for concurrent use: one printer owns one writer and one
/// escaping-mode flag. The flag is toggled only by the CDATA
/// operations and is restored to `true` by [`XmlPrinter::end_cdata`].
#[derive(Debug)]
pub struct XmlPrinter<M: MarkupWriter> {
    writer: M,
    escaping_enabled: bool,
}

impl<W: Write> XmlPrinter<StreamWriter<W>> {
    /// Create a printer emitting to the given sink through a
    /// [`StreamWriter`]
    pub fn to_sink(sink: W) -> Self {
        Self::new(StreamWriter::new(sink))
    }

    /// Swap the destination sink, returning the previous one
    ///
    /// Must not race against in-flight print calls; the printer is a
    /// single-threaded object.
    pub fn set_sink(&mut self, sink: W) -> W {
        self.writer.set_sink(sink)
    }

    /// Consume the printer and return the sink
    pub fn into_sink(self) -> W {
        self.writer.into_inner()
    }
}

impl<M: MarkupWriter> XmlPrinter<M> {
    /// Create a printer over an existing writer
    pub fn new(writer: M) -> Self {
        Self {
            writer,
            escaping_enabled: true,
        }
    }

    /// Access the underlying writer
    pub fn writer(&self) -> &M {
        &self.writer
    }

    /// Access the underlying writer mutably
    pub fn writer_mut(&mut self) -> &mut M {
        &mut self.writer
    }

    /// Whether text escaping is currently enabled (false inside CDATA)
    pub fn escaping_enabled(&self) -> bool {
        self.escaping_enabled
    }

    /// Print text without escaping anything
    ///
    /// The content is supposed to be XML, or at least to contain only
    /// characters valid in an XML text node. The caller is responsible
    /// for validity.
    pub fn print_raw(&mut self, text: &str) -> Result<()> {
        self.writer.write_raw(text)
    }

    /// Print text content, taking care of XML escaping
    pub fn print_text(&mut self, text: &str) -> Result<()> {
        self.writer.write_text(text)
    }

    /// Print an empty element, `<name/>`
    pub fn print_element(&mut self, name: &str) -> Result<()> {
        self.print_element_with(name, NO_ATTRIBUTES)
    }

    /// Print an empty element with attributes, `<name att="value"/>`
    ///
    /// Attributes failing the sanitization policy are silently omitted.
    pub fn print_element_with<I, K, V>(&mut self, name: &str, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let attributes = AttributeSet::sanitize(attributes);
        self.writer.write_empty_element(name, &attributes)
    }

    /// Print the start tag of an element, `<name>`
    pub fn start_element(&mut self, name: &str) -> Result<()> {
        self.start_element_with(name, NO_ATTRIBUTES)
    }

    /// Print the start tag of an element with attributes,
    /// `<name att="value">`
    ///
    /// Attributes failing the sanitization policy are silently omitted.
    pub fn start_element_with<I, K, V>(&mut self, name: &str, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let attributes = AttributeSet::sanitize(attributes);
        self.writer.start_element(name, &attributes)
    }

    /// Print the end tag of an element, `</name>`
    ///
    /// `name` must match the innermost open element; a mismatch is a
    /// [`crate::MisuseError`].
    pub fn end_element(&mut self, name: &str) -> Result<()> {
        self.writer.end_element(name)
    }

    /// Print an XML comment
    ///
    /// The content must be a valid comment body, i.e. contain no `--`
    /// and not end with `-`. If unsure, use
    /// [`XmlPrinter::print_comment_escaped`] instead.
    pub fn print_comment(&mut self, content: &str) -> Result<()> {
        self.writer.write_comment(content)
    }

    /// Print an XML comment, escaping content unsafe in comments
    ///
    /// XML comments do not support `--`, nor `-` as the last character.
    /// Escaping is backslash-based: `a--b` becomes `a\-\-b`, a trailing
    /// `-` becomes `-\`, and `\` itself becomes `\\`.
    pub fn print_comment_escaped(&mut self, content: &str) -> Result<()> {
        self.writer.write_comment(&escape_comment(content))
    }

    /// Start a CDATA section
    ///
    /// Characters printed until [`XmlPrinter::end_cdata`] are not
    /// escaped. CDATA sections do not nest.
    pub fn start_cdata(&mut self) -> Result<()> {
        self.writer.start_cdata()?;
        self.writer.set_escape_text(false);
        self.escaping_enabled = false;
        Ok(())
    }

    /// End the current CDATA section, restoring text escaping
    pub fn end_cdata(&mut self) -> Result<()> {
        self.writer.set_escape_text(true);
        self.escaping_enabled = true;
        self.writer.end_cdata()
    }

    /// Print a named entity reference, `&name;`
    pub fn print_entity(&mut self, name: &str) -> Result<()> {
        self.writer.write_entity(name)
    }
}

/// Escape content for use inside an XML comment
///
/// Backslash-based: a backslash is doubled, each `-` of a `--` pair is
/// prefixed with a backslash, and a trailing `-` is suffixed with one.
pub fn escape_comment(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut last = '\0';
    for c in content.chars() {
        if c == '\\' {
            out.push('\\');
        } else if c == '-' && last == '-' {
            // Escape both dashes of the pair; the previous one is a
            // single byte, so the byte index is safe.
            out.insert(out.len() - 1, '\\');
            out.push('\\');
        }
        out.push(c);
        last = c;
    }
    if last == '-' {
        out.push('\\');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printer() -> XmlPrinter<StreamWriter<Vec<u8>>> {
        XmlPrinter::to_sink(Vec::new())
    }

    fn output(printer: XmlPrinter<StreamWriter<Vec<u8>>>) -> String {
        String::from_utf8(printer.into_sink()).unwrap()
    }

    #[test]
    fn test_print_element_drops_rejected_attributes() {
        let mut p = printer();
        p.print_element_with("a", [("class", "wikilink"), ("onclick", "alert(1)")])
            .unwrap();
        assert_eq!(output(p), "<a class=\"wikilink\"/>");
    }

    #[test]
    fn test_start_element_sanitizes_href() {
        let mut p = printer();
        p.start_element_with("a", [("href", "javascript:alert(1)"), ("title", "x")])
            .unwrap();
        p.print_text("link").unwrap();
        p.end_element("a").unwrap();
        assert_eq!(output(p), "<a title=\"x\">link</a>");
    }

    #[test]
    fn test_print_raw_is_verbatim() {
        let mut p = printer();
        p.print_raw("<b>kept & as-is</b>").unwrap();
        assert_eq!(output(p), "<b>kept & as-is</b>");
    }

    #[test]
    fn test_cdata_toggles_escaping_and_restores_it() {
        let mut p = printer();
        assert!(p.escaping_enabled());
        p.start_cdata().unwrap();
        assert!(!p.escaping_enabled());
        p.print_text("a < b").unwrap();
        p.end_cdata().unwrap();
        assert!(p.escaping_enabled());
        p.print_text("a < b").unwrap();
        assert_eq!(output(p), "<![CDATA[a < b]]>a &lt; b");
    }

    #[test]
    fn test_empty_cdata_produces_only_markers() {
        let mut p = printer();
        p.start_cdata().unwrap();
        p.end_cdata().unwrap();
        assert!(p.escaping_enabled());
        assert_eq!(output(p), "<![CDATA[]]>");
    }

    #[test]
    fn test_entity() {
        let mut p = printer();
        p.print_entity("nbsp").unwrap();
        assert_eq!(output(p), "&nbsp;");
    }

    #[test]
    fn test_comment_escaped() {
        let mut p = printer();
        p.print_comment_escaped("a--b").unwrap();
        assert_eq!(output(p), "<!--a\\-\\-b-->");
    }

    #[test]
    fn test_comment_unescaped_is_verbatim() {
        let mut p = printer();
        p.print_comment("startwikilink:Main.Page").unwrap();
        assert_eq!(output(p), "<!--startwikilink:Main.Page-->");
    }

    #[test]
    fn test_escape_comment() {
        assert_eq!(escape_comment("a--b"), "a\\-\\-b");
        assert_eq!(escape_comment("a-b"), "a-b");
        assert_eq!(escape_comment("ab-"), "ab-\\");
        assert_eq!(escape_comment("a\\b"), "a\\\\b");
        assert_eq!(escape_comment(""), "");
    }

    #[test]
    fn test_sink_swap() {
        let mut p = printer();
        p.print_text("one").unwrap();
        let first = p.set_sink(Vec::new());
        p.print_text("two").unwrap();
        assert_eq!(String::from_utf8(first).unwrap(), "one");
        assert_eq!(output(p), "two");
    }
}
