//! Parameter (de)serialization
//!
//! Renderers persist structured parameter objects as XML element
//! trees. [`ParameterCodec`] is the strategy seam for that mapping;
//! [`SerdeParameterCodec`] is the default implementation, using serde
//! bounds where the original service took a runtime type descriptor.
//!
//! Serialization never writes to the output directly: the produced
//! events are replayed through an [`XmlPrinter`], so the attribute
//! sanitization policy applies to parameter output exactly as it does
//! to hand-printed markup. Parameter values therefore map to child
//! elements and text, not attributes; an attribute-mapped field whose
//! name is outside the policy lists would be dropped on output.

use crate::error::{Error, Result};
use crate::printer::XmlPrinter;
use crate::writer::MarkupWriter;
use indexmap::IndexMap;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A node in a parameter element tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementNode {
    /// Element name
    pub name: String,
    /// Element attributes, in document order
    pub attributes: IndexMap<String, String>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    /// Create a new element with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get an attribute value by name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|v| v.as_str())
    }

    /// Find child elements by name
    pub fn find_children(&self, name: &str) -> Vec<&ElementNode> {
        self.children.iter().filter(|e| e.name == name).collect()
    }

    /// Parse an element tree from XML text
    ///
    /// Comments and processing instructions are ignored; the first
    /// top-level element becomes the root.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_reader(xml.as_bytes());
        let mut stack: Vec<ElementNode> = Vec::new();
        let mut root: Option<ElementNode> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let element = Self::from_start_event(&e)?;
                    stack.push(element);
                }
                Ok(Event::End(_)) => {
                    if let Some(current) = stack.pop() {
                        if let Some(parent) = stack.last_mut() {
                            parent.children.push(current);
                        } else if root.is_none() {
                            root = Some(current);
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    let element = Self::from_start_event(&e)?;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(element);
                    } else if root.is_none() {
                        root = Some(element);
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::Xml(format!("failed to unescape text: {}", e)))?
                            .to_string();
                        // Whitespace-only segments are formatting, not
                        // parameter content.
                        if !text.trim().is_empty() {
                            match current.text {
                                Some(ref mut existing) => existing.push_str(&text),
                                None => current.text = Some(text),
                            }
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(current) = stack.last_mut() {
                        let text = String::from_utf8_lossy(&e.into_inner()).to_string();
                        match current.text {
                            Some(ref mut existing) => existing.push_str(&text),
                            None => current.text = Some(text),
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {} // Ignore comments, processing instructions, etc.
            }
            buf.clear();
        }

        root.ok_or_else(|| Error::Xml("no root element found".to_string()))
    }

    fn from_start_event(start: &quick_xml::events::BytesStart) -> Result<Self> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| Error::Xml(format!("invalid element name: {}", e)))?
            .to_string();

        let mut element = ElementNode::new(name);

        for attr_result in start.attributes() {
            let attr =
                attr_result.map_err(|e| Error::Xml(format!("failed to parse attribute: {}", e)))?;
            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Xml(format!("invalid attribute name: {}", e)))?
                .to_string();
            let attr_value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("failed to unescape attribute value: {}", e)))?
                .to_string();
            element.attributes.insert(attr_name, attr_value);
        }

        Ok(element)
    }

    /// Render the tree back to XML text
    ///
    /// This is the codec-internal rendering used to feed the serde
    /// deserializer; it escapes characters but applies no attribute
    /// policy (the tree is input, not output).
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out);
        out
    }

    fn write_xml(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&quick_xml::escape::escape(value));
            out.push('"');
        }
        if self.text.is_none() && self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(ref text) = self.text {
            out.push_str(&quick_xml::escape::partial_escape(text));
        }
        for child in &self.children {
            child.write_xml(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

/// Strategy for mapping parameter objects to and from XML
///
/// Implementations must preserve round-trip fidelity:
/// `deserialize(serialize(x)) == x` for all values producible by
/// legitimate callers, and must emit all output through the passed
/// printer so sanitization guarantees apply transitively.
pub trait ParameterCodec {
    /// Print the XML representation of `value` under a root element
    fn serialize<T, M>(&self, root: &str, value: &T, printer: &mut XmlPrinter<M>) -> Result<()>
    where
        T: Serialize,
        M: MarkupWriter;

    /// Convert an element tree back into a value
    fn deserialize<T>(&self, tree: &ElementNode) -> Result<T>
    where
        T: DeserializeOwned;
}

/// Default codec built on quick-xml's serde support
///
/// Serialization produces an XML event stream with `quick_xml::se` and
/// replays it through the printer; deserialization renders the element
/// tree and reads it back with `quick_xml::de`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeParameterCodec;

impl SerdeParameterCodec {
    /// Create a new codec
    pub fn new() -> Self {
        Self
    }
}

impl ParameterCodec for SerdeParameterCodec {
    fn serialize<T, M>(&self, root: &str, value: &T, printer: &mut XmlPrinter<M>) -> Result<()>
    where
        T: Serialize,
        M: MarkupWriter,
    {
        let xml = quick_xml::se::to_string_with_root(root, value)
            .map_err(|e| Error::Encode(e.to_string()))?;

        // Replay the serialized events through the printer so every
        // element and attribute takes the same sanitized path as
        // hand-printed markup.
        let mut reader = Reader::from_reader(xml.as_bytes());
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let element = ElementNode::from_start_event(&e)?;
                    printer.start_element_with(&element.name, &element.attributes)?;
                }
                Ok(Event::Empty(e)) => {
                    let element = ElementNode::from_start_event(&e)?;
                    printer.print_element_with(&element.name, &element.attributes)?;
                }
                Ok(Event::End(e)) => {
                    let name = std::str::from_utf8(e.name().as_ref())
                        .map_err(|err| Error::Encode(format!("invalid element name: {}", err)))?
                        .to_string();
                    printer.end_element(&name)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|err| Error::Encode(format!("failed to unescape: {}", err)))?;
                    printer.print_text(&text)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Encode(format!("invalid serialized XML: {}", e))),
                _ => {}
            }
            buf.clear();
        }
        Ok(())
    }

    fn deserialize<T>(&self, tree: &ElementNode) -> Result<T>
    where
        T: DeserializeOwned,
    {
        quick_xml::de::from_str(&tree.to_xml()).map_err(|e| Error::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_tree() {
        let tree = ElementNode::parse("<params><label>Hello</label><count>3</count></params>")
            .unwrap();
        assert_eq!(tree.name, "params");
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].name, "label");
        assert_eq!(tree.children[0].text.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_parse_attributes_in_order() {
        let tree = ElementNode::parse("<p b=\"2\" a=\"1\"/>").unwrap();
        assert_eq!(tree.get_attribute("b"), Some("2"));
        assert_eq!(tree.get_attribute("a"), Some("1"));
        let names: Vec<_> = tree.attributes.keys().cloned().collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn test_parse_unescapes_text() {
        let tree = ElementNode::parse("<t>a &lt; b &amp; c</t>").unwrap();
        assert_eq!(tree.text.as_deref(), Some("a < b & c"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(ElementNode::parse("").is_err());
        assert!(ElementNode::parse("no markup at all").is_err());
    }

    #[test]
    fn test_to_xml_round_trip() {
        let xml = "<params><label>a &lt; b</label><flag/></params>";
        let tree = ElementNode::parse(xml).unwrap();
        assert_eq!(tree.to_xml(), xml);
    }

    #[test]
    fn test_find_children() {
        let tree =
            ElementNode::parse("<l><item>1</item><other/><item>2</item></l>").unwrap();
        assert_eq!(tree.find_children("item").len(), 2);
    }
}
