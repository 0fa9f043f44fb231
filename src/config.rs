//! Rendering configuration surface
//!
//! Read-only settings consumed by renderers built on the printers.
//! Loading these from files or property sources is owned by the
//! embedding application; this crate only defines the shape and the
//! defaults.

use std::collections::HashMap;

/// Printer flavor to instantiate for a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrinterFlavor {
    /// Plain XML printing
    Xml,
    /// XHTML printing with whitespace handling
    #[default]
    Xhtml,
}

/// Configuration for the rendering module
#[derive(Debug, Clone)]
pub struct RenderingConfig {
    /// Format used to display links that have no label. Tokens:
    /// `%w` wiki name, `%s` space name, `%p` page name, `%P` page name
    /// with spaces between camel-case words, `%t` page title (falls
    /// back to `%p` when the title is empty or unavailable).
    pub link_label_format: String,

    /// InterWiki definitions: alias to base URL
    pub interwiki_definitions: HashMap<String, String>,

    /// Names of transformations to execute when rendering, ordered by
    /// priority (highest first)
    pub transformation_names: Vec<String>,

    /// Which printer flavor renderers should instantiate
    pub printer_hint: PrinterFlavor,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            link_label_format: "%p".to_string(),
            interwiki_definitions: HashMap::new(),
            transformation_names: vec!["macro".to_string()],
            printer_hint: PrinterFlavor::default(),
        }
    }
}

impl RenderingConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the link label format
    pub fn with_link_label_format(mut self, format: impl Into<String>) -> Self {
        self.link_label_format = format.into();
        self
    }

    /// Add an InterWiki definition
    pub fn with_interwiki(mut self, alias: impl Into<String>, base_url: impl Into<String>) -> Self {
        self.interwiki_definitions.insert(alias.into(), base_url.into());
        self
    }

    /// Set the ordered transformation names
    pub fn with_transformation_names(mut self, names: Vec<String>) -> Self {
        self.transformation_names = names;
        self
    }

    /// Set the printer flavor hint
    pub fn with_printer_hint(mut self, hint: PrinterFlavor) -> Self {
        self.printer_hint = hint;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderingConfig::default();
        assert_eq!(config.link_label_format, "%p");
        assert!(config.interwiki_definitions.is_empty());
        assert_eq!(config.transformation_names, ["macro"]);
        assert_eq!(config.printer_hint, PrinterFlavor::Xhtml);
    }

    #[test]
    fn test_builders() {
        let config = RenderingConfig::new()
            .with_link_label_format("%s.%p")
            .with_interwiki("wikipedia", "https://en.wikipedia.org/wiki/")
            .with_printer_hint(PrinterFlavor::Xml);
        assert_eq!(config.link_label_format, "%s.%p");
        assert_eq!(
            config.interwiki_definitions.get("wikipedia").map(String::as_str),
            Some("https://en.wikipedia.org/wiki/")
        );
        assert_eq!(config.printer_hint, PrinterFlavor::Xml);
    }
}
