//! Attribute sanitization policy
//!
//! This module decides, for a single attribute name/value pair, whether
//! the attribute may be emitted at all. The policy is a fixed,
//! process-wide constant: a whitelist of cosmetic attributes that are
//! always safe, and a guarded list of URL-bearing attributes admitted
//! only when their value starts with a known-safe prefix. Anything else
//! is rejected outright.
//!
//! The policy fails closed: a rejected attribute is dropped from the
//! output, never re-encoded or replaced by a default.
//!
//! Known limitation: the safe-prefix test is a heuristic, not a URL
//! parser. It does not canonicalize percent-encoding, embedded control
//! characters, or case variations of scheme names (`JaVaScRiPt:`), so
//! it should be treated as minimal protection for the attributes it
//! guards, not a general URL validator.

/// Attribute names always admitted, regardless of value
pub const ATTRIBUTE_WHITELIST: &[&str] = &[
    "alt", "class", "height", "id", "name", "rel", "scope", "style", "target", "title", "width",
];

/// Attribute names admitted only if their value is safe
pub const GUARDED_ATTRIBUTES: &[&str] = &["href", "src"];

/// Value prefixes considered safe for guarded attributes
///
/// Matched case-sensitively against the trimmed value.
pub const SAFE_VALUE_PREFIXES: &[&str] = &["/", "http", "www", "mailto", "#", "file"];

/// Determine whether an attribute is safe to emit
///
/// Returns true if the name is whitelisted, or if the name is guarded
/// and the value (after trimming surrounding whitespace, so a leading
/// space cannot hide `" javascript:"`) starts with one of the safe
/// prefixes. Total over any two strings; never panics.
pub fn is_clean(name: &str, value: &str) -> bool {
    let value = value.trim();
    if ATTRIBUTE_WHITELIST.contains(&name) {
        return true;
    }
    if GUARDED_ATTRIBUTES.contains(&name) {
        return SAFE_VALUE_PREFIXES
            .iter()
            .any(|prefix| value.starts_with(prefix));
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelisted_names_admit_any_value() {
        for name in ATTRIBUTE_WHITELIST {
            assert!(is_clean(name, ""));
            assert!(is_clean(name, "   "));
            assert!(is_clean(name, "javascript:alert(1)"));
            assert!(is_clean(name, "\u{0}\u{1}\t"));
        }
    }

    #[test]
    fn test_guarded_names_require_safe_prefix() {
        assert!(is_clean("href", "/wiki/Main"));
        assert!(is_clean("href", "http://example.com"));
        assert!(is_clean("href", "https://example.com"));
        assert!(is_clean("href", "www.example.com"));
        assert!(is_clean("href", "mailto:someone@example.com"));
        assert!(is_clean("href", "#anchor"));
        assert!(is_clean("src", "file:///tmp/image.png"));

        assert!(!is_clean("href", "javascript:alert(1)"));
        assert!(!is_clean("src", "data:text/html;base64,PHNjcmlwdD4="));
        assert!(!is_clean("href", ""));
        assert!(!is_clean("href", "   "));
    }

    #[test]
    fn test_value_is_trimmed_before_testing() {
        assert!(is_clean("href", "  http://example.com"));
        assert!(is_clean("href", "\t/relative "));
        assert!(!is_clean("href", "  javascript:alert(1)"));
    }

    #[test]
    fn test_unknown_names_always_rejected() {
        assert!(!is_clean("onclick", "doSomething()"));
        assert!(!is_clean("onclick", ""));
        assert!(!is_clean("onmouseover", "http://example.com"));
        assert!(!is_clean("", "http://example.com"));
    }

    #[test]
    fn test_prefix_match_is_case_sensitive() {
        // Documented behavior: no case folding of the value.
        assert!(!is_clean("href", "HTTP://example.com"));
        assert!(!is_clean("href", "Mailto:someone@example.com"));
    }
}
