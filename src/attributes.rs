//! Attribute sets and normalization
//!
//! Heterogeneous attribute inputs (ordered pair lists, name→value
//! mappings, already-built sets) are normalized into one canonical
//! ordered sequence, with every entry passing through the sanitization
//! policy in [`crate::sanitize`]. This is the single funnel all printer
//! entry points go through, so the policy cannot be bypassed by
//! choosing a different overload.

use crate::sanitize;
use indexmap::IndexMap;

/// An ordered set of attributes with unique names
///
/// Insertion order is preserved because it affects output determinism.
/// On a duplicate name the last occurrence wins, and the attribute
/// moves to the position of that last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    entries: IndexMap<String, String>,
}

impl AttributeSet {
    /// Create an empty attribute set
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attributes in the set
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an attribute value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|v| v.as_str())
    }

    /// Insert an attribute without applying the sanitization policy
    ///
    /// A duplicate name replaces the previous value and moves to the
    /// position of this occurrence. Entries with an empty name are
    /// dropped.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if name.is_empty() {
            return;
        }
        // shift_remove keeps the relative order of the survivors, so
        // re-inserting lands the entry at the last-occurrence position.
        self.entries.shift_remove(&name);
        self.entries.insert(name, value.into());
    }

    /// Insert an attribute if and only if the policy admits it
    ///
    /// Returns true if the attribute was admitted. Rejected entries are
    /// silently dropped; callers receive no diagnostic by design.
    pub fn set_clean(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        let value = value.into();
        if name.is_empty() || !sanitize::is_clean(&name, &value) {
            return false;
        }
        self.set(name, value);
        true
    }

    /// Normalize any sequence of name/value pairs into a sanitized set
    ///
    /// Accepts ordered pair lists (order preserved), mappings (the
    /// mapping's own iteration order), or an existing [`AttributeSet`]
    /// (in which case this is a no-op: the policy is idempotent).
    pub fn sanitize<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut set = Self::new();
        for (name, value) in pairs {
            set.set_clean(name.as_ref(), value.as_ref());
        }
        set
    }

    /// Normalize pairs whose values may be absent
    ///
    /// Entries with a `None` value are dropped without error, matching
    /// the treatment of null map entries in the original callers.
    pub fn sanitize_optional<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::sanitize(
            pairs
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v))),
        )
    }

    /// Iterate over the attributes in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for AttributeSet {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
