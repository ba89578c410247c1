//! Ordered engine property set.

use std::fmt::Write as _;

use indexmap::IndexMap;

use super::TypeRef;

/// Ordered mapping of property key to value.
///
/// Insertion order is preserved; writing an existing key replaces its value
/// in place (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    entries: IndexMap<String, String>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` unconditionally.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Set `key` only when `value` has text.
    pub fn set_if_present(&mut self, key: &str, value: &str) -> &mut Self {
        if !value.trim().is_empty() {
            self.set(key, value);
        }
        self
    }

    /// Set `key` to the referenced type name unless the reference is unset.
    pub fn set_if_not_default(&mut self, key: &str, value: &TypeRef) -> &mut Self {
        if let Some(name) = value.name() {
            self.set(key, name);
        }
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as `key=value` lines in insertion order.
    ///
    /// Backslashes, separators and line breaks are escaped so the output can
    /// be read back by a standard properties parser.
    pub fn to_properties_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            let _ = writeln!(out, "{}={}", escape(key, true), escape(value, false));
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertySet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, value) in iter {
            set.set(key, value);
        }
        set
    }
}

fn escape(raw: &str, is_key: bool) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '=' | ':' | ' ' if is_key => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}
