//! Ordered HTML attribute set.
//!
//! Backs both the markup rewriters (parse a raw tag's attribute text,
//! mutate, serialize back) and the client-side element model. Names are
//! kept case-sensitive as authored; an empty value means a boolean
//! attribute (`disabled`, `async`, ...).

use super::escape_attr;

/// Ordered mapping from attribute name to value.
///
/// Insertion order is preserved so serialization is deterministic and
/// callers control emission order. No duplicate names: `set()` overwrites
/// in place, repeated names during parsing keep the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrSet {
    entries: Vec<(String, String)>,
}

impl AttrSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse HTML-style attribute text.
    ///
    /// Input: `src="a.png" data-size='big' width=10 disabled`
    ///
    /// Tolerant of quoted, unquoted, and boolean attributes. Entities in
    /// values are passed through verbatim, not decoded. Never fails: any
    /// text yields some attribute set (possibly empty).
    pub fn parse(s: &str) -> Self {
        let mut set = Self::new();
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_whitespace() || c == '/' {
                continue;
            }

            // Read attribute name
            let mut name = String::new();
            name.push(c);
            while let Some(&next) = chars.peek() {
                if next == '=' || next.is_whitespace() {
                    break;
                }
                name.push(chars.next().unwrap());
            }

            // Skip whitespace
            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }

            // Check for value
            if chars.peek() == Some(&'=') {
                chars.next(); // consume '='

                // Skip whitespace
                while chars.peek().is_some_and(|c| c.is_whitespace()) {
                    chars.next();
                }

                // Read value
                let value = if chars.peek() == Some(&'"') || chars.peek() == Some(&'\'') {
                    let quote = chars.next().unwrap();
                    let mut val = String::new();
                    for c in chars.by_ref() {
                        if c == quote {
                            break;
                        }
                        val.push(c);
                    }
                    val
                } else {
                    // Unquoted value (read until whitespace)
                    let mut val = String::new();
                    while let Some(&c) = chars.peek() {
                        if c.is_whitespace() {
                            break;
                        }
                        val.push(chars.next().unwrap());
                    }
                    val
                };

                set.push_unique(name, value);
            } else {
                // Boolean attribute (no value)
                set.push_unique(name, String::new());
            }
        }

        set
    }

    /// Append only if the name is not already present (first wins).
    fn push_unique(&mut self, name: String, value: String) {
        if !self.contains(&name) {
            self.entries.push((name, value));
        }
    }

    /// Serialize back to attribute text.
    ///
    /// Boolean attributes emit as bare `name`; valued attributes as
    /// `name="value"` with the value escaped. Emission order = insertion
    /// order.
    pub fn serialize(&self) -> String {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(name, value)| {
                if value.is_empty() {
                    name.clone()
                } else {
                    format!("{}=\"{}\"", name, escape_attr(value))
                }
            })
            .collect();
        parts.join(" ")
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Overwrite an existing attribute in place, or append a new one.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Remove an attribute, returning its value. Order of the remaining
    /// entries is preserved.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Insert an attribute ahead of all existing ones.
    pub fn insert_front(&mut self, name: &str, value: impl Into<String>) {
        self.remove(name);
        self.entries.insert(0, (name.to_string(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}
