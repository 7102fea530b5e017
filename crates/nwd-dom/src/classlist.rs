//! Class token list
//!
//! The parsed form of an element's `class` attribute: whitespace-separated
//! tokens, first occurrence wins, source order kept.

use std::fmt;

/// Ordered, duplicate-free class tokens (`classList`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DOMTokenList {
    tokens: Vec<String>,
}

impl DOMTokenList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split an attribute value into tokens
    pub fn parse(value: &str) -> Self {
        let mut list = Self::new();
        list.add(&value.split_ascii_whitespace().collect::<Vec<_>>());
        list
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Append tokens not yet present; empty tokens are ignored
    pub fn add(&mut self, tokens: &[&str]) {
        for &token in tokens {
            if !token.is_empty() && !self.contains(token) {
                self.tokens.push(token.to_owned());
            }
        }
    }

    pub fn remove(&mut self, tokens: &[&str]) {
        self.tokens.retain(|t| !tokens.contains(&t.as_str()));
    }

    /// Flip `token`, or set it to `force`. Returns whether it is now present.
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        let present = force.unwrap_or(!self.contains(token));
        if present {
            self.add(&[token]);
        } else {
            self.remove(&[token]);
        }
        present
    }

    /// Serialized attribute value
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl fmt::Display for DOMTokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drops_duplicates_and_whitespace() {
        let list = DOMTokenList::parse("  todo\tdone\n todo ");
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["todo", "done"]);
        assert_eq!(list.to_string(), "todo done");
        assert!(DOMTokenList::parse("   ").is_empty());
    }

    #[test]
    fn test_add_and_remove_keep_order() {
        let mut list = DOMTokenList::parse("a b");
        list.add(&["c", "", "a"]);
        assert_eq!(list.value(), "a b c");

        list.remove(&["b", "missing"]);
        assert_eq!(list.value(), "a c");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_toggle_with_and_without_force() {
        let mut list = DOMTokenList::new();
        assert!(list.toggle("open", None));
        assert!(!list.toggle("open", None));
        assert!(!list.contains("open"));

        assert!(list.toggle("open", Some(true)));
        assert!(list.toggle("open", Some(true)));
        assert_eq!(list.len(), 1);
        assert!(!list.toggle("open", Some(false)));
        assert!(list.is_empty());
    }
}
