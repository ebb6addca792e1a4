//! The format-agnostic intermediate representation.
//!
//! A [`Tree`] is built purely from primitives, sequences, and mappings. It is
//! what serialization produces and what deserialization consumes; wire formats
//! only decide how a `Tree` is rendered as text or bytes.

use alloc::string::String;
use alloc::vec::Vec;

// -----------------------------------------------------------------------------
// Tree

/// A loosely-typed tree value.
///
/// Numbers are split into [`Integer`](Tree::Integer) and
/// [`Float`](Tree::Float) because the distinction is observable in every
/// format the codec targets (JSON renders `20` and `20.0` differently, and a
/// float target accepts either).
///
/// # Examples
///
/// ```
/// use treeform_codec::{Tree, TreeMapping};
///
/// let mut mapping = TreeMapping::new();
/// mapping.insert("name", Tree::from("Apple"));
/// mapping.insert("qty", Tree::Integer(20));
///
/// let tree = Tree::Mapping(mapping);
/// assert_eq!(tree.kind(), "a mapping");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Tree {
    /// Absence of a value (`null` in JSON terms).
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Tree>),
    Mapping(TreeMapping),
}

impl Tree {
    /// A short, article-prefixed description of the tree's shape, used in
    /// error messages ("expected an integer but found a mapping ...").
    pub const fn kind(&self) -> &'static str {
        match self {
            Tree::Null => "null",
            Tree::Bool(_) => "a boolean",
            Tree::Integer(_) => "an integer",
            Tree::Float(_) => "a float",
            Tree::String(_) => "a string",
            Tree::Sequence(_) => "a sequence",
            Tree::Mapping(_) => "a mapping",
        }
    }

    /// Returns `true` for [`Tree::Null`].
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Tree::Null)
    }
}

impl From<bool> for Tree {
    fn from(value: bool) -> Self {
        Tree::Bool(value)
    }
}

impl From<i64> for Tree {
    fn from(value: i64) -> Self {
        Tree::Integer(value)
    }
}

impl From<f64> for Tree {
    fn from(value: f64) -> Self {
        Tree::Float(value)
    }
}

impl From<&str> for Tree {
    fn from(value: &str) -> Self {
        Tree::String(String::from(value))
    }
}

impl From<String> for Tree {
    fn from(value: String) -> Self {
        Tree::String(value)
    }
}

impl From<Vec<Tree>> for Tree {
    fn from(value: Vec<Tree>) -> Self {
        Tree::Sequence(value)
    }
}

impl From<TreeMapping> for Tree {
    fn from(value: TreeMapping) -> Self {
        Tree::Mapping(value)
    }
}

// -----------------------------------------------------------------------------
// TreeMapping

/// An insertion-ordered string-keyed mapping.
///
/// Key order is preserved and observable: the record codec inserts fields in
/// declaration order, and deterministic-output formats render them in that
/// order. Lookup is a linear scan, which is the right trade for the small
/// mappings records produce.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeMapping {
    entries: Vec<(String, Tree)>,
}

impl TreeMapping {
    /// Creates an empty mapping.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty mapping with room for `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `value` under `key`.
    ///
    /// If the key is already present its value is replaced in place, keeping
    /// the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Tree) {
        let key = key.into();
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Tree> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Tree)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl FromIterator<(String, Tree)> for TreeMapping {
    fn from_iter<I: IntoIterator<Item = (String, Tree)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl IntoIterator for TreeMapping {
    type Item = (String, Tree);
    type IntoIter = alloc::vec::IntoIter<(String, Tree)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Tree, TreeMapping};

    #[test]
    fn mapping_preserves_insertion_order() {
        let mut mapping = TreeMapping::new();
        mapping.insert("zeta", Tree::Integer(1));
        mapping.insert("alpha", Tree::Integer(2));
        mapping.insert("mid", Tree::Integer(3));

        let keys: alloc::vec::Vec<&str> = mapping.keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn mapping_insert_replaces_in_place() {
        let mut mapping = TreeMapping::new();
        mapping.insert("a", Tree::Integer(1));
        mapping.insert("b", Tree::Integer(2));
        mapping.insert("a", Tree::Integer(9));

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("a"), Some(&Tree::Integer(9)));
        let keys: alloc::vec::Vec<&str> = mapping.keys().collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn kind_names() {
        assert_eq!(Tree::Null.kind(), "null");
        assert_eq!(Tree::from("x").kind(), "a string");
        assert_eq!(Tree::from(1.5).kind(), "a float");
    }
}
