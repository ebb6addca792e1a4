//! [`Serialize`] and [`Deserialize`] for [`Tree`], so any serde-speaking wire
//! format can render and parse the intermediate representation directly.
//!
//! Both impls are written by hand: mappings must round-trip with their
//! insertion order intact, which a derived implementation over a sorted map
//! would not preserve.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde_core::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::tree::{Tree, TreeMapping};

impl Serialize for Tree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Tree::Null => serializer.serialize_unit(),
            Tree::Bool(value) => serializer.serialize_bool(*value),
            Tree::Integer(value) => serializer.serialize_i64(*value),
            Tree::Float(value) => serializer.serialize_f64(*value),
            Tree::String(value) => serializer.serialize_str(value),
            Tree::Sequence(elements) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Tree::Mapping(mapping) => {
                let mut map = serializer.serialize_map(Some(mapping.len()))?;
                for (key, value) in mapping.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Tree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TreeVisitor)
    }
}

struct TreeVisitor;

impl<'de> Visitor<'de> for TreeVisitor {
    type Value = Tree;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any tree value")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Tree, E> {
        Ok(Tree::Bool(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Tree, E> {
        Ok(Tree::Integer(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Tree, E>
    where
        E: de::Error,
    {
        i64::try_from(value)
            .map(Tree::Integer)
            .map_err(|_| E::custom("integer is out of the signed 64-bit range"))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Tree, E> {
        Ok(Tree::Float(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Tree, E> {
        Ok(Tree::String(String::from(value)))
    }

    fn visit_string<E>(self, value: String) -> Result<Tree, E> {
        Ok(Tree::String(value))
    }

    fn visit_unit<E>(self) -> Result<Tree, E> {
        Ok(Tree::Null)
    }

    fn visit_none<E>(self) -> Result<Tree, E> {
        Ok(Tree::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Tree, D::Error>
    where
        D: Deserializer<'de>,
    {
        Tree::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Tree, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut elements = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(Tree::Sequence(elements))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Tree, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut mapping = TreeMapping::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Tree>()? {
            mapping.insert(key, value);
        }
        Ok(Tree::Mapping(mapping))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::tree::{Tree, TreeMapping};

    #[test]
    fn mapping_order_survives_a_json_round_trip() {
        let mut mapping = TreeMapping::new();
        mapping.insert("zeta", Tree::Integer(1));
        mapping.insert("alpha", Tree::Integer(2));
        let tree = Tree::Mapping(mapping);

        let text = serde_json::to_string(&tree).unwrap();
        assert_eq!(text, r#"{"zeta":1,"alpha":2}"#);
        assert_eq!(serde_json::from_str::<Tree>(&text).unwrap(), tree);
    }

    #[test]
    fn numbers_keep_their_kind() {
        assert_eq!(
            serde_json::from_str::<Tree>("20").unwrap(),
            Tree::Integer(20)
        );
        assert_eq!(
            serde_json::from_str::<Tree>("20.0").unwrap(),
            Tree::Float(20.0)
        );
    }
}
