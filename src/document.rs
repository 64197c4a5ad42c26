//! This module provides [`Document`], the raw input of validation: the top-level JSON
//! object of a machine description with every direct member kept, duplicates included.
//!
//! `serde_json::Value` silently keeps only the last of several identical keys, which
//! would hide a repeated `"name"` or a repeated state under `"transitions"`. `Document`
//! collects the members itself, and does the same for every member that is an object,
//! so the validator can reject them.

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// The direct members of a JSON object, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq)]
struct Member {
    key: String,
    value: Value,
    // Ordered members of `value` when it is an object, duplicates included.
    members: Option<Document>,
}

impl Member {
    fn new(key: String, value: Value) -> Self {
        let members = value.as_object().cloned().map(Document::from);
        Self {
            key,
            value,
            members,
        }
    }
}

impl Document {
    /// Iterates over the members in the order they appear in the document.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|member| (member.key.as_str(), &member.value))
    }

    /// Iterates over the keys in document order, repetitions included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|member| member.key.as_str())
    }

    /// Returns the value of the first member named `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.find(key).map(|member| &member.value)
    }

    /// Returns the ordered members of the first member named `key`, if it is an object.
    ///
    /// Unlike [`Document::get`], repeated keys inside that object are all kept.
    pub fn members(&self, key: &str) -> Option<&Document> {
        self.find(key).and_then(|member| member.members.as_ref())
    }

    /// Returns the first key that is declared again later in the document.
    ///
    /// Keys are reported in the order their repetition is encountered, so for
    /// `{"a", "b", "b", "a"}` this is `"b"`.
    pub fn duplicate_key(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.keys().find(|key| !seen.insert(*key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, key: &str) -> Option<&Member> {
        self.entries.iter().find(|member| member.key == key)
    }
}

impl FromStr for Document {
    type Err = serde_json::Error;

    /// Parses JSON text whose top-level value must be an object.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(key, value)| Member::new(key, value))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));

        // Members are kept raw so that nested objects can be read a second time
        // with their repeated keys intact.
        while let Some((key, raw)) = map.next_entry::<String, Box<RawValue>>()? {
            let value: Value = serde_json::from_str(raw.get()).map_err(de::Error::custom)?;
            let members = match value {
                Value::Object(_) => Some(
                    serde_json::from_str::<Document>(raw.get()).map_err(de::Error::custom)?,
                ),
                _ => None,
            };

            entries.push(Member {
                key,
                value,
                members,
            });
        }

        Ok(Document { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_keeps_document_order() {
        let document: Document = r#"{"name": "m", "blank": ".", "alphabet": ["."]}"#
            .parse()
            .unwrap();

        let keys: Vec<&str> = document.keys().collect();
        assert_eq!(keys, vec!["name", "blank", "alphabet"]);
        assert_eq!(document.get("blank"), Some(&json!(".")));
        assert_eq!(document.len(), 3);
    }

    #[test]
    fn test_parse_keeps_duplicate_keys() {
        let document: Document = r#"{"name": "first", "states": [], "name": "second"}"#
            .parse()
            .unwrap();

        assert_eq!(document.len(), 3);
        assert_eq!(document.get("name"), Some(&json!("first")));
        assert_eq!(document.duplicate_key(), Some("name"));
    }

    #[test]
    fn test_duplicate_key_reports_first_repetition() {
        let document: Document = r#"{"a": 1, "b": 2, "b": 3, "a": 4}"#.parse().unwrap();
        assert_eq!(document.duplicate_key(), Some("b"));
    }

    #[test]
    fn test_nested_duplicates_are_not_top_level() {
        let document: Document = r#"{"transitions": {"s": [], "s": []}}"#.parse().unwrap();
        assert_eq!(document.duplicate_key(), None);
    }

    #[test]
    fn test_nested_members_keep_duplicate_keys() {
        let document: Document =
            r#"{"transitions": {"s": [1], "t": [], "s": [2]}, "name": "m"}"#
                .parse()
                .unwrap();

        let transitions = document.members("transitions").unwrap();
        let members: Vec<(&str, &Value)> = transitions.iter().collect();
        assert_eq!(
            members,
            vec![("s", &json!([1])), ("t", &json!([])), ("s", &json!([2]))]
        );
        assert_eq!(transitions.duplicate_key(), Some("s"));
        assert_eq!(document.members("name"), None);
        assert_eq!(document.members("missing"), None);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!("[1, 2, 3]".parse::<Document>().is_err());
        assert!("\"name\"".parse::<Document>().is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(r#"{"name": "m",}"#.parse::<Document>().is_err());
        assert!("".parse::<Document>().is_err());
    }

    #[test]
    fn test_from_map() {
        let value = json!({"name": "m", "initial": "s", "transitions": {"s": []}});
        let document = match value {
            Value::Object(map) => Document::from(map),
            _ => unreachable!(),
        };

        assert_eq!(document.get("initial"), Some(&json!("s")));
        assert_eq!(document.duplicate_key(), None);
        assert_eq!(document.members("transitions").map(Document::len), Some(1));
        assert!(!document.is_empty());
    }
}
