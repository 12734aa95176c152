//! The format-agnostic catalog representation.
//!
//! A [`Catalog`] maps keys to [`Value`]s and is always iterated in ascending
//! key order, which is what makes serialized output deterministic.

use crate::message::Message;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, btree_map};
use std::fmt;

/// A numeric catalog value, as produced by YAML, JSON or TOML numbers.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(value) => write!(f, "{}", value),
            Number::Float(value) => write!(f, "{}", value),
        }
    }
}

/// The plural forms of one entry.
///
/// This is also the record written by extraction, where `description` is
/// reserved and never populated.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluralVariants {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
}

impl PluralVariants {
    /// Builds a record from message templates, treating empty strings as absent.
    pub fn from_forms(one: &str, other: &str) -> Self {
        let present = |form: &str| (!form.is_empty()).then(|| form.to_owned());
        Self {
            description: None,
            one: present(one),
            other: present(other),
        }
    }
}

impl fmt::Display for PluralVariants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut record = serde_json::Map::new();
        let fields = [
            ("description", &self.description),
            ("one", &self.one),
            ("other", &self.other),
        ];
        for (name, form) in fields {
            if let Some(form) = form {
                record.insert(name.to_owned(), serde_json::Value::from(form.as_str()));
            }
        }
        write!(f, "{}", serde_json::Value::Object(record))
    }
}

/// One catalog value.
///
/// Values keep the type they were loaded with. The only coercion is
/// [`Value::to_plain_string`], applied by the YAML writer.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Bool(bool),
    Number(Number),
    Variants(PluralVariants),
}

impl Value {
    /// Returns the text of a plain string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the plural record of a variant value.
    pub fn as_variants(&self) -> Option<&PluralVariants> {
        match self {
            Value::Variants(variants) => Some(variants),
            _ => None,
        }
    }

    /// Stringifies the value.
    ///
    /// Scalars use their canonical text (`true`, `42`, `1.5`); variant records
    /// become compact JSON such as `{"one":"cat","other":"cats"}`.
    pub fn to_plain_string(&self) -> String {
        match self {
            Value::String(text) => text.clone(),
            Value::Bool(flag) => flag.to_string(),
            Value::Number(number) => number.to_string(),
            Value::Variants(variants) => variants.to_string(),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::String(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::String(text)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Value::Number(Number::Integer(number))
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Number(Number::Float(number))
    }
}

impl From<PluralVariants> for Value {
    fn from(variants: PluralVariants) -> Self {
        Value::Variants(variants)
    }
}

/// All entries of one locale.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<String, Value>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the extraction catalog: one variant record per message id.
    ///
    /// Messages sharing an id overwrite each other, so the last one wins.
    pub fn from_messages<'a>(messages: impl IntoIterator<Item = &'a Message>) -> Self {
        messages
            .into_iter()
            .map(|message| {
                (
                    message.id.clone(),
                    Value::Variants(PluralVariants::from_forms(&message.one, &message.other)),
                )
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Looks up `key` as a renderable [`Message`].
    ///
    /// Plain values become the `other` form; variant records keep both forms.
    pub fn message(&self, key: &str) -> Option<Message> {
        let value = self.entries.get(key)?;
        let message = match value {
            Value::Variants(variants) => Message {
                id: key.to_owned(),
                one: variants.one.clone().unwrap_or_default(),
                other: variants.other.clone().unwrap_or_default(),
            },
            scalar => Message {
                id: key.to_owned(),
                one: String::new(),
                other: scalar.to_plain_string(),
            },
        };
        Some(message)
    }

    pub(crate) fn insert(&mut self, key: String, value: Value) {
        self.entries.insert(key, value);
    }
}

impl<K, V> FromIterator<(K, V)> for Catalog
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_sorted() {
        let catalog: Catalog = [("zeta", "z"), ("alpha", "a"), ("mid", "m")]
            .into_iter()
            .collect();

        let keys: Vec<_> = catalog.keys().collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_to_plain_string() {
        assert_eq!(Value::from("no").to_plain_string(), "no");
        assert_eq!(Value::from(true).to_plain_string(), "true");
        assert_eq!(Value::from(42).to_plain_string(), "42");
        assert_eq!(Value::from(1.5).to_plain_string(), "1.5");

        let variants = PluralVariants::from_forms("cat", "cats");
        assert_eq!(
            Value::from(variants).to_plain_string(),
            r#"{"one":"cat","other":"cats"}"#
        );
    }

    #[test]
    fn test_from_messages_last_duplicate_wins() {
        let first = Message::builder().id("Hello").other("Hi").build();
        let second = Message::builder().id("Hello").other("Hi there").build();

        let catalog = Catalog::from_messages([&first, &second]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.get("Hello"),
            Some(&Value::Variants(PluralVariants {
                description: None,
                one: None,
                other: Some("Hi there".to_string()),
            }))
        );
    }

    #[test]
    fn test_message_from_plain_and_variant_values() {
        let catalog: Catalog = [
            ("plain", Value::from("Hello")),
            ("cats", Value::from(PluralVariants::from_forms("a cat", "cats"))),
        ]
        .into_iter()
        .collect();

        let plain = catalog.message("plain").unwrap();
        assert_eq!(plain.one, "");
        assert_eq!(plain.other, "Hello");

        let cats = catalog.message("cats").unwrap();
        assert_eq!(cats.id, "cats");
        assert_eq!(cats.one, "a cat");
        assert_eq!(cats.other, "cats");

        assert!(catalog.message("absent").is_none());
    }
}
