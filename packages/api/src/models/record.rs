//! # User record and field schema
//!
//! [`UserRecord`] is whatever JSON object the backend returns for a user. No
//! shape is enforced; keys keep the order the backend sent them in
//! (`serde_json` is built with `preserve_order`).
//!
//! [`FieldSchema`] is the ordered list of `{name, kind}` pairs the profile page
//! renders. It is either supplied explicitly (it deserializes from
//! `[{"name": "...", "type": "..."}]`) or derived from a record's keys with
//! [`FieldSchema::infer`], which consults the declared [`KNOWN_FIELDS`] table:
//!
//! | Key | Kind |
//! |-----|------|
//! | `birthdate` | [`FieldKind::Date`] |
//! | `gender` | [`FieldKind::Boolean`] |
//! | anything else | [`FieldKind::Text`] |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open-ended user record as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(Map<String, Value>);

impl UserRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Keys in record order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl TryFrom<Value> for UserRecord {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

/// Presentation kind of a profile field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    Date,
    /// Rendered as a fixed-option selector (see [`GENDER_OPTIONS`](crate::GENDER_OPTIONS)).
    Boolean,
    /// A kind this client does not know how to render.
    Unknown,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Date => "date",
            FieldKind::Boolean => "boolean",
            FieldKind::Unknown => "unknown",
        }
    }
}

impl From<String> for FieldKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "text" | "string" => FieldKind::Text,
            "date" => FieldKind::Date,
            "boolean" => FieldKind::Boolean,
            _ => FieldKind::Unknown,
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Field names with a declared non-text kind.
pub const KNOWN_FIELDS: &[(&str, FieldKind)] = &[
    ("birthdate", FieldKind::Date),
    ("gender", FieldKind::Boolean),
];

/// One entry of a [`FieldSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
}

/// Ordered list of fields to render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSchema {
    fields: Vec<FieldSpec>,
}

impl FieldSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Derive the schema from a record's keys, in record order.
    pub fn infer(record: &UserRecord) -> Self {
        let fields = record
            .keys()
            .map(|name| FieldSpec {
                name: name.to_string(),
                kind: Self::kind_for_name(name),
            })
            .collect();
        Self { fields }
    }

    /// Declared kind for a field name; anything undeclared is text.
    pub fn kind_for_name(name: &str) -> FieldKind {
        KNOWN_FIELDS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, kind)| *kind)
            .unwrap_or(FieldKind::Text)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldSpec> {
        self.fields.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldSchema {
    type Item = &'a FieldSpec;
    type IntoIter = std::slice::Iter<'a, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
