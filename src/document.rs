//! Structured documents decoded from YAML.
//!
//! A [`Document`] is the tree the mangler walks: ordered mappings with string
//! keys, sequences, and scalars. Conversion from [`serde_yaml::Value`] rejects
//! shapes the mangler cannot express faithfully (non-string keys, explicit
//! tags), so anything that converts also converts back without loss.

use serde_yaml::{Mapping, Number, Value};

/// A scalar leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
}

/// A decoded YAML document.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// Ordered mapping; insertion order is kept for readable output.
    Mapping(Vec<(String, Document)>),
    Sequence(Vec<Document>),
    Scalar(Scalar),
}

impl Document {
    /// Shorthand for a string scalar.
    pub fn string(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(value.into()))
    }

    /// Shorthand for a null scalar.
    pub fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// Build a mapping from key/value pairs, keeping their order.
    pub fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, Document)>) -> Self {
        Self::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Get the string value if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Look up a key if this is a mapping.
    pub fn get(&self, key: &str) -> Option<&Document> {
        match self {
            Self::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Parse YAML text into a document.
    pub fn from_yaml_str(text: &str) -> Result<Self, String> {
        let value: Value = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
        Self::try_from(value)
    }

    /// Serialize the document back to YAML text.
    pub fn to_yaml_string(&self) -> Result<String, String> {
        serde_yaml::to_string(&Value::from(self.clone())).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
impl Document {
    /// Whether two documents have the same shape: identical mapping keys in
    /// the same order and identical sequence lengths, ignoring scalar values.
    pub(crate) fn same_shape(&self, other: &Document) -> bool {
        match (self, other) {
            (Self::Mapping(a), Self::Mapping(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.same_shape(vb))
            }
            (Self::Sequence(a), Self::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape(y))
            }
            (Self::Scalar(_), Self::Scalar(_)) => true,
            _ => false,
        }
    }
}

impl TryFrom<Value> for Document {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Null => Self::Scalar(Scalar::Null),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Self::Scalar(Scalar::Number(n)),
            Value::String(s) => Self::Scalar(Scalar::String(s)),
            Value::Sequence(items) => Self::Sequence(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Mapping(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (key, value) in map {
                    let key = match key {
                        Value::String(s) => s,
                        other => {
                            return Err(format!("mapping key is not a string: {:?}", other));
                        }
                    };
                    entries.push((key, Self::try_from(value)?));
                }
                Self::Mapping(entries)
            }
            Value::Tagged(tagged) => {
                return Err(format!("unsupported YAML tag {}", tagged.tag));
            }
        })
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        match doc {
            Document::Scalar(Scalar::Null) => Value::Null,
            Document::Scalar(Scalar::Bool(b)) => Value::Bool(b),
            Document::Scalar(Scalar::Number(n)) => Value::Number(n),
            Document::Scalar(Scalar::String(s)) => Value::String(s),
            Document::Sequence(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            Document::Mapping(entries) => {
                let mut map = Mapping::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(Value::String(key), Value::from(value));
                }
                Value::Mapping(map)
            }
        }
    }
}
