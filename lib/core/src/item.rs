//! Catalog items and attribute normalization
//!
//! [`RawItem`] accepts the loosely shaped records found in movie exports
//! (TMDB column names, `[{"id": 28, "name": "Action"}]` payloads, JSON
//! encoded inside CSV cells). [`RawItem::normalize`] validates one record
//! into a canonical [`Item`]; every "did the input match expectations"
//! failure surfaces here as [`Error::MalformedAttribute`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Integer(u64),
    String(String),
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemId::Integer(i) => write!(f, "{}", i),
            ItemId::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for ItemId {
    fn from(i: u64) -> Self {
        ItemId::Integer(i)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId::String(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::String(s.to_string())
    }
}

impl From<ItemId> for Value {
    fn from(id: ItemId) -> Self {
        match id {
            ItemId::Integer(i) => Value::Number(i.into()),
            ItemId::String(s) => Value::String(s),
        }
    }
}

impl ItemId {
    /// Read an id from its raw JSON form; `Ok(None)` for null
    pub fn from_value(value: &Value) -> std::result::Result<Option<Self>, String> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_u64()
                .map(|i| Some(ItemId::Integer(i)))
                .ok_or_else(|| format!("expected a non-negative integer, got {}", n)),
            Value::String(s) if s.trim().is_empty() => Err("blank string".to_string()),
            Value::String(s) => Ok(Some(ItemId::String(s.clone()))),
            other => Err(format!("expected an integer or a string, got {}", json_kind(other))),
        }
    }
}

/// One element of a tag or keyword list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagEntry {
    /// `{"name": "..."}`, extra fields such as `id` are ignored
    Named { name: String },
    Plain(String),
}

impl TagEntry {
    pub fn name(&self) -> &str {
        match self {
            TagEntry::Named { name } => name,
            TagEntry::Plain(name) => name,
        }
    }
}

/// Shape of a raw tag or keyword attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagPayload {
    List(Vec<TagEntry>),
    /// A JSON document holding a list, as stored in CSV exports
    Encoded(String),
    /// Anything else; rejected at normalization
    Other(Value),
}

impl TagPayload {
    fn into_names(self, item: &str, attribute: &'static str) -> Result<Vec<String>> {
        let entries = match self {
            TagPayload::List(entries) => entries,
            TagPayload::Encoded(text) if text.trim().is_empty() => Vec::new(),
            TagPayload::Encoded(text) => {
                serde_json::from_str::<Vec<TagEntry>>(&text).map_err(|e| {
                    Error::MalformedAttribute {
                        item: item.to_string(),
                        attribute,
                        reason: format!("encoded list does not parse: {}", e),
                    }
                })?
            }
            TagPayload::Other(Value::Null) => Vec::new(),
            TagPayload::Other(other) => {
                return Err(Error::MalformedAttribute {
                    item: item.to_string(),
                    attribute,
                    reason: format!("expected a list of names, got {}", json_kind(&other)),
                })
            }
        };

        Ok(entries
            .iter()
            .map(|entry| entry.name().trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// A catalog record as it arrives from the dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default, alias = "genres")]
    pub tags: Option<TagPayload>,
    #[serde(default)]
    pub keywords: Option<TagPayload>,
    #[serde(default, alias = "overview")]
    pub synopsis: Option<Value>,
    #[serde(default)]
    pub popularity: Option<Value>,
}

impl RawItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(Value::String(title.into())),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        let id: ItemId = id.into();
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(TagPayload::List(
            tags.into_iter().map(|t| TagEntry::Plain(t.into())).collect(),
        ));
        self
    }

    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(TagPayload::List(
            keywords.into_iter().map(|k| TagEntry::Plain(k.into())).collect(),
        ));
        self
    }

    #[must_use]
    pub fn with_synopsis(mut self, synopsis: impl Into<String>) -> Self {
        self.synopsis = Some(Value::String(synopsis.into()));
        self
    }

    #[must_use]
    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = serde_json::Number::from_f64(popularity).map(Value::Number);
        self
    }

    /// Label used in error messages: the id when present and well formed,
    /// else the position
    pub fn label(&self, position: usize) -> String {
        match self.id.as_ref().map(ItemId::from_value) {
            Some(Ok(Some(id))) => id.to_string(),
            _ => format!("#{}", position),
        }
    }

    /// Validate and canonicalize this record.
    ///
    /// `position` is the record's index in the input sequence and doubles as
    /// its id when none was supplied.
    pub fn normalize(self, position: usize) -> Result<Item> {
        let label = self.label(position);
        let malformed = |attribute: &'static str, reason: String| Error::MalformedAttribute {
            item: label.clone(),
            attribute,
            reason,
        };

        let id = match &self.id {
            Some(value) => ItemId::from_value(value).map_err(|reason| malformed("id", reason))?,
            None => None,
        };

        // Stored exactly as given; queries match on the same string
        let title = match self.title {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            Some(Value::String(_)) | Some(Value::Null) | None => {
                return Err(malformed("title", "missing or blank".to_string()))
            }
            Some(other) => {
                return Err(malformed(
                    "title",
                    format!("expected a string, got {}", json_kind(&other)),
                ))
            }
        };

        let synopsis = match self.synopsis {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => String::new(),
            Some(other) => {
                return Err(malformed(
                    "synopsis",
                    format!("expected a string, got {}", json_kind(&other)),
                ))
            }
        };

        let popularity = match self.popularity {
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| malformed("popularity", format!("unrepresentable number {}", n)))?,
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| malformed("popularity", format!("not a number: {:?}", s)))?,
            Some(Value::Null) | None => return Err(malformed("popularity", "missing".to_string())),
            Some(other) => {
                return Err(malformed(
                    "popularity",
                    format!("expected a number, got {}", json_kind(&other)),
                ))
            }
        };
        if !popularity.is_finite() {
            return Err(malformed("popularity", format!("non-finite value {}", popularity)));
        }
        if popularity < 0.0 {
            return Err(malformed("popularity", format!("negative value {}", popularity)));
        }

        let tags: BTreeSet<String> = match self.tags {
            Some(payload) => payload.into_names(&label, "tags")?.into_iter().collect(),
            None => BTreeSet::new(),
        };
        let keywords = match self.keywords {
            Some(payload) => payload.into_names(&label, "keywords")?,
            None => Vec::new(),
        };

        Ok(Item {
            id: id.unwrap_or(ItemId::Integer(position as u64)),
            title,
            tags,
            keywords,
            synopsis,
            popularity,
        })
    }
}

/// A validated catalog entry, immutable for one index build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub tags: BTreeSet<String>,
    pub keywords: Vec<String>,
    pub synopsis: String,
    pub popularity: f64,
}

impl Item {
    /// Keywords joined into one document for text encoding
    pub fn keyword_text(&self) -> String {
        self.keywords.join(" ")
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
