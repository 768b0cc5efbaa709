// src/types/record.rs
//! Records, batches, and data-source schemas.
//!
//! A record is one page/row returned from a data source. Every metadata
//! field is optional so that trimming (policy-driven field removal) is a
//! matter of setting fields to `None`; serialization then omits them.

use super::properties::{FileSource, IconField, PropertyKind, PropertyValue, RichTextItem};
use super::simple::SimpleValue;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A record's property mapping, in one of two projection states.
///
/// The API always delivers the verbose form; the simplified form exists
/// only after running the batch through property simplification. Insertion
/// order is preserved in both forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyMap {
    Verbose(IndexMap<String, PropertyValue>),
    Simple(IndexMap<String, SimpleValue>),
}

impl Default for PropertyMap {
    fn default() -> Self {
        Self::Verbose(IndexMap::new())
    }
}

impl PropertyMap {
    pub fn len(&self) -> usize {
        match self {
            Self::Verbose(map) => map.len(),
            Self::Simple(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Property names in insertion order.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Self::Verbose(map) => map.keys().map(String::as_str).collect(),
            Self::Simple(map) => map.keys().map(String::as_str).collect(),
        }
    }

    pub fn contains_key(&self, name: &str) -> bool {
        match self {
            Self::Verbose(map) => map.contains_key(name),
            Self::Simple(map) => map.contains_key(name),
        }
    }

    /// Removes a property by name, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) {
        match self {
            Self::Verbose(map) => {
                map.shift_remove(name);
            }
            Self::Simple(map) => {
                map.shift_remove(name);
            }
        }
    }

    /// Replaces the map with one containing only the named keys, in the
    /// order they are listed. Names absent from the map are omitted.
    pub fn retain_named(&mut self, names: &[String]) {
        match self {
            Self::Verbose(map) => {
                let mut kept = IndexMap::new();
                for name in names {
                    if let Some(value) = map.shift_remove(name) {
                        kept.insert(name.clone(), value);
                    }
                }
                *map = kept;
            }
            Self::Simple(map) => {
                let mut kept = IndexMap::new();
                for name in names {
                    if let Some(value) = map.shift_remove(name) {
                        kept.insert(name.clone(), value);
                    }
                }
                *map = kept;
            }
        }
    }

    pub fn as_verbose(&self) -> Option<&IndexMap<String, PropertyValue>> {
        match self {
            Self::Verbose(map) => Some(map),
            Self::Simple(_) => None,
        }
    }

    pub fn as_simple(&self) -> Option<&IndexMap<String, SimpleValue>> {
        match self {
            Self::Simple(map) => Some(map),
            Self::Verbose(_) => None,
        }
    }
}

/// One page/row of a data source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<super::properties::User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<super::properties::User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<FileSource>,
    /// Parent reference — kept opaque; this client never navigates it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_trash: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    #[serde(default, skip_serializing_if = "PropertyMap::is_empty")]
    pub properties: PropertyMap,
}

impl Record {
    /// Looks up a verbose property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.as_verbose().and_then(|map| map.get(name))
    }

    /// Looks up a simplified property by name.
    pub fn simple(&self, name: &str) -> Option<&SimpleValue> {
        self.properties.as_simple().and_then(|map| map.get(name))
    }

    /// The record's title text: the concatenated plain text of its
    /// title-typed property, if it has one.
    pub fn title(&self) -> Option<String> {
        let map = self.properties.as_verbose()?;
        map.values().find_map(|value| match &value.kind {
            PropertyKind::Title { title } => Some(
                title
                    .iter()
                    .map(|run| run.plain_text.as_str())
                    .collect::<String>(),
            ),
            _ => None,
        })
    }
}

/// One page of query results plus the continuation state.
///
/// `next_cursor: None` together with `has_more: false` signals exhaustion.
/// Cursors are opaque tokens owned by the service; the client only stores
/// and forwards them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordBatch {
    #[serde(default)]
    pub object: String,
    pub results: Vec<Record>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl RecordBatch {
    /// An empty, exhausted batch.
    pub fn empty() -> Self {
        Self {
            object: "list".to_string(),
            results: Vec::new(),
            next_cursor: None,
            has_more: false,
        }
    }
}

/// One column of a data-source schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaColumn {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl SchemaColumn {
    /// Whether this is the designated title column of the data source.
    pub fn is_title(&self) -> bool {
        self.kind == "title"
    }
}

/// A data source's schema: its columns keyed by property name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Vec<RichTextItem>>,
    #[serde(default)]
    pub properties: IndexMap<String, SchemaColumn>,
}

impl DataSourceSchema {
    /// The id of the title-typed column, if the schema has one.
    pub fn title_column_id(&self) -> Option<&str> {
        self.properties
            .values()
            .find(|column| column.is_title())
            .map(|column| column.id.as_str())
    }
}
