// src/types/properties.rs
//! The verbose, self-describing property model returned by the API.
//!
//! Every property value arrives as a tagged union discriminated by a `type`
//! field. The enums here are internally tagged on that field, so the
//! discriminant (not payload-field guessing) selects the variant, and types
//! this client does not know yet land in an explicit `Unknown` arm instead
//! of failing to parse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One inline run of rich text.
///
/// `plain_text` is the fallback rendering for every run kind (text, mention,
/// equation); projection concatenates these in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextItem {
    pub plain_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<serde_json::Value>,
}

impl RichTextItem {
    /// Create a plain text run — the most common rich text variant.
    pub fn plain_text(text: &str) -> Self {
        Self {
            plain_text: text.to_string(),
            href: None,
            annotations: None,
        }
    }
}

/// Select, multi-select, and status option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl SelectOption {
    pub fn named(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            color: None,
        }
    }
}

/// Date value with optional end and time zone.
///
/// `start`/`end` are kept verbatim as the API's ISO-8601 strings — a date
/// property may carry a bare date or a full datetime, and the client never
/// needs to interpret them, only forward or project them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl DateValue {
    pub fn starting(start: &str) -> Self {
        Self {
            start: start.to_string(),
            end: None,
            time_zone: None,
        }
    }
}

/// A user reference as it appears in people and created/edited-by fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl User {
    pub fn with_id(id: &str) -> Self {
        Self {
            object: Some("user".to_string()),
            id: id.to_string(),
            name: None,
        }
    }
}

/// A reference to a related page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationRef {
    pub id: String,
}

/// An externally hosted file (caller-provided URL).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

/// A Notion-hosted file (expiring URL).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostedFile {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<DateTime<Utc>>,
}

/// Where a file's bytes live — external or Notion-hosted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileSource {
    External { external: ExternalFile },
    File { file: HostedFile },
    #[serde(other)]
    Unknown,
}

impl FileSource {
    /// The usable URL for this file, if the source kind carries one.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::External { external } => Some(&external.url),
            Self::File { file } => Some(&file.url),
            Self::Unknown => None,
        }
    }
}

/// One item of a files property: an optional display name plus the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub source: FileSource,
}

/// A page or data-source icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji { emoji: String },
    External { external: ExternalFile },
    File { file: HostedFile },
    #[serde(other)]
    Unknown,
}

/// An icon field on a record: the API's icon object, or — after
/// simplification — a bare image URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IconField {
    Icon(Icon),
    Url(String),
}

/// The computed result of a formula property, tagged by its own sub-type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaValue {
    String { string: Option<String> },
    Number { number: Option<f64> },
    Boolean { boolean: Option<bool> },
    Date { date: Option<DateValue> },
}

/// The aggregated result of a rollup property.
///
/// The `array` variant is recursive: each item is typed like a property
/// variant and is projected like one. The domain guarantees rollup arrays
/// never contain further rollups, so projection flattens exactly one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RollupValue {
    Number { number: Option<f64> },
    Date { date: Option<DateValue> },
    Array { array: Vec<PropertyKind> },
    #[serde(other)]
    Unsupported,
}

/// Page-verification metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationValue {
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateValue>,
}

/// The prefix/counter pair behind a unique-id property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueIdValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub number: i64,
}

/// Every property payload shape the API can return, tagged by `type`.
///
/// Rollup array items reuse this enum directly: they carry the same
/// `type` + payload shape, just without the surrounding property id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyKind {
    Title { title: Vec<RichTextItem> },
    RichText { rich_text: Vec<RichTextItem> },
    Number { number: Option<f64> },
    Select { select: Option<SelectOption> },
    MultiSelect { multi_select: Vec<SelectOption> },
    Status { status: Option<SelectOption> },
    Date { date: Option<DateValue> },
    People { people: Vec<User> },
    Files { files: Vec<FileValue> },
    Checkbox { checkbox: bool },
    Url { url: Option<String> },
    Email { email: Option<String> },
    PhoneNumber { phone_number: Option<String> },
    Formula { formula: FormulaValue },
    Relation { relation: Vec<RelationRef> },
    Rollup { rollup: RollupValue },
    UniqueId { unique_id: UniqueIdValue },
    CreatedTime { created_time: DateTime<Utc> },
    CreatedBy { created_by: User },
    LastEditedTime { last_edited_time: DateTime<Utc> },
    LastEditedBy { last_edited_by: User },
    Verification { verification: Option<VerificationValue> },
    Button { button: serde_json::Value },
    /// Forward-compatibility arm: a property type this client does not
    /// recognize. Projection falls back to the property's id token.
    #[serde(other)]
    Unknown,
}

impl PropertyKind {
    /// The API type name for this payload.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::RichText { .. } => "rich_text",
            Self::Number { .. } => "number",
            Self::Select { .. } => "select",
            Self::MultiSelect { .. } => "multi_select",
            Self::Status { .. } => "status",
            Self::Date { .. } => "date",
            Self::People { .. } => "people",
            Self::Files { .. } => "files",
            Self::Checkbox { .. } => "checkbox",
            Self::Url { .. } => "url",
            Self::Email { .. } => "email",
            Self::PhoneNumber { .. } => "phone_number",
            Self::Formula { .. } => "formula",
            Self::Relation { .. } => "relation",
            Self::Rollup { .. } => "rollup",
            Self::UniqueId { .. } => "unique_id",
            Self::CreatedTime { .. } => "created_time",
            Self::CreatedBy { .. } => "created_by",
            Self::LastEditedTime { .. } => "last_edited_time",
            Self::LastEditedBy { .. } => "last_edited_by",
            Self::Verification { .. } => "verification",
            Self::Button { .. } => "button",
            Self::Unknown => "unknown",
        }
    }
}

/// A property value as stored on a record: the payload plus the schema id
/// the API attaches to every property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub id: String,
    #[serde(flatten)]
    pub kind: PropertyKind,
}

impl PropertyValue {
    pub fn new(id: &str, kind: PropertyKind) -> Self {
        Self {
            id: id.to_string(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_tagged_variants() {
        let value: PropertyValue = serde_json::from_str(
            r#"{"id":"abc","type":"number","number":42.5}"#,
        )
        .unwrap();
        assert_eq!(value.id, "abc");
        assert_eq!(value.kind, PropertyKind::Number { number: Some(42.5) });
    }

    #[test]
    fn null_payload_stays_in_declared_variant() {
        // A null select must not drift into another variant with optional
        // fields; the type tag decides.
        let value: PropertyValue =
            serde_json::from_str(r#"{"id":"s","type":"select","select":null}"#).unwrap();
        assert_eq!(value.kind, PropertyKind::Select { select: None });
    }

    #[test]
    fn unknown_type_parses_to_fallback_arm() {
        let value: PropertyValue = serde_json::from_str(
            r#"{"id":"x1","type":"holographic","holographic":{"weird":true}}"#,
        )
        .unwrap();
        assert_eq!(value.kind, PropertyKind::Unknown);
        assert_eq!(value.kind.type_name(), "unknown");
    }

    #[test]
    fn rollup_array_items_parse_as_property_kinds() {
        let value: PropertyValue = serde_json::from_str(
            r#"{
                "id":"r",
                "type":"rollup",
                "rollup":{
                    "type":"array",
                    "function":"show_original",
                    "array":[
                        {"type":"number","number":1.0},
                        {"type":"title","title":[{"plain_text":"Row"}]}
                    ]
                }
            }"#,
        )
        .unwrap();
        match value.kind {
            PropertyKind::Rollup {
                rollup: RollupValue::Array { array },
            } => {
                assert_eq!(array.len(), 2);
                assert_eq!(array[0], PropertyKind::Number { number: Some(1.0) });
            }
            other => panic!("expected rollup array, got {:?}", other),
        }
    }

    #[test]
    fn icon_field_accepts_object_and_url_forms() {
        let verbose: IconField =
            serde_json::from_str(r#"{"type":"emoji","emoji":"🔥"}"#).unwrap();
        assert_eq!(
            verbose,
            IconField::Icon(Icon::Emoji {
                emoji: "🔥".to_string()
            })
        );

        let simple: IconField =
            serde_json::from_str(r#""https://example.com/icon.png""#).unwrap();
        assert_eq!(simple, IconField::Url("https://example.com/icon.png".into()));
    }

    #[test]
    fn file_source_url_extraction() {
        let external: FileValue = serde_json::from_str(
            r#"{"name":"spec.pdf","type":"external","external":{"url":"https://x/y.pdf"}}"#,
        )
        .unwrap();
        assert_eq!(external.source.url(), Some("https://x/y.pdf"));
        assert_eq!(FileSource::Unknown.url(), None);
    }
}
