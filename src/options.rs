// src/options.rs
//! Caller-supplied policies for querying, trimming, and projection.
//!
//! These are plain immutable inputs: a [`DataSource`](crate::DataSource)
//! owns its options for its entire lifetime, and nothing here is mutated
//! by the engine.

use serde::{Deserialize, Serialize};

/// Which top-level metadata fields and named properties to strip from
/// returned records.
///
/// Each boolean maps to one or two API field names; `user_ids` and
/// `page_timestamps` each cover a created/edited pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoveOptions {
    /// Removes created-by and last-edited-by user references. Also forces
    /// `created_by`/`last_edited_by`-typed properties to project to null.
    pub user_ids: bool,
    /// Removes created-time and last-edited-time.
    pub page_timestamps: bool,
    pub url: bool,
    pub public_url: bool,
    pub object_type: bool,
    pub id: bool,
    pub icon: bool,
    pub cover: bool,
    pub archived: bool,
    pub parent: bool,
    pub in_trash: bool,
    /// Named properties to delete (applied after `keep`, when both are set).
    pub custom_props: Vec<String>,
}

impl RemoveOptions {
    pub fn is_empty(&self) -> bool {
        !(self.user_ids
            || self.page_timestamps
            || self.url
            || self.public_url
            || self.object_type
            || self.id
            || self.icon
            || self.cover
            || self.archived
            || self.parent
            || self.in_trash)
            && self.custom_props.is_empty()
    }
}

/// Projection policy: what to strip from records and whether to simplify
/// property values and icons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropOptions {
    pub remove: RemoveOptions,
    /// Allow-list: when non-empty, restricts the retained property set to
    /// exactly these names. `remove.custom_props` then deletes from
    /// whatever remains.
    pub keep: Vec<String>,
    /// Projects every property value into its compact
    /// [`SimpleValue`](crate::types::SimpleValue) form.
    pub simplify_props: bool,
    /// Replaces the icon object with a plain image URL (emoji icons are
    /// rendered through a CDN template).
    pub simple_icon: bool,
}

impl PropOptions {
    /// Whether this policy changes query results at all.
    pub fn is_noop(&self) -> bool {
        self.remove.is_empty() && self.keep.is_empty() && !self.simplify_props && !self.simple_icon
    }
}

/// Sort direction for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One sort key: a property name (or id) and a direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    pub property: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// One sort key or a priority-ordered list of them.
///
/// The wire format always takes a list; this normalizes the common
/// single-key case without making callers wrap it themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum SortOrder {
    Single(SortSpec),
    Many(Vec<SortSpec>),
}

impl SortOrder {
    /// Normalizes into the list form the query body expects. Entry order is
    /// priority order.
    pub fn to_list(&self) -> Vec<SortSpec> {
        match self {
            Self::Single(spec) => vec![spec.clone()],
            Self::Many(specs) => specs.clone(),
        }
    }
}

impl From<SortSpec> for SortOrder {
    fn from(spec: SortSpec) -> Self {
        Self::Single(spec)
    }
}

impl From<Vec<SortSpec>> for SortOrder {
    fn from(specs: Vec<SortSpec>) -> Self {
        Self::Many(specs)
    }
}

/// Everything that shapes one query: filtering, ordering, page size,
/// projection policy, and per-call auth overrides.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Pre-built filter expression, forwarded untouched.
    pub filter: Option<serde_json::Value>,
    /// Explicit sort; when absent the iteration engine infers an ascending
    /// sort on the title column.
    pub sort: Option<SortOrder>,
    /// Projection policy applied to every returned batch.
    pub props: PropOptions,
    /// Records per network round-trip; defaults to
    /// [`DEFAULT_BATCH_SIZE`](crate::constants::DEFAULT_BATCH_SIZE).
    pub batch_size: Option<u32>,
    /// Per-call API token override.
    pub token: Option<String>,
    /// Per-call `Notion-Version` override (must look like `YYYY-MM-DD`).
    pub api_version: Option<String>,
}
