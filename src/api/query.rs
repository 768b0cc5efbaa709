// src/api/query.rs
//! Querying a data source: one bounded fetch per call.
//!
//! This is the fetch side of pagination. Each call performs exactly one
//! network round-trip, maps failures into the error taxonomy, runs the
//! returned batch through the trim/simplify pipeline, and hands back the
//! continuation cursor untouched. Ordering is whatever sort the caller (or
//! the iteration engine) supplied — cursor determinism across pages is the
//! sort's responsibility, not this module's.

use super::client::{parse_response, NotionHttpClient, RequestOverrides};
use crate::constants::DEFAULT_BATCH_SIZE;
use crate::error::Result;
use crate::options::{QueryOptions, SortSpec};
use crate::simplify::process_batch;
use crate::types::{DataSourceId, RecordBatch};
use serde::Serialize;

/// The JSON body of a query request.
#[derive(Debug, Serialize)]
struct QueryBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sorts: Option<Vec<SortSpec>>,
    page_size: u32,
}

/// Fetches one page of records from a data source.
///
/// Validates inputs before any network call, forwards the opaque filter
/// and cursor, normalizes the sort into list form, and applies the
/// options' projection policy to the returned batch. Never retries.
pub async fn query_page(
    client: &NotionHttpClient,
    id: &DataSourceId,
    cursor: Option<&str>,
    options: &QueryOptions,
) -> Result<RecordBatch> {
    crate::config::validate_api_version(options.api_version.as_deref())?;

    let body = QueryBody {
        start_cursor: cursor,
        filter: options.filter.as_ref(),
        sorts: options.sort.as_ref().map(|sort| sort.to_list()),
        page_size: options.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
    };

    let endpoint = format!("data_sources/{}/query", id.to_hyphenated());
    let response = client
        .post(&endpoint, &body, RequestOverrides::from(options))
        .await?;

    let mut batch: RecordBatch = parse_response(response).await?;
    process_batch(&mut batch, &options.props);
    Ok(batch)
}

/// How a search query matches the target property's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
    NotEquals,
    NotContains,
}

impl MatchKind {
    /// The filter-condition token the API expects.
    fn as_api_condition(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::Contains => "contains",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::NotEquals => "does_not_equal",
            Self::NotContains => "does_not_contain",
        }
    }
}

/// A rich-text search against one property of a data source.
#[derive(Debug, Clone)]
pub struct SearchSpec {
    /// The value to search for.
    pub query: String,
    /// The property to search in; defaults to `"Name"`.
    pub property: Option<String>,
    pub match_kind: MatchKind,
}

impl SearchSpec {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            property: None,
            match_kind: MatchKind::Equals,
        }
    }

    pub fn in_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    pub fn matching(mut self, kind: MatchKind) -> Self {
        self.match_kind = kind;
        self
    }
}

/// Queries a data source with a rich-text match filter built from `search`.
///
/// Results run through the same trim/simplify pipeline as a plain query.
pub async fn search(
    client: &NotionHttpClient,
    id: &DataSourceId,
    search: &SearchSpec,
    options: &QueryOptions,
) -> Result<RecordBatch> {
    crate::config::validate_api_version(options.api_version.as_deref())?;

    let mut condition = serde_json::Map::new();
    condition.insert(
        search.match_kind.as_api_condition().to_string(),
        serde_json::Value::String(search.query.clone()),
    );
    let filter = serde_json::json!({
        "property": search.property.as_deref().unwrap_or("Name"),
        "rich_text": condition,
    });

    let body = QueryBody {
        start_cursor: None,
        filter: Some(&filter),
        sorts: None,
        page_size: options.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
    };

    let endpoint = format!("data_sources/{}/query", id.to_hyphenated());
    let response = client
        .post(&endpoint, &body, RequestOverrides::from(options))
        .await?;

    let mut batch: RecordBatch = parse_response(response).await?;
    process_batch(&mut batch, &options.props);
    Ok(batch)
}
