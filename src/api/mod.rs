// src/api/mod.rs
//! Notion API interaction — transport, parsing, and the fetch operations.
//!
//! The iteration engine depends on the [`DataSourceRepository`] trait,
//! never on HTTP details; [`NotionHttpClient`] is its production
//! implementation.

pub mod client;
mod pagination;
pub mod parser;
pub mod query;
pub mod retrieve;

use crate::error::Result;
use crate::options::QueryOptions;
use crate::types::{DataSourceId, DataSourceSchema, RecordBatch};

/// The ability to fetch pages of records and schemas from a data source.
///
/// This is the seam between the iteration engine and the network: one
/// bounded query per call, plus the schema lookup that backs sort-key
/// inference. Implementations never retry; failures surface to the caller
/// of the specific operation.
#[async_trait::async_trait]
pub trait DataSourceRepository: Send + Sync {
    /// Performs one bounded query call: at most one page of records,
    /// trimmed and projected per the options' policy, paired with the
    /// service's continuation cursor and has-more flag.
    async fn query_page(
        &self,
        id: &DataSourceId,
        cursor: Option<&str>,
        options: &QueryOptions,
    ) -> Result<RecordBatch>;

    /// Retrieves the data source's schema (used to resolve the title
    /// column for inferred sorts).
    async fn retrieve_schema(&self, id: &DataSourceId) -> Result<DataSourceSchema>;
}

// Re-export the public interface
pub use client::NotionHttpClient;
pub use pagination::{fetch_all_pages, PaginationResult};
pub use query::{MatchKind, SearchSpec};
