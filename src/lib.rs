// src/lib.rs
//! notion-rows — record-oriented access to Notion data sources.
//!
//! Wraps the Notion API's cursor pagination in pull-based iterators, and
//! projects its deeply nested property payloads into flat, prompt- and
//! table-friendly values.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `Error`, `ServiceErrorCode`, `Result`
//! - **Configuration** — `ClientConfig`, `ApiToken`
//! - **Identifiers** — `DataSourceId`, `PageId`
//! - **Domain model** — `Record`, `RecordBatch`, `PropertyMap`,
//!   `PropertyValue`, `SimpleValue`, `DataSourceSchema`
//! - **Query policy** — `QueryOptions`, `SortSpec`, `PropOptions`,
//!   `RemoveOptions`
//! - **Iteration** — `DataSource`, `RecordIter`, `RecordChunks`
//! - **API client** — `NotionHttpClient`, `SearchSpec`, `fetch_all_pages`
//!
//! # Example
//!
//! ```no_run
//! use notion_rows::{DataSource, NotionHttpClient, QueryOptions};
//!
//! # async fn demo() -> notion_rows::Result<()> {
//! let client = NotionHttpClient::from_env()?;
//! let source = DataSource::new(client, "550e8400e29b41d4a716446655440000", QueryOptions::default())?;
//!
//! let mut records = source.records();
//! while let Some(record) = records.next().await? {
//!     println!("{}", record.title().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod config;
pub mod constants;
mod error;
mod iter;
mod options;
mod simplify;
mod trim;
mod types;

// --- Error Handling ---
pub use crate::error::{Error, Result, ServiceErrorCode};

// --- Configuration ---
pub use crate::config::{validate_api_version, ApiToken, ClientConfig};

// --- Identifiers ---
pub use crate::types::{DataSourceId, PageId};

// --- Domain Model ---
pub use crate::types::{
    DataSourceSchema, DateValue, FileSource, FileValue, FormulaValue, Icon, IconField,
    PropertyKind, PropertyMap, PropertyValue, Record, RecordBatch, RichTextItem, RollupValue,
    SchemaColumn, SelectOption, SimpleValue, UniqueIdValue, User,
};

// --- Query Policy ---
pub use crate::options::{
    PropOptions, QueryOptions, RemoveOptions, SortDirection, SortOrder, SortSpec,
};

// --- Iteration ---
pub use crate::iter::{DataSource, RecordChunks, RecordIter};

// --- API Client ---
pub use crate::api::{
    fetch_all_pages, DataSourceRepository, MatchKind, NotionHttpClient, PaginationResult,
    SearchSpec,
};

// --- Projection ---
pub use crate::simplify::{icon_url, simplify_record, simplify_value, IconUrl};
pub use crate::trim::{trim_batch, trim_record};
