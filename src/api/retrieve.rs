// src/api/retrieve.rs
//! Single-object retrieval: data-source schemas and individual pages.

use super::client::{parse_response, NotionHttpClient, RequestOverrides};
use crate::error::Result;
use crate::options::QueryOptions;
use crate::types::{DataSourceId, DataSourceSchema, PageId, Record};

/// Retrieves a data source's schema: its columns keyed by property name.
///
/// This backs sort-key inference — the iteration engine scans the result
/// for the title-typed column.
pub async fn retrieve_schema(
    client: &NotionHttpClient,
    id: &DataSourceId,
) -> Result<DataSourceSchema> {
    let endpoint = format!("data_sources/{}", id.to_hyphenated());
    let response = client.get(&endpoint, RequestOverrides::default()).await?;
    parse_response(response).await
}

/// Retrieves one page (a single record) by id.
///
/// The options' trim policy applies directly to the record — the
/// single-record counterpart of batch trimming — followed by
/// simplification when the policy asks for it.
pub async fn retrieve_page(
    client: &NotionHttpClient,
    id: &PageId,
    options: &QueryOptions,
) -> Result<Record> {
    crate::config::validate_api_version(options.api_version.as_deref())?;

    let endpoint = format!("pages/{}", id.to_hyphenated());
    let response = client
        .get(&endpoint, RequestOverrides::from(options))
        .await?;

    let mut record: Record = parse_response(response).await?;
    let policy = &options.props;
    if !policy.remove.is_empty() || !policy.keep.is_empty() {
        crate::trim::trim_record(&mut record, policy);
    }
    if policy.simplify_props || policy.simple_icon {
        crate::simplify::simplify_record(&mut record, policy);
    }
    Ok(record)
}
