// src/api/client.rs
//! HTTP client wrapper for the Notion API.
//!
//! A thin wrapper around reqwest handling authentication headers and
//! request/response plumbing, with per-call token and version overrides.
//! No parsing or business logic lives here.

use super::parser::extract_response_text;
use crate::config::{ApiToken, ClientConfig};
use crate::constants::{API_BASE_URL, NOTION_VERSION};
use crate::error::{Error, Result};
use crate::options::QueryOptions;
use crate::types::{DataSourceId, DataSourceSchema, PageId, Record, RecordBatch};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::Serialize;

/// Per-request overrides for authentication and protocol version.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RequestOverrides<'a> {
    pub token: Option<&'a str>,
    pub api_version: Option<&'a str>,
}

impl<'a> From<&'a QueryOptions> for RequestOverrides<'a> {
    fn from(options: &'a QueryOptions) -> Self {
        Self {
            token: options.token.as_deref(),
            api_version: options.api_version.as_deref(),
        }
    }
}

/// A thin wrapper around reqwest for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
}

impl NotionHttpClient {
    /// Creates a client from explicit configuration, resolving the token
    /// from the environment when none is given.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let token = ApiToken::resolve(config.token.as_deref())?;
        crate::config::validate_api_version(config.api_version.as_deref())?;
        let version = config
            .api_version
            .unwrap_or_else(|| NOTION_VERSION.to_string());

        let client = Client::builder()
            .default_headers(Self::create_headers(&token, &version)?)
            .build()?;
        Ok(Self { client })
    }

    /// Creates a client from the environment (`NOTION_TOKEN`).
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Default headers carried on every request.
    fn create_headers(token: &ApiToken, version: &str) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", token.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header)
                .map_err(|e| Error::Validation(format!("invalid API token format: {}", e)))?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_str(version)
                .map_err(|e| Error::Validation(format!("invalid API version: {}", e)))?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn apply_overrides(
        builder: RequestBuilder,
        overrides: RequestOverrides<'_>,
    ) -> RequestBuilder {
        let builder = match overrides.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        match overrides.api_version {
            Some(version) => builder.header("Notion-Version", version),
            None => builder,
        }
    }

    /// Makes a GET request to the given endpoint path.
    pub(crate) async fn get(
        &self,
        endpoint: &str,
        overrides: RequestOverrides<'_>,
    ) -> Result<Response> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("GET {}", url);
        let builder = Self::apply_overrides(self.client.get(url), overrides);
        Ok(builder.send().await?)
    }

    /// Makes a POST request with a JSON body to the given endpoint path.
    pub(crate) async fn post<T: Serialize>(
        &self,
        endpoint: &str,
        body: &T,
        overrides: RequestOverrides<'_>,
    ) -> Result<Response> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("POST {}", url);
        let builder = Self::apply_overrides(self.client.post(url), overrides).json(body);
        Ok(builder.send().await?)
    }

    /// Retrieves a single page (one record) by id, applying the options'
    /// trim policy to the result.
    pub async fn retrieve_page(&self, id: &PageId, options: &QueryOptions) -> Result<Record> {
        super::retrieve::retrieve_page(self, id, options).await
    }

    /// Retrieves a data source's schema.
    pub async fn retrieve_data_source(&self, id: &DataSourceId) -> Result<DataSourceSchema> {
        super::retrieve::retrieve_schema(self, id).await
    }

    /// Queries a data source for records matching a rich-text search.
    pub async fn search(
        &self,
        id: &DataSourceId,
        search: &super::SearchSpec,
        options: &QueryOptions,
    ) -> Result<RecordBatch> {
        super::query::search(self, id, search, options).await
    }

    /// Drains every page of a query into one vector.
    ///
    /// Stateless convenience over [`fetch_all_pages`](super::fetch_all_pages);
    /// use [`crate::DataSource`] when you need incremental consumption or
    /// inferred ordering.
    pub async fn query_all(
        &self,
        id: &DataSourceId,
        options: &QueryOptions,
    ) -> Result<Vec<Record>> {
        let result = super::pagination::fetch_all_pages(
            |cursor| async move {
                super::query::query_page(self, id, cursor.as_deref(), options).await
            },
            None,
        )
        .await?;
        Ok(result.items)
    }
}

#[async_trait::async_trait]
impl super::DataSourceRepository for NotionHttpClient {
    async fn query_page(
        &self,
        id: &DataSourceId,
        cursor: Option<&str>,
        options: &QueryOptions,
    ) -> Result<RecordBatch> {
        super::query::query_page(self, id, cursor, options).await
    }

    async fn retrieve_schema(&self, id: &DataSourceId) -> Result<DataSourceSchema> {
        super::retrieve::retrieve_schema(self, id).await
    }
}

/// Extracts a response's body and metadata, then parses it.
pub(crate) async fn parse_response<T>(response: Response) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let result = extract_response_text(response).await?;
    super::parser::parse_api_response(result)
}
