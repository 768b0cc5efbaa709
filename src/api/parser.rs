// src/api/parser.rs
//! Response parsing and error-body mapping.
//!
//! Success bodies deserialize into the typed model; non-2xx bodies carry a
//! structured `{status, code, message, request_id}` payload that maps into
//! the error taxonomy. Rate limiting and rejected credentials get their own
//! variants so callers can dispatch without string matching.

use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{Error, Result, ServiceErrorCode};
use reqwest::{Response, StatusCode};
use serde::Deserialize;

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: StatusCode,
    pub url: String,
}

/// Extracts the response body as text with status and URL metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

/// The structured error body the service returns for non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    status: Option<u16>,
    code: String,
    message: String,
    #[serde(default)]
    request_id: Option<String>,
}

/// Parses any API response: success JSON into `T`, failure bodies into the
/// error taxonomy.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_failure(&result.data, result.status, &result.url))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);

        // Character-based truncation; byte slicing could split a code point.
        let preview: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        let preview = if preview.len() < body.len() {
            format!("{}...", preview)
        } else {
            preview
        };

        Error::MalformedResponse(format!("{} (body: {})", e, preview))
    })
}

fn parse_failure(body: &str, status: StatusCode, url: &str) -> Error {
    if let Ok(parsed) = serde_json::from_str::<ServiceErrorBody>(body) {
        let status_code = parsed.status.unwrap_or_else(|| status.as_u16());

        if status == StatusCode::TOO_MANY_REQUESTS || parsed.code == "rate_limited" {
            return Error::RateLimited {
                message: parsed.message,
            };
        }
        if status == StatusCode::UNAUTHORIZED || parsed.code == "unauthorized" {
            return Error::Unauthorized {
                message: parsed.message,
            };
        }

        return Error::Service {
            status: status_code,
            code: ServiceErrorCode::from_api_response(&parsed.code),
            message: parsed.message,
            request_id: parsed.request_id,
        };
    }

    // Unparseable error body: keep the HTTP status as the code.
    match status {
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimited {
            message: format!("HTTP 429 from {}", url),
        },
        StatusCode::UNAUTHORIZED => Error::Unauthorized {
            message: format!("HTTP 401 from {}", url),
        },
        other => Error::Service {
            status: other.as_u16(),
            code: ServiceErrorCode::from_http_status(other.as_u16()),
            message: format!("HTTP {} from {}", other, url),
            request_id: None,
        },
    }
}
