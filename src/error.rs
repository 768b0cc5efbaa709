// src/error.rs
//! Error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the client. The
//! taxonomy separates "fix your input" (validation), "fix your credentials"
//! (auth), "try later" (rate limit), and "remote problem" (everything else)
//! so callers can dispatch programmatically, not by message text.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"rate_limited"`, the
/// domain vocabulary is encoded in the type system. Each variant tells you
/// exactly what the API reported and enables pattern-based handling without
/// stringly-typed dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceErrorCode {
    /// API rate limit exceeded — back off and retry
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API token is invalid or expired
    Unauthorized,
    /// API token lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed the service's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl ServiceErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error is transient and worth retrying by a caller.
    /// The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError
        )
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound)
    }
}

impl fmt::Display for ServiceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main error type for the client.
#[derive(Error, Debug)]
pub enum Error {
    /// A malformed identifier — raised before any network call.
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    /// A malformed parameter other than an id (API version, enumerated
    /// option) — raised before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No API token resolvable from an explicit option or the environment.
    #[error(
        "Notion API token not found. Pass a token explicitly or set the \
         NOTION_TOKEN environment variable."
    )]
    MissingToken,

    /// The service rejected the credentials (HTTP 401).
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The service throttled the request (HTTP 429). Surfaced immediately;
    /// retry policy belongs to the calling layer.
    #[error("Too many requests: {message}")]
    RateLimited { message: String },

    /// Any other non-2xx response, carrying the structured error body.
    #[error("Notion API returned an error ({status}): {code} - {message}")]
    Service {
        status: u16,
        code: ServiceErrorCode,
        message: String,
        /// Correlation id for support/debugging, when the service sent one.
        request_id: Option<String>,
    },

    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// "Fix your input" — the request never left this process.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidId(_) | Self::Validation(_))
    }

    /// "Fix your credentials" — missing or rejected token.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::MissingToken | Self::Unauthorized { .. })
    }

    /// "Try later" — the service throttled this request.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// The request-correlation id, when the service provided one.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Service { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedResponse(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
