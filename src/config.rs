// src/config.rs
//! Client configuration: API token resolution and request defaults.

use crate::error::{Error, Result};
use std::fmt;

/// Environment variable holding the integration token.
const TOKEN_ENV: &str = "NOTION_TOKEN";

/// Deprecated environment variable from older releases.
const LEGACY_TOKEN_ENV: &str = "NOTION_API_KEY";

/// API token for Notion authentication.
///
/// Display and Debug redact the value so tokens never leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wraps a token, rejecting empty input.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::MissingToken);
        }
        Ok(Self(token))
    }

    /// Resolves a token from an explicit option or the environment.
    ///
    /// Resolution order: the explicit value, then `NOTION_TOKEN`, then the
    /// deprecated `NOTION_API_KEY` (with a warning). Fails with
    /// [`Error::MissingToken`] before any network call when none is set.
    pub fn resolve(explicit: Option<&str>) -> Result<Self> {
        if let Some(token) = explicit {
            return Self::new(token);
        }
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            return Self::new(token);
        }
        if let Ok(token) = std::env::var(LEGACY_TOKEN_ENV) {
            log::warn!(
                "The {} environment variable is deprecated; rename it to {}.",
                LEGACY_TOKEN_ENV,
                TOKEN_ENV
            );
            return Self::new(token);
        }
        Err(Error::MissingToken)
    }

    /// The raw token for building an Authorization header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible = self.0.chars().take(10).collect::<String>();
        write!(f, "{}...", visible)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiToken").field(&format!("{}", self)).finish()
    }
}

/// Checks that an API-version override looks like `YYYY-MM-DD`.
///
/// Fails fast with a validation error before any network call; the service
/// would otherwise reject the request with a far less helpful message.
pub fn validate_api_version(version: Option<&str>) -> Result<()> {
    lazy_static::lazy_static! {
        static ref VERSION_RE: regex::Regex =
            regex::Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("version regex is invalid - this is a bug");
    }
    match version {
        Some(v) if !VERSION_RE.is_match(v) => Err(Error::Validation(format!(
            "invalid API version {:?}: expected YYYY-MM-DD",
            v
        ))),
        _ => Ok(()),
    }
}

/// Configuration for constructing a [`crate::api::NotionHttpClient`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Explicit API token; resolved from the environment when absent.
    pub token: Option<String>,
    /// Default `Notion-Version` header; [`crate::constants::NOTION_VERSION`]
    /// when absent.
    pub api_version: Option<String>,
}
