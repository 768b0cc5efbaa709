// src/types/ids.rs
//! Strongly typed Notion object identifiers.
//!
//! Every id is a 32-hex-digit token; the API accepts it with or without
//! dashes, and share URLs embed it after the page title. Parsing normalizes
//! all of these into the bare lowercase hex form and fails fast on anything
//! else — no id ever reaches the network unvalidated.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Strong typing for ids with phantom types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for different id kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSourceMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMarker;

/// Identifies a data source (the queryable collection behind a database).
pub type DataSourceId = Id<DataSourceMarker>;

/// Identifies a single page (one row of a data source).
pub type PageId = Id<PageMarker>;

impl<T> Id<T> {
    /// Parse various Notion id formats into a normalized id.
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = normalize_notion_id(input)?;
        Ok(Self {
            value: normalized,
            _phantom: PhantomData,
        })
    }

    /// Get the id as a string reference (bare lowercase hex).
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get the id in hyphenated UUID form for API paths.
    pub fn to_hyphenated(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            &self.value[0..8],
            &self.value[8..12],
            &self.value[12..16],
            &self.value[16..20],
            &self.value[20..32]
        )
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Id::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Normalize various Notion id formats into the bare 32-hex form.
fn normalize_notion_id(input: &str) -> Result<String> {
    let input = input.trim().trim_end_matches('/');

    // UUID format with dashes
    if let Ok(uuid) = Uuid::parse_str(input) {
        return Ok(uuid.as_simple().to_string());
    }

    // Share URLs carry the id after the title slug
    if input.starts_with("http://") || input.starts_with("https://") {
        return extract_id_from_url(input);
    }

    let normalized = input.replace('-', "");

    if normalized.len() != 32 {
        return Err(Error::InvalidId(format!(
            "expected 32 hex characters (dashes optional), got {} from {:?}",
            normalized.len(),
            input
        )));
    }

    if !normalized.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidId(format!(
            "id must contain only hexadecimal characters: {:?}",
            input
        )));
    }

    Ok(normalized.to_lowercase())
}

/// Extract an id from a Notion share URL.
fn extract_id_from_url(url: &str) -> Result<String> {
    lazy_static::lazy_static! {
        static ref ID_REGEX: Regex = Regex::new(
            r"(?:[/-])([a-fA-F0-9]{32}|[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12})(?:[/?#]|$)"
        ).expect("Notion id regex is invalid - this is a bug");
    }

    if let Some(captures) = ID_REGEX.captures(url) {
        if let Some(id_match) = captures.get(1) {
            return Ok(id_match.as_str().replace('-', "").to_lowercase());
        }
    }

    Err(Error::InvalidId(format!("no valid id found in URL: {}", url)))
}
