// src/constants.rs
//! Domain constants that define the operational boundaries of the client.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! these should tell you how the client talks to the API: which endpoint
//! family, which protocol version, and how much it fetches per round-trip.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Base URL for all Notion API requests.
pub const API_BASE_URL: &str = "https://api.notion.com/v1";

/// The Notion API version sent in the `Notion-Version` header.
///
/// The data-source endpoints (`data_sources/{id}/query` etc.) belong to the
/// 2025 protocol generation; callers can override per request.
pub const NOTION_VERSION: &str = "2025-09-03";

/// How many records one query round-trip asks for when the caller does not
/// choose a batch size.
///
/// The Notion API maximum is 100. Using the maximum minimizes round-trips
/// while draining a data source.
pub const DEFAULT_BATCH_SIZE: u32 = 100;

/// How many records an iterator yields per pull when no yield size is given.
pub const DEFAULT_YIELD_SIZE: usize = 1;

// ---------------------------------------------------------------------------
// Icon simplification
// ---------------------------------------------------------------------------

/// CDN template for rendering an emoji icon as an image URL.
///
/// The `{hex}` placeholder is replaced with the hex-encoded code points of
/// the emoji grapheme.
pub const TWEMOJI_URL_TEMPLATE: &str =
    "https://cdn.jsdelivr.net/gh/twitter/twemoji@14.0.2/assets/72x72/{hex}.png";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
