// src/api/pagination.rs
//! Cursor-driven fetch-all loop.

use crate::error::Result;
use crate::types::{Record, RecordBatch};

/// Result of draining a paginated query.
#[derive(Debug, Clone)]
pub struct PaginationResult {
    pub items: Vec<Record>,
    pub pages_fetched: u32,
}

/// Fetches every page of a query by following continuation cursors.
///
/// `fetch_fn` performs one bounded fetch from the given cursor; this loop
/// owns the cursor threading and the exhaustion check. `max_pages` bounds
/// the number of round-trips when the caller wants a cap.
pub async fn fetch_all_pages<F, Fut>(
    mut fetch_fn: F,
    max_pages: Option<u32>,
) -> Result<PaginationResult>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<RecordBatch>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages_fetched = 0u32;

    loop {
        if let Some(max) = max_pages {
            if pages_fetched >= max {
                log::debug!("Reached maximum page limit: {}", max);
                break;
            }
        }

        let batch = fetch_fn(cursor.take()).await?;

        let has_more = batch.has_more;
        cursor = batch.next_cursor.clone();
        items.extend(batch.results);
        pages_fetched += 1;

        if !has_more || cursor.is_none() {
            break;
        }
    }

    Ok(PaginationResult {
        items,
        pages_fetched,
    })
}
