// src/iter.rs
//! The iteration engine: pull-based consumption of a paginated query.
//!
//! The API speaks batch-fetch/cursor-advance; consumers want "give me the
//! next record" or "give me the next N records". A [`DataSource`] owns the
//! query policy and a memoized title-column lookup; its iterators own the
//! cursor state and a lookahead buffer, reshaping whole fetched pages into
//! the caller's yield granularity.
//!
//! Pulls on one iterator must be sequential; `next` taking `&mut self`
//! makes overlapping pulls unrepresentable. Abandoning an iterator
//! mid-stream is always safe — no background work is ever in flight.

use crate::api::DataSourceRepository;
use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_YIELD_SIZE};
use crate::error::Result;
use crate::options::{QueryOptions, SortSpec};
use crate::types::{DataSourceId, DataSourceSchema, Record};
use once_cell::sync::OnceCell;
use std::collections::VecDeque;

/// A handle to one queryable data source: a validated id, the query
/// policy, and the repository that performs fetches.
///
/// The id is validated at construction, before any network call. The
/// policy is owned immutably for the handle's lifetime; every iterator
/// created from the handle shares it. Handles over the same remote data
/// source are fully independent — no cursors or buffers are shared.
#[derive(Debug)]
pub struct DataSource<R> {
    id: DataSourceId,
    options: QueryOptions,
    repo: R,
    /// Memoized title-column id; `None` inside means the schema was
    /// fetched and has no title column.
    primary: OnceCell<Option<String>>,
}

impl<R: DataSourceRepository> DataSource<R> {
    /// Creates a handle, failing fast on a malformed data-source id.
    pub fn new(repo: R, id: &str, options: QueryOptions) -> Result<Self> {
        let id = DataSourceId::parse(id)?;
        Ok(Self {
            id,
            options,
            repo,
            primary: OnceCell::new(),
        })
    }

    pub fn id(&self) -> &DataSourceId {
        &self.id
    }

    /// The underlying repository (usually the HTTP client).
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Retrieves the data source's schema (uncached).
    pub async fn schema(&self) -> Result<DataSourceSchema> {
        self.repo.retrieve_schema(&self.id).await
    }

    /// Resolves the id of the title-typed column, fetching the schema at
    /// most once for the handle's lifetime.
    ///
    /// A schema fetch failure propagates and is not cached, so a later
    /// call may succeed.
    pub async fn primary_property(&self) -> Result<Option<String>> {
        if let Some(cached) = self.primary.get() {
            return Ok(cached.clone());
        }
        let schema = self.repo.retrieve_schema(&self.id).await?;
        let primary = schema.title_column_id().map(str::to_string);
        if primary.is_none() {
            // Known ordering weakness: without a title column and without
            // an explicit sort, pagination order is the service's implicit
            // order, which it does not guarantee stable.
            log::warn!(
                "Data source {} has no title column; unsorted queries use the service's implicit order",
                self.id
            );
        }
        Ok(self.primary.get_or_init(|| primary).clone())
    }

    /// An iterator yielding one record per pull.
    pub fn records(&self) -> RecordIter<'_, R> {
        RecordIter {
            source: self,
            state: SequenceState::new(),
        }
    }

    /// An iterator yielding `size` records per pull (the final non-empty
    /// yield may be shorter). A `size` of zero is treated as one.
    pub fn chunks(&self, size: usize) -> RecordChunks<'_, R> {
        RecordChunks {
            source: self,
            state: SequenceState::new(),
            size: size.max(1),
        }
    }

    /// Drains the whole sequence into one vector via repeated pulls.
    pub async fn collect_all(&self) -> Result<Vec<Record>> {
        let mut chunks = self.chunks(DEFAULT_BATCH_SIZE as usize);
        let mut all = Vec::new();
        while let Some(batch) = chunks.next().await? {
            all.extend(batch);
        }
        Ok(all)
    }

    /// The options actually sent on a fetch: the caller's, plus an
    /// inferred ascending sort on the title column when no sort was given.
    ///
    /// Without some sort, the service's cursor pagination can skip or
    /// duplicate records across pages; injecting the title column keeps
    /// two drains of an unmodified data source in the same order.
    async fn effective_options(&self) -> Result<QueryOptions> {
        let mut options = self.options.clone();
        if options.sort.is_none() {
            if let Some(primary) = self.primary_property().await? {
                options.sort = Some(SortSpec::ascending(primary).into());
            }
        }
        Ok(options)
    }

    /// Tops up an iterator's buffer with at most one fetch.
    ///
    /// Issues a fetch only when the buffer is under `want` and the
    /// sequence is not exhausted — and never more than one per pull; a
    /// buffer still under `want` afterwards is served as a short yield.
    /// On a fetch failure the state is left untouched, so the same pull
    /// can be retried.
    async fn refill(&self, state: &mut SequenceState, want: usize) -> Result<()> {
        if state.buffer.len() >= want || !state.more_to_fetch {
            return Ok(());
        }

        let cursor = match &state.cursor {
            Cursor::Start => None,
            Cursor::Next(token) => Some(token.as_str()),
            Cursor::End => {
                state.more_to_fetch = false;
                return Ok(());
            }
        };

        let options = self.effective_options().await?;
        let batch = self.repo.query_page(&self.id, cursor, &options).await?;

        state.buffer.extend(batch.results);
        state.cursor = match batch.next_cursor {
            Some(token) => Cursor::Next(token),
            None => Cursor::End,
        };
        if !batch.has_more {
            state.more_to_fetch = false;
        }
        Ok(())
    }
}

/// Continuation position within a paginated query.
///
/// Cursor tokens are opaque and owned by the service; this only stores and
/// forwards them.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    /// No fetch has happened yet.
    Start,
    /// The token to resume from.
    Next(String),
    /// The service reported no further page.
    End,
}

/// Mutable per-iterator state: cursor position plus the lookahead buffer.
#[derive(Debug)]
struct SequenceState {
    cursor: Cursor,
    more_to_fetch: bool,
    buffer: VecDeque<Record>,
}

impl SequenceState {
    fn new() -> Self {
        Self {
            cursor: Cursor::Start,
            more_to_fetch: true,
            buffer: VecDeque::new(),
        }
    }
}

/// Yields records one at a time, in arrival order.
///
/// `Ok(None)` signals exhaustion and is terminal: every subsequent pull
/// also returns `Ok(None)`. A pull that fails leaves the iterator where it
/// was, so the caller may retry it.
pub struct RecordIter<'a, R> {
    source: &'a DataSource<R>,
    state: SequenceState,
}

impl<'a, R: DataSourceRepository> RecordIter<'a, R> {
    pub async fn next(&mut self) -> Result<Option<Record>> {
        self.source
            .refill(&mut self.state, DEFAULT_YIELD_SIZE)
            .await?;
        Ok(self.state.buffer.pop_front())
    }

    /// Adapts the iterator into a [`futures::Stream`] of records.
    ///
    /// An error element does not end the stream; the pull that produced it
    /// left the cursor untouched, so the next element is its retry.
    pub fn into_stream(self) -> impl futures::Stream<Item = Result<Record>> + 'a {
        futures::stream::unfold(self, |mut iter| async move {
            match iter.next().await {
                Ok(Some(record)) => Some((Ok(record), iter)),
                Ok(None) => None,
                Err(err) => Some((Err(err), iter)),
            }
        })
    }
}

/// Yields fixed-size batches of records per pull.
///
/// Every yield has exactly `size` elements while the backing fetches keep
/// the buffer full; only the final non-empty yield may be shorter.
/// Exhaustion (`Ok(None)`) is terminal, as with [`RecordIter`].
pub struct RecordChunks<'a, R> {
    source: &'a DataSource<R>,
    state: SequenceState,
    size: usize,
}

impl<R: DataSourceRepository> RecordChunks<'_, R> {
    pub async fn next(&mut self) -> Result<Option<Vec<Record>>> {
        self.source.refill(&mut self.state, self.size).await?;
        if self.state.buffer.is_empty() {
            return Ok(None);
        }
        let take = self.size.min(self.state.buffer.len());
        Ok(Some(self.state.buffer.drain(..take).collect()))
    }
}
