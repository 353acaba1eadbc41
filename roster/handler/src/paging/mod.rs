//! The paging engine.
//!
//! A request goes through [`params::parse_paging`], which validates the raw
//! parameters and picks one [`Mode`]; [`list_page`] then runs the matching
//! strategy against a [`Collection`] and [`meta::build_meta`] describes the
//! resulting page to the client.
//!
//! - **Offset** ([`offset::run_offset`]): any whitelisted ordering, `offset`
//!   rows skipped. Rows inserted or deleted between requests shift pages.
//! - **Keyset** ([`keyset::run_keyset`]): identifier ascending, continuing
//!   strictly after the cursor. Forward only, unaffected by concurrent writes.
//! - **Snapshot** ([`snapshot::run_snapshot`]): newest first, restricted to
//!   rows created at or before a fixed instant, so the walk sees a stable view.

use std::future::Future;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::time::Instant;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::common::error::Error;
use crate::config::PagingConfig;
use crate::database::{Collection, Listable, Query};

pub mod cursor;
pub mod keyset;
pub mod meta;
pub mod offset;
pub mod params;
pub mod snapshot;
pub mod sort;

use cursor::CursorPayload;
use meta::PageMeta;
use params::PagingRequest;

/// Paging mode resolved for one request.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Mode {
    /// Offset and limit.
    #[serde(rename = "offset")]
    Offset,
    /// Identifier ordered cursor walk.
    #[serde(rename = "cursor")]
    Keyset,
    /// Cursor walk over a frozen view.
    #[serde(rename = "snapshot")]
    Snapshot,
}

impl Mode {
    /// Wire name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Offset => "offset",
            Mode::Keyset => "cursor",
            Mode::Snapshot => "snapshot",
        }
    }
}

/// Where the next page starts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NextMarker {
    /// Offset of the next page.
    Offset(u64),
    /// Position of the last returned row.
    Cursor(CursorPayload),
}

/// One page of entries.
#[derive(Clone, Debug, PartialEq)]
pub struct PageResult<E> {
    /// Returned entries, in page order.
    pub items: Vec<E>,
    /// Where the next page starts, when known.
    pub next_marker: Option<NextMarker>,
    /// Whether the page was full, meaning more rows may follow.
    pub has_more: bool,
    /// Number of rows matching the filters, when requested.
    pub total: Option<u64>,
}

impl<E> PageResult<E> {
    /// A page with no rows and nothing after it.
    pub fn empty() -> Self {
        PageResult {
            items: Vec::new(),
            next_marker: None,
            has_more: false,
            total: None,
        }
    }
}

/// Cursor marker for the last row of `items`.
fn last_row_marker<E: Listable>(items: &[E]) -> Option<NextMarker> {
    items.last().map(|last| {
        NextMarker::Cursor(CursorPayload {
            id: last.id(),
            timestamp: Some(last.created_at()),
        })
    })
}

/// Deadline for the queries of a request starting now.
pub fn deadline(config: &PagingConfig) -> Instant {
    Instant::now() + config.query_timeout
}

/// Awaits a store call, giving up at `deadline`.
pub(crate) async fn bounded<T, E, F>(
    deadline: Instant,
    collection: &'static str,
    call: F,
) -> Result<T, Error>
where
    F: Future<Output = Result<T, E>>,
    E: std::error::Error,
{
    match tokio::time::timeout_at(deadline, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            error!(error = %err, collection, "store query failed");
            Err(Error::Storage(err.to_string()))
        }
        Err(_) => {
            warn!(collection, "query deadline elapsed");
            Err(Error::RequestTimeout)
        }
    }
}

/// Runs one page of a listing: applies the paging mode to `base_query` (which
/// carries only the caller's filters), queries `collection` and describes the
/// outcome.
pub async fn list_page<C: Collection>(
    collection: &C,
    base_query: Query,
    request: &PagingRequest,
    mode: Mode,
    config: &PagingConfig,
) -> Result<(PageResult<C::Entry>, PageMeta), Error> {
    let deadline = deadline(config);

    if let Some(cursor) = &request.cursor {
        if cursor.payload.id.kind() != C::Entry::ID_KIND {
            let raw = cursor.payload.id.to_string();
            warn!(
                collection = C::Entry::COLLECTION,
                cursor = %raw,
                "cursor identifier does not match the collection"
            );
            return Err(Error::InvalidCursor(raw));
        }
    }

    let page = match mode {
        Mode::Offset => {
            let query = sort::apply_sort::<C::Entry>(base_query, request.sort.as_ref())?;
            offset::run_offset(
                collection,
                query,
                request.limit,
                request.offset,
                request.with_total,
                deadline,
            )
            .await?
        }
        Mode::Keyset => {
            let cursor = request.cursor.as_ref().map(|cursor| &cursor.payload);
            keyset::run_keyset(collection, base_query, request.limit, cursor, deadline).await?
        }
        Mode::Snapshot => {
            let snapshot = request
                .snapshot
                .unwrap_or_else(OffsetDateTime::now_utc);
            let cursor = request.cursor.as_ref().map(|cursor| &cursor.payload);
            snapshot::run_snapshot(collection, base_query, request.limit, snapshot, cursor, deadline)
                .await?
        }
    };

    let meta = meta::build_meta(&page, mode, request)?;
    Ok((page, meta))
}
