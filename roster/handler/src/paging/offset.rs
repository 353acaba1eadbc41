//! Offset paging.

use tokio::time::Instant;
use tracing::debug;

use super::{bounded, NextMarker, PageResult};
use crate::common::error::Error;
use crate::database::{Collection, Listable, Query};

/// Fetches `limit` rows of `query` after skipping `offset` of them.
///
/// `query` must already carry its ordering. With `with_total` a second query
/// counts every row matching the same filters.
pub async fn run_offset<C: Collection>(
    collection: &C,
    query: Query,
    limit: u32,
    offset: u64,
    with_total: bool,
    deadline: Instant,
) -> Result<PageResult<C::Entry>, Error> {
    let name = C::Entry::COLLECTION;
    let query = query.limit(limit).offset(offset);
    let items = bounded(deadline, name, collection.fetch(&query)).await?;

    let total = if with_total {
        Some(bounded(deadline, name, collection.count(&query.count_query())).await?)
    } else {
        None
    };

    let count = items.len() as u64;
    debug!(collection = name, offset, count, "fetched offset page");

    Ok(PageResult {
        has_more: count == u64::from(limit),
        next_marker: Some(NextMarker::Offset(offset + count)),
        items,
        total,
    })
}
