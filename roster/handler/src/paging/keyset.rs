//! Keyset paging: identifier ascending, strictly after the cursor.

use tokio::time::Instant;
use tracing::debug;

use super::cursor::CursorPayload;
use super::{bounded, last_row_marker, PageResult};
use crate::common::error::Error;
use crate::database::{Collection, Field, Listable, Ordering, Predicate, Query, Value};

/// Fetches up to `limit` rows of `query` whose identifier follows `cursor`.
///
/// Any ordering already on `query` is replaced; the walk is always by
/// identifier so the next cursor is taken with the same comparator the page
/// was fetched with.
pub async fn run_keyset<C: Collection>(
    collection: &C,
    mut query: Query,
    limit: u32,
    cursor: Option<&CursorPayload>,
    deadline: Instant,
) -> Result<PageResult<C::Entry>, Error> {
    query.ordering.clear();
    query.offset = None;

    if let Some(cursor) = cursor {
        query = query.filter(Predicate::Gt(Field::Id, Value::Id(cursor.id)));
    }
    let query = query.order_by(Ordering::asc(Field::Id)).limit(limit);

    let items = bounded(deadline, C::Entry::COLLECTION, collection.fetch(&query)).await?;
    debug!(
        collection = C::Entry::COLLECTION,
        count = items.len(),
        "fetched keyset page"
    );

    Ok(PageResult {
        has_more: items.len() as u64 == u64::from(limit),
        next_marker: last_row_marker(&items),
        items,
        total: None,
    })
}
