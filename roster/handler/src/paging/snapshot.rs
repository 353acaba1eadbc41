//! Snapshot paging: newest first over rows created at or before a fixed
//! instant.
//!
//! Rows are ordered by `(created_at desc, id desc)` and a page continues
//! strictly after the cursor in that order:
//!
//! ```text
//! created_at < cursor.ts OR (created_at = cursor.ts AND id < cursor.id)
//! ```
//!
//! Rows inserted after the snapshot never qualify, so a walk neither repeats
//! nor skips rows while the collection changes underneath it.

use time::OffsetDateTime;
use tokio::time::Instant;
use tracing::debug;

use super::cursor::CursorPayload;
use super::{bounded, last_row_marker, PageResult};
use crate::common::error::Error;
use crate::database::{Collection, Field, Listable, Ordering, Predicate, Query, Value};

/// Fetches up to `limit` rows of `query` as of `snapshot`, following `cursor`.
pub async fn run_snapshot<C: Collection>(
    collection: &C,
    mut query: Query,
    limit: u32,
    snapshot: OffsetDateTime,
    cursor: Option<&CursorPayload>,
    deadline: Instant,
) -> Result<PageResult<C::Entry>, Error> {
    let name = C::Entry::COLLECTION;

    // A cursor minted after the snapshot cannot belong to this walk.
    if let Some(ts) = cursor.and_then(|cursor| cursor.timestamp) {
        if ts > snapshot {
            debug!(collection = name, %ts, %snapshot, "cursor is newer than the snapshot");
            return Ok(PageResult::empty());
        }
    }

    query.ordering.clear();
    query.offset = None;
    query = query.filter(Predicate::Lte(Field::CreatedAt, Value::Timestamp(snapshot)));
    if let Some(cursor) = cursor {
        query = query.filter(continuation(cursor));
    }
    let query = query
        .order_by(Ordering::desc(Field::CreatedAt))
        .order_by(Ordering::desc(Field::Id))
        .limit(limit);

    let items = bounded(deadline, name, collection.fetch(&query)).await?;
    debug!(collection = name, count = items.len(), "fetched snapshot page");

    Ok(PageResult {
        has_more: items.len() as u64 == u64::from(limit),
        next_marker: last_row_marker(&items),
        items,
        total: None,
    })
}

/// Rows strictly after `cursor` in `(created_at desc, id desc)` order. Without
/// a timestamp only the identifier is compared.
fn continuation(cursor: &CursorPayload) -> Predicate {
    let id = Value::Id(cursor.id);
    match cursor.timestamp {
        Some(ts) => Predicate::Or(vec![
            Predicate::Lt(Field::CreatedAt, Value::Timestamp(ts)),
            Predicate::And(vec![
                Predicate::Eq(Field::CreatedAt, Value::Timestamp(ts)),
                Predicate::Lt(Field::Id, id),
            ]),
        ]),
        None => Predicate::Lt(Field::Id, id),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;
    use time::Duration;
    use uuid::Uuid;

    use super::*;
    use crate::database::entries::config_item::ConfigItemEntry;
    use crate::database::in_memory::Table;
    use crate::database::EntityId;
    use crate::paging::NextMarker;

    const T0: OffsetDateTime = datetime!(2024-04-01 00:00 UTC);

    fn item(n: u128, created_at: OffsetDateTime) -> ConfigItemEntry {
        ConfigItemEntry {
            id: Uuid::from_u128(n),
            name: format!("item-{n}"),
            created_at,
            updated_at: created_at,
        }
    }

    fn t(n: i64) -> OffsetDateTime {
        T0 + Duration::seconds(n)
    }

    fn ns(page: &PageResult<ConfigItemEntry>) -> Vec<u128> {
        page.items.iter().map(|item| item.id.as_u128()).collect()
    }

    fn next(page: &PageResult<ConfigItemEntry>) -> CursorPayload {
        match &page.next_marker {
            Some(NextMarker::Cursor(payload)) => payload.clone(),
            other => panic!("unexpected marker: {other:?}"),
        }
    }

    fn later() -> Instant {
        Instant::now() + std::time::Duration::from_secs(5)
    }

    #[tokio::test]
    async fn walk_is_stable_under_inserts() {
        let table = Table::from_entries((1..=5).map(|n| item(n as u128, t(n))).collect());
        let snapshot = t(5) + Duration::milliseconds(1);

        let first = run_snapshot(&table, Query::new(), 2, snapshot, None, later())
            .await
            .unwrap();
        assert_eq!(ns(&first), vec![5, 4]);
        assert!(first.has_more);

        table.insert(item(6, t(6))).await;

        let cursor = next(&first);
        let second = run_snapshot(&table, Query::new(), 2, snapshot, Some(&cursor), later())
            .await
            .unwrap();
        assert_eq!(ns(&second), vec![3, 2]);

        let cursor = next(&second);
        let third = run_snapshot(&table, Query::new(), 2, snapshot, Some(&cursor), later())
            .await
            .unwrap();
        assert_eq!(ns(&third), vec![1]);
        assert!(!third.has_more);
    }

    #[tokio::test]
    async fn equal_timestamps_break_ties_by_identifier() {
        let table = Table::from_entries(vec![
            item(10, t(1)),
            item(11, t(1)),
            item(12, t(1)),
            item(9, t(0)),
        ]);

        let first = run_snapshot(&table, Query::new(), 2, t(10), None, later())
            .await
            .unwrap();
        assert_eq!(ns(&first), vec![12, 11]);

        let cursor = next(&first);
        let second = run_snapshot(&table, Query::new(), 2, t(10), Some(&cursor), later())
            .await
            .unwrap();
        assert_eq!(ns(&second), vec![10, 9]);
    }

    #[tokio::test]
    async fn rows_at_the_snapshot_instant_are_included() {
        let table = Table::from_entries(vec![item(1, t(1)), item(2, t(2)), item(3, t(3))]);

        let page = run_snapshot(&table, Query::new(), 10, t(2), None, later())
            .await
            .unwrap();
        assert_eq!(ns(&page), vec![2, 1]);
    }

    #[tokio::test]
    async fn cursor_newer_than_snapshot_yields_empty_page() {
        let table = Table::from_entries((1..=5).map(|n| item(n as u128, t(n))).collect());
        let cursor = CursorPayload {
            id: EntityId::Uuid(Uuid::from_u128(9)),
            timestamp: Some(t(9)),
        };

        let page = run_snapshot(&table, Query::new(), 2, t(5), Some(&cursor), later())
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_more);
        assert_eq!(page.next_marker, None);
    }

    #[tokio::test]
    async fn cursor_without_timestamp_compares_identifiers() {
        let table = Table::from_entries((1..=5).map(|n| item(n as u128, t(n))).collect());
        let cursor = CursorPayload {
            id: EntityId::Uuid(Uuid::from_u128(4)),
            timestamp: None,
        };

        let page = run_snapshot(&table, Query::new(), 10, t(10), Some(&cursor), later())
            .await
            .unwrap();
        assert_eq!(ns(&page), vec![3, 2, 1]);
    }
}
