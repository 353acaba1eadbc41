//! In-memory store implementation - useful for tests and local runs.

use std::cmp::Ordering as CmpOrdering;
use std::convert::Infallible;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::entries::account::AccountEntry;
use super::entries::config_item::ConfigItemEntry;
use super::entries::group::GroupEntry;
use super::entries::project::ProjectEntry;
use super::{Collection, Listable, Ordering, Predicate, Query, Value};
use crate::paging::sort::SortDirection;

/// A single collection held in memory. Clones share the same rows.
#[derive(Debug)]
pub struct Table<E> {
    rows: Arc<RwLock<Vec<E>>>,
}

impl<E> Clone for Table<E> {
    fn clone(&self) -> Self {
        Table { rows: Arc::clone(&self.rows) }
    }
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Table { rows: Arc::new(RwLock::new(Vec::new())) }
    }
}

impl<E: Listable> Table<E> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table holding `entries`.
    pub fn from_entries(entries: Vec<E>) -> Self {
        Table { rows: Arc::new(RwLock::new(entries)) }
    }

    /// Adds an entry.
    pub async fn insert(&self, entry: E) {
        self.rows.write().await.push(entry);
    }

    /// Adds several entries.
    pub async fn extend(&self, entries: impl IntoIterator<Item = E>) {
        self.rows.write().await.extend(entries);
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether the table is empty.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl<E: Listable> Collection for Table<E> {
    type Entry = E;
    type Error = Infallible;

    async fn fetch(&self, query: &Query) -> Result<Vec<E>, Infallible> {
        let rows = self.rows.read().await;
        let mut matching: Vec<E> = rows
            .iter()
            .filter(|entry| query.filters.iter().all(|p| matches(*entry, p)))
            .cloned()
            .collect();
        drop(rows);

        matching.sort_by(|a, b| compare_entries(a, b, &query.ordering));

        let offset = query.offset.unwrap_or(0) as usize;
        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self, query: &Query) -> Result<u64, Infallible> {
        let rows = self.rows.read().await;
        let count = rows
            .iter()
            .filter(|entry| query.filters.iter().all(|p| matches(*entry, p)))
            .count();
        Ok(count as u64)
    }
}

/// Whether `entry` satisfies `predicate`. A comparison against a missing or
/// incomparable value never holds.
fn matches<E: Listable>(entry: &E, predicate: &Predicate) -> bool {
    let compare = |field, value: &Value| {
        entry
            .value(field)
            .and_then(|actual| actual.compare(value))
    };
    match predicate {
        Predicate::Eq(field, value) => compare(*field, value) == Some(CmpOrdering::Equal),
        Predicate::Lt(field, value) => compare(*field, value) == Some(CmpOrdering::Less),
        Predicate::Gt(field, value) => compare(*field, value) == Some(CmpOrdering::Greater),
        Predicate::Lte(field, value) => matches!(
            compare(*field, value),
            Some(CmpOrdering::Less | CmpOrdering::Equal)
        ),
        Predicate::Contains(field, needle) => match entry.value(*field) {
            Some(Value::Text(text)) => text.to_lowercase().contains(&needle.to_lowercase()),
            _ => false,
        },
        Predicate::And(inner) => inner.iter().all(|p| matches(entry, p)),
        Predicate::Or(inner) => inner.iter().any(|p| matches(entry, p)),
    }
}

/// Orders two entries by `ordering`. Missing values sort before present ones
/// when ascending.
fn compare_entries<E: Listable>(a: &E, b: &E, ordering: &[Ordering]) -> CmpOrdering {
    for key in ordering {
        let order = match (a.value(key.field), b.value(key.field)) {
            (Some(x), Some(y)) => x.compare(&y).unwrap_or(CmpOrdering::Equal),
            (None, Some(_)) => CmpOrdering::Less,
            (Some(_), None) => CmpOrdering::Greater,
            (None, None) => CmpOrdering::Equal,
        };
        let order = match key.direction {
            SortDirection::Asc => order,
            SortDirection::Desc => order.reverse(),
        };
        if order != CmpOrdering::Equal {
            return order;
        }
    }
    CmpOrdering::Equal
}

/// Every collection the API lists.
#[derive(Clone, Debug, Default)]
pub struct Store {
    /// Accounts.
    pub accounts: Table<AccountEntry>,
    /// Config items.
    pub config_items: Table<ConfigItemEntry>,
    /// Projects.
    pub projects: Table<ProjectEntry>,
    /// Groups.
    pub groups: Table<GroupEntry>,
}

#[cfg(feature = "testing")]
impl Store {
    /// Fills every collection with `count` fake entries created over the
    /// last thirty days.
    pub async fn populate(&self, count: usize) {
        use fake::faker::company::en::{Buzzword, CompanyName};
        use fake::faker::internet::en::{SafeEmail, Username};
        use fake::faker::name::en::Name;
        use fake::Fake;
        use rand::Rng;
        use time::{Duration, OffsetDateTime};
        use uuid::Uuid;

        let now = OffsetDateTime::now_utc();
        let mut rng = rand::thread_rng();
        let created = |rng: &mut rand::rngs::ThreadRng| {
            now - Duration::seconds(rng.gen_range(0..30 * 24 * 60 * 60))
        };

        for _ in 0..count {
            let created_at = created(&mut rng);
            self.accounts
                .insert(AccountEntry {
                    id: Uuid::new_v4(),
                    username: Username().fake_with_rng(&mut rng),
                    display_name: Some(Name().fake_with_rng(&mut rng)),
                    email: Some(SafeEmail().fake_with_rng(&mut rng)),
                    is_active: true,
                    created_at,
                    updated_at: created_at,
                })
                .await;

            let created_at = created(&mut rng);
            self.config_items
                .insert(ConfigItemEntry {
                    id: Uuid::new_v4(),
                    name: Buzzword().fake_with_rng(&mut rng),
                    created_at,
                    updated_at: created_at,
                })
                .await;

            let created_at = created(&mut rng);
            let name: String = CompanyName().fake_with_rng(&mut rng);
            self.projects
                .insert(ProjectEntry {
                    id: Uuid::new_v4(),
                    url: format!("https://{}.example.com", name.to_lowercase().replace(' ', "-")),
                    name,
                    description: None,
                    created_at,
                    updated_at: created_at,
                })
                .await;
        }

        let start = self.groups.len().await as i64;
        for serial in 1..=count as i64 {
            let created_at = created(&mut rng);
            self.groups
                .insert(GroupEntry {
                    id: start + serial,
                    name: Some(Buzzword().fake_with_rng(&mut rng)),
                    created_at,
                })
                .await;
        }
    }
}
