//! This module defines the interface between the paging engine and whatever
//! stores the listed collections.
//!
//! ## Module Overview
//!
//! - **Query model**: [`Query`], [`Predicate`], [`Ordering`] and [`Value`] describe a
//!   read against an ordered, filterable collection without committing to a
//!   storage technology.
//! - **Traits**:
//!   - [`Listable`]: implemented by every entry type; supplies the collection name,
//!     the sort whitelist, the identifier and creation time accessors, and the
//!     per-field values the store compares against.
//!   - [`Collection`]: the capability a store exposes for one entry type: fetch the
//!     rows matching a query and count them.
//! - **Implementations**:
//!   - [`in_memory::Table`]: a vector behind a tokio lock, used by the local server
//!     and the tests.

use std::cmp::Ordering as CmpOrdering;
use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::paging::sort::SortDirection;

/// Table entries.
pub mod entries;
/// In-memory store.
pub mod in_memory;

// Identifiers
// -----------------------------------------------------------------------------

/// A comparable entity identifier.
///
/// Older collections use sequential integers while newer ones use UUIDs; both
/// share the same paging code paths and are told apart when a cursor is decoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum EntityId {
    /// Legacy sequential identifier.
    Serial(i64),
    /// Random UUID identifier.
    Uuid(Uuid),
}

/// The identifier variant a collection uses.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IdKind {
    /// [`EntityId::Serial`].
    Serial,
    /// [`EntityId::Uuid`].
    Uuid,
}

impl EntityId {
    /// Returns the variant of this identifier.
    pub fn kind(&self) -> IdKind {
        match self {
            EntityId::Serial(_) => IdKind::Serial,
            EntityId::Uuid(_) => IdKind::Uuid,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Serial(id) => write!(f, "{id}"),
            EntityId::Uuid(id) => write!(f, "{}", id.hyphenated()),
        }
    }
}

impl From<Uuid> for EntityId {
    fn from(value: Uuid) -> Self {
        EntityId::Uuid(value)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        EntityId::Serial(value)
    }
}

// Query model
// -----------------------------------------------------------------------------

/// Fields any listed entry may expose. Which of them an entry actually carries,
/// and which of them are sortable, is up to its [`Listable`] implementation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Field {
    /// Identifier.
    Id,
    /// Creation time.
    CreatedAt,
    /// Last update time.
    UpdatedAt,
    /// Unique login name.
    Username,
    /// Human readable name of an account.
    DisplayName,
    /// Contact email.
    Email,
    /// Name of a config item, project or group.
    Name,
    /// Project url.
    Url,
}

impl Field {
    /// Wire and column name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::CreatedAt => "created_at",
            Field::UpdatedAt => "updated_at",
            Field::Username => "username",
            Field::DisplayName => "display_name",
            Field::Email => "email",
            Field::Name => "name",
            Field::Url => "url",
        }
    }
}

/// A comparable field value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    /// An identifier.
    Id(EntityId),
    /// An instant.
    Timestamp(OffsetDateTime),
    /// A piece of text.
    Text(String),
}

impl Value {
    /// Compares two values of the same kind; values of different kinds are
    /// not comparable.
    pub fn compare(&self, other: &Value) -> Option<CmpOrdering> {
        match (self, other) {
            (Value::Id(a), Value::Id(b)) => Some(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// A boolean condition over the fields of an entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// `field = value`
    Eq(Field, Value),
    /// `field < value`
    Lt(Field, Value),
    /// `field > value`
    Gt(Field, Value),
    /// `field <= value`
    Lte(Field, Value),
    /// Case-insensitive substring match on a text field.
    Contains(Field, String),
    /// Every inner predicate holds.
    And(Vec<Predicate>),
    /// At least one inner predicate holds.
    Or(Vec<Predicate>),
}

/// One ordering key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ordering {
    /// The field to order by.
    pub field: Field,
    /// Ascending or descending.
    pub direction: SortDirection,
}

impl Ordering {
    /// Ascending ordering on `field`.
    pub const fn asc(field: Field) -> Self {
        Ordering { field, direction: SortDirection::Asc }
    }

    /// Descending ordering on `field`.
    pub const fn desc(field: Field) -> Self {
        Ordering { field, direction: SortDirection::Desc }
    }
}

/// A read against a collection: every filter must hold, rows come back in
/// `ordering` order, then `offset` rows are skipped and at most `limit` rows
/// are returned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    /// Conjunction of filters.
    pub filters: Vec<Predicate>,
    /// Ordering keys, most significant first.
    pub ordering: Vec<Ordering>,
    /// Maximum number of rows.
    pub limit: Option<u32>,
    /// Number of rows to skip.
    pub offset: Option<u64>,
}

impl Query {
    /// An unfiltered, unordered query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filters.push(predicate);
        self
    }

    /// Adds an ordering key after the existing ones.
    pub fn order_by(mut self, ordering: Ordering) -> Self {
        self.ordering.push(ordering);
        self
    }

    /// Sets the row limit.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the number of skipped rows.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// The same filters without ordering, limit or offset; what a count runs.
    pub fn count_query(&self) -> Self {
        Query {
            filters: self.filters.clone(),
            ..Default::default()
        }
    }

    /// Whether the query already orders by `field`.
    pub fn orders_by(&self, field: Field) -> bool {
        self.ordering.iter().any(|ordering| ordering.field == field)
    }
}

// Traits
// -----------------------------------------------------------------------------

/// Trait implemented by every entry that can be listed.
pub trait Listable: Clone + fmt::Debug + Send + Sync + 'static {
    /// Collection name used in routes, logs and errors.
    const COLLECTION: &'static str;
    /// Identifier variant the collection uses.
    const ID_KIND: IdKind;
    /// Fields a client may sort by.
    const SORTABLE: &'static [Field];
    /// Ordering used in offset mode when the client requests none.
    const DEFAULT_ORDERING: &'static [Ordering];
    /// Text field the `name` filter matches against.
    const NAME_FIELD: Field;

    /// Identifier of the entry.
    fn id(&self) -> EntityId;
    /// Creation time of the entry.
    fn created_at(&self) -> OffsetDateTime;
    /// Value of `field`, or `None` when the entry has no value for it.
    fn value(&self, field: Field) -> Option<Value>;
}

/// Represents the ability to read one collection from a store.
pub trait Collection: Send + Sync {
    /// Entry type held by the collection.
    type Entry: Listable;
    /// Read error.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the rows matching `query`, ordered and windowed as it asks.
    fn fetch(
        &self,
        query: &Query,
    ) -> impl Future<Output = Result<Vec<Self::Entry>, Self::Error>> + Send;

    /// Returns the number of rows matching the filters of `query`. Ordering,
    /// limit and offset are ignored.
    fn count(&self, query: &Query) -> impl Future<Output = Result<u64, Self::Error>> + Send;
}
