//! Entries into the groups collection.
//!
//! Groups predate the move to UUIDs and keep their sequential identifiers.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::optional_text;
use crate::api::models::group::Group;
use crate::database::{EntityId, Field, IdKind, Listable, Ordering, Value};

/// Group entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupEntry {
    /// Sequential group identifier.
    pub id: i64,
    /// Group name.
    pub name: Option<String>,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Listable for GroupEntry {
    const COLLECTION: &'static str = "groups";
    const ID_KIND: IdKind = IdKind::Serial;
    const SORTABLE: &'static [Field] = &[
        Field::CreatedAt,
        Field::Name,
        Field::Id,
    ];
    const DEFAULT_ORDERING: &'static [Ordering] = &[Ordering::asc(Field::Id)];
    const NAME_FIELD: Field = Field::Name;

    fn id(&self) -> EntityId {
        EntityId::Serial(self.id)
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    fn value(&self, field: Field) -> Option<Value> {
        match field {
            Field::Id => Some(Value::Id(self.id())),
            Field::CreatedAt => Some(Value::Timestamp(self.created_at)),
            Field::Name => optional_text(self.name.as_ref()),
            _ => None,
        }
    }
}

/// Convert from entry to its corresponding group.
impl From<GroupEntry> for Group {
    fn from(entry: GroupEntry) -> Self {
        Group {
            id: entry.id,
            name: entry.name,
            created_at: entry.created_at,
        }
    }
}
