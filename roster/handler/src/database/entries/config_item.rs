//! Entries into the configs collection.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::text;
use crate::api::models::config_item::ConfigItem;
use crate::database::{EntityId, Field, IdKind, Listable, Ordering, Value};

/// Config item entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConfigItemEntry {
    /// Config item identifier.
    pub id: Uuid,
    /// Config item name.
    pub name: String,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last update time.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Listable for ConfigItemEntry {
    const COLLECTION: &'static str = "configs";
    const ID_KIND: IdKind = IdKind::Uuid;
    const SORTABLE: &'static [Field] = &[
        Field::CreatedAt,
        Field::UpdatedAt,
        Field::Name,
        Field::Id,
    ];
    // Most recently edited first.
    const DEFAULT_ORDERING: &'static [Ordering] = &[Ordering::desc(Field::UpdatedAt)];
    const NAME_FIELD: Field = Field::Name;

    fn id(&self) -> EntityId {
        EntityId::Uuid(self.id)
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    fn value(&self, field: Field) -> Option<Value> {
        match field {
            Field::Id => Some(Value::Id(self.id())),
            Field::CreatedAt => Some(Value::Timestamp(self.created_at)),
            Field::UpdatedAt => Some(Value::Timestamp(self.updated_at)),
            Field::Name => text(&self.name),
            _ => None,
        }
    }
}

/// Convert from entry to its corresponding config item.
impl From<ConfigItemEntry> for ConfigItem {
    fn from(entry: ConfigItemEntry) -> Self {
        ConfigItem {
            id: entry.id,
            name: entry.name,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}
