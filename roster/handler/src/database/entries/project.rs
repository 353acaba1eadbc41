//! Entries into the projects collection.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::text;
use crate::api::models::project::Project;
use crate::database::{EntityId, Field, IdKind, Listable, Ordering, Value};

/// Project entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    /// Project identifier.
    pub id: Uuid,
    /// Project name.
    pub name: String,
    /// Project homepage.
    pub url: String,
    /// Free form description.
    pub description: Option<String>,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last update time.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Listable for ProjectEntry {
    const COLLECTION: &'static str = "projects";
    const ID_KIND: IdKind = IdKind::Uuid;
    const SORTABLE: &'static [Field] = &[
        Field::CreatedAt,
        Field::UpdatedAt,
        Field::Name,
        Field::Url,
        Field::Id,
    ];
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
            Field::Url => text(&self.url),
            _ => None,
        }
    }
}

/// Convert from entry to its corresponding project.
impl From<ProjectEntry> for Project {
    fn from(entry: ProjectEntry) -> Self {
        Project {
            id: entry.id,
            name: entry.name,
            url: entry.url,
            description: entry.description,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}
