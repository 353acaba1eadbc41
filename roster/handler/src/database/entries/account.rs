//! Entries into the accounts collection.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{optional_text, text};
use crate::api::models::account::Account;
use crate::database::{EntityId, Field, IdKind, Listable, Ordering, Value};

/// Account entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AccountEntry {
    /// Account identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Name shown to other users.
    pub display_name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Whether the account may sign in.
    pub is_active: bool,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last update time.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Listable for AccountEntry {
    const COLLECTION: &'static str = "accounts";
    const ID_KIND: IdKind = IdKind::Uuid;
    const SORTABLE: &'static [Field] = &[
        Field::CreatedAt,
        Field::UpdatedAt,
        Field::Username,
        Field::DisplayName,
        Field::Email,
        Field::Id,
    ];
    const DEFAULT_ORDERING: &'static [Ordering] = &[Ordering::asc(Field::Id)];
    const NAME_FIELD: Field = Field::DisplayName;

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
            Field::Username => text(&self.username),
            Field::DisplayName => optional_text(self.display_name.as_ref()),
            Field::Email => optional_text(self.email.as_ref()),
            Field::Name | Field::Url => None,
        }
    }
}

/// Convert from entry to its corresponding account.
impl From<AccountEntry> for Account {
    fn from(entry: AccountEntry) -> Self {
        Account {
            id: entry.id,
            username: entry.username,
            display_name: entry.display_name,
            email: entry.email,
            is_active: entry.is_active,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}
