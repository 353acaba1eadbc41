use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// A user account.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct Account {
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
