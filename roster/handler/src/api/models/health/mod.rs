use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Struct that represents the current status of the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthData {
    /// Always `ok` while the server answers.
    pub status: String,
}

impl HealthData {
    /// A healthy status.
    pub fn ok() -> Self {
        HealthData { status: "ok".to_string() }
    }
}
