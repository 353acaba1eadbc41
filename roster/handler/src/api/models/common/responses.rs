//! Envelope shared by the list endpoints.
// The type aliases utoipa generates for `#[aliases]` carry no docs.
#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::models::account::Account;
use crate::api::models::config_item::ConfigItem;
use crate::api::models::group::Group;
use crate::api::models::project::Project;
use crate::paging::meta::PageMeta;

/// Envelope of every successful list response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[aliases(
    AccountListResponse = ListResponse<Account>,
    ConfigItemListResponse = ListResponse<ConfigItem>,
    ProjectListResponse = ListResponse<Project>,
    GroupListResponse = ListResponse<Group>
)]
pub struct ListResponse<T> {
    /// Always `OK`.
    pub code: String,
    /// Always `success`.
    pub message: String,
    /// Returned entries, in page order.
    pub data: Vec<T>,
    /// Describes the page and how to request the next one.
    pub meta: PageMeta,
    /// Echo of the `X-Request-ID` header.
    pub request_id: Option<String>,
}

impl<T> ListResponse<T> {
    /// A successful response carrying `data`.
    pub fn ok(data: Vec<T>, meta: PageMeta, request_id: Option<String>) -> Self {
        ListResponse {
            code: "OK".to_string(),
            message: "success".to_string(),
            data,
            meta,
            request_id,
        }
    }
}
