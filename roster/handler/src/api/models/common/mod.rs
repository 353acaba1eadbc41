//! Request and response structures shared by the list endpoints.

use serde::{Deserialize, Serialize};

use crate::paging::params::PagingQuery;

/// List response envelope.
pub mod responses;

pub use responses::{
    AccountListResponse, ConfigItemListResponse, GroupListResponse, ListResponse,
    ProjectListResponse,
};

/// Query string of a list endpoint: paging parameters plus the name filter.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Paging parameters.
    #[serde(flatten)]
    pub paging: PagingQuery,
    /// Case-insensitive substring filter on the collection's name field.
    pub name: Option<String>,
}
