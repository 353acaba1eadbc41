//! Handlers for the accounts endpoint.

use tracing::{debug, instrument};
use warp::reply::Reply;

use super::list;
use crate::api::models::common::ListQuery;
use crate::api::models::account::Account;
use crate::context::RosterContext;

/// Get accounts handler.
#[utoipa::path(
    get,
    operation_id = "getAccounts",
    path = "/accounts",
    params(
        crate::paging::params::PagingQuery,
        ("name" = Option<String>, Query, description = "Case-insensitive substring of the display name."),
        ("x-request-id" = Option<String>, Header, description = "Echoed back as `request_id`."),
    ),
    tag = "accounts",
    responses(
        (status = 200, description = "Page of accounts retrieved successfully", body = AccountListResponse),
        (status = 400, description = "Invalid paging parameter", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 408, description = "Request timed out", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(context))]
pub async fn get_accounts(
    context: RosterContext,
    query: ListQuery,
    request_id: Option<String>,
) -> impl warp::reply::Reply {
    debug!("In get_accounts");
    list::<_, Account>(
        &context.store.accounts,
        query,
        request_id,
        &context.settings.paging,
    )
    .await
    .map_or_else(Reply::into_response, Reply::into_response)
}
