//! Handlers for the config items endpoint.

use tracing::{debug, instrument};
use warp::reply::Reply;

use super::list;
use crate::api::models::common::ListQuery;
use crate::api::models::config_item::ConfigItem;
use crate::context::RosterContext;

/// Get config items handler.
#[utoipa::path(
    get,
    operation_id = "getConfigItems",
    path = "/configs",
    params(
        crate::paging::params::PagingQuery,
        ("name" = Option<String>, Query, description = "Case-insensitive substring of the name."),
        ("x-request-id" = Option<String>, Header, description = "Echoed back as `request_id`."),
    ),
    tag = "configs",
    responses(
        (status = 200, description = "Page of config items retrieved successfully", body = ConfigItemListResponse),
        (status = 400, description = "Invalid paging parameter", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 408, description = "Request timed out", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(context))]
pub async fn get_config_items(
    context: RosterContext,
    query: ListQuery,
    request_id: Option<String>,
) -> impl warp::reply::Reply {
    debug!("In get_config_items");
    list::<_, ConfigItem>(
        &context.store.config_items,
        query,
        request_id,
        &context.settings.paging,
    )
    .await
    .map_or_else(Reply::into_response, Reply::into_response)
}
