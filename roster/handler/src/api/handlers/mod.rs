//! Handlers for the Roster API

use std::convert::Infallible;

use serde::Serialize;
use tracing::{debug, error, warn};
use warp::http::StatusCode;
use warp::reply::{json, with_status, Reply, Response};
use warp::Rejection;

use crate::api::models::common::{ListQuery, ListResponse};
use crate::common::error::{Error, ErrorResponse};
use crate::config::PagingConfig;
use crate::database::{Collection, Listable, Predicate, Query};
use crate::paging::{list_page, params::parse_paging};

/// Account handlers.
pub mod account;
/// Config item handlers.
pub mod config_item;
/// Group handlers.
pub mod group;
/// Health handlers.
pub mod health;
/// Project handlers.
pub mod project;

/// Lists one page of `collection`, converting every entry into its API model.
///
/// The name filter is a case-insensitive substring match on the collection's
/// name field; a blank filter is ignored.
pub(crate) async fn list<C, T>(
    collection: &C,
    query: ListQuery,
    request_id: Option<String>,
    config: &PagingConfig,
) -> Result<impl Reply, Error>
where
    C: Collection,
    T: From<C::Entry> + Serialize,
{
    let (request, mode) = parse_paging(&query.paging, config)?;
    debug!(
        collection = C::Entry::COLLECTION,
        mode = mode.as_str(),
        limit = request.limit,
        "resolved paging request"
    );

    let mut base_query = Query::new();
    if let Some(name) = query.name.as_deref().map(str::trim).filter(|name| !name.is_empty()) {
        base_query = base_query.filter(Predicate::Contains(C::Entry::NAME_FIELD, name.to_string()));
    }

    let (page, meta) = list_page(collection, base_query, &request, mode, config).await?;
    let data: Vec<T> = page.items.into_iter().map(T::from).collect();

    Ok(with_status(
        json(&ListResponse::ok(data, meta, request_id)),
        StatusCode::OK,
    ))
}

/// Central error handler for Warp rejections, converting them to appropriate HTTP responses.
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    if let Some(error) = err.find::<Error>() {
        return Ok(reply_for(error));
    }

    if err.is_not_found() {
        return Ok(Error::NotFound.into_response());
    }

    if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        warn!(error = %e, "rejected query string");
        return Ok(Error::InvalidQuery(e.to_string()).into_response());
    }

    if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        return Ok(Error::MethodNotAllowed.into_response());
    }

    error!("Unhandled error: {:?}", err);
    Ok(Error::InternalServer.into_response())
}

fn reply_for(error: &Error) -> Response {
    with_status(
        json(&ErrorResponse::from(error)),
        error.status_code(),
    )
    .into_response()
}
