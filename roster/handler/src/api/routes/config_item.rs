//! Route definitions for the config items endpoint.

use warp::Filter;

use super::handlers;
use crate::api::models::common::ListQuery;
use crate::context::RosterContext;

/// Config items routes.
pub fn routes(
    context: RosterContext,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    get_config_items(context)
}

/// Get config items endpoint.
fn get_config_items(
    context: RosterContext,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || context.clone())
        .and(warp::path!("configs"))
        .and(warp::get())
        .and(warp::query::<ListQuery>())
        .and(warp::header::optional::<String>("x-request-id"))
        .then(handlers::config_item::get_config_items)
}
