//! Route definitions for the groups endpoint.

use warp::Filter;

use super::handlers;
use crate::api::models::common::ListQuery;
use crate::context::RosterContext;

/// Groups routes.
pub fn routes(
    context: RosterContext,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    get_groups(context)
}

/// Get groups endpoint.
fn get_groups(
    context: RosterContext,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || context.clone())
        .and(warp::path!("groups"))
        .and(warp::get())
        .and(warp::query::<ListQuery>())
        .and(warp::header::optional::<String>("x-request-id"))
        .then(handlers::group::get_groups)
}
