//! Route definitions for the accounts endpoint.

use warp::Filter;

use super::handlers;
use crate::api::models::common::ListQuery;
use crate::context::RosterContext;

/// Accounts routes.
pub fn routes(
    context: RosterContext,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    get_accounts(context)
}

/// Get accounts endpoint.
fn get_accounts(
    context: RosterContext,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || context.clone())
        .and(warp::path!("accounts"))
        .and(warp::get())
        .and(warp::query::<ListQuery>())
        .and(warp::header::optional::<String>("x-request-id"))
        .then(handlers::account::get_accounts)
}
