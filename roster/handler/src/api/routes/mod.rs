//! Route definitions for the Roster API.

use warp::Filter;

use super::handlers;
use crate::context::RosterContext;

/// Account routes.
mod account;
/// Config item routes.
mod config_item;
/// Group routes.
mod group;
/// Health routes.
mod health;
/// OpenAPI document route.
mod openapi;
/// Project routes.
mod project;

/// This function sets up the Warp filters for handling all requests.
pub fn routes(
    context: RosterContext,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    health::routes()
        .or(openapi::routes())
        .or(account::routes(context.clone()))
        .or(config_item::routes(context.clone()))
        .or(project::routes(context.clone()))
        .or(group::routes(context))
        // Convert reply to tuple to that more routes can be added to the returned filter.
        .map(|reply| (reply,))
}
