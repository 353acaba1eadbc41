//! Route definitions for the health endpoint.

use warp::Filter;

use super::handlers;

/// Health routes.
pub fn routes() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("health")
        .and(warp::get())
        .then(handlers::health::get_health)
}
