//! Route definitions for the projects endpoint.

use warp::Filter;

use super::handlers;
use crate::api::models::common::ListQuery;
use crate::context::RosterContext;

/// Projects routes.
pub fn routes(
    context: RosterContext,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    get_projects(context)
}

/// Get projects endpoint.
fn get_projects(
    context: RosterContext,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || context.clone())
        .and(warp::path!("projects"))
        .and(warp::get())
        .and(warp::query::<ListQuery>())
        .and(warp::header::optional::<String>("x-request-id"))
        .then(handlers::project::get_projects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::test_util::context;
    use crate::database::entries::project::ProjectEntry;
    use crate::database::in_memory::{Store, Table};
    use test_case::test_case;
    use time::macros::datetime;
    use time::Duration;
    use uuid::Uuid;
    use warp::http::StatusCode;
    use warp::test::request;

    fn api() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let base = datetime!(2024-02-01 00:00 UTC);
        let names = ["comet", "atlas", "ember", "borealis", "dynamo"];
        let store = Store {
            projects: Table::from_entries(
                names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| ProjectEntry {
                        id: Uuid::from_u128(i as u128 + 1),
                        name: name.to_string(),
                        url: format!("https://{name}.example.com"),
                        description: None,
                        created_at: base + Duration::hours(i as i64),
                        updated_at: base + Duration::hours(i as i64),
                    })
                    .collect(),
            ),
            ..Default::default()
        };
        routes(context(store))
    }

    fn names(body: &serde_json::Value) -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|project| project["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_get_projects_sorted_by_name() {
        let res = request()
            .method("GET")
            .path("/projects?sort=name&limit=2&offset=1&with_total=true")
            .reply(&api())
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(names(&body), vec!["borealis", "comet"]);
        assert_eq!(body["meta"]["offset"], 1);
        assert_eq!(body["meta"]["next_offset"], 3);
        assert_eq!(body["meta"]["total"], 5);
        assert_eq!(body["meta"]["has_more"], true);
    }

    #[tokio::test]
    async fn default_order_is_most_recently_updated() {
        let res = request()
            .method("GET")
            .path("/projects?limit=1")
            .reply(&api())
            .await;

        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(names(&body), vec!["dynamo"]);
    }

    #[test_case("/projects?sort=password", "password"; "unknown field")]
    #[test_case("/projects?sort=name:sideways", "name:sideways"; "unknown direction")]
    #[test_case("/projects?limit=ten", "ten"; "non numeric limit")]
    #[test_case("/projects?offset=-1", "-1"; "negative offset")]
    #[tokio::test]
    async fn invalid_parameters_are_client_errors(path: &str, details: &str) {
        let res = request().method("GET").path(path).reply(&api()).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["code"], "E_INVALID_PARAM");
        assert_eq!(body["details"], details);
    }
}
