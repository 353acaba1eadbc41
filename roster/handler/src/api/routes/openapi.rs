//! Route serving the OpenAPI document.

use utoipa::OpenApi;
use warp::Filter;

use crate::api::doc::ApiDoc;

/// OpenAPI document route.
pub fn routes() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("openapi.json")
        .and(warp::get())
        .map(|| warp::reply::json(&ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp::http::StatusCode;
    use warp::test::request;

    #[tokio::test]
    async fn document_lists_every_listing_path() {
        let api = routes();

        let res = request().method("GET").path("/openapi.json").reply(&api).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        for path in ["/health", "/accounts", "/configs", "/projects", "/groups"] {
            assert!(body["paths"].get(path).is_some(), "missing {path}");
        }
        for schema in [
            "AccountListResponse",
            "ConfigItemListResponse",
            "ProjectListResponse",
            "GroupListResponse",
        ] {
            assert!(
                body["components"]["schemas"].get(schema).is_some(),
                "missing {schema}"
            );
        }
    }
}
