use roster_handler::database::in_memory::Store;
use warp::http::StatusCode;

use crate::util::TestApi;

#[tokio::test]
async fn unknown_route_is_not_found() {
    let api = TestApi::new(Store::default());

    let (status, body) = api.get("/widgets").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E_NOT_FOUND");
}

#[tokio::test]
async fn garbage_cursor_is_rejected_with_its_raw_value() {
    let api = TestApi::new(Store::default());

    let (status, body) = api.get("/projects?cursor=not-a-cursor").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E_INVALID_PARAM");
    assert_eq!(body["message"], "invalid cursor");
    assert_eq!(body["details"], "not-a-cursor");
}

#[tokio::test]
async fn unknown_sort_field_names_the_field() {
    let api = TestApi::new(Store::default());

    let (status, body) = api.get("/groups?sort=username").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid sort field");
    assert_eq!(body["details"], "username");
}

#[tokio::test]
async fn empty_collection_lists_nothing() {
    let api = TestApi::new(Store::default());

    let (status, body) = api.get("/accounts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], serde_json::json!([]));
    assert_eq!(body["meta"]["count"], 0);
    assert_eq!(body["meta"]["has_more"], false);
    assert_eq!(body["meta"]["next_offset"], 0);
}

#[cfg(feature = "testing")]
#[tokio::test]
async fn populated_store_lists_fake_entries() {
    let api = TestApi::new(Store::default());
    api.store.populate(5).await;

    let body = api.get_ok("/groups?with_total=true").await;
    assert_eq!(body["meta"]["total"], 5);

    let body = api.get_ok("/accounts?fixed=true&limit=2").await;
    assert_eq!(body["meta"]["count"], 2);
}
