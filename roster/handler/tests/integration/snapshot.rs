use roster_handler::database::in_memory::{Store, Table};
use warp::http::StatusCode;

use crate::util::{column, config_item, t, TestApi};

fn items(entries: Vec<roster_handler::database::entries::config_item::ConfigItemEntry>) -> TestApi {
    TestApi::new(Store {
        config_items: Table::from_entries(entries),
        ..Default::default()
    })
}

#[tokio::test]
async fn snapshot_walk_is_stable_under_inserts() {
    let api = items((1..=5).map(|n| config_item(n, t(n as i64))).collect());
    let snapshot = "2024-04-01T00:00:05.001Z";

    let first = api.get_ok(&format!("/configs?snapshot={snapshot}&limit=2")).await;
    assert_eq!(column(&first, "name"), vec!["item-5", "item-4"]);
    assert_eq!(first["meta"]["mode"], "snapshot");
    assert_eq!(first["meta"]["has_more"], true);

    api.store.config_items.insert(config_item(6, t(6))).await;

    let mut seen = column(&first, "name");
    let mut next = first["meta"]["next_cursor_enc"].as_str().unwrap().to_string();
    loop {
        let page = api
            .get_ok(&format!("/configs?snapshot={snapshot}&cursor={next}&limit=2"))
            .await;
        seen.extend(column(&page, "name"));
        if page["meta"]["has_more"] == false {
            break;
        }
        next = page["meta"]["next_cursor_enc"].as_str().unwrap().to_string();
    }

    assert_eq!(seen, vec!["item-5", "item-4", "item-3", "item-2", "item-1"]);
}

#[tokio::test]
async fn equal_creation_times_each_appear_once() {
    let api = items(vec![
        config_item(1, t(1)),
        config_item(2, t(2)),
        config_item(3, t(2)),
        config_item(4, t(2)),
    ]);

    let first = api.get_ok("/configs?snapshot=2024-04-01T00:01:00Z&limit=2").await;
    assert_eq!(column(&first, "name"), vec!["item-4", "item-3"]);

    let next = first["meta"]["next_cursor_enc"].as_str().unwrap();
    let second = api
        .get_ok(&format!("/configs?snapshot=2024-04-01T00:01:00Z&cursor={next}&limit=2"))
        .await;
    assert_eq!(column(&second, "name"), vec!["item-2", "item-1"]);
}

#[tokio::test]
async fn fixed_freezes_the_listing_at_request_time() {
    let api = items((1..=3).map(|n| config_item(n, t(n as i64))).collect());

    let body = api.get_ok("/configs?fixed=TRUE").await;
    assert_eq!(body["meta"]["mode"], "snapshot");
    assert!(body["meta"]["snapshot"].is_string());
    assert_eq!(column(&body, "name"), vec!["item-3", "item-2", "item-1"]);
}

#[tokio::test]
async fn snapshot_cursor_needs_its_snapshot() {
    let api = items((1..=3).map(|n| config_item(n, t(n as i64))).collect());

    let first = api.get_ok("/configs?snapshot=2024-04-01T00:01:00Z&limit=1").await;
    let next = first["meta"]["next_cursor_enc"].as_str().unwrap();

    let (status, body) = api.get(&format!("/configs?cursor={next}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E_INVALID_PARAM");
    assert_eq!(body["details"], next);
}

#[tokio::test]
async fn snapshot_only_allows_newest_first() {
    let api = items(vec![config_item(1, t(1))]);

    let (status, _) = api.get("/configs?fixed=true&sort=created_at:desc").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = api.get("/configs?fixed=true&sort=name").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "name");
}
