use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use roster_handler::database::entries::account::AccountEntry;
use roster_handler::database::in_memory::{Store, Table};
use uuid::Uuid;

use crate::util::{column, group, t, TestApi};

fn groups(count: i64) -> TestApi {
    TestApi::new(Store {
        groups: Table::from_entries((1..=count).map(|id| group(id, t(id))).collect()),
        ..Default::default()
    })
}

#[tokio::test]
async fn walk_groups_by_encoded_cursor() {
    let api = groups(10);

    let mut path = "/groups?cursor=0&limit=3".to_string();
    let mut pages = Vec::new();
    let mut has_more = Vec::new();
    for _ in 0..4 {
        let body = api.get_ok(&path).await;
        assert_eq!(body["meta"]["mode"], "cursor");
        pages.push(column(&body, "id"));
        has_more.push(body["meta"]["has_more"].as_bool().unwrap());
        if let Some(next) = body["meta"]["next_cursor_enc"].as_str() {
            path = format!("/groups?cursor={next}&limit=3");
        }
    }

    assert_eq!(
        pages,
        vec![
            vec!["1", "2", "3"],
            vec!["4", "5", "6"],
            vec!["7", "8", "9"],
            vec!["10"],
        ]
    );
    assert_eq!(has_more, vec![true, true, true, false]);
}

#[tokio::test]
async fn page_after_the_last_row_is_empty() {
    let api = groups(3);

    let body = api.get_ok("/groups?cursor=3").await;
    assert_eq!(body["meta"]["count"], 0);
    assert_eq!(body["meta"]["has_more"], false);
    assert!(body["meta"].get("next_cursor").is_none());
}

#[tokio::test]
async fn keyset_cursor_wins_over_snapshot() {
    let api = groups(5);

    let body = api
        .get_ok("/groups?cursor=2&snapshot=2024-04-01T00:00:03Z&limit=2")
        .await;
    assert_eq!(body["meta"]["mode"], "cursor");
    assert_eq!(column(&body, "id"), vec!["3", "4"]);
}

#[tokio::test]
async fn legacy_json_cursor_is_accepted() {
    let api = groups(5);

    let cursor = URL_SAFE_NO_PAD.encode(r#"{"id":3}"#);
    let body = api.get_ok(&format!("/groups?cursor={cursor}")).await;
    assert_eq!(column(&body, "id"), vec!["4", "5"]);
    assert_eq!(body["meta"]["cursor"], "3");
}

#[tokio::test]
async fn legacy_json_cursor_with_uuid_and_timestamp() {
    let account = |n: u128| AccountEntry {
        id: Uuid::from_u128(n),
        username: format!("user{n}"),
        display_name: None,
        email: None,
        is_active: true,
        created_at: t(n as i64),
        updated_at: t(n as i64),
    };
    let api = TestApi::new(Store {
        accounts: Table::from_entries((1..=4).map(account).collect()),
        ..Default::default()
    });

    let id = Uuid::from_u128(2).hyphenated().to_string();
    let cursor = URL_SAFE_NO_PAD.encode(format!(r#"{{"id":"{id}","ts":"2024-04-01T00:00:02Z"}}"#));
    let body = api.get_ok(&format!("/accounts?cursor={cursor}")).await;

    assert_eq!(body["meta"]["mode"], "cursor");
    assert_eq!(body["meta"]["cursor"], id);
    assert_eq!(column(&body, "username"), vec!["user3", "user4"]);
    // The decoded timestamp is re-encoded into the current cursor.
    assert!(body["meta"]["cursor_enc"].is_string());
}

#[tokio::test]
async fn uuid_walk_ignores_rows_inserted_behind_the_cursor() {
    let account = |n: u128| AccountEntry {
        id: Uuid::from_u128(n),
        username: format!("user{n}"),
        display_name: None,
        email: Some(format!("user{n}@example.com")),
        is_active: n % 2 == 0,
        created_at: t(n as i64),
        updated_at: t(n as i64),
    };
    let api = TestApi::new(Store {
        accounts: Table::from_entries(vec![account(2), account(4), account(6), account(8)]),
        ..Default::default()
    });

    let first = api.get_ok("/accounts?cursor=00000000-0000-0000-0000-000000000000&limit=2").await;
    assert_eq!(column(&first, "username"), vec!["user2", "user4"]);

    api.store.accounts.insert(account(3)).await;
    api.store.accounts.insert(account(7)).await;

    let next = first["meta"]["next_cursor_enc"].as_str().unwrap();
    let second = api.get_ok(&format!("/accounts?cursor={next}&limit=2")).await;
    assert_eq!(column(&second, "username"), vec!["user6", "user7"]);
}
