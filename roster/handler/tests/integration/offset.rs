use roster_handler::database::in_memory::{Store, Table};

use crate::util::{column, project, TestApi};

fn projects() -> TestApi {
    let names = ["comet", "atlas", "ember", "borealis", "dynamo", "fjord", "geyser"];
    TestApi::new(Store {
        projects: Table::from_entries(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| project(i as u128 + 1, name))
                .collect(),
        ),
        ..Default::default()
    })
}

#[tokio::test]
async fn offset_walk_visits_every_row_once() {
    let api = projects();

    let mut seen = Vec::new();
    let mut offset = 0;
    loop {
        let body = api
            .get_ok(&format!("/projects?sort=name:asc&limit=3&offset={offset}"))
            .await;
        assert_eq!(body["meta"]["mode"], "offset");
        seen.extend(column(&body, "name"));
        offset = body["meta"]["next_offset"].as_u64().unwrap();
        if body["meta"]["has_more"] == false {
            break;
        }
    }

    assert_eq!(
        seen,
        vec!["atlas", "borealis", "comet", "dynamo", "ember", "fjord", "geyser"]
    );
    assert_eq!(offset, 7);
}

#[tokio::test]
async fn total_matches_the_name_filter() {
    let api = projects();

    let body = api.get_ok("/projects?name=E&with_total=true&limit=2").await;
    // comet, ember, borealis, geyser
    assert_eq!(body["meta"]["total"], 4);
    assert_eq!(body["meta"]["count"], 2);

    let body = api.get_ok("/projects?name=E&limit=2").await;
    assert!(body["meta"].get("total").is_none());
}

#[tokio::test]
async fn direction_reverses_the_order() {
    let api = projects();

    let asc = api.get_ok("/projects?sort=created_at:asc&limit=1").await;
    let desc = api.get_ok("/projects?sort=created_at:desc&limit=1").await;
    assert_eq!(column(&asc, "name"), vec!["comet"]);
    assert_eq!(column(&desc, "name"), vec!["geyser"]);
}

#[tokio::test]
async fn limit_is_clamped() {
    let api = projects();

    let body = api.get_ok("/projects?limit=0").await;
    assert_eq!(body["meta"]["limit"], 1);
    assert_eq!(body["meta"]["count"], 1);

    let body = api.get_ok("/projects?limit=1000").await;
    assert_eq!(body["meta"]["limit"], 100);
    assert_eq!(body["meta"]["count"], 7);
    assert_eq!(body["meta"]["has_more"], false);
}
