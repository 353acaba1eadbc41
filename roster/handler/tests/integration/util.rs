//! Shared helpers for driving the API through warp's test harness.

use roster_handler::api::handlers::handle_rejection;
use roster_handler::api::routes::routes;
use roster_handler::config::Settings;
use roster_handler::context::RosterContext;
use roster_handler::database::entries::config_item::ConfigItemEntry;
use roster_handler::database::entries::group::GroupEntry;
use roster_handler::database::entries::project::ProjectEntry;
use roster_handler::database::in_memory::Store;
use serde_json::Value;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;
use warp::http::StatusCode;
use warp::Filter;

/// Base instant of every seeded row.
pub const T0: OffsetDateTime = datetime!(2024-04-01 00:00 UTC);

/// `T0` plus `seconds`.
pub fn t(seconds: i64) -> OffsetDateTime {
    T0 + Duration::seconds(seconds)
}

/// The full route tree over a shared store.
pub struct TestApi {
    pub store: Store,
    context: RosterContext,
}

impl TestApi {
    pub fn new(store: Store) -> Self {
        let settings = Settings::new_from_default_config().unwrap();
        let context = RosterContext::with_store(settings, store.clone());
        TestApi { store, context }
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let api = routes(self.context.clone()).recover(handle_rejection);
        let res = warp::test::request().method("GET").path(path).reply(&api).await;
        let body = serde_json::from_slice(res.body()).unwrap();
        (res.status(), body)
    }

    pub async fn get_ok(&self, path: &str) -> Value {
        let (status, body) = self.get(path).await;
        assert_eq!(status, StatusCode::OK, "{path}: {body}");
        body
    }
}

pub fn group(id: i64, created_at: OffsetDateTime) -> GroupEntry {
    GroupEntry {
        id,
        name: Some(format!("group-{id}")),
        created_at,
    }
}

pub fn config_item(n: u128, created_at: OffsetDateTime) -> ConfigItemEntry {
    ConfigItemEntry {
        id: Uuid::from_u128(n),
        name: format!("item-{n}"),
        created_at,
        updated_at: created_at,
    }
}

pub fn project(n: u128, name: &str) -> ProjectEntry {
    ProjectEntry {
        id: Uuid::from_u128(n),
        name: name.to_string(),
        url: format!("https://{name}.example.com"),
        description: Some(format!("The {name} project")),
        created_at: t(n as i64),
        updated_at: t(n as i64),
    }
}

/// The `field` of every returned entry, as strings.
pub fn column(body: &Value, field: &str) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| match &entry[field] {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect()
}
