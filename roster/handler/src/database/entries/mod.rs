//! Entries of the listed collections.
//!
//! Each entry implements [`Listable`](super::Listable), which is all the paging
//! engine needs to know about it: the collection name, the sort whitelist, the
//! default ordering and the value of each comparable field.
//!
//! | collection | identifier | sortable fields                                               |
//! |------------|------------|---------------------------------------------------------------|
//! | accounts   | UUID       | created_at, updated_at, username, display_name, email, id     |
//! | configs    | UUID       | created_at, updated_at, name, id                              |
//! | projects   | UUID       | created_at, updated_at, name, url, id                         |
//! | groups     | serial     | created_at, name, id                                          |

use super::Value;

/// Account entries.
pub mod account;
/// Config item entries.
pub mod config_item;
/// Group entries.
pub mod group;
/// Project entries.
pub mod project;

/// Text value of a field.
fn text(value: &str) -> Option<Value> {
    Some(Value::Text(value.to_string()))
}

/// Text value of an optional field.
fn optional_text(value: Option<&String>) -> Option<Value> {
    value.map(|value| Value::Text(value.clone()))
}
