//! This module contains the models used within Roster API endpoint interactions.

/// Api structures for accounts.
pub mod account;
/// Common API structures.
pub mod common;
/// Api structures for config items.
pub mod config_item;
/// Api structures for groups.
pub mod group;
/// Api structures for health endpoint.
pub mod health;
/// Api structures for projects.
pub mod project;
