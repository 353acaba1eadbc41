//! Roster: list endpoints for accounts, config items, projects and groups,
//! backed by a paging engine that serves offset, keyset and snapshot pages.
//!
//! - [`paging`] validates query parameters, runs the selected strategy against a
//!   [`database::Collection`] and builds the page metadata.
//! - [`api`] exposes the collections over HTTP with warp.
//! - [`config`] loads [`config::Settings`] from defaults, a TOML file and the
//!   environment.
#![deny(missing_docs)]

pub mod api;
pub mod common;
pub mod config;
pub mod context;
pub mod database;
pub mod logging;
pub mod paging;
