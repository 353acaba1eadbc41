//! This module contains the route configurations and request handlers for the Roster API.

/// OpenAPI document.
pub mod doc;
/// Defined handlers for the Roster API.
pub mod handlers;
/// Data models of the Roster API.
pub mod models;
/// Route configuration for the Roster API.
pub mod routes;
