//! Common modules shared across the Roster API.

/// Error types.
pub mod error;
