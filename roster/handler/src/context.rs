//! Shared state handed to every request handler.

use crate::config::Settings;
use crate::database::in_memory::Store;

/// Server context.
#[derive(Clone, Debug)]
pub struct RosterContext {
    /// Loaded settings.
    pub settings: Settings,
    /// Backing store of the listed collections.
    pub store: Store,
}

impl RosterContext {
    /// Creates a context with an empty store.
    pub fn new(settings: Settings) -> Self {
        RosterContext { settings, store: Store::default() }
    }

    /// Creates a context around an existing store.
    pub fn with_store(settings: Settings, store: Store) -> Self {
        RosterContext { settings, store }
    }
}
