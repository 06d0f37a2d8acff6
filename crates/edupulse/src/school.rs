//! School-wide settings.

use tracing::info;

use crate::error::Result;
use crate::model::SchoolConfig;
use crate::storage::{self, keys, SharedStore};

/// The settings page: the [`SchoolConfig`] singleton bound to its slot.
#[derive(Debug)]
pub struct SchoolSettings {
    store: SharedStore,
    config: SchoolConfig,
}

impl SchoolSettings {
    /// Load the settings, or the defaults when none are stored.
    #[must_use]
    pub fn load(store: SharedStore) -> Self {
        let config = storage::load(store.as_ref(), keys::SCHOOL_CONFIG, SchoolConfig::default());
        Self { store, config }
    }

    /// Current settings.
    #[must_use]
    pub fn config(&self) -> &SchoolConfig {
        &self.config
    }

    /// Apply `edit` and write the result.
    ///
    /// The in-memory settings keep the edit even if the write fails.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StorageWrite`] if the slot cannot be written.
    pub fn save<F>(&mut self, edit: F) -> Result<&SchoolConfig>
    where
        F: FnOnce(&mut SchoolConfig),
    {
        edit(&mut self.config);
        storage::save(self.store.as_ref(), keys::SCHOOL_CONFIG, &self.config)?;
        info!("Saved school settings for {}", self.config.name);
        Ok(&self.config)
    }
}
