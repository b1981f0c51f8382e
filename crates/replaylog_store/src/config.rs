//! Configuration for the message store.

use replaylog_engine::Filters;
use replaylog_foundation::{Error, Result};

/// Configuration for the message store.
///
/// Controls retention and the filter state the store starts from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of stored messages (`None` = unbounded).
    pub max_messages: Option<usize>,

    /// Filters applied on creation and restored by `clear_all_filters`.
    pub initial_filters: Filters,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_messages: Some(10_000),
            initial_filters: Filters::default(),
        }
    }
}

impl StoreConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that never evicts messages.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            max_messages: None,
            ..Self::default()
        }
    }

    /// Builder method to set the retention cap.
    #[must_use]
    pub fn with_max_messages(mut self, max: usize) -> Self {
        self.max_messages = Some(max);
        self
    }

    /// Builder method to set the initial filters.
    #[must_use]
    pub fn with_initial_filters(mut self, filters: Filters) -> Self {
        self.initial_filters = filters;
        self
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns an error if the retention cap is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_messages == Some(0) {
            return Err(Error::invalid_config("max_messages must be non-zero"));
        }
        Ok(())
    }
}
