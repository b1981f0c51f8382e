//! Filter state and hidden-message bookkeeping.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use replaylog_foundation::LogLevel;

// =============================================================================
// Level Filters
// =============================================================================

/// Which severity levels are shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct LevelFilters {
    /// Show errors.
    pub error: bool,
    /// Show warnings.
    pub warn: bool,
    /// Show plain logs.
    pub log: bool,
    /// Show informational messages.
    pub info: bool,
    /// Show debug messages.
    pub debug: bool,
}

impl Default for LevelFilters {
    fn default() -> Self {
        Self::all()
    }
}

impl LevelFilters {
    /// Every level enabled.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            error: true,
            warn: true,
            log: true,
            info: true,
            debug: true,
        }
    }

    /// Every level disabled.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            error: false,
            warn: false,
            log: false,
            info: false,
            debug: false,
        }
    }

    /// Returns whether `level` is shown.
    #[must_use]
    pub const fn allows(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Error => self.error,
            LogLevel::Warn => self.warn,
            LogLevel::Log => self.log,
            LogLevel::Info => self.info,
            LogLevel::Debug => self.debug,
        }
    }

    /// Enables or disables a single level.
    pub fn set(&mut self, level: LogLevel, enabled: bool) {
        match level {
            LogLevel::Error => self.error = enabled,
            LogLevel::Warn => self.warn = enabled,
            LogLevel::Log => self.log = enabled,
            LogLevel::Info => self.info = enabled,
            LogLevel::Debug => self.debug = enabled,
        }
    }

    /// Builder method to enable or disable a single level.
    #[must_use]
    pub fn with(mut self, level: LogLevel, enabled: bool) -> Self {
        self.set(level, enabled);
        self
    }
}

// =============================================================================
// Filters
// =============================================================================

/// The complete filter state supplied by the filter bar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Filters {
    /// Severity filters.
    pub levels: LevelFilters,
    /// Show messages whose source lives under `node_modules`.
    pub node_modules: bool,
    /// Search text (substring, `/regex/`, optionally `-` prefixed to exclude).
    pub text: String,
}

impl Filters {
    /// Creates the default filter state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set level filters.
    #[must_use]
    pub fn with_levels(mut self, levels: LevelFilters) -> Self {
        self.levels = levels;
        self
    }

    /// Builder method to toggle a single level.
    #[must_use]
    pub fn with_level(mut self, level: LogLevel, enabled: bool) -> Self {
        self.levels.set(level, enabled);
        self
    }

    /// Builder method to show or hide `node_modules` messages.
    #[must_use]
    pub fn with_node_modules(mut self, shown: bool) -> Self {
        self.node_modules = shown;
        self
    }

    /// Builder method to set the search text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Re-enables every level filter, keeping text and `node_modules`.
    #[must_use]
    pub fn with_default_levels(mut self) -> Self {
        self.levels = LevelFilters::all();
        self
    }
}

// =============================================================================
// Hidden Cause
// =============================================================================

/// Why a message is hidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HiddenCause {
    /// An enclosing group is collapsed.
    ClosedGroup,
    /// The message's level is filtered out.
    Level(LogLevel),
    /// The message comes from `node_modules`.
    NodeModules,
    /// The message does not match the search text.
    Text,
}

impl HiddenCause {
    /// Returns true if the cause counts towards "N messages filtered".
    #[must_use]
    pub const fn is_filter(self) -> bool {
        !matches!(self, Self::ClosedGroup)
    }
}

impl fmt::Display for HiddenCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClosedGroup => f.write_str("closed-group"),
            Self::Level(level) => write!(f, "{level}"),
            Self::NodeModules => f.write_str("node-modules"),
            Self::Text => f.write_str("text"),
        }
    }
}

// =============================================================================
// Filtered Counts
// =============================================================================

/// Per-cause tallies of messages hidden by filters.
///
/// Messages hidden only by a collapsed group are not counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilteredCounts {
    /// Total across all causes.
    pub global: usize,
    /// Hidden errors.
    pub error: usize,
    /// Hidden warnings.
    pub warn: usize,
    /// Hidden logs.
    pub log: usize,
    /// Hidden informational messages.
    pub info: usize,
    /// Hidden debug messages.
    pub debug: usize,
    /// Hidden `node_modules` messages.
    pub node_modules: usize,
    /// Messages not matching the search text.
    pub text: usize,
}

impl FilteredCounts {
    /// Creates empty counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one message hidden for `cause`. Closed groups are ignored.
    pub fn increment(&mut self, cause: HiddenCause) {
        let Some(slot) = self.slot_mut(cause) else {
            return;
        };
        *slot += 1;
        self.global += 1;
    }

    /// Forgets one message hidden for `cause`.
    pub fn decrement(&mut self, cause: HiddenCause) {
        let Some(slot) = self.slot_mut(cause) else {
            return;
        };
        *slot = slot.saturating_sub(1);
        self.global = self.global.saturating_sub(1);
    }

    /// Returns the count for `cause`.
    #[must_use]
    pub const fn get(&self, cause: HiddenCause) -> usize {
        match cause {
            HiddenCause::ClosedGroup => 0,
            HiddenCause::Level(LogLevel::Error) => self.error,
            HiddenCause::Level(LogLevel::Warn) => self.warn,
            HiddenCause::Level(LogLevel::Log) => self.log,
            HiddenCause::Level(LogLevel::Info) => self.info,
            HiddenCause::Level(LogLevel::Debug) => self.debug,
            HiddenCause::NodeModules => self.node_modules,
            HiddenCause::Text => self.text,
        }
    }

    fn slot_mut(&mut self, cause: HiddenCause) -> Option<&mut usize> {
        match cause {
            HiddenCause::ClosedGroup => None,
            HiddenCause::Level(LogLevel::Error) => Some(&mut self.error),
            HiddenCause::Level(LogLevel::Warn) => Some(&mut self.warn),
            HiddenCause::Level(LogLevel::Log) => Some(&mut self.log),
            HiddenCause::Level(LogLevel::Info) => Some(&mut self.info),
            HiddenCause::Level(LogLevel::Debug) => Some(&mut self.debug),
            HiddenCause::NodeModules => Some(&mut self.node_modules),
            HiddenCause::Text => Some(&mut self.text),
        }
    }
}
