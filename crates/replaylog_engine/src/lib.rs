//! Logpoint reconciliation, group nesting, filtering, and ordering for replaylog.
//!
//! Everything here is a pure collaborator of the message store: functions and
//! small index types that read borrowed state and return decisions, which the
//! store then applies.
//!
//! - [`LogpointIndex`] - Decides whether a message is added, replaces a
//!   provisional message, or is dropped
//! - [`GroupAncestry`] - The forest of nested console groups
//! - [`ActiveFilters`] and [`visibility`] - Per-message visibility
//! - [`SearchQuery`] - Free-text and regex search over message content
//! - [`SortKey`] - The display order comparator

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod filter;
pub mod group;
pub mod order;
pub mod reconcile;
pub mod search;
pub mod visibility;

pub use filter::{FilteredCounts, Filters, HiddenCause, LevelFilters};
pub use group::GroupAncestry;
pub use order::{SortKey, compare_messages};
pub use reconcile::{LogpointIndex, LogpointKey, ReconcileOrigin, Reconciliation};
pub use search::SearchQuery;
pub use visibility::{ActiveFilters, GroupCheck, Visibility, VisibilityContext, visibility};
