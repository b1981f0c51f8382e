//! Integration tests for Layer 2: Store
//!
//! Tests for the message store: grouping, ordering, filters, logpoints,
//! removal, and retention.

mod filters;
mod ordering;
mod removal;
