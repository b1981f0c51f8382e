//! Replaylog - Console message timeline for replay debugging
//!
//! This crate re-exports all layers of the Replaylog system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: replaylog_store      — Message store, retention, removal
//! Layer 1: replaylog_engine     — Filters, search, grouping, reconciliation, ordering
//! Layer 0: replaylog_foundation — Core types (Message, ExecutionPoint, Error)
//! ```

pub use replaylog_engine as engine;
pub use replaylog_foundation as foundation;
pub use replaylog_store as store;
