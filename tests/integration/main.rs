//! Cross-layer integration tests for Replaylog
//!
//! Tests that verify correct interaction between multiple crates.
