//! Integration tests for Layer 1: Engine
//!
//! Tests for search queries, visibility evaluation, group ancestry, and
//! logpoint reconciliation.

mod reconcile;
