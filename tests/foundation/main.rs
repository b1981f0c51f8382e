//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: ExecutionPoint, Message, value previews, and Error.

mod messages;
mod points;
