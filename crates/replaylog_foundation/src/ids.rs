//! Identifiers for messages, console evaluations, and logpoints.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Message ID
// =============================================================================

/// Unique, monotonically-issued identifier for a console message.
///
/// Ids double as an insertion-order tiebreak, and a console evaluation's
/// result is always issued the id immediately following its command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MessageId(u64);

impl MessageId {
    /// Creates a message ID from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the id issued immediately after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

// =============================================================================
// Eval ID
// =============================================================================

/// Identifies a single console evaluation (a command and its result).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvalId(u64);

impl EvalId {
    /// Creates an eval ID from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EvalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "eval-{}", self.0)
    }
}

// =============================================================================
// Logpoint ID
// =============================================================================

/// Identifies the logpoint definition that produced a message.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogpointId(String);

impl LogpointId {
    /// Creates a logpoint ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LogpointId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// =============================================================================
// ID Sequence
// =============================================================================

/// Sequential issuer of [`MessageId`]s.
///
/// Never reuses an id, so a command issued `n` is always paired with a
/// result issued `n + 1` when both are minted back to back.
#[derive(Clone, Debug, Default)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Creates a sequence starting at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Creates a sequence whose first issued id is `first`.
    #[must_use]
    pub const fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Issues the next id.
    pub fn next_id(&mut self) -> MessageId {
        let id = MessageId(self.next);
        self.next += 1;
        id
    }

    /// Returns the id that would be issued next, without issuing it.
    #[must_use]
    pub const fn peek(&self) -> MessageId {
        MessageId(self.next)
    }
}
