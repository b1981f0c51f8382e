//! Supersession of provisional logpoint and evaluation messages.
//!
//! While the user seeks, the backend may evaluate the same logpoint at the same
//! execution point more than once. The first message is provisional; any later
//! message for the same origin and point replaces it. Messages from logpoints
//! the user has removed are dropped on arrival, for the life of the index.

use im::{HashMap, HashSet};

use replaylog_foundation::{EvalId, ExecutionPoint, LogpointId, Message, MessageId, MessageKind};

// =============================================================================
// Keys
// =============================================================================

/// What produced a reconcilable message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReconcileOrigin {
    /// A logpoint definition.
    Logpoint(LogpointId),
    /// A console evaluation.
    Eval(EvalId),
}

/// Identifies the single message allowed per origin and execution point.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LogpointKey {
    /// The producing logpoint or evaluation.
    pub origin: ReconcileOrigin,
    /// The real execution point, if the message carries one.
    pub point: Option<ExecutionPoint>,
}

impl LogpointKey {
    /// Derives the key for a message, if it is reconcilable at all.
    ///
    /// Logpoint messages are keyed by logpoint id; evaluation results without a
    /// logpoint are keyed by eval id.
    #[must_use]
    pub fn for_message(message: &Message) -> Option<Self> {
        let origin = match (&message.logpoint_id, message.eval_id) {
            (Some(logpoint), _) => ReconcileOrigin::Logpoint(logpoint.clone()),
            (None, Some(eval)) if message.kind == MessageKind::Result => {
                ReconcileOrigin::Eval(eval)
            }
            _ => return None,
        };
        Some(Self {
            origin,
            point: message.real_point().cloned(),
        })
    }
}

// =============================================================================
// Reconciliation
// =============================================================================

/// What the store should do with an incoming message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reconciliation {
    /// Insert it.
    Add,
    /// Remove the provisional message with this id, then insert.
    Replace(MessageId),
    /// Ignore it; its logpoint has been removed.
    Drop,
}

// =============================================================================
// Logpoint Index
// =============================================================================

/// Index from reconcile keys to stored messages, plus removed logpoints.
#[derive(Clone, Debug, Default)]
pub struct LogpointIndex {
    by_key: HashMap<LogpointKey, MessageId>,
    removed: HashSet<LogpointId>,
}

impl LogpointIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides how an incoming message is applied.
    #[must_use]
    pub fn decide(&self, message: &Message) -> Reconciliation {
        if let Some(logpoint) = &message.logpoint_id {
            if self.removed.contains(logpoint) {
                return Reconciliation::Drop;
            }
        }
        match LogpointKey::for_message(message).and_then(|key| self.by_key.get(&key)) {
            Some(&existing) => Reconciliation::Replace(existing),
            None => Reconciliation::Add,
        }
    }

    /// Indexes a stored message under its key, if it has one.
    pub fn record(&mut self, message: &Message) {
        if let Some(key) = LogpointKey::for_message(message) {
            self.by_key.insert(key, message.id);
        }
    }

    /// Drops every key pointing at a message for which `removed` is true.
    pub fn forget(&mut self, removed: impl Fn(MessageId) -> bool) {
        self.by_key.retain(|_, id| !removed(*id));
    }

    /// Marks a logpoint as removed. Future messages from it are dropped.
    pub fn mark_removed(&mut self, logpoint: LogpointId) {
        self.removed.insert(logpoint);
    }

    /// Returns true if the logpoint has been removed.
    #[must_use]
    pub fn is_removed(&self, logpoint: &LogpointId) -> bool {
        self.removed.contains(logpoint)
    }

    /// Clears the key index. Removed logpoints are kept.
    pub fn clear_keys(&mut self) {
        self.by_key.clear();
    }

    /// Returns the number of indexed keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns true if no keys are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
