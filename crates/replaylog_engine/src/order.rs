//! Display order of stored messages.
//!
//! Messages sort by execution point (real, or the store-assigned anchor).
//! Ties between messages of a console evaluation order by eval id with the
//! command before its result; other ties order by arrival rank within the
//! shared anchor. Callers break any remaining ties by insertion order.

use std::cmp::Ordering;

use replaylog_foundation::{EvalId, ExecutionPoint, Message, MessageKind};

/// The comparable projection of a message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey<'a> {
    point: Option<&'a ExecutionPoint>,
    eval: Option<EvalId>,
    rank: u64,
}

impl<'a> SortKey<'a> {
    /// Projects a stored message onto its sort key.
    #[must_use]
    pub fn of(message: &'a Message) -> Self {
        let rank = if message.eval_id.is_some() {
            match message.kind {
                MessageKind::Command => 0,
                MessageKind::Result => 1,
                _ => 2,
            }
        } else {
            message.message_count()
        };
        Self {
            point: message.sort_point(),
            eval: message.eval_id,
            rank,
        }
    }
}

/// Compares two messages for display order.
#[must_use]
pub fn compare_messages(a: &Message, b: &Message) -> Ordering {
    SortKey::of(a).cmp(&SortKey::of(b))
}
