//! Ordering anchors for messages without a real execution point.

use replaylog_foundation::{LastExecutionPoint, Message, MessageKind, PointTime};

use crate::store::MessageStore;

/// Arrival ranks handed out at one anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct AnchorCount {
    /// Latest rank handed out; 0 after a message with this real point.
    pub(crate) latest: u64,
    /// Stored messages whose `last_execution_point` names this point.
    pub(crate) refs: usize,
}

impl MessageStore {
    /// Attaches `last_execution_point` to an incoming message.
    ///
    /// Returns true if this is the first message with a real point.
    pub(crate) fn ensure_execution_point(&mut self, message: &mut Message) -> bool {
        if let Some(real) = &message.execution_point {
            let entry = self.anchors.entry(real.point.clone()).or_default();
            entry.latest = 0;
            entry.refs += 1;
            message.last_execution_point =
                Some(LastExecutionPoint::real(real.point.clone(), real.time));
            let first = !self.has_seen_real_point;
            self.has_seen_real_point = true;
            return first;
        }

        let anchor = self.anchor_for(message);
        let entry = self.anchors.entry(anchor.point.clone()).or_default();
        entry.latest += 1;
        entry.refs += 1;
        let count = entry.latest;
        message.last_execution_point = Some(LastExecutionPoint::anchored(anchor, count));
        false
    }

    /// Forgets a removed message's claim on its anchor point.
    ///
    /// The entry goes once no stored message names the point, so the next
    /// message anchored there starts again at rank 1.
    pub(crate) fn release_anchor(&mut self, message: &Message) {
        let Some(lep) = &message.last_execution_point else {
            return;
        };
        let Some(entry) = self.anchors.get_mut(&lep.point) else {
            return;
        };
        entry.refs = entry.refs.saturating_sub(1);
        if entry.refs == 0 {
            self.anchors.remove(&lep.point);
        }
    }

    fn anchor_for(&self, message: &Message) -> PointTime {
        if let Some(paused) = &self.paused_at {
            if message.kind == MessageKind::Result {
                if let Some(paired) = message.parameters.first().and_then(|v| v.pause_point()) {
                    return paired;
                }
            }
            return paused.clone();
        }

        let last_visible_real = self
            .visible
            .last()
            .and_then(|id| self.arena.get(*id))
            .and_then(|m| m.execution_point.clone());
        if let Some(real) = last_visible_real {
            return real;
        }

        self.last_message_id
            .and_then(|id| self.arena.get(id))
            .and_then(|m| m.last_execution_point.as_ref())
            .map_or_else(PointTime::zero, |lep| PointTime::new(lep.point.clone(), lep.time))
    }
}
