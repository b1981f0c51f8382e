//! Insertion-ordered storage of messages.

use im::{HashMap, OrdMap};

use replaylog_foundation::{Message, MessageId};

/// Messages keyed by id, iterated in insertion order.
///
/// Each insert takes the next slot number, so slots double as the
/// insertion-order tiebreak for sorting.
#[derive(Clone, Debug, Default)]
pub(crate) struct MessageArena {
    by_slot: OrdMap<u64, Message>,
    slots: HashMap<MessageId, u64>,
    next_slot: u64,
}

impl MessageArena {
    pub(crate) fn insert(&mut self, message: Message) {
        let slot = self.next_slot;
        self.next_slot += 1;
        if let Some(stale) = self.slots.insert(message.id, slot) {
            self.by_slot.remove(&stale);
        }
        self.by_slot.insert(slot, message);
    }

    pub(crate) fn remove(&mut self, id: MessageId) -> Option<Message> {
        let slot = self.slots.remove(&id)?;
        self.by_slot.remove(&slot)
    }

    pub(crate) fn get(&self, id: MessageId) -> Option<&Message> {
        self.slots.get(&id).and_then(|slot| self.by_slot.get(slot))
    }

    pub(crate) fn slot(&self, id: MessageId) -> Option<u64> {
        self.slots.get(&id).copied()
    }

    pub(crate) fn contains(&self, id: MessageId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Iterates messages oldest first.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Message> {
        self.by_slot.values()
    }

    pub(crate) fn last_id(&self) -> Option<MessageId> {
        self.by_slot.get_max().map(|(_, message)| message.id)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn clear(&mut self) {
        self.by_slot.clear();
        self.slots.clear();
    }
}
