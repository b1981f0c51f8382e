//! Removing messages: explicit clears, supersession, and retention.

use std::collections::{HashMap, HashSet};

use replaylog_foundation::{LogpointId, MessageId, MessageKind};

use crate::store::MessageStore;

impl MessageStore {
    /// Removes messages and everything nested under removed groups.
    ///
    /// Returns the number of messages removed.
    pub(crate) fn remove_ids(&mut self, ids: impl IntoIterator<Item = MessageId>) -> usize {
        let mut doomed: HashSet<MessageId> =
            ids.into_iter().filter(|id| self.arena.contains(*id)).collect();
        if doomed.is_empty() {
            return 0;
        }

        let heads: Vec<MessageId> = doomed
            .iter()
            .copied()
            .filter(|id| self.groups.contains(*id))
            .collect();
        if !heads.is_empty() {
            let nested: Vec<MessageId> = self
                .arena
                .iter()
                .filter(|m| heads.iter().any(|head| self.groups.is_within(m.group_id, *head)))
                .map(|m| m.id)
                .collect();
            doomed.extend(nested);
        }

        let doomed_list: Vec<MessageId> = doomed.iter().copied().collect();
        self.uncount(&doomed_list);

        if let Some(cursor) = self.current_group {
            if doomed.contains(&cursor) {
                self.current_group = self.groups.pop(Some(cursor), |g| doomed.contains(&g));
            }
        }

        for &id in &doomed_list {
            if let Some(message) = self.arena.remove(id) {
                self.release_anchor(&message);
            }
            self.open_ids.remove(&id);
            self.groups.remove(id);
        }
        self.visible.retain(|id| !doomed.contains(id));
        self.logpoints.forget(|id| doomed.contains(&id));

        if self.last_message_id.is_some_and(|id| doomed.contains(&id)) {
            self.last_message_id = self.arena.last_id();
        }

        doomed_list.len()
    }

    /// Removes every console evaluation command and result.
    pub fn clear_evaluations(&mut self) {
        let evaluations: Vec<MessageId> = self
            .arena
            .iter()
            .filter(|m| m.kind.is_evaluation())
            .map(|m| m.id)
            .collect();
        let removed = self.remove_ids(evaluations);
        tracing::debug!(removed, "cleared evaluations");
    }

    /// Removes one console evaluation: the command and the result after it.
    ///
    /// Ids that do not name a command are ignored.
    pub fn clear_evaluation(&mut self, command_id: MessageId) {
        if self.arena.get(command_id).map(|m| m.kind) != Some(MessageKind::Command) {
            return;
        }
        let result_id = command_id.next();
        let mut ids = vec![command_id];
        if self.arena.get(result_id).map(|m| m.kind) == Some(MessageKind::Result) {
            ids.push(result_id);
        }
        self.remove_ids(ids);
    }

    /// Removes every message from a logpoint and drops its future messages.
    pub fn clear_logpoint(&mut self, logpoint: &LogpointId) {
        self.logpoints.mark_removed(logpoint.clone());
        let matching: Vec<MessageId> = self
            .arena
            .iter()
            .filter(|m| m.logpoint_id.as_ref() == Some(logpoint))
            .map(|m| m.id)
            .collect();
        let removed = self.remove_ids(matching);
        tracing::debug!(%logpoint, removed, "cleared logpoint");
    }

    /// Removes every stored message.
    ///
    /// Removed logpoints, the pause point, the filters, and the sorted mode
    /// survive.
    pub fn clear(&mut self) {
        let removed = self.arena.len();
        self.arena.clear();
        self.visible.clear();
        self.filtered_counts = Default::default();
        self.open_ids.clear();
        self.groups.clear();
        self.current_group = None;
        self.logpoints.clear_keys();
        self.last_message_id = None;
        self.anchors.clear();
        tracing::debug!(removed, "cleared console");
    }

    /// Evicts the oldest top-level messages until the cap is met.
    ///
    /// A group is evicted together with everything nested under it. Groups
    /// still receiving messages are kept, so the store may hold more than the
    /// cap until they end.
    pub(crate) fn enforce_retention(&mut self) {
        let Some(cap) = self.config.max_messages else {
            return;
        };
        let total = self.arena.len();
        if total <= cap {
            return;
        }
        let mut excess = total - cap;

        let mut footprint: HashMap<MessageId, usize> = HashMap::new();
        for message in self.arena.iter() {
            for group in self.groups.enclosing(message.group_id) {
                *footprint.entry(group).or_default() += 1;
            }
        }

        let receiving = self.groups.enclosing(self.current_group);
        let mut doomed = Vec::new();
        for message in self.arena.iter() {
            if excess == 0 {
                break;
            }
            if message.group_id.is_some() || receiving.contains(&message.id) {
                continue;
            }
            let size = 1 + footprint.get(&message.id).copied().unwrap_or(0);
            excess = excess.saturating_sub(size);
            doomed.push(message.id);
        }

        if doomed.is_empty() {
            return;
        }
        let evicted = self.remove_ids(doomed);
        tracing::debug!(evicted, cap, "evicted messages beyond retention cap");
    }
}
