//! The message store.
//!
//! Incoming messages pass through the logpoint reconciler, group bookkeeping,
//! anchor assignment, and visibility evaluation, in that order. The visible
//! list stays sorted by execution point once any message with a real point
//! has been seen; before that it is kept in insertion order.

use std::collections::HashSet as StdHashSet;

use im::{HashMap, HashSet};

use replaylog_engine::{
    ActiveFilters, FilteredCounts, Filters, GroupAncestry, GroupCheck, HiddenCause, LogpointIndex,
    Reconciliation, SortKey, Visibility, VisibilityContext, visibility,
};
use replaylog_foundation::{
    ExecutionPoint, LogpointId, Message, MessageId, MessageKind, PointTime, Result,
};

use crate::anchor::AnchorCount;
use crate::arena::MessageArena;
use crate::config::StoreConfig;

// =============================================================================
// Message Store
// =============================================================================

/// The console message store.
///
/// Cloning is cheap for the indices, which are persistent maps, so a clone
/// serves as a snapshot of the whole console.
#[derive(Clone, Debug)]
pub struct MessageStore {
    pub(crate) config: StoreConfig,
    pub(crate) arena: MessageArena,
    pub(crate) visible: Vec<MessageId>,
    pub(crate) filtered_counts: FilteredCounts,
    pub(crate) open_ids: HashSet<MessageId>,
    pub(crate) groups: GroupAncestry,
    pub(crate) current_group: Option<MessageId>,
    pub(crate) logpoints: LogpointIndex,
    pub(crate) paused_at: Option<PointTime>,
    pub(crate) has_seen_real_point: bool,
    pub(crate) last_message_id: Option<MessageId>,
    /// Arrival ranks per anchor point, pruned as messages go.
    pub(crate) anchors: HashMap<ExecutionPoint, AnchorCount>,
    pub(crate) filters: ActiveFilters,
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageStore {
    /// Creates an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(StoreConfig::default())
    }

    /// Creates an empty store with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn try_new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: StoreConfig) -> Self {
        let filters = ActiveFilters::new(config.initial_filters.clone());
        Self {
            config,
            arena: MessageArena::default(),
            visible: Vec::new(),
            filtered_counts: FilteredCounts::new(),
            open_ids: HashSet::new(),
            groups: GroupAncestry::new(),
            current_group: None,
            logpoints: LogpointIndex::new(),
            paused_at: None,
            has_seen_real_point: false,
            last_message_id: None,
            anchors: HashMap::new(),
            filters,
        }
    }

    /// Returns a copy of the store sharing structure with this one.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    // -------------------------------------------------------------------------
    // Adding messages
    // -------------------------------------------------------------------------

    /// Applies a batch of incoming messages, in order.
    pub fn add_messages(&mut self, batch: impl IntoIterator<Item = Message>) {
        let batch = self.prepare_batch(batch.into_iter().collect());
        let incoming = batch.len();
        for message in batch {
            self.apply_message(message);
        }
        self.enforce_retention();
        tracing::trace!(
            incoming,
            stored = self.arena.len(),
            visible = self.visible.len(),
            "applied message batch"
        );
    }

    /// Drops messages that can never be stored and prunes oversized batches.
    ///
    /// `groupEnd`s are matched against the cursor as it will be after each
    /// preceding message of the batch; one with nothing left to close is a
    /// stray. If a retention cap applies and the batch alone holds more
    /// top-level messages than the cap, the oldest of those are pruned.
    fn prepare_batch(&self, batch: Vec<Message>) -> Vec<Message> {
        let mut depth = self
            .current_group
            .map_or(0, |group| self.groups.ancestors_of(group).len() + 1);
        let mut kept = Vec::with_capacity(batch.len());
        let mut top_level = Vec::with_capacity(batch.len());

        for message in batch {
            match message.kind {
                MessageKind::Null => continue,
                MessageKind::EndGroup => {
                    if depth == 0 {
                        tracing::debug!(id = %message.id, "discarding stray groupEnd");
                        continue;
                    }
                    depth -= 1;
                    top_level.push(false);
                }
                kind if kind.is_group_start() => {
                    let opens = !self.arena.contains(message.id)
                        && !message
                            .logpoint_id
                            .as_ref()
                            .is_some_and(|logpoint| self.logpoints.is_removed(logpoint));
                    if opens {
                        depth += 1;
                    }
                    top_level.push(false);
                }
                _ => top_level.push(depth == 0),
            }
            kept.push(message);
        }

        if let Some(cap) = self.config.max_messages {
            let prunable = top_level.iter().filter(|top| **top).count();
            if prunable > cap {
                let mut excess = prunable - cap;
                kept = kept
                    .into_iter()
                    .zip(top_level)
                    .filter(|(_, top)| {
                        if *top && excess > 0 {
                            excess -= 1;
                            false
                        } else {
                            true
                        }
                    })
                    .map(|(message, _)| message)
                    .collect();
                tracing::debug!(
                    pruned = prunable - cap,
                    cap,
                    "pruned batch beyond retention cap"
                );
            }
        }

        kept
    }

    fn apply_message(&mut self, mut message: Message) {
        match message.kind {
            MessageKind::Null => return,
            MessageKind::EndGroup => {
                self.current_group = self.groups.pop(self.current_group, |_| false);
                return;
            }
            _ => {}
        }

        if self.arena.contains(message.id) {
            tracing::debug!(id = %message.id, "ignoring re-delivered message");
            return;
        }

        match self.logpoints.decide(&message) {
            Reconciliation::Drop => {
                tracing::debug!(
                    id = %message.id,
                    logpoint = ?message.logpoint_id,
                    "dropping message from removed logpoint"
                );
                return;
            }
            Reconciliation::Replace(provisional) => {
                tracing::debug!(
                    %provisional,
                    replacement = %message.id,
                    "replacing provisional message"
                );
                self.remove_ids([provisional]);
            }
            Reconciliation::Add => {}
        }

        message.group_id = self.current_group;
        if message.kind.is_group_start() {
            self.groups.push(message.id, self.current_group);
            self.current_group = Some(message.id);
            if message.kind == MessageKind::StartGroup {
                self.open_ids.insert(message.id);
            }
        }

        let first_real_point = self.ensure_execution_point(&mut message);
        self.logpoints.record(&message);
        self.last_message_id = Some(message.id);

        let id = message.id;
        let outcome = visibility(&message, self.visibility_context(), GroupCheck::Enforce);
        self.arena.insert(message);

        match outcome {
            Visibility::Visible if first_real_point => self.visible.push(id),
            Visibility::Visible => self.insert_visible(id),
            Visibility::Hidden(cause) => self.filtered_counts.increment(cause),
        }
        // Entering sorted mode: the list so far is in arrival order.
        if first_real_point {
            self.resort();
        }
    }

    // -------------------------------------------------------------------------
    // Ordering
    // -------------------------------------------------------------------------

    fn order_key(&self, id: MessageId) -> (SortKey<'_>, u64) {
        match (self.arena.get(id), self.arena.slot(id)) {
            (Some(message), Some(slot)) => (SortKey::of(message), slot),
            _ => {
                debug_assert!(false, "visible message {id} missing from arena");
                (SortKey::default(), u64::MAX)
            }
        }
    }

    fn insert_visible(&mut self, id: MessageId) {
        if !self.has_seen_real_point {
            self.visible.push(id);
            return;
        }
        let key = self.order_key(id);
        let position = self
            .visible
            .partition_point(|other| self.order_key(*other) <= key);
        self.visible.insert(position, id);
    }

    /// Re-sorts the visible list by execution point.
    ///
    /// Does nothing until a message with a real execution point has arrived.
    pub(crate) fn resort(&mut self) {
        if !self.has_seen_real_point {
            return;
        }
        let mut visible = std::mem::take(&mut self.visible);
        visible.sort_by(|a, b| self.order_key(*a).cmp(&self.order_key(*b)));
        self.visible = visible;
        tracing::trace!(visible = self.visible.len(), "resorted visible messages");
    }

    // -------------------------------------------------------------------------
    // Groups
    // -------------------------------------------------------------------------

    /// Expands a message.
    ///
    /// For a group, descendants that now pass every check are spliced into
    /// the visible list directly after the group. Other messages only record
    /// their expanded state. Unknown ids are ignored.
    pub fn open_group(&mut self, id: MessageId) {
        let Some(message) = self.arena.get(id) else {
            return;
        };
        if self.open_ids.contains(&id) {
            return;
        }
        if !message.kind.is_group_start() {
            self.open_ids.insert(id);
            return;
        }

        let descendants = self.descendants_of(id);
        self.uncount(&descendants);
        self.open_ids.insert(id);

        let already_visible: StdHashSet<MessageId> = self.visible.iter().copied().collect();
        let mut revealed = Vec::new();
        for &descendant in &descendants {
            match self.visibility_of(descendant) {
                Some(Visibility::Visible) if !already_visible.contains(&descendant) => {
                    revealed.push(descendant);
                }
                Some(Visibility::Hidden(cause)) => self.filtered_counts.increment(cause),
                _ => {}
            }
        }

        if let Some(position) = self.visible.iter().position(|v| *v == id) {
            let at = position + 1;
            self.visible.splice(at..at, revealed);
            self.resort();
        } else {
            debug_assert!(revealed.is_empty(), "revealed children of hidden group {id}");
        }
    }

    /// Collapses a message.
    ///
    /// For a group, every visible descendant leaves the visible list; the
    /// messages themselves stay stored. Unknown ids are ignored.
    pub fn close_group(&mut self, id: MessageId) {
        let Some(message) = self.arena.get(id) else {
            return;
        };
        if !self.open_ids.contains(&id) {
            return;
        }
        if !message.kind.is_group_start() {
            self.open_ids.remove(&id);
            return;
        }

        let descendants = self.descendants_of(id);
        self.uncount(&descendants);
        self.open_ids.remove(&id);
        self.recount(&descendants);

        let arena = &self.arena;
        let groups = &self.groups;
        self.visible.retain(|visible| {
            !arena
                .get(*visible)
                .is_some_and(|m| groups.is_within(m.group_id, id))
        });
    }

    /// Ids of every message nested anywhere under `group`, in insertion order.
    fn descendants_of(&self, group: MessageId) -> Vec<MessageId> {
        self.arena
            .iter()
            .filter(|m| self.groups.is_within(m.group_id, group))
            .map(|m| m.id)
            .collect()
    }

    /// Removes the filtered-count contribution of `ids`.
    pub(crate) fn uncount(&mut self, ids: &[MessageId]) {
        for &id in ids {
            if let Some(Visibility::Hidden(cause)) = self.visibility_of(id) {
                self.filtered_counts.decrement(cause);
            }
        }
    }

    /// Adds the filtered-count contribution of `ids`.
    fn recount(&mut self, ids: &[MessageId]) {
        for &id in ids {
            if let Some(Visibility::Hidden(cause)) = self.visibility_of(id) {
                self.filtered_counts.increment(cause);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Filters
    // -------------------------------------------------------------------------

    /// Replaces the filter state and recomputes visibility for every message.
    pub fn set_filters(&mut self, filters: Filters) {
        self.filters = ActiveFilters::new(filters);
        self.recompute_visibility();
    }

    /// Restores the configured initial filters, text included.
    pub fn clear_all_filters(&mut self) {
        self.set_filters(self.config.initial_filters.clone());
    }

    /// Re-enables every level filter, keeping search text and `node_modules`.
    pub fn reset_default_filters(&mut self) {
        let filters = self.filters.filters().clone().with_default_levels();
        self.set_filters(filters);
    }

    fn recompute_visibility(&mut self) {
        let ctx = self.visibility_context();
        let mut visible = Vec::new();
        let mut counts = FilteredCounts::new();
        for message in self.arena.iter() {
            match visibility(message, ctx, GroupCheck::Enforce) {
                Visibility::Visible => visible.push(message.id),
                Visibility::Hidden(cause) => counts.increment(cause),
            }
        }
        self.visible = visible;
        self.filtered_counts = counts;
        self.resort();
        tracing::trace!(
            visible = self.visible.len(),
            filtered = self.filtered_counts.global,
            "recomputed visibility"
        );
    }

    // -------------------------------------------------------------------------
    // Pausing
    // -------------------------------------------------------------------------

    /// Records the point the user is paused at.
    ///
    /// Returns false, changing nothing, if already paused there.
    pub fn set_paused(&mut self, point: ExecutionPoint, time: f64) -> bool {
        let paused = PointTime::new(point, time);
        if self.paused_at.as_ref() == Some(&paused) {
            return false;
        }
        self.paused_at = Some(paused);
        true
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub(crate) fn visibility_context(&self) -> VisibilityContext<'_> {
        VisibilityContext {
            filters: &self.filters,
            open_groups: &self.open_ids,
            groups: &self.groups,
        }
    }

    /// Returns the ids to render, in display order.
    #[must_use]
    pub fn visible_messages(&self) -> &[MessageId] {
        &self.visible
    }

    /// Returns a stored message.
    #[must_use]
    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.arena.get(id)
    }

    /// Iterates stored messages in insertion order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.arena.iter()
    }

    /// Returns the number of stored messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns true if no messages are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Returns per-cause counts of filtered messages.
    #[must_use]
    pub fn filtered_counts(&self) -> FilteredCounts {
        self.filtered_counts
    }

    /// Returns how many stored messages are hidden for `cause`.
    #[must_use]
    pub fn filtered_count(&self, cause: HiddenCause) -> usize {
        self.filtered_counts.get(cause)
    }

    /// Returns true if the message is expanded.
    #[must_use]
    pub fn is_group_open(&self, id: MessageId) -> bool {
        self.open_ids.contains(&id)
    }

    /// Evaluates a stored message's visibility against the current state.
    #[must_use]
    pub fn visibility_of(&self, id: MessageId) -> Option<Visibility> {
        let message = self.arena.get(id)?;
        Some(visibility(
            message,
            self.visibility_context(),
            GroupCheck::Enforce,
        ))
    }

    /// Returns a group's ancestors, innermost first.
    #[must_use]
    pub fn group_ancestors(&self, id: MessageId) -> &[MessageId] {
        self.groups.ancestors_of(id)
    }

    /// Returns the group new messages are nested under.
    #[must_use]
    pub fn current_group(&self) -> Option<MessageId> {
        self.current_group
    }

    /// Returns the most recently inserted message still stored.
    #[must_use]
    pub fn last_message_id(&self) -> Option<MessageId> {
        self.last_message_id
    }

    /// Returns the point the user is paused at.
    #[must_use]
    pub fn paused_at(&self) -> Option<&PointTime> {
        self.paused_at.as_ref()
    }

    /// Returns true once any message with a real execution point has arrived.
    #[must_use]
    pub fn has_seen_real_execution_point(&self) -> bool {
        self.has_seen_real_point
    }

    /// Returns true if messages from this logpoint are dropped on arrival.
    #[must_use]
    pub fn is_logpoint_removed(&self, logpoint: &LogpointId) -> bool {
        self.logpoints.is_removed(logpoint)
    }

    /// Returns the active filter state.
    #[must_use]
    pub fn filters(&self) -> &Filters {
        self.filters.filters()
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}
