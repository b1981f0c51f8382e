//! Nesting of console groups.
//!
//! Groups form a forest keyed by the id of the message that opened them. Each
//! group records its full ancestor chain, innermost first, so visibility checks
//! never need to walk parent pointers.

use im::HashMap;

use replaylog_foundation::MessageId;

/// The forest of open and closed console groups.
#[derive(Clone, Debug, Default)]
pub struct GroupAncestry {
    /// Group id to its ancestor group ids, innermost first.
    ancestors: HashMap<MessageId, Vec<MessageId>>,
}

impl GroupAncestry {
    /// Creates an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a group opened while `cursor` was the current group.
    ///
    /// Returns the recorded ancestor chain.
    pub fn push(&mut self, group: MessageId, cursor: Option<MessageId>) -> Vec<MessageId> {
        let chain = self.enclosing(cursor);
        self.ancestors.insert(group, chain.clone());
        chain
    }

    /// Computes the cursor after a `groupEnd` closes `cursor`.
    ///
    /// The new cursor is the innermost ancestor for which `skip` is false.
    #[must_use]
    pub fn pop(
        &self,
        cursor: Option<MessageId>,
        skip: impl Fn(MessageId) -> bool,
    ) -> Option<MessageId> {
        let cursor = cursor?;
        self.ancestors_of(cursor)
            .iter()
            .copied()
            .find(|id| !skip(*id))
    }

    /// Returns the ancestors of a group, innermost first.
    ///
    /// Unknown ids have no ancestors.
    #[must_use]
    pub fn ancestors_of(&self, group: MessageId) -> &[MessageId] {
        self.ancestors.get(&group).map_or(&[], Vec::as_slice)
    }

    /// Returns every group enclosing a message nested directly under `group_id`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `group_id` names a group that was never
    /// recorded, which means the store's indices have diverged.
    #[must_use]
    pub fn enclosing(&self, group_id: Option<MessageId>) -> Vec<MessageId> {
        let Some(group) = group_id else {
            return Vec::new();
        };
        let Some(ancestors) = self.ancestors.get(&group) else {
            debug_assert!(false, "group {group} missing from ancestry");
            tracing::error!(%group, "group missing from ancestry; treating as top-level");
            return Vec::new();
        };
        let mut chain = Vec::with_capacity(ancestors.len() + 1);
        chain.push(group);
        chain.extend_from_slice(ancestors);
        chain
    }

    /// Returns true if `target` encloses a message nested under `group_id`.
    #[must_use]
    pub fn is_within(&self, group_id: Option<MessageId>, target: MessageId) -> bool {
        match group_id {
            None => false,
            Some(group) if group == target => true,
            Some(group) => self.ancestors_of(group).contains(&target),
        }
    }

    /// Returns true if `id` opened a group.
    #[must_use]
    pub fn contains(&self, id: MessageId) -> bool {
        self.ancestors.contains_key(&id)
    }

    /// Forgets a group.
    pub fn remove(&mut self, id: MessageId) {
        self.ancestors.remove(&id);
    }

    /// Forgets every group.
    pub fn clear(&mut self) {
        self.ancestors.clear();
    }

    /// Returns the number of recorded groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ancestors.len()
    }

    /// Returns true if no groups are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ancestors.is_empty()
    }
}
