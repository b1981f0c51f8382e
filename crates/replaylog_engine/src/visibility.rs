//! Per-message visibility under the active filters and group state.

use im::HashSet;

use replaylog_foundation::{Message, MessageId};

use crate::filter::{Filters, HiddenCause};
use crate::group::GroupAncestry;
use crate::search::SearchQuery;

// =============================================================================
// Active Filters
// =============================================================================

/// Filter state with its search text compiled.
#[derive(Clone, Debug, Default)]
pub struct ActiveFilters {
    filters: Filters,
    search: Option<SearchQuery>,
}

impl ActiveFilters {
    /// Compiles a filter state.
    #[must_use]
    pub fn new(filters: Filters) -> Self {
        let search = SearchQuery::parse(&filters.text);
        Self { filters, search }
    }

    /// Returns the raw filter state.
    #[must_use]
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Returns the compiled search query, if the text filters anything.
    #[must_use]
    pub fn search(&self) -> Option<&SearchQuery> {
        self.search.as_ref()
    }
}

impl From<Filters> for ActiveFilters {
    fn from(filters: Filters) -> Self {
        Self::new(filters)
    }
}

// =============================================================================
// Visibility
// =============================================================================

/// The outcome of a visibility check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    /// The message should be rendered.
    Visible,
    /// The message is hidden, and why.
    Hidden(HiddenCause),
}

impl Visibility {
    /// Returns true if visible.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }

    /// Returns the hidden cause, if hidden.
    #[must_use]
    pub const fn cause(self) -> Option<HiddenCause> {
        match self {
            Self::Visible => None,
            Self::Hidden(cause) => Some(cause),
        }
    }
}

/// Whether the closed-group check runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupCheck {
    /// Hide messages under any collapsed group.
    Enforce,
    /// Ignore group state; evaluate filters only.
    Skip,
}

/// Borrowed store state that visibility depends on.
#[derive(Clone, Copy, Debug)]
pub struct VisibilityContext<'a> {
    /// Active filters.
    pub filters: &'a ActiveFilters,
    /// Ids whose groups are expanded.
    pub open_groups: &'a HashSet<MessageId>,
    /// Group nesting.
    pub groups: &'a GroupAncestry,
}

/// Evaluates whether `message` should currently be rendered.
///
/// Checks run in a fixed order so the reported cause is stable: collapsed
/// groups, unfilterable kinds, level, `node_modules`, and search text last.
#[must_use]
pub fn visibility(message: &Message, ctx: VisibilityContext<'_>, check: GroupCheck) -> Visibility {
    if check == GroupCheck::Enforce
        && ctx
            .groups
            .enclosing(message.group_id)
            .iter()
            .any(|group| !ctx.open_groups.contains(group))
    {
        return Visibility::Hidden(HiddenCause::ClosedGroup);
    }

    if message.kind.is_unfilterable() {
        return Visibility::Visible;
    }

    let filters = ctx.filters.filters();
    if message.kind.is_log_type()
        && message.source.is_script_call()
        && !filters.levels.allows(message.level)
    {
        return Visibility::Hidden(HiddenCause::Level(message.level));
    }

    if !filters.node_modules && message.frame.as_ref().is_some_and(|f| f.is_node_module()) {
        return Visibility::Hidden(HiddenCause::NodeModules);
    }

    if let Some(search) = ctx.filters.search() {
        if !search.passes(message) {
            return Visibility::Hidden(HiddenCause::Text);
        }
    }

    Visibility::Visible
}
