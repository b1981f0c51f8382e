//! Free-text and regex search over message content.
//!
//! The query is trimmed; a leading `-` turns it into an exclusion. A query
//! wrapped in slashes compiles as a case-insensitive multiline regex, and
//! anything else is a case-insensitive substring test. A malformed regex never
//! matches.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

use replaylog_foundation::{Frame, Message, ValueHandle};

/// Preview nesting walked before giving up on objects without identity.
pub const MAX_PREVIEW_DEPTH: usize = 64;

#[derive(Clone, Debug)]
enum Matcher {
    Substring(String),
    Regex(Regex),
    Never,
}

impl Matcher {
    fn matches(&self, haystack: &str) -> bool {
        match self {
            Self::Substring(needle) => haystack.to_lowercase().contains(needle.as_str()),
            Self::Regex(regex) => regex.is_match(haystack),
            Self::Never => false,
        }
    }
}

/// A compiled search query.
#[derive(Clone, Debug)]
pub struct SearchQuery {
    matcher: Matcher,
    exclude: bool,
}

impl SearchQuery {
    /// Compiles search text. Returns `None` when the text filters nothing.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut query = text.trim();
        let exclude = query.starts_with('-');
        if exclude {
            query = query[1..].trim_start();
        }
        if query.is_empty() {
            return None;
        }

        let matcher = match regex_body(query) {
            Some(pattern) => match RegexBuilder::new(pattern)
                .case_insensitive(true)
                .multi_line(true)
                .build()
            {
                Ok(regex) => Matcher::Regex(regex),
                Err(err) => {
                    tracing::debug!(pattern, %err, "malformed search regex never matches");
                    Matcher::Never
                }
            },
            None => Matcher::Substring(query.to_lowercase()),
        };

        Some(Self { matcher, exclude })
    }

    /// Returns true if this query excludes matching messages.
    #[must_use]
    pub const fn is_exclusion(&self) -> bool {
        self.exclude
    }

    /// Returns true if the query is a regex that failed to compile.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self.matcher, Matcher::Never)
    }

    /// Returns true if `message` passes the search filter.
    #[must_use]
    pub fn passes(&self, message: &Message) -> bool {
        self.matches(message) != self.exclude
    }

    /// Returns true if any searchable part of `message` matches.
    ///
    /// Parts are tested in display order and the first hit short-circuits.
    #[must_use]
    pub fn matches(&self, message: &Message) -> bool {
        let mut visited = HashSet::new();
        message
            .parameters
            .iter()
            .any(|param| self.matches_value(param, &mut visited, 0))
            || message
                .frame
                .as_ref()
                .is_some_and(|frame| self.matches_frame(frame))
            || message.request.as_ref().is_some_and(|request| {
                self.matcher.matches(&request.method) || self.matcher.matches(&request.url)
            })
            || message
                .stacktrace
                .iter()
                .any(|frame| self.matches_frame(frame))
            || message
                .text
                .as_ref()
                .is_some_and(|text| self.matcher.matches(text.searchable()))
            || message.notes.iter().any(|note| {
                note.frame
                    .as_ref()
                    .is_some_and(|frame| self.matches_frame(frame))
                    || self.matcher.matches(&note.body)
            })
            || message
                .prefix
                .as_ref()
                .is_some_and(|prefix| self.matcher.matches(&format!("{prefix}:")))
    }

    fn matches_frame(&self, frame: &Frame) -> bool {
        self.matcher.matches(&frame.to_string())
    }

    fn matches_value(&self, value: &ValueHandle, visited: &mut HashSet<u64>, depth: usize) -> bool {
        if value.is_primitive() {
            return value
                .primitive()
                .is_some_and(|scalar| self.matcher.matches(&scalar.to_string()));
        }
        if !value.is_object() {
            return false;
        }
        match value.object_id() {
            Some(object_id) => {
                if !visited.insert(object_id) {
                    return false;
                }
            }
            None if depth >= MAX_PREVIEW_DEPTH => {
                tracing::warn!("preview walk hit MAX_PREVIEW_DEPTH ({MAX_PREVIEW_DEPTH}), stopping");
                return false;
            }
            None => {}
        }
        if value
            .class_name()
            .is_some_and(|class| self.matcher.matches(&class))
        {
            return true;
        }
        value
            .preview_items()
            .iter()
            .any(|item| self.matches_value(item, visited, depth + 1))
    }
}

/// Returns the pattern inside `/.../`, if the query is slash-wrapped.
fn regex_body(query: &str) -> Option<&str> {
    if query.len() > 2 && query.starts_with('/') && query.ends_with('/') {
        Some(&query[1..query.len() - 1])
    } else {
        None
    }
}
