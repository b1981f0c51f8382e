//! The console message store for replaylog.
//!
//! [`MessageStore`] owns every index over the console: the insertion-ordered
//! message arena, the visible display list, group nesting and open state,
//! the logpoint supersession index, and filtered-message counts. Each public
//! operation is one complete transition; collaborators from
//! `replaylog_engine` decide, and the store applies.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod anchor;
mod arena;
pub mod config;
mod removal;
pub mod store;

pub use config::StoreConfig;
pub use store::MessageStore;
