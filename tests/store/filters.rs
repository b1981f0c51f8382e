//! Integration tests for filtering
//!
//! Tests filter recomputation and filtered-message counts.

use replaylog_engine::{Filters, HiddenCause, LevelFilters};
use replaylog_foundation::{Frame, LogLevel, Message, MessageId};
use replaylog_store::{MessageStore, StoreConfig};

fn id(n: u64) -> MessageId {
    MessageId::new(n)
}

fn visible(store: &MessageStore) -> Vec<u64> {
    store.visible_messages().iter().map(|m| m.value()).collect()
}

fn mixed_store() -> MessageStore {
    let mut store = MessageStore::new();
    store.add_messages([
        Message::log(id(1), "starting up"),
        Message::warning(id(2), "disk almost full"),
        Message::error(id(3), "request failed"),
        Message::log(id(4), "vendor noise")
            .with_frame(Frame::new("/app/node_modules/vendor.js", 3, 1)),
        Message::log(id(5), "shutting down").with_level(LogLevel::Debug),
    ]);
    store
}

#[test]
fn node_modules_counted_on_arrival() {
    let store = mixed_store();
    assert_eq!(visible(&store), vec![1, 2, 3, 5]);
    assert_eq!(store.filtered_count(HiddenCause::NodeModules), 1);
}

#[test]
fn level_counts_are_per_level() {
    let mut store = mixed_store();
    store.set_filters(Filters::new().with_levels(LevelFilters::none()));
    assert_eq!(visible(&store), Vec::<u64>::new());
    assert_eq!(store.filtered_count(HiddenCause::Level(LogLevel::Log)), 2);
    assert_eq!(store.filtered_count(HiddenCause::Level(LogLevel::Warn)), 1);
    assert_eq!(store.filtered_count(HiddenCause::Level(LogLevel::Error)), 1);
    assert_eq!(store.filtered_count(HiddenCause::Level(LogLevel::Debug)), 1);
    assert_eq!(store.filtered_count(HiddenCause::NodeModules), 0);
    assert_eq!(store.filtered_counts().global, 5);
}

#[test]
fn text_filter_counts_text() {
    let mut store = mixed_store();
    store.set_filters(Filters::new().with_text("/^s/"));
    assert_eq!(visible(&store), vec![1, 5]);
    assert_eq!(store.filtered_count(HiddenCause::Text), 2);
}

#[test]
fn exclusion_filter() {
    let mut store = mixed_store();
    store.set_filters(Filters::new().with_text("-down"));
    assert_eq!(visible(&store), vec![1, 2, 3]);
}

#[test]
fn new_messages_respect_active_filters() {
    let mut store = MessageStore::new();
    store.set_filters(Filters::new().with_text("keep"));
    store.add_messages([Message::log(id(1), "keep me"), Message::log(id(2), "drop me")]);
    assert_eq!(visible(&store), vec![1]);
    assert_eq!(store.filtered_count(HiddenCause::Text), 1);
}

#[test]
fn clear_all_filters_restores_configured_filters() {
    let config = StoreConfig::new().with_initial_filters(Filters::new().with_node_modules(true));
    let mut store = MessageStore::try_new(config).unwrap();
    store.add_messages([
        Message::log(id(1), "dep").with_frame(Frame::new("/node_modules/a.js", 1, 1)),
    ]);
    assert_eq!(visible(&store), vec![1]);
    store.set_filters(Filters::new());
    assert!(visible(&store).is_empty());
    store.clear_all_filters();
    assert_eq!(visible(&store), vec![1]);
}

#[test]
fn reset_defaults_keeps_text_and_node_modules() {
    let mut store = mixed_store();
    store.set_filters(
        Filters::new()
            .with_levels(LevelFilters::none())
            .with_text("s"),
    );
    store.reset_default_filters();
    assert!(store.filters().levels.allows(LogLevel::Warn));
    assert_eq!(store.filters().text, "s");
    assert!(!store.filters().node_modules);
}

#[test]
fn grouped_hidden_messages_are_not_counted() {
    let mut store = MessageStore::new();
    store.add_messages([
        Message::start_group_collapsed(id(1), "g"),
        Message::warning(id(2), "nested warning"),
        Message::end_group(id(3)),
    ]);
    assert_eq!(store.filtered_counts().global, 0);
    store.set_filters(Filters::new().with_level(LogLevel::Warn, false));
    assert_eq!(store.filtered_counts().global, 0);
    store.open_group(id(1));
    assert_eq!(store.filtered_count(HiddenCause::Level(LogLevel::Warn)), 1);
    assert_eq!(visible(&store), vec![1]);
    store.close_group(id(1));
    assert_eq!(store.filtered_counts().global, 0);
}
