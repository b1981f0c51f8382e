//! Integration tests for removal and retention
//!
//! Tests clears, evaluation removal, and cap enforcement.

use replaylog_foundation::{EvalId, IdSequence, Message, MessageId};
use replaylog_store::{MessageStore, StoreConfig};

fn visible(store: &MessageStore) -> Vec<u64> {
    store.visible_messages().iter().map(|m| m.value()).collect()
}

// =============================================================================
// Clearing
// =============================================================================

#[test]
fn clear_resets_messages() {
    let mut store = MessageStore::new();
    store.add_messages([
        Message::start_group(MessageId::new(1), "open"),
        Message::log(MessageId::new(2), "child"),
    ]);
    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.current_group(), None);
    assert_eq!(store.last_message_id(), None);

    store.add_messages([Message::log(MessageId::new(3), "fresh")]);
    assert_eq!(store.message(MessageId::new(3)).unwrap().group_id, None);
}

#[test]
fn clear_evaluations_keeps_logs() {
    let mut store = MessageStore::new();
    let mut ids = IdSequence::new();
    let command = ids.next_id();
    let result = ids.next_id();
    let log = ids.next_id();
    store.add_messages([
        Message::command(command, EvalId::new(1), "x"),
        Message::result(result, EvalId::new(1)),
        Message::log(log, "kept"),
    ]);
    store.clear_evaluations();
    assert_eq!(store.visible_messages(), &[log]);
}

#[test]
fn clear_evaluation_uses_following_id() {
    let mut store = MessageStore::new();
    store.add_messages([
        Message::command(MessageId::new(10), EvalId::new(1), "a"),
        Message::result(MessageId::new(11), EvalId::new(1)),
        Message::command(MessageId::new(12), EvalId::new(2), "b"),
    ]);
    store.clear_evaluation(MessageId::new(12));
    assert_eq!(visible(&store), vec![10, 11]);
    store.clear_evaluation(MessageId::new(10));
    assert!(store.is_empty());
}

#[test]
fn duplicate_delivery_is_ignored() {
    let mut store = MessageStore::new();
    store.add_messages([Message::log(MessageId::new(1), "first")]);
    store.add_messages([Message::log(MessageId::new(1), "again")]);
    assert_eq!(store.len(), 1);
    assert_eq!(visible(&store), vec![1]);
}

// =============================================================================
// Retention
// =============================================================================

#[test]
fn unbounded_store_keeps_everything() {
    let mut store = MessageStore::try_new(StoreConfig::unbounded()).unwrap();
    store.add_messages((0..20_000).map(|n| Message::log(MessageId::new(n), "m")));
    assert_eq!(store.len(), 20_000);
}

#[test]
fn cap_applies_across_batches() {
    let mut store = MessageStore::try_new(StoreConfig::new().with_max_messages(10)).unwrap();
    for n in 0..25 {
        store.add_messages([Message::log(MessageId::new(n), "m")]);
    }
    assert_eq!(store.len(), 10);
    assert_eq!(visible(&store), (15..25).collect::<Vec<_>>());
}

#[test]
fn open_group_is_never_evicted() {
    let mut store = MessageStore::try_new(StoreConfig::new().with_max_messages(2)).unwrap();
    store.add_messages([Message::start_group(MessageId::new(1), "live")]);
    for n in 2..6 {
        store.add_messages([Message::log(MessageId::new(n), "child")]);
    }
    assert!(store.message(MessageId::new(1)).is_some());
    assert_eq!(store.current_group(), Some(MessageId::new(1)));
}
