//! Integration tests for display ordering
//!
//! Tests numeric point ordering, anchored messages, and evaluations.

use replaylog_engine::Filters;
use replaylog_foundation::{EvalId, ExecutionPoint, IdSequence, LogLevel, Message, MessageId};
use replaylog_store::MessageStore;

fn point(n: u64) -> ExecutionPoint {
    ExecutionPoint::from(n)
}

fn visible(store: &MessageStore) -> Vec<u64> {
    store.visible_messages().iter().map(|m| m.value()).collect()
}

#[test]
fn out_of_order_points_sort_numerically() {
    let mut store = MessageStore::new();
    store.add_messages([Message::log(MessageId::new(1), "20").at(point(20), 2.0)]);
    store.add_messages([Message::log(MessageId::new(2), "5").at(point(5), 0.5)]);
    store.add_messages([Message::log(MessageId::new(3), "100").at(point(100), 10.0)]);
    let points: Vec<String> = store
        .visible_messages()
        .iter()
        .map(|id| store.message(*id).unwrap().real_point().unwrap().to_string())
        .collect();
    assert_eq!(points, vec!["5", "20", "100"]);
}

#[test]
fn huge_points_sort_by_magnitude() {
    let mut store = MessageStore::new();
    let huge: ExecutionPoint = "18446744073709551616000".parse().unwrap();
    store.add_messages([
        Message::log(MessageId::new(1), "huge").at(huge, 9.0),
        Message::log(MessageId::new(2), "small").at(point(9), 0.0),
    ]);
    assert_eq!(visible(&store), vec![2, 1]);
}

#[test]
fn equal_points_keep_arrival_order() {
    let mut store = MessageStore::new();
    store.add_messages([
        Message::log(MessageId::new(1), "a").at(point(7), 0.7),
        Message::log(MessageId::new(2), "b").at(point(7), 0.7),
        Message::log(MessageId::new(3), "c").at(point(7), 0.7),
    ]);
    assert_eq!(visible(&store), vec![1, 2, 3]);
}

#[test]
fn anchored_messages_follow_their_anchor() {
    let mut store = MessageStore::new();
    store.add_messages([
        Message::log(MessageId::new(1), "p10").at(point(10), 1.0),
        Message::log(MessageId::new(2), "anchored"),
        Message::log(MessageId::new(3), "p5").at(point(5), 0.5),
    ]);
    assert_eq!(visible(&store), vec![3, 1, 2]);
}

#[test]
fn evaluations_order_by_eval_then_kind() {
    let mut store = MessageStore::new();
    let mut ids = IdSequence::starting_at(1);
    store.add_messages([Message::log(ids.next_id(), "real").at(point(50), 5.0)]);
    store.set_paused(point(10), 1.0);

    let first = (ids.next_id(), ids.next_id());
    let second = (ids.next_id(), ids.next_id());
    store.add_messages([
        Message::result(second.1, EvalId::new(2)),
        Message::command(first.0, EvalId::new(1), "a"),
        Message::command(second.0, EvalId::new(2), "b"),
        Message::result(first.1, EvalId::new(1)),
    ]);
    assert_eq!(visible(&store), vec![2, 3, 4, 5, 1]);
}

#[test]
fn hidden_first_real_point_still_sorts_earlier_messages() {
    let mut store = MessageStore::new();
    store.set_filters(Filters::new().with_level(LogLevel::Log, false));
    store.add_messages([Message::warning(MessageId::new(1), "anchored at zero")]);
    store.set_paused(point(100), 10.0);
    store.add_messages([Message::warning(MessageId::new(2), "anchored at 100")]);
    store.set_paused(point(50), 5.0);
    store.add_messages([Message::warning(MessageId::new(3), "anchored at 50")]);
    assert_eq!(visible(&store), vec![1, 2, 3]);

    store.add_messages([Message::log(MessageId::new(4), "hidden").at(point(200), 20.0)]);
    assert!(store.has_seen_real_execution_point());
    assert_eq!(visible(&store), vec![1, 3, 2]);

    store.add_messages([Message::warning(MessageId::new(5), "real").at(point(10), 1.0)]);
    assert_eq!(visible(&store), vec![1, 5, 3, 2]);

    let incremental = visible(&store);
    store.set_filters(Filters::new().with_level(LogLevel::Log, false));
    assert_eq!(visible(&store), incremental);
}
