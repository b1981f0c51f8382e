//! Integration tests for logpoint reconciliation
//!
//! Tests add, replace, and drop decisions.

use replaylog_engine::{LogpointIndex, LogpointKey, ReconcileOrigin, Reconciliation};
use replaylog_foundation::{EvalId, ExecutionPoint, LogpointId, Message, MessageId};

fn logpoint_message(id: u64, point: u64) -> Message {
    Message::log(MessageId::new(id), "lp")
        .with_logpoint("L")
        .at(ExecutionPoint::from(point), 0.0)
}

#[test]
fn first_message_is_added() {
    let index = LogpointIndex::new();
    assert_eq!(index.decide(&logpoint_message(1, 10)), Reconciliation::Add);
}

#[test]
fn same_key_replaces() {
    let mut index = LogpointIndex::new();
    index.record(&logpoint_message(1, 10));
    assert_eq!(
        index.decide(&logpoint_message(2, 10)),
        Reconciliation::Replace(MessageId::new(1))
    );
    assert_eq!(index.decide(&logpoint_message(3, 11)), Reconciliation::Add);
}

#[test]
fn removed_logpoint_drops() {
    let mut index = LogpointIndex::new();
    index.mark_removed(LogpointId::new("L"));
    assert_eq!(index.decide(&logpoint_message(1, 10)), Reconciliation::Drop);
}

#[test]
fn forgetting_allows_re_adding() {
    let mut index = LogpointIndex::new();
    index.record(&logpoint_message(1, 10));
    index.forget(|id| id == MessageId::new(1));
    assert!(index.is_empty());
    assert_eq!(index.decide(&logpoint_message(2, 10)), Reconciliation::Add);
}

#[test]
fn results_key_by_eval() {
    let result = Message::result(MessageId::new(4), EvalId::new(9));
    let key = LogpointKey::for_message(&result).unwrap();
    assert_eq!(key.origin, ReconcileOrigin::Eval(EvalId::new(9)));

    let command = Message::command(MessageId::new(3), EvalId::new(9), "x");
    assert!(LogpointKey::for_message(&command).is_none());
}
