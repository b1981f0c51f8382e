//! Integration tests for messages and value previews
//!
//! Tests message construction, kind predicates, and preview graphs.

use replaylog_foundation::{
    EvalId, ExecutionPoint, Frame, IdSequence, LogLevel, Message, MessageId, MessageKind,
    MessageSource, ObjectPreview, Primitive, ValuePreview,
};

// =============================================================================
// Construction
// =============================================================================

#[test]
fn constructors_set_kind_and_level() {
    let warning = Message::warning(MessageId::new(1), "careful");
    assert_eq!(warning.kind, MessageKind::Warning);
    assert_eq!(warning.level, LogLevel::Warn);

    let error = Message::error(MessageId::new(2), "boom");
    assert_eq!(error.level, LogLevel::Error);
}

#[test]
fn evaluations_come_from_script() {
    let command = Message::command(MessageId::new(1), EvalId::new(1), "1 + 1");
    assert_eq!(command.source, MessageSource::Javascript);
    assert_eq!(command.eval_id, Some(EvalId::new(1)));
    assert!(command.kind.is_evaluation());
}

#[test]
fn store_fields_start_empty() {
    let message = Message::log(MessageId::new(1), "x").at(ExecutionPoint::from(5), 0.5);
    assert!(message.group_id.is_none());
    assert!(message.last_execution_point.is_none());
    assert_eq!(message.real_point(), Some(&ExecutionPoint::from(5)));
    assert_eq!(message.message_count(), 0);
}

// =============================================================================
// Kind Predicates
// =============================================================================

#[test]
fn unfilterable_kinds() {
    for kind in [
        MessageKind::Command,
        MessageKind::Result,
        MessageKind::StartGroup,
        MessageKind::StartGroupCollapsed,
        MessageKind::NavigationMarker,
    ] {
        assert!(kind.is_unfilterable(), "{kind:?}");
    }
    assert!(!MessageKind::Log.is_unfilterable());
}

#[test]
fn node_module_frames() {
    assert!(Frame::new("/app/node_modules/lib/index.js", 1, 1).is_node_module());
    assert!(!Frame::new("/app/src/index.js", 1, 1).is_node_module());
}

// =============================================================================
// Ids
// =============================================================================

#[test]
fn id_sequence_pairs_command_and_result() {
    let mut ids = IdSequence::starting_at(10);
    let command = ids.next_id();
    let result = ids.next_id();
    assert_eq!(command.next(), result);
    assert_eq!(ids.peek(), MessageId::new(12));
}

// =============================================================================
// Value Previews
// =============================================================================

#[test]
fn primitives_render_like_script_values() {
    assert_eq!(Primitive::Number(f64::INFINITY).to_string(), "Infinity");
    assert_eq!(Primitive::BigInt("12".into()).to_string(), "12n");
    assert!(Primitive::Null.is_primitive());
}

#[test]
fn previews_may_form_cycles() {
    let object = std::sync::Arc::new(ObjectPreview::new(1, "Node"));
    let handle: replaylog_foundation::ValueHandle = object.clone();
    assert!(object.set_items(vec![handle.clone()]));
    assert_eq!(handle.preview_items().len(), 1);
    assert_eq!(handle.preview_items()[0].object_id(), Some(1));
}
