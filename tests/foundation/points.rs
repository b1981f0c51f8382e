//! Integration tests for execution points
//!
//! Tests numeric-string comparison, parsing, and anchors.

use std::cmp::Ordering;

use replaylog_foundation::{ExecutionPoint, LastExecutionPoint, PointTime, compare_points};

// =============================================================================
// Comparison
// =============================================================================

#[test]
fn length_decides_before_digits() {
    assert_eq!(compare_points("99", "100"), Ordering::Less);
    assert_eq!(compare_points("1000", "999"), Ordering::Greater);
}

#[test]
fn equal_length_compares_digits() {
    assert_eq!(compare_points("123", "124"), Ordering::Less);
    assert_eq!(compare_points("500", "500"), Ordering::Equal);
}

#[test]
fn points_beyond_u64_compare_correctly() {
    let big = "340282366920938463463374607431768211455";
    let bigger = "340282366920938463463374607431768211456";
    assert_eq!(compare_points(big, bigger), Ordering::Less);
}

#[test]
fn sorting_points_is_numeric() {
    let mut points: Vec<ExecutionPoint> = ["20", "5", "100", "0"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    points.sort();
    let sorted: Vec<&str> = points.iter().map(ExecutionPoint::as_str).collect();
    assert_eq!(sorted, vec!["0", "5", "20", "100"]);
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn leading_zeros_are_normalized() {
    let point = ExecutionPoint::parse("000042").unwrap();
    assert_eq!(point.as_str(), "42");
    assert_eq!(point, ExecutionPoint::from(42));
    assert_eq!(ExecutionPoint::parse("000").unwrap(), ExecutionPoint::zero());
}

#[test]
fn display_is_the_digits() {
    assert_eq!(ExecutionPoint::from(7).to_string(), "7");
}

// =============================================================================
// Anchors
// =============================================================================

#[test]
fn real_anchor_has_zero_count() {
    let anchor = LastExecutionPoint::real(ExecutionPoint::from(9), 1.5);
    assert_eq!(anchor.message_count, 0);
    assert_eq!(anchor.time, 1.5);
}

#[test]
fn synthesized_anchor_keeps_point_and_time() {
    let anchor = LastExecutionPoint::anchored(PointTime::new(ExecutionPoint::from(3), 0.25), 4);
    assert_eq!(anchor.point, ExecutionPoint::from(3));
    assert_eq!(anchor.time, 0.25);
    assert_eq!(anchor.message_count, 4);
}
