//! Execution points and their numeric ordering.
//!
//! An execution point is a non-negative integer of unbounded width, carried
//! as a decimal string. Points are compared numerically: the string with more
//! digits is greater, and only strings of equal length are compared
//! lexicographically. This ordering is the basis of the global display order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Compares two decimal point strings numerically.
///
/// Digit counts are compared first (longer is greater); equal-length strings
/// compare lexicographically, which agrees with numeric order for digits.
/// Inputs are expected to carry no leading zeros.
#[must_use]
pub fn compare_points(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

// =============================================================================
// Execution Point
// =============================================================================

/// A validated, normalized execution point.
///
/// Leading zeros are stripped on parse so that equality and ordering agree
/// with the numeric value.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct ExecutionPoint(String);

impl ExecutionPoint {
    /// Parses a decimal point string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty or contains a non-digit.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_point(raw));
        }
        let trimmed = raw.trim_start_matches('0');
        if trimmed.is_empty() {
            Ok(Self::zero())
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// The point at the very start of execution.
    #[must_use]
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    /// Returns the decimal representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for ExecutionPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_points(&self.0, &other.0)
    }
}

impl PartialOrd for ExecutionPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for ExecutionPoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ExecutionPoint {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<ExecutionPoint> for String {
    fn from(point: ExecutionPoint) -> Self {
        point.0
    }
}

impl From<u64> for ExecutionPoint {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl fmt::Debug for ExecutionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExecutionPoint({})", self.0)
    }
}

impl fmt::Display for ExecutionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Point + Time
// =============================================================================

/// An execution point together with its wall-clock time in the recording.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointTime {
    /// The execution point.
    pub point: ExecutionPoint,
    /// Recording time in milliseconds.
    pub time: f64,
}

impl PointTime {
    /// Creates a new point/time pair.
    #[must_use]
    pub fn new(point: ExecutionPoint, time: f64) -> Self {
        Self { point, time }
    }

    /// The start of the recording.
    #[must_use]
    pub fn zero() -> Self {
        Self::new(ExecutionPoint::zero(), 0.0)
    }
}

/// The store-assigned ordering anchor of a message.
///
/// For messages with a real execution point this mirrors that point with a
/// `message_count` of zero. Otherwise it names the anchor the message was
/// placed after and its arrival rank among messages sharing that anchor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LastExecutionPoint {
    /// The anchor point.
    pub point: ExecutionPoint,
    /// Recording time of the anchor.
    pub time: f64,
    /// Relative arrival order among messages sharing `point`.
    pub message_count: u64,
}

impl LastExecutionPoint {
    /// Creates an anchor mirroring a real execution point.
    #[must_use]
    pub fn real(point: ExecutionPoint, time: f64) -> Self {
        Self {
            point,
            time,
            message_count: 0,
        }
    }

    /// Creates a synthesized anchor.
    #[must_use]
    pub fn anchored(anchor: PointTime, message_count: u64) -> Self {
        Self {
            point: anchor.point,
            time: anchor.time,
            message_count,
        }
    }
}
