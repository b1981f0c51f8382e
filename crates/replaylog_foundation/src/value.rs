//! The preview capability for message parameters.
//!
//! Message parameters are opaque handles owned by an external preview
//! subsystem. The engine only needs enough of them to run text search and to
//! refine the ordering anchor of evaluation results, which is what
//! [`ValuePreview`] exposes.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::point::PointTime;

/// Shared handle to a previewable value.
pub type ValueHandle = Arc<dyn ValuePreview>;

/// Read-only view of a message parameter.
pub trait ValuePreview: fmt::Debug + Send + Sync {
    /// Returns true if the value is a primitive scalar.
    fn is_primitive(&self) -> bool;

    /// Returns the scalar, for primitive values.
    fn primitive(&self) -> Option<Primitive>;

    /// Returns true if the value is an object with a preview.
    fn is_object(&self) -> bool;

    /// Returns the object's class name.
    fn class_name(&self) -> Option<String>;

    /// Stable identity used to detect cycles while walking previews.
    fn object_id(&self) -> Option<u64>;

    /// Returns the object's preview items (properties, elements, entries).
    fn preview_items(&self) -> Vec<ValueHandle>;

    /// The point this value was evaluated at, if it came from a pause.
    fn pause_point(&self) -> Option<PointTime> {
        None
    }
}

// =============================================================================
// Primitive
// =============================================================================

/// A primitive scalar value.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// `undefined`.
    Undefined,
    /// `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// A string.
    String(String),
    /// An arbitrary-precision integer, in decimal.
    BigInt(String),
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::BigInt(digits) => write!(f, "{digits}n"),
        }
    }
}

impl From<&str> for Primitive {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<f64> for Primitive {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Primitive {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl Primitive {
    /// Wraps the scalar in a shareable handle.
    #[must_use]
    pub fn into_handle(self) -> ValueHandle {
        Arc::new(self)
    }
}

impl ValuePreview for Primitive {
    fn is_primitive(&self) -> bool {
        true
    }

    fn primitive(&self) -> Option<Primitive> {
        Some(self.clone())
    }

    fn is_object(&self) -> bool {
        false
    }

    fn class_name(&self) -> Option<String> {
        None
    }

    fn object_id(&self) -> Option<u64> {
        None
    }

    fn preview_items(&self) -> Vec<ValueHandle> {
        Vec::new()
    }
}

// =============================================================================
// Object Preview
// =============================================================================

/// An object preview whose items are supplied once, possibly after creation.
///
/// Deferring the items allows cyclic object graphs to be described.
#[derive(Debug)]
pub struct ObjectPreview {
    object_id: u64,
    class_name: String,
    items: OnceLock<Vec<ValueHandle>>,
    pause_point: Option<PointTime>,
}

impl ObjectPreview {
    /// Creates an object preview with no items yet.
    #[must_use]
    pub fn new(object_id: u64, class_name: impl Into<String>) -> Self {
        Self {
            object_id,
            class_name: class_name.into(),
            items: OnceLock::new(),
            pause_point: None,
        }
    }

    /// Builder method to supply preview items up front.
    ///
    /// Items can be supplied once; the first call wins.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if items were already supplied.
    #[must_use]
    pub fn with_items(self, items: Vec<ValueHandle>) -> Self {
        let fresh = self.items.set(items).is_ok();
        debug_assert!(fresh, "preview items of object {} already set", self.object_id);
        self
    }

    /// Builder method to record the pause this value was evaluated in.
    #[must_use]
    pub fn with_pause_point(mut self, pause_point: PointTime) -> Self {
        self.pause_point = Some(pause_point);
        self
    }

    /// Supplies the preview items. Returns false if they were already set.
    pub fn set_items(&self, items: Vec<ValueHandle>) -> bool {
        self.items.set(items).is_ok()
    }

    /// Wraps the preview in a shareable handle.
    #[must_use]
    pub fn into_handle(self) -> ValueHandle {
        Arc::new(self)
    }
}

impl ValuePreview for ObjectPreview {
    fn is_primitive(&self) -> bool {
        false
    }

    fn primitive(&self) -> Option<Primitive> {
        None
    }

    fn is_object(&self) -> bool {
        true
    }

    fn class_name(&self) -> Option<String> {
        Some(self.class_name.clone())
    }

    fn object_id(&self) -> Option<u64> {
        Some(self.object_id)
    }

    fn preview_items(&self) -> Vec<ValueHandle> {
        self.items.get().cloned().unwrap_or_default()
    }

    fn pause_point(&self) -> Option<PointTime> {
        self.pause_point.clone()
    }
}
