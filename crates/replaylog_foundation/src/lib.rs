//! Execution points, identifiers, and message records for replaylog.
//!
//! This crate provides:
//! - [`ExecutionPoint`] - Arbitrary-precision positions in a replayed execution
//! - [`compare_points`] - Numeric ordering over decimal point strings
//! - [`Message`] - The console message record and its [`MessageKind`]
//! - [`ValuePreview`] - The capability used to search message parameters
//! - [`Error`] - Error types for parsing and configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;
pub mod message;
pub mod point;
pub mod value;

pub use error::{Error, ErrorKind, Result};
pub use ids::{EvalId, IdSequence, LogpointId, MessageId};
pub use message::{
    Frame, LogLevel, Message, MessageKind, MessageSource, MessageText, NetworkRequest, Note,
};
pub use point::{ExecutionPoint, LastExecutionPoint, PointTime, compare_points};
pub use value::{ObjectPreview, Primitive, ValueHandle, ValuePreview};
