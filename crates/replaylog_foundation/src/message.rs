//! The console message record.
//!
//! A [`Message`] is immutable once the store has inserted it, apart from the
//! two store-assigned fields: `group_id` and `last_execution_point`.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::{EvalId, LogpointId, MessageId};
use crate::point::{ExecutionPoint, LastExecutionPoint, PointTime};
use crate::value::ValueHandle;

// =============================================================================
// Message Kind
// =============================================================================

/// The kind of a console message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MessageKind {
    /// `console.log` and friends.
    Log,
    /// A warning.
    Warning,
    /// An error or uncaught exception.
    Error,
    /// `console.trace`.
    Trace,
    /// `console.group`, expanded by default.
    StartGroup,
    /// `console.groupCollapsed`, collapsed by default.
    StartGroupCollapsed,
    /// `console.groupEnd`.
    EndGroup,
    /// A console evaluation input.
    Command,
    /// A console evaluation output.
    Result,
    /// A page navigation marker.
    NavigationMarker,
    /// A message that carries nothing and is never stored.
    Null,
}

impl MessageKind {
    /// Returns true for both group-opening kinds.
    #[must_use]
    pub const fn is_group_start(self) -> bool {
        matches!(self, Self::StartGroup | Self::StartGroupCollapsed)
    }

    /// Returns true for kinds that filters never hide.
    #[must_use]
    pub const fn is_unfilterable(self) -> bool {
        matches!(
            self,
            Self::Command
                | Self::Result
                | Self::StartGroup
                | Self::StartGroupCollapsed
                | Self::NavigationMarker
        )
    }

    /// Returns true for plain log-type kinds subject to level filters.
    #[must_use]
    pub const fn is_log_type(self) -> bool {
        matches!(self, Self::Log | Self::Warning | Self::Error | Self::Trace)
    }

    /// Returns true for console evaluation kinds.
    #[must_use]
    pub const fn is_evaluation(self) -> bool {
        matches!(self, Self::Command | Self::Result)
    }

    /// The severity a message of this kind carries unless overridden.
    #[must_use]
    pub const fn default_level(self) -> LogLevel {
        match self {
            Self::Error => LogLevel::Error,
            Self::Warning => LogLevel::Warn,
            Self::Log
            | Self::Trace
            | Self::StartGroup
            | Self::StartGroupCollapsed
            | Self::EndGroup
            | Self::Command
            | Self::Result
            | Self::NavigationMarker
            | Self::Null => LogLevel::Log,
        }
    }
}

// =============================================================================
// Level and Source
// =============================================================================

/// Severity class used by level filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LogLevel {
    /// Errors.
    Error,
    /// Warnings.
    Warn,
    /// Plain logs.
    Log,
    /// Informational messages.
    Info,
    /// Debug messages.
    Debug,
}

impl LogLevel {
    /// All levels, most severe first.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Log,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    /// Returns the lowercase level name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Log => "log",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a message originated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MessageSource {
    /// A `console.*` call.
    ConsoleApi,
    /// A script error or evaluation.
    Javascript,
    /// A network event.
    Network,
    /// A stylesheet diagnostic.
    Css,
    /// Anything else.
    Other,
}

impl MessageSource {
    /// Returns true for console and script sources, which level filters apply to.
    #[must_use]
    pub const fn is_script_call(self) -> bool {
        matches!(self, Self::ConsoleApi | Self::Javascript)
    }
}

// =============================================================================
// Message Parts
// =============================================================================

/// A source location.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Source URL or path.
    pub source: String,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub column: u32,
    /// Enclosing function name.
    pub function_name: Option<String>,
}

impl Frame {
    /// Creates a frame without a function name.
    #[must_use]
    pub fn new(source: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            source: source.into(),
            line,
            column,
            function_name: None,
        }
    }

    /// Builder method to set the function name.
    #[must_use]
    pub fn with_function(mut self, name: impl Into<String>) -> Self {
        self.function_name = Some(name.into());
        self
    }

    /// Returns true if the source lives under a `node_modules` directory.
    #[must_use]
    pub fn is_node_module(&self) -> bool {
        self.source.contains("node_modules")
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.function_name {
            write!(f, "{name} ")?;
        }
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

/// The primary text of a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageText {
    /// Text delivered in full.
    Plain(String),
    /// A long string of which only a prefix was delivered.
    LongString {
        /// The delivered prefix.
        initial: String,
        /// Full length of the string.
        length: usize,
    },
}

impl MessageText {
    /// Returns the text available for display and search.
    #[must_use]
    pub fn searchable(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::LongString { initial, .. } => initial,
        }
    }
}

/// A network request associated with a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkRequest {
    /// HTTP method.
    pub method: String,
    /// Request URL.
    pub url: String,
}

/// A note attached to a message, such as a related diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    /// Where the note points.
    pub frame: Option<Frame>,
    /// Body text.
    pub body: String,
}

// =============================================================================
// Message
// =============================================================================

/// A console message.
#[derive(Clone, Debug)]
pub struct Message {
    /// Unique identifier.
    pub id: MessageId,
    /// What kind of message this is.
    pub kind: MessageKind,
    /// Severity class.
    pub level: LogLevel,
    /// Where the message came from.
    pub source: MessageSource,
    /// Primary text.
    pub text: Option<MessageText>,
    /// Parameter values.
    pub parameters: Vec<ValueHandle>,
    /// Source location.
    pub frame: Option<Frame>,
    /// Stack trace, innermost frame first.
    pub stacktrace: Vec<Frame>,
    /// Associated network request.
    pub request: Option<NetworkRequest>,
    /// Attached notes.
    pub notes: Vec<Note>,
    /// A `prefix:` label shown before the message.
    pub prefix: Option<String>,
    /// The real execution point and its time, when known.
    pub execution_point: Option<PointTime>,
    /// The logpoint that produced this message.
    pub logpoint_id: Option<LogpointId>,
    /// The console evaluation this message belongs to.
    pub eval_id: Option<EvalId>,
    /// The group this message is nested directly under. Store-assigned.
    pub group_id: Option<MessageId>,
    /// Ordering anchor. Store-assigned; always present once stored.
    pub last_execution_point: Option<LastExecutionPoint>,
}

impl Message {
    /// Creates a message of the given kind with default fields.
    #[must_use]
    pub fn new(id: MessageId, kind: MessageKind) -> Self {
        let source = if kind.is_evaluation() {
            MessageSource::Javascript
        } else {
            MessageSource::ConsoleApi
        };
        Self {
            id,
            kind,
            level: kind.default_level(),
            source,
            text: None,
            parameters: Vec::new(),
            frame: None,
            stacktrace: Vec::new(),
            request: None,
            notes: Vec::new(),
            prefix: None,
            execution_point: None,
            logpoint_id: None,
            eval_id: None,
            group_id: None,
            last_execution_point: None,
        }
    }

    /// Creates a plain log message.
    #[must_use]
    pub fn log(id: MessageId, text: impl Into<String>) -> Self {
        Self::new(id, MessageKind::Log).with_text(text)
    }

    /// Creates a warning message.
    #[must_use]
    pub fn warning(id: MessageId, text: impl Into<String>) -> Self {
        Self::new(id, MessageKind::Warning).with_text(text)
    }

    /// Creates an error message.
    #[must_use]
    pub fn error(id: MessageId, text: impl Into<String>) -> Self {
        Self::new(id, MessageKind::Error).with_text(text)
    }

    /// Creates an expanded group head.
    #[must_use]
    pub fn start_group(id: MessageId, label: impl Into<String>) -> Self {
        Self::new(id, MessageKind::StartGroup).with_text(label)
    }

    /// Creates a collapsed group head.
    #[must_use]
    pub fn start_group_collapsed(id: MessageId, label: impl Into<String>) -> Self {
        Self::new(id, MessageKind::StartGroupCollapsed).with_text(label)
    }

    /// Creates a group terminator.
    #[must_use]
    pub fn end_group(id: MessageId) -> Self {
        Self::new(id, MessageKind::EndGroup)
    }

    /// Creates a console evaluation command.
    #[must_use]
    pub fn command(id: MessageId, eval_id: EvalId, input: impl Into<String>) -> Self {
        Self::new(id, MessageKind::Command)
            .with_text(input)
            .with_eval(eval_id)
    }

    /// Creates a console evaluation result.
    #[must_use]
    pub fn result(id: MessageId, eval_id: EvalId) -> Self {
        Self::new(id, MessageKind::Result).with_eval(eval_id)
    }

    /// Builder method to set the level.
    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Builder method to set the source.
    #[must_use]
    pub fn with_source(mut self, source: MessageSource) -> Self {
        self.source = source;
        self
    }

    /// Builder method to set plain text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(MessageText::Plain(text.into()));
        self
    }

    /// Builder method to set a long string's delivered prefix.
    #[must_use]
    pub fn with_long_string(mut self, initial: impl Into<String>, length: usize) -> Self {
        self.text = Some(MessageText::LongString {
            initial: initial.into(),
            length,
        });
        self
    }

    /// Builder method to append a parameter.
    #[must_use]
    pub fn with_parameter(mut self, value: ValueHandle) -> Self {
        self.parameters.push(value);
        self
    }

    /// Builder method to set the source location.
    #[must_use]
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Builder method to append a stack frame.
    #[must_use]
    pub fn with_stack_frame(mut self, frame: Frame) -> Self {
        self.stacktrace.push(frame);
        self
    }

    /// Builder method to set the associated network request.
    #[must_use]
    pub fn with_request(mut self, method: impl Into<String>, url: impl Into<String>) -> Self {
        self.request = Some(NetworkRequest {
            method: method.into(),
            url: url.into(),
        });
        self
    }

    /// Builder method to attach a note.
    #[must_use]
    pub fn with_note(mut self, frame: Option<Frame>, body: impl Into<String>) -> Self {
        self.notes.push(Note {
            frame,
            body: body.into(),
        });
        self
    }

    /// Builder method to set the prefix label.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Builder method to set the real execution point.
    #[must_use]
    pub fn at(mut self, point: ExecutionPoint, time: f64) -> Self {
        self.execution_point = Some(PointTime::new(point, time));
        self
    }

    /// Builder method to set the producing logpoint.
    #[must_use]
    pub fn with_logpoint(mut self, logpoint_id: impl Into<LogpointId>) -> Self {
        self.logpoint_id = Some(logpoint_id.into());
        self
    }

    /// Builder method to set the evaluation id.
    #[must_use]
    pub fn with_eval(mut self, eval_id: EvalId) -> Self {
        self.eval_id = Some(eval_id);
        self
    }

    /// Returns the real execution point, if known.
    #[must_use]
    pub fn real_point(&self) -> Option<&ExecutionPoint> {
        self.execution_point.as_ref().map(|pt| &pt.point)
    }

    /// Returns the point this message sorts by: its real point, else its anchor.
    #[must_use]
    pub fn sort_point(&self) -> Option<&ExecutionPoint> {
        self.real_point()
            .or_else(|| self.last_execution_point.as_ref().map(|lep| &lep.point))
    }

    /// Returns the anchor's arrival rank, or zero before the message is stored.
    #[must_use]
    pub fn message_count(&self) -> u64 {
        self.last_execution_point
            .as_ref()
            .map_or(0, |lep| lep.message_count)
    }
}
