//! Error types raised while normalizing invocation events.
//!
//! Decode failures on request bodies never show up here; they are recovered
//! inside the decoders. What remains are the shape and typing faults that a
//! caller may want to see when running with a strict record policy.

use std::fmt;

use crate::models::EventSource;

/// Errors produced by the event decoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// A single-record decoder received a batch with zero or several records
    AmbiguousBatch { source: EventSource, records: usize },
    /// A change-stream attribute carried a type tag outside the supported table
    UnsupportedTypeTag { attribute: String, tag: String },
    /// A change-stream attribute was not a `{tag: value}` pair, or its value did not cast
    MalformedAttribute { attribute: String, reason: String },
    /// A change-stream record carried an event name other than INSERT, MODIFY or REMOVE
    UnknownTriggerEvent(String),
}

impl NormalizeError {
    /// Stable identifier used as the Lambda `Diagnostic` error type.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AmbiguousBatch { .. } => "AmbiguousBatch",
            Self::UnsupportedTypeTag { .. } => "UnsupportedTypeTag",
            Self::MalformedAttribute { .. } => "MalformedAttribute",
            Self::UnknownTriggerEvent(_) => "UnknownTriggerEvent",
        }
    }
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousBatch { source, records } => write!(
                f,
                "{source} decoder expects exactly one record, received {records}"
            ),
            Self::UnsupportedTypeTag { attribute, tag } => {
                write!(f, "Unsupported type tag '{tag}' on attribute '{attribute}'")
            }
            Self::MalformedAttribute { attribute, reason } => {
                write!(f, "Malformed attribute '{attribute}': {reason}")
            }
            Self::UnknownTriggerEvent(name) => write!(f, "Unknown trigger event: {name}"),
        }
    }
}

impl std::error::Error for NormalizeError {}

impl From<NormalizeError> for lambda_runtime::Diagnostic {
    fn from(error: NormalizeError) -> Self {
        Self {
            error_type: error.kind().to_string(),
            error_message: error.to_string(),
        }
    }
}
