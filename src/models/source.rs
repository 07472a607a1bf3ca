use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Decoder selected by the caller when wrapping a business function.
///
/// Queue and change-stream events share the same `Records` envelope, so the
/// payload alone cannot tell them apart; the entry point decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryPoint {
    Gateway,
    QueueUnit,
    QueueBlock,
    ChangeStream,
}

/// Origin of an event once classified against an entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventSource {
    Gateway,
    QueueSingle,
    QueueBatch,
    ChangeStream,
    /// Unrecognized shape, handed to the business function untouched
    Direct,
}

impl EventSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gateway => "gateway",
            Self::QueueSingle => "queue-single",
            Self::QueueBatch => "queue-batch",
            Self::ChangeStream => "change-stream",
            Self::Direct => "direct",
        }
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EntryPoint {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gateway => "gateway",
            Self::QueueUnit => "queue-unit",
            Self::QueueBlock => "queue-block",
            Self::ChangeStream => "change-stream",
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryPoint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "gateway" | "api" => Ok(Self::Gateway),
            "queue-unit" | "sqs-unit" => Ok(Self::QueueUnit),
            "queue-block" | "sqs-block" => Ok(Self::QueueBlock),
            "change-stream" | "dynamo" => Ok(Self::ChangeStream),
            other => anyhow::bail!("Unknown entry point: {other}"),
        }
    }
}
