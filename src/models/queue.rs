use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Delivery metadata attached under the `queue` key of every decoded queue record.
///
/// Fields missing from the envelope are serialized as `null` rather than omitted,
/// so business code can rely on the keys being present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QueueMetadata {
    pub message_id: Option<String>,
    pub message_attributes: Option<Value>,
    pub approximate_receive_count: Option<String>,
    pub sent_timestamp: Option<String>,
    pub approximate_first_receive_timestamp: Option<String>,
}
