//! Event-source normalization.
//!
//! [`SourceClassifier`] decides which decoder applies to a raw invocation
//! payload, and [`EventNormalizer`] runs it, turning gateway requests, queue
//! deliveries and change-stream records into one flat parameter mapping.

use lambda_runtime::tracing::{debug, error, warn};
use serde_json::{Map, Value};

use crate::config::{NormalizerConfig, RecordPolicy};
use crate::decoders::{GatewayDecoder, change_stream, queue};
use crate::models::{EntryPoint, EventSource, NormalizeError};
use crate::utils::is_truthy;

/// Classifies raw events against the entry point chosen by the caller.
pub struct SourceClassifier;

impl SourceClassifier {
    /// Never fails: anything unrecognized is `EventSource::Direct`.
    #[must_use]
    pub fn classify(entry: EntryPoint, event: &Value) -> EventSource {
        match entry {
            EntryPoint::Gateway if Self::is_gateway(event) => EventSource::Gateway,
            EntryPoint::QueueUnit if Self::has_records(event) => EventSource::QueueSingle,
            EntryPoint::QueueBlock if Self::has_records(event) => EventSource::QueueBatch,
            EntryPoint::ChangeStream if Self::has_records(event) => EventSource::ChangeStream,
            _ => EventSource::Direct,
        }
    }

    /// Gateway proxy events carry both a request context and an HTTP method.
    #[must_use]
    pub fn is_gateway(event: &Value) -> bool {
        is_truthy(event.get("requestContext")) && is_truthy(event.get("httpMethod"))
    }

    #[must_use]
    pub fn has_records(event: &Value) -> bool {
        !records(event).is_empty()
    }
}

/// The `Records` array of a queue or change-stream delivery, empty if absent.
#[must_use]
pub fn records(event: &Value) -> &[Value] {
    event
        .get("Records")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Normalizes raw invocation events into flat parameter mappings.
///
/// Holds the decoders built from a [`NormalizerConfig`]; construct it once per
/// process and share it across invocations.
#[derive(Debug, Clone)]
pub struct EventNormalizer {
    gateway: GatewayDecoder,
    record_policy: RecordPolicy,
}

impl EventNormalizer {
    #[must_use]
    pub fn new(config: &NormalizerConfig) -> Self {
        Self {
            gateway: GatewayDecoder::new(config),
            record_policy: config.record_policy,
        }
    }

    #[must_use]
    pub fn classify(&self, entry: EntryPoint, event: &Value) -> EventSource {
        SourceClassifier::classify(entry, event)
    }

    /// Normalizes `event` with the decoder selected by `entry`.
    ///
    /// Unrecognized events are returned unchanged. Under the lenient record
    /// policy this never fails: a single-record decoder handed a larger batch
    /// yields an empty mapping, and any other decoder fault passes the event
    /// through untouched.
    ///
    /// # Errors
    ///
    /// Under the strict record policy, returns the `NormalizeError` raised by
    /// the decoder.
    pub fn normalize(&self, entry: EntryPoint, event: Value) -> Result<Value, NormalizeError> {
        let source = self.classify(entry, &event);
        debug!(%entry, %source, "Classified event");

        match self.decode(source, &event) {
            Ok(Some(params)) => Ok(Value::Object(params)),
            Ok(None) => Ok(event),
            Err(fault) => self.recover(event, fault),
        }
    }

    /// `Ok(None)` means pass-through.
    fn decode(
        &self,
        source: EventSource,
        event: &Value,
    ) -> Result<Option<Map<String, Value>>, NormalizeError> {
        let records = records(event);
        match source {
            EventSource::Gateway => Ok(Some(self.gateway.decode(event))),
            EventSource::QueueBatch => Ok(Some(queue::decode_block(records))),
            EventSource::QueueSingle => queue::decode_single(records)
                .map(Some)
                .ok_or(NormalizeError::AmbiguousBatch {
                    source,
                    records: records.len(),
                }),
            EventSource::ChangeStream => match records {
                [record] => {
                    let change = change_stream::decode_record(record)?;
                    match serde_json::to_value(change) {
                        Ok(Value::Object(params)) => Ok(Some(params)),
                        _ => Ok(None),
                    }
                }
                _ => Err(NormalizeError::AmbiguousBatch {
                    source,
                    records: records.len(),
                }),
            },
            EventSource::Direct => Ok(None),
        }
    }

    fn recover(&self, event: Value, fault: NormalizeError) -> Result<Value, NormalizeError> {
        match (self.record_policy, fault) {
            (RecordPolicy::Strict, fault) => {
                error!(error = %fault, kind = fault.kind(), "Event normalization failed");
                Err(fault)
            }
            (RecordPolicy::Lenient, NormalizeError::AmbiguousBatch { source, records }) => {
                warn!(%source, records, "Dropping batch handed to a single-record decoder");
                Ok(Value::Object(Map::new()))
            }
            (RecordPolicy::Lenient, fault) => {
                warn!(error = %fault, "Passing event through unchanged");
                Ok(event)
            }
        }
    }
}

impl Default for EventNormalizer {
    fn default() -> Self {
        Self::new(&NormalizerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(entry: EntryPoint, event: &Value) -> EventSource {
        SourceClassifier::classify(entry, event)
    }

    #[test]
    fn test_classify_gateway() {
        let event = json!({"requestContext": {"stage": "prod"}, "httpMethod": "GET"});
        assert_eq!(classify(EntryPoint::Gateway, &event), EventSource::Gateway);
        assert_eq!(classify(EntryPoint::QueueBlock, &event), EventSource::Direct);
    }

    #[test]
    fn test_classify_gateway_needs_both_fields() {
        let no_context = json!({"requestContext": {}, "httpMethod": "GET"});
        let no_method = json!({"requestContext": {"stage": "prod"}});
        assert_eq!(classify(EntryPoint::Gateway, &no_context), EventSource::Direct);
        assert_eq!(classify(EntryPoint::Gateway, &no_method), EventSource::Direct);
    }

    #[test]
    fn test_classify_records_by_entry_point() {
        let event = json!({"Records": [{"body": "{}"}]});
        assert_eq!(classify(EntryPoint::QueueUnit, &event), EventSource::QueueSingle);
        assert_eq!(classify(EntryPoint::QueueBlock, &event), EventSource::QueueBatch);
        assert_eq!(classify(EntryPoint::ChangeStream, &event), EventSource::ChangeStream);
        assert_eq!(classify(EntryPoint::Gateway, &event), EventSource::Direct);
    }

    #[test]
    fn test_empty_records_is_direct() {
        let event = json!({"Records": []});
        assert_eq!(classify(EntryPoint::QueueBlock, &event), EventSource::Direct);
        let not_array = json!({"Records": {"body": "{}"}});
        assert_eq!(classify(EntryPoint::QueueBlock, &not_array), EventSource::Direct);
    }
}
