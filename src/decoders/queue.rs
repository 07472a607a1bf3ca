use lambda_runtime::tracing::{debug, warn};
use serde_json::{Map, Value};

use crate::models::QueueMetadata;
use crate::utils::decode_json_object;

/// Key under which delivery metadata is attached to each record
pub const QUEUE_METADATA_KEY: &str = "queue";

/// Decodes one queue record: the JSON body's fields plus a `queue` metadata block.
///
/// A missing or malformed body contributes no fields; the metadata block is
/// always present.
#[must_use]
pub fn clean_record(record: &Value) -> Map<String, Value> {
    let mut item = match record.get("body").and_then(Value::as_str) {
        Some(body) => decode_json_object(body).unwrap_or_else(|| {
            warn!(
                message_id = ?record.get("messageId"),
                "Queue record body is not a JSON object"
            );
            Map::new()
        }),
        None => Map::new(),
    };

    let metadata = extract_metadata(record);
    item.insert(
        QUEUE_METADATA_KEY.to_string(),
        serde_json::to_value(metadata).unwrap_or(Value::Null),
    );
    item
}

/// Builds the metadata block from the record envelope and its `attributes` section.
#[must_use]
pub fn extract_metadata(record: &Value) -> QueueMetadata {
    let attribute = |name: &str| {
        record
            .get("attributes")
            .and_then(|attributes| attributes.get(name))
            .and_then(Value::as_str)
            .map(ToString::to_string)
    };

    QueueMetadata {
        message_id: record
            .get("messageId")
            .and_then(Value::as_str)
            .map(ToString::to_string),
        message_attributes: record.get("messageAttributes").cloned(),
        approximate_receive_count: attribute("ApproximateReceiveCount"),
        sent_timestamp: attribute("SentTimestamp"),
        approximate_first_receive_timestamp: attribute("ApproximateFirstReceiveTimestamp"),
    }
}

/// Decodes every record, preserving delivery order, under a `records` key.
#[must_use]
pub fn decode_block(records: &[Value]) -> Map<String, Value> {
    debug!(records = records.len(), "Decoding queue block");
    let cleaned = records
        .iter()
        .map(|record| Value::Object(clean_record(record)))
        .collect();

    let mut params = Map::new();
    params.insert("records".to_string(), Value::Array(cleaned));
    params
}

/// Decodes a batch holding exactly one record; `None` for any other size.
#[must_use]
pub fn decode_single(records: &[Value]) -> Option<Map<String, Value>> {
    match records {
        [record] => Some(clean_record(record)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, body: &str) -> Value {
        json!({
            "messageId": id,
            "body": body,
            "messageAttributes": {"origin": {"stringValue": "api", "dataType": "String"}},
            "attributes": {
                "ApproximateReceiveCount": "1",
                "SentTimestamp": "1610000000000",
                "ApproximateFirstReceiveTimestamp": "1610000000500"
            }
        })
    }

    #[test]
    fn test_clean_record_merges_body_and_metadata() {
        let item = clean_record(&record("m-1", r#"{"order": 7}"#));
        assert_eq!(item.get("order"), Some(&json!(7)));
        assert_eq!(item["queue"]["message_id"], "m-1");
        assert_eq!(item["queue"]["approximate_receive_count"], "1");
        assert_eq!(item["queue"]["sent_timestamp"], "1610000000000");
        assert_eq!(item["queue"]["approximate_first_receive_timestamp"], "1610000000500");
        assert_eq!(item["queue"]["message_attributes"]["origin"]["stringValue"], "api");
    }

    #[test]
    fn test_metadata_overrides_body_queue_key() {
        let item = clean_record(&record("m-2", r#"{"queue": "payload"}"#));
        assert_eq!(item["queue"]["message_id"], "m-2");
    }

    #[test]
    fn test_bare_record_gets_null_metadata() {
        let item = clean_record(&json!({}));
        assert_eq!(item.len(), 1);
        assert_eq!(item["queue"]["message_id"], Value::Null);
        assert_eq!(item["queue"]["sent_timestamp"], Value::Null);
    }

    #[test]
    fn test_decode_single_sizes() {
        assert!(decode_single(&[]).is_none());
        assert!(decode_single(&[record("a", "{}"), record("b", "{}")]).is_none());
        assert!(decode_single(&[record("a", "{}")]).is_some());
    }
}
