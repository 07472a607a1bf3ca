//! JSON schemas for the fixed parts of normalized parameters.
//!
//! Gateway parameters are open-ended, so only the queue metadata block, the
//! change-stream record, the target enumeration and the dispatch result are
//! described here.

use schemars::{JsonSchema, schema_for};
use serde_json::{Value, json};

use crate::models::{ChangeRecord, DispatchResult, QueueMetadata, Target};

/// A named schema exported for downstream consumers.
#[derive(Debug, Clone)]
pub struct ShapeSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub schema: Value,
}

/// Schemas for every fixed normalized shape.
#[must_use]
pub fn normalized_schemas() -> Vec<ShapeSchema> {
    vec![
        ShapeSchema {
            name: "queue",
            description: "Delivery metadata attached under the `queue` key of each decoded queue record.",
            schema: schema_value::<QueueMetadata>(),
        },
        ShapeSchema {
            name: "change_record",
            description: "A change-stream record with its key and image sections flattened to plain values.",
            schema: schema_value::<ChangeRecord>(),
        },
        ShapeSchema {
            name: "target",
            description: "Deployment target derived from the first segment of a gateway resource.",
            schema: schema_value::<Target>(),
        },
        ShapeSchema {
            name: "dispatch_result",
            description: "Outcome of an outbound HTTP call: status flag, response and status code.",
            schema: schema_value::<DispatchResult>(),
        },
    ]
}

/// Renders all schemas as one JSON array of `{name, description, schema}` entries.
#[must_use]
pub fn schemas_document() -> Value {
    Value::Array(
        normalized_schemas()
            .into_iter()
            .map(|shape| {
                json!({
                    "name": shape.name,
                    "description": shape.description,
                    "schema": shape.schema,
                })
            })
            .collect(),
    )
}

fn schema_value<T: JsonSchema>() -> Value {
    let mut schema = serde_json::to_value(schema_for!(T)).unwrap_or(Value::Null);
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemas_have_names_and_objects() {
        let shapes = normalized_schemas();
        assert_eq!(shapes.len(), 4);
        for shape in &shapes {
            assert!(shape.schema.is_object(), "{} schema should be an object", shape.name);
            assert!(shape.schema.get("$schema").is_none());
        }
    }

    #[test]
    fn test_queue_schema_lists_metadata_fields() {
        let shapes = normalized_schemas();
        let queue = shapes.iter().find(|shape| shape.name == "queue");
        let properties = queue
            .and_then(|shape| shape.schema.get("properties"))
            .and_then(Value::as_object);

        for field in [
            "message_id",
            "message_attributes",
            "approximate_receive_count",
            "sent_timestamp",
            "approximate_first_receive_timestamp",
        ] {
            assert!(
                properties.is_some_and(|p| p.contains_key(field)),
                "queue schema missing {field}"
            );
        }
    }

    #[test]
    fn test_change_record_requires_core_fields() {
        let shapes = normalized_schemas();
        let change = shapes.iter().find(|shape| shape.name == "change_record");
        let required = change
            .and_then(|shape| shape.schema.get("required"))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        assert!(required.contains(&json!("trigger_event")));
        assert!(required.contains(&json!("table_name")));
        assert!(!required.contains(&json!("new_object")));
    }

    #[test]
    fn test_dispatch_result_requires_only_status() {
        let shapes = normalized_schemas();
        let dispatch = shapes.iter().find(|shape| shape.name == "dispatch_result");
        let required = dispatch
            .and_then(|shape| shape.schema.get("required"))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        assert_eq!(required, vec![json!("status")]);
    }
}
