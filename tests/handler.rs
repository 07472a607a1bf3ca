// Handler adapter tests for the async entry points
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use bifrost::config::{NormalizerConfig, RecordPolicy};
use bifrost::handler::{echo_handler, service, wrap};
use bifrost::{EntryPoint, EventNormalizer};
use lambda_runtime::{Context, Diagnostic, LambdaEvent};
use serde_json::{Value, json};

fn create_test_lambda_event(payload: Value) -> LambdaEvent<Value> {
    LambdaEvent {
        payload,
        context: Context::default(),
    }
}

fn queue_event(bodies: &[&str]) -> Value {
    let records: Vec<Value> = bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            json!({
                "messageId": format!("m-{i}"),
                "body": body,
                "attributes": {"ApproximateReceiveCount": "1"}
            })
        })
        .collect();
    json!({"Records": records})
}

async fn count_records(params: Value, context: Option<Context>) -> Result<Value, Diagnostic> {
    assert!(context.is_none(), "context is never surfaced to business code");
    let count = params["records"].as_array().map_or(0, Vec::len);
    Ok(json!({"processed": count}))
}

#[tokio::test]
async fn test_service_normalizes_before_calling_handler() {
    let handler = service(
        Arc::new(EventNormalizer::default()),
        EntryPoint::QueueBlock,
        count_records,
    );

    let response = handler(create_test_lambda_event(queue_event(&[
        r#"{"a": 1}"#,
        r#"{"a": 2}"#,
    ])))
    .await
    .unwrap();

    assert_eq!(response, json!({"processed": 2}));
}

#[tokio::test]
async fn test_service_strict_failure_is_diagnostic() {
    let normalizer =
        EventNormalizer::new(&NormalizerConfig::default().with_record_policy(RecordPolicy::Strict));
    let handler = service(Arc::new(normalizer), EntryPoint::QueueUnit, echo_handler);

    let result = handler(create_test_lambda_event(queue_event(&["{}", "{}"]))).await;
    let diagnostic = result.expect_err("strict mode should reject a two-record batch");
    assert_eq!(diagnostic.error_type, "AmbiguousBatch");
    assert!(diagnostic.error_message.contains("received 2"));
}

#[tokio::test]
async fn test_echo_handler_returns_gateway_params() {
    let handler = service(
        Arc::new(EventNormalizer::default()),
        EntryPoint::Gateway,
        echo_handler,
    );

    let event = json!({
        "resource": "/pandora/users",
        "path": "/pandora/users",
        "httpMethod": "GET",
        "requestContext": {"stage": "dev"},
        "headers": {"Host": "api.example.com", "X-Client": "web"},
        "queryStringParameters": {"page": "2"}
    });

    let params = handler(create_test_lambda_event(event)).await.unwrap();
    assert_eq!(params["target"], json!("PANDORA"));
    assert_eq!(params["page"], json!("2"));
    assert_eq!(params["headers"], json!({"X-Client": "web"}));
}

#[tokio::test]
async fn test_direct_invocation_reaches_handler_unchanged() {
    let handler = service(
        Arc::new(EventNormalizer::default()),
        EntryPoint::ChangeStream,
        echo_handler,
    );
    let payload = json!({"job": "nightly-sync", "dry_run": true});

    let response = handler(create_test_lambda_event(payload.clone())).await.unwrap();
    assert_eq!(response, payload);
}

#[tokio::test]
async fn test_concurrent_invocations_are_independent() {
    let handler = service(
        Arc::new(EventNormalizer::default()),
        EntryPoint::QueueUnit,
        echo_handler,
    );

    let mut handles = vec![];
    for i in 0..10 {
        let handler = handler.clone();
        let handle = tokio::spawn(async move {
            let body = json!({"order": i}).to_string();
            let event = queue_event(&[body.as_str()]);
            handler(create_test_lambda_event(event)).await
        });
        handles.push(handle);
    }

    let results = futures::future::join_all(handles).await;
    for (i, result) in results.into_iter().enumerate() {
        let params = result.expect("Task should not panic").unwrap();
        assert_eq!(params["order"], json!(i));
        assert_eq!(params["queue"]["message_id"], json!("m-0"));
    }
}

#[test]
fn test_wrap_keeps_two_argument_contract() {
    let handler = wrap(
        Arc::new(EventNormalizer::default()),
        EntryPoint::QueueUnit,
        |params: Value, context: Option<Context>| {
            (params["queue"]["message_id"].clone(), context.is_none())
        },
    );

    let (message_id, no_context) = handler(queue_event(&["{}"])).unwrap();
    assert_eq!(message_id, json!("m-0"));
    assert!(no_context);
}
