use lambda_runtime::tracing::debug;
use serde_json::{Map, Value};

use crate::config::{NormalizerConfig, OperationEndpoints};
use crate::models::{Target, TargetTable};
use crate::utils::{decode_body, decode_json_object, header_matches, path_suffix};

/// Literal version token the path is also split on when resolving routes
const VERSION_TOKEN: &str = "v1";
/// Upstream signaling flag that never reaches business code
const NO_DECRYPT_KEY: &str = "no_decrypt";

/// Flattens API-gateway proxy requests into normalized parameters.
#[derive(Debug, Clone)]
pub struct GatewayDecoder {
    header_blocklist: Vec<String>,
    targets: TargetTable,
    operation_endpoints: OperationEndpoints,
}

impl GatewayDecoder {
    #[must_use]
    pub fn new(config: &NormalizerConfig) -> Self {
        Self {
            header_blocklist: config.header_blocklist.clone(),
            targets: config.targets.clone(),
            operation_endpoints: config.operation_endpoints.clone(),
        }
    }

    /// Decodes a gateway proxy event.
    ///
    /// Query parameters come first, then the derived `target`, then body
    /// fields (which win on collision), then the transport context keys.
    /// Body decode failures contribute nothing; this never fails.
    #[must_use]
    pub fn decode(&self, event: &Value) -> Map<String, Value> {
        let mut params = event
            .get("queryStringParameters")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let target = self.resolve_target(event.get("resource").and_then(Value::as_str));
        params.insert("target".to_string(), Value::String(target.to_string()));

        let body = decode_request_body(event.get("body"));
        debug!(fields = body.len(), "Decoded gateway body");
        params.extend(body);

        params.insert("headers".to_string(), Value::Object(self.clean_headers(event)));

        let http_method = event.get("httpMethod").cloned().unwrap_or(Value::Null);
        let path = event.get("path").cloned().unwrap_or_else(empty_object);
        let operation_endpoint = self.operation_endpoint(
            http_method.as_str(),
            path.as_str().unwrap_or_default(),
            target,
        );

        params.insert("http_method".to_string(), http_method);
        params.insert(
            "path_parameters".to_string(),
            event.get("pathParameters").cloned().unwrap_or_else(empty_object),
        );
        params.insert("path_endpoint".to_string(), path);
        params.insert("operation_endpoint".to_string(), operation_endpoint);

        params.remove(NO_DECRYPT_KEY);
        params
    }

    /// Derives the target from the first segment of a `/segment/...` resource.
    #[must_use]
    pub fn resolve_target(&self, resource: Option<&str>) -> Target {
        let segment = resource.and_then(|resource| resource.split('/').nth(1));
        self.targets.resolve(segment)
    }

    /// Copies the request headers without the blocklisted ones.
    fn clean_headers(&self, event: &Value) -> Map<String, Value> {
        let Some(headers) = event.get("headers").and_then(Value::as_object) else {
            return Map::new();
        };

        headers
            .iter()
            .filter(|(name, _)| {
                !self
                    .header_blocklist
                    .iter()
                    .any(|blocked| header_matches(name, blocked))
            })
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Looks up routing metadata for the path suffix after the target or version token.
    fn operation_endpoint(&self, method: Option<&str>, path: &str, target: Target) -> Value {
        let target_token = target.as_str().to_ascii_lowercase();
        let suffix = path_suffix(path, &[target_token.as_str(), VERSION_TOKEN]);

        match (method, suffix) {
            (Some(method), Some(suffix)) => self
                .operation_endpoints
                .lookup(method, suffix)
                .cloned()
                .unwrap_or_else(empty_object),
            _ => {
                debug!(?method, %path, "No routing metadata for request");
                empty_object()
            }
        }
    }
}

/// A string body is JSON or form data; an object body is the double-wrapped
/// `{"body": "<json>"}` shape produced by test harnesses.
fn decode_request_body(body: Option<&Value>) -> Map<String, Value> {
    match body {
        Some(Value::String(text)) if !text.is_empty() => decode_body(text),
        Some(Value::Object(wrapper)) => match wrapper.get("body") {
            Some(Value::String(inner)) => decode_json_object(inner).unwrap_or_default(),
            Some(Value::Object(inner)) => inner.clone(),
            _ => Map::new(),
        },
        _ => Map::new(),
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}
