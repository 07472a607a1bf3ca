use std::collections::HashMap;
use std::time::Duration;

use lambda_runtime::tracing::{debug, error, info, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::{Map, Value};

use crate::models::DispatchResult;

/// Applied when the caller does not set a timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// Payload of an outbound call.
///
/// `GET` requests carry it in the query string; every other method sends it
/// as the request body, mappings as JSON and text verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchData {
    Fields(Map<String, Value>),
    Text(String),
}

/// Per-call settings.
///
/// `headers` replaces the default `Content-Type: application/json` header set
/// entirely when present.
#[derive(Debug, Clone, Default)]
pub struct DispatchOptions {
    pub headers: Option<HashMap<String, String>>,
    pub timeout: Option<Duration>,
}

impl DispatchOptions {
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Sends one outbound request and reports the outcome as a [`DispatchResult`].
///
/// There is no retry: every failure is reported once, and the caller decides.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: Client,
}

impl Dispatcher {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Calls `url` with `method` (case-insensitive).
    ///
    /// Never fails. Timeouts yield [`DispatchResult::timed_out`]; an invalid
    /// method or URL and connection errors yield [`DispatchResult::failed`].
    pub async fn dispatch(
        &self,
        method: &str,
        url: &str,
        data: Option<&DispatchData>,
        options: &DispatchOptions,
    ) -> DispatchResult {
        let method = match Method::from_bytes(method.to_ascii_uppercase().as_bytes()) {
            Ok(method) => method,
            Err(e) => {
                error!(error = %e, method, "Invalid HTTP method");
                return DispatchResult::failed();
            }
        };
        debug!(%method, url, "Dispatching request");

        match self.build(&method, url, data, options).send().await {
            Ok(response) => read_response(response).await,
            Err(e) if e.is_timeout() => {
                warn!(%method, url, "Request timed out");
                DispatchResult::timed_out()
            }
            Err(e) if e.is_connect() => {
                error!(error = %e, %method, url, "Connection error");
                DispatchResult::failed()
            }
            Err(e) => {
                error!(error = %e, %method, url, "Request failed before a response");
                DispatchResult::failed()
            }
        }
    }

    fn build(
        &self,
        method: &Method,
        url: &str,
        data: Option<&DispatchData>,
        options: &DispatchOptions,
    ) -> RequestBuilder {
        let is_get = *method == Method::GET;
        let url = match data {
            Some(DispatchData::Text(query)) if is_get && !query.is_empty() => {
                let separator = if url.contains('?') { '&' } else { '?' };
                format!("{url}{separator}{query}")
            }
            _ => url.to_string(),
        };

        let mut request = self
            .client
            .request(method.clone(), url)
            .timeout(options.timeout.unwrap_or(DEFAULT_TIMEOUT));

        request = match &options.headers {
            Some(headers) => headers
                .iter()
                .fold(request, |request, (name, value)| request.header(name, value)),
            None => request.header(CONTENT_TYPE, "application/json"),
        };

        match data {
            Some(DispatchData::Fields(fields)) if is_get => request.query(&query_pairs(fields)),
            Some(DispatchData::Fields(fields)) => request.json(fields),
            Some(DispatchData::Text(text)) if !is_get => request.body(text.clone()),
            _ => request,
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

/// Query pairs for a `GET` mapping. Strings go in as-is, `null` is skipped
/// and anything else is rendered as JSON text.
fn query_pairs(fields: &Map<String, Value>) -> Vec<(&str, String)> {
    fields
        .iter()
        .filter_map(|(name, value)| match value {
            Value::Null => None,
            Value::String(text) => Some((name.as_str(), text.clone())),
            other => Some((name.as_str(), other.to_string())),
        })
        .collect()
}

async fn read_response(response: Response) -> DispatchResult {
    let code = response.status().as_u16();
    let body = response
        .text()
        .await
        .ok()
        .map(|text| serde_json::from_str(&text).unwrap_or(Value::String(text)));

    if DispatchResult::is_success_code(code) {
        info!(status_code = code, "Request succeeded");
    } else {
        error!(status_code = code, response = ?body, "Request rejected");
    }
    DispatchResult::completed(code, body)
}
