//! Normalizer configuration.
//!
//! Built once at cold start and handed to [`EventNormalizer::new`](crate::EventNormalizer::new);
//! nothing in here is read again while an invocation is being decoded.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;

use crate::models::{EntryPoint, TargetTable};

/// Environment variable holding the path of a JSON routing-table file
pub const OPERATION_ENDPOINTS_PATH_VAR: &str = "BIFROST_OPERATION_ENDPOINTS";
/// Environment variable holding an inline JSON routing table
pub const OPERATION_ENDPOINTS_JSON_VAR: &str = "BIFROST_OPERATION_ENDPOINTS_JSON";
/// Environment variable selecting `strict` or `lenient` record handling
pub const RECORD_POLICY_VAR: &str = "BIFROST_RECORD_POLICY";
/// Environment variable naming the decoder the deployed binary runs
pub const ENTRY_POINT_VAR: &str = "BIFROST_ENTRY_POINT";

/// Proxy and transport headers stripped from gateway requests.
pub const DEFAULT_HEADER_BLOCKLIST: [&str; 18] = [
    "Accept",
    "Accept-Encoding",
    "CloudFront-Forwarded-Proto",
    "CloudFront-Is-Desktop-Viewer",
    "CloudFront-Is-Mobile-Viewer",
    "CloudFront-Is-SmartTV-Viewer",
    "CloudFront-Is-Tablet-Viewer",
    "CloudFront-Viewer-Country",
    "Host",
    "Postman-Token",
    "Referer",
    "User-Agent",
    "Via",
    "X-Amz-Cf-Id",
    "X-Amzn-Trace-Id",
    "X-Forwarded-For",
    "X-Forwarded-Port",
    "X-Forwarded-Proto",
];

/// How single-record decoders treat batches that do not hold exactly one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordPolicy {
    /// Ambiguous batches become an empty mapping; other faults pass the event through
    #[default]
    Lenient,
    /// Every decoder fault is returned to the caller
    Strict,
}

impl FromStr for RecordPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => bail!("Unknown record policy: {other}"),
        }
    }
}

/// Routing metadata keyed by HTTP method, then by path suffix.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct OperationEndpoints(HashMap<String, HashMap<String, Value>>);

impl OperationEndpoints {
    #[must_use]
    pub const fn new(table: HashMap<String, HashMap<String, Value>>) -> Self {
        Self(table)
    }

    /// Looks up routing metadata; absent entries are not an error.
    #[must_use]
    pub fn lookup(&self, method: &str, suffix: &str) -> Option<&Value> {
        self.0.get(method).and_then(|routes| routes.get(suffix))
    }

    /// Parses a routing table from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a two-level JSON object.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Routing table must be a JSON object of objects")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizerConfig {
    pub header_blocklist: Vec<String>,
    pub targets: TargetTable,
    pub operation_endpoints: OperationEndpoints,
    pub record_policy: RecordPolicy,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            header_blocklist: DEFAULT_HEADER_BLOCKLIST
                .iter()
                .map(ToString::to_string)
                .collect(),
            targets: TargetTable::default(),
            operation_endpoints: OperationEndpoints::default(),
            record_policy: RecordPolicy::default(),
        }
    }
}

impl NormalizerConfig {
    #[must_use]
    pub fn with_operation_endpoints(mut self, operation_endpoints: OperationEndpoints) -> Self {
        self.operation_endpoints = operation_endpoints;
        self
    }

    #[must_use]
    pub fn with_record_policy(mut self, record_policy: RecordPolicy) -> Self {
        self.record_policy = record_policy;
        self
    }

    /// Loads configuration from the process environment.
    ///
    /// Unset variables keep their defaults. The routing-table file takes
    /// precedence over the inline JSON variable when both are set.
    ///
    /// # Errors
    ///
    /// Returns an error if the routing table cannot be read or parsed, or if
    /// the record policy is not `strict` or `lenient`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = env::var(OPERATION_ENDPOINTS_PATH_VAR) {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read routing table from {path}"))?;
            config.operation_endpoints = OperationEndpoints::from_json(&text)
                .with_context(|| format!("Failed to parse routing table in {path}"))?;
        } else if let Ok(text) = env::var(OPERATION_ENDPOINTS_JSON_VAR) {
            config.operation_endpoints = OperationEndpoints::from_json(&text)
                .with_context(|| format!("Failed to parse {OPERATION_ENDPOINTS_JSON_VAR}"))?;
        }

        if let Ok(policy) = env::var(RECORD_POLICY_VAR) {
            config.record_policy = policy.parse()?;
        }

        Ok(config)
    }
}

/// Reads the entry point for the deployed binary, defaulting to the gateway decoder.
///
/// # Errors
///
/// Returns an error if the variable is set to an unknown entry point.
pub fn entry_point_from_env() -> Result<EntryPoint> {
    env::var(ENTRY_POINT_VAR).map_or(Ok(EntryPoint::Gateway), |value| value.parse())
}
