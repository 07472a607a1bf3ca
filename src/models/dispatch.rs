use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of an outbound HTTP call.
///
/// `status` is true only for the success codes accepted by
/// [`DispatchResult::is_success_code`]. A timeout serializes as
/// `{"status": false, "timeout": true}` and any other transport failure as
/// `{"status": false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DispatchResult {
    pub status: bool,
    /// Decoded JSON body, or the raw text when the body is not JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub timeout: bool,
}

impl DispatchResult {
    /// 2xx codes that count as a successful call. `207`, `208` and `226` are
    /// included; nothing outside 2xx is.
    #[must_use]
    pub const fn is_success_code(code: u16) -> bool {
        matches!(code, 200..=208 | 226)
    }

    /// A call that reached the server and got a status line back.
    #[must_use]
    pub const fn completed(status_code: u16, response: Option<Value>) -> Self {
        Self {
            status: Self::is_success_code(status_code),
            response,
            status_code: Some(status_code),
            timeout: false,
        }
    }

    #[must_use]
    pub const fn timed_out() -> Self {
        Self {
            status: false,
            response: None,
            status_code: None,
            timeout: true,
        }
    }

    #[must_use]
    pub const fn failed() -> Self {
        Self {
            status: false,
            response: None,
            status_code: None,
            timeout: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_codes() {
        for code in [200, 201, 204, 206, 207, 208, 226] {
            assert!(DispatchResult::is_success_code(code), "{code}");
        }
        for code in [100, 209, 225, 301, 404, 500] {
            assert!(!DispatchResult::is_success_code(code), "{code}");
        }
    }

    #[test]
    fn test_serialized_shapes() {
        let ok = DispatchResult::completed(201, Some(json!({"id": 7})));
        assert_eq!(
            serde_json::to_value(ok).ok(),
            Some(json!({"status": true, "response": {"id": 7}, "status_code": 201}))
        );

        let rejected = DispatchResult::completed(503, Some(json!("busy")));
        assert_eq!(
            serde_json::to_value(rejected).ok(),
            Some(json!({"status": false, "response": "busy", "status_code": 503}))
        );

        assert_eq!(
            serde_json::to_value(DispatchResult::timed_out()).ok(),
            Some(json!({"status": false, "timeout": true}))
        );
        assert_eq!(
            serde_json::to_value(DispatchResult::failed()).ok(),
            Some(json!({"status": false}))
        );
    }

    #[test]
    fn test_deserializes_minimal_failure() {
        let result = serde_json::from_value::<DispatchResult>(json!({"status": false}));
        assert_eq!(result.ok(), Some(DispatchResult::failed()));
    }
}
