//! JSON-RPC 2.0 envelope types.
//!
//! The management service frames every call as a JSON-RPC 2.0 exchange:
//! the client posts a request envelope and receives either a `result` or
//! an `error` member back. This module holds both halves of the wire
//! shape:
//!
//! - [`RpcRequest`] / [`RpcResponse`]: what the client sends and parses
//! - [`RpcServerRequest`] / [`RpcServerResponse`]: what a conforming
//!   server receives and answers with (used by mock servers in tests)
//! - [`RpcError`]: the error object with the standard JSON-RPC 2.0 codes

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 protocol version.
pub const JSON_RPC_VERSION: &str = "2.0";

// =============================================================================
// Client-side Types
// =============================================================================

/// JSON-RPC 2.0 request (client-side, for building requests).
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    /// Protocol version (always "2.0").
    pub jsonrpc: &'static str,
    /// Method name.
    pub method: &'static str,
    /// Method parameters.
    pub params: Value,
    /// Request ID.
    pub id: u64,
}

impl RpcRequest {
    /// Creates a new RPC request with a specific ID.
    pub fn with_id(method: &'static str, params: impl Serialize, id: u64) -> Self {
        Self {
            jsonrpc: JSON_RPC_VERSION,
            method,
            params: serde_json::to_value(params).unwrap_or(Value::Null),
            id,
        }
    }
}

/// JSON-RPC 2.0 response (client-side, for parsing responses).
///
/// Exactly one of `result` and `error` is expected to be present.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    /// Protocol version.
    pub jsonrpc: String,
    /// Result (present on success).
    pub result: Option<Value>,
    /// Error (present on failure).
    pub error: Option<RpcError>,
    /// Request ID (echoed by the server for correlation).
    pub id: Option<Value>,
}

// =============================================================================
// Server-side Types
// =============================================================================

/// JSON-RPC 2.0 request (server-side, for receiving requests).
///
/// The method field is a `String` rather than `&'static str` since it
/// comes from external input.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcServerRequest {
    /// Protocol version.
    pub jsonrpc: String,
    /// Method name.
    pub method: String,
    /// Method parameters.
    #[serde(default)]
    pub params: Value,
    /// Request ID.
    pub id: Option<Value>,
}

impl RpcServerRequest {
    /// Parses the params as a specific type.
    pub fn parse_params<T: DeserializeOwned>(&self) -> std::result::Result<T, String> {
        serde_json::from_value(self.params.clone()).map_err(|e| e.to_string())
    }
}

/// JSON-RPC 2.0 response (server-side, for building responses).
#[derive(Debug, Clone, Serialize)]
pub struct RpcServerResponse {
    /// Protocol version (always "2.0").
    pub jsonrpc: &'static str,
    /// Result (present on success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error (present on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    /// Request ID.
    pub id: Option<Value>,
}

impl RpcServerResponse {
    /// Creates a success response.
    pub fn success(id: Option<Value>, result: impl Serialize) -> Self {
        Self {
            jsonrpc: JSON_RPC_VERSION,
            result: Some(serde_json::to_value(result).unwrap_or(Value::Null)),
            error: None,
            id,
        }
    }

    /// Creates an error response.
    pub fn error(id: Option<Value>, error: RpcError) -> Self {
        Self {
            jsonrpc: JSON_RPC_VERSION,
            result: None,
            error: Some(error),
            id,
        }
    }
}

// =============================================================================
// Error Object
// =============================================================================

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RpcError {
    /// Error code.
    pub code: i32,
    /// Error message.
    pub message: String,
    /// Additional error data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    /// Parse error (-32700): invalid JSON was received by the server.
    pub const PARSE_ERROR: i32 = -32700;
    /// Invalid request (-32600): the JSON sent is not a valid request object.
    pub const INVALID_REQUEST: i32 = -32600;
    /// Method not found (-32601): the method does not exist.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid params (-32602): invalid method parameter(s).
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal error (-32603): internal JSON-RPC error.
    pub const INTERNAL_ERROR: i32 = -32603;

    /// Creates an error with the given code and message.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Creates a method not found error.
    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            Self::METHOD_NOT_FOUND,
            format!("Method '{}' not found", method),
        )
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RPC error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for RpcError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_request_serialization() {
        let request = RpcRequest::with_id("createVolume", serde_json::json!({"name": "vol1"}), 7);
        let json = serde_json::to_string(&request).unwrap();

        assert!(json.contains("\"jsonrpc\":\"2.0\""));
        assert!(json.contains("\"method\":\"createVolume\""));
        assert!(json.contains("\"id\":7"));
    }

    #[test]
    fn test_rpc_response_success_parsing() {
        let body = r#"{"jsonrpc":"2.0","result":{"volume_uuid":"abc"},"id":1}"#;
        let response: RpcResponse = serde_json::from_str(body).unwrap();

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["volume_uuid"], "abc");
    }

    #[test]
    fn test_rpc_response_error_parsing() {
        let body = r#"{"jsonrpc":"2.0","error":{"code":-32601,"message":"no such method"},"id":1}"#;
        let response: RpcResponse = serde_json::from_str(body).unwrap();

        assert!(response.result.is_none());
        let error = response.error.unwrap();
        assert_eq!(error.code, RpcError::METHOD_NOT_FOUND);
        assert_eq!(error.message, "no such method");
    }

    #[test]
    fn test_rpc_server_request_param_parsing() {
        #[derive(Deserialize)]
        struct Params {
            volume_uuid: String,
        }

        let body = r#"{"jsonrpc":"2.0","method":"deleteVolume","params":{"volume_uuid":"abc"},"id":2}"#;
        let request: RpcServerRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.method, "deleteVolume");
        let params: Params = request.parse_params().unwrap();
        assert_eq!(params.volume_uuid, "abc");
    }

    #[test]
    fn test_rpc_server_response_serialization() {
        let success = RpcServerResponse::success(
            Some(Value::Number(1.into())),
            serde_json::json!({"volume_uuid": "abc"}),
        );
        let json = serde_json::to_string(&success).unwrap();
        assert!(json.contains("\"result\""));
        assert!(!json.contains("\"error\""));

        let error = RpcServerResponse::error(None, RpcError::method_not_found("mountVolume"));
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"error\""));
        assert!(!json.contains("\"result\""));
    }

    #[test]
    fn test_rpc_error_display() {
        let error = RpcError::new(RpcError::INTERNAL_ERROR, "server fault");
        assert_eq!(error.to_string(), "RPC error -32603: server fault");
    }
}
