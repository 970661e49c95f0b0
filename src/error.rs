//! Error types for management API operations.

use thiserror::Error;

/// Result type alias for management API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Main error type for management API operations.
///
/// The three variants correspond to the three ways a call can fail:
/// the request never completed at the HTTP layer, the server answered
/// with a JSON-RPC error object, or the server claimed success with a
/// body the client could not decode. Callers must treat any error as
/// "the operation did not produce a usable result" - output values are
/// only meaningful on `Ok`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP transport failure (connection refused, timeout, malformed
    /// HTTP). Never retried by the client.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server returned a well-formed JSON-RPC error object. Carries
    /// the server's code and message verbatim.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// Server-provided error code.
        code: i32,
        /// Server-provided error message.
        message: String,
    },

    /// The response claimed success but its body or `result` member did
    /// not decode into the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Creates a decode error.
    pub fn decode<T: ToString>(msg: T) -> Self {
        Self::Decode(msg.to_string())
    }
}

impl From<crate::rpc::RpcError> for ApiError {
    fn from(err: crate::rpc::RpcError) -> Self {
        Self::Rpc {
            code: err.code,
            message: err.message,
        }
    }
}
