//! Client for the Quarry management API.
//!
//! The management service exposes volume lifecycle operations as JSON-RPC
//! 2.0 methods behind HTTP basic authentication. [`ManagementClient`]
//! holds the transport configuration (endpoint URL and credentials) and
//! funnels every typed operation through one generic dispatcher, so each
//! call is a single stateless request/response round trip.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{ApiError, Result};
use crate::rpc::{RpcRequest, RpcResponse};

// =============================================================================
// Volume Operation Types
// =============================================================================

/// Parameters for the `createVolume` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVolumeRequest {
    /// Volume name.
    pub name: String,
    /// User that will own the volume's root directory.
    pub root_user_id: String,
    /// Group that will own the volume's root directory.
    pub root_group_id: String,
}

/// Result of the `createVolume` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVolumeResponse {
    /// Server-assigned identifier for the new volume.
    pub volume_uuid: String,
}

/// Parameters for the `deleteVolume` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteVolumeRequest {
    /// Identifier of the volume to remove.
    pub volume_uuid: String,
}

/// Result of the `deleteVolume` method. Success is signaled by the
/// absence of an error; the result object carries no fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteVolumeResponse {}

// =============================================================================
// Management Client
// =============================================================================

/// Client for the Quarry management API.
///
/// Configuration is immutable after construction and every call builds
/// its own request, so one instance can be shared across tasks without
/// additional locking. Construction performs no network I/O; connections
/// are established lazily per call by the underlying HTTP client.
#[derive(Debug)]
pub struct ManagementClient {
    /// HTTP client
    http: reqwest::Client,
    /// Management API endpoint URL
    url: String,
    /// Basic-auth username
    username: String,
    /// Basic-auth password
    password: String,
    /// Request ID counter
    request_id: AtomicU64,
}

impl ManagementClient {
    /// Creates a new management API client with a default HTTP client.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::with_http_client(reqwest::Client::new(), url, username, password)
    }

    /// Creates a new management API client on a caller-supplied
    /// `reqwest::Client`.
    ///
    /// The API itself prescribes no timeout; callers wanting bounded
    /// latency configure one on the HTTP client they pass in.
    pub fn with_http_client(
        http: reqwest::Client,
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            http,
            url: url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
            request_id: AtomicU64::new(1),
        }
    }

    /// Returns the configured endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Generates the next request ID.
    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Sends an RPC request and returns the decoded result.
    ///
    /// This is the generic dispatcher every typed operation delegates to:
    /// it wraps the params in a JSON-RPC 2.0 envelope, posts it with
    /// basic-auth credentials, and maps the response envelope onto the
    /// error taxonomy. The response body is consumed exactly once; the
    /// connection is returned to the pool on every exit path.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: impl Serialize,
    ) -> Result<T> {
        let request = RpcRequest::with_id(method, params, self.next_id());

        let response = self
            .http
            .post(&self.url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&request)
            .send()
            .await?;

        let body = response.bytes().await?;
        let rpc_response: RpcResponse = serde_json::from_slice(&body)
            .map_err(|e| ApiError::decode(format!("not a JSON-RPC response: {}", e)))?;

        if let Some(error) = rpc_response.error {
            return Err(error.into());
        }

        let result = rpc_response
            .result
            .ok_or_else(|| ApiError::decode("missing result"))?;

        serde_json::from_value(result)
            .map_err(|e| ApiError::decode(format!("failed to parse result: {}", e)))
    }

    /// Creates a new volume. Its root directory will be owned by the
    /// given user and group.
    ///
    /// Returns the server-assigned volume UUID. The inputs are passed
    /// through unvalidated; format checks are the server's
    /// responsibility. This mutates remote state and has no local undo.
    #[instrument(skip(self))]
    pub async fn create_volume(
        &self,
        name: &str,
        root_user_id: &str,
        root_group_id: &str,
    ) -> Result<String> {
        let request = CreateVolumeRequest {
            name: name.to_string(),
            root_user_id: root_user_id.to_string(),
            root_group_id: root_group_id.to_string(),
        };

        let response: CreateVolumeResponse = self.call("createVolume", request).await?;

        info!("Created volume {} ({})", name, response.volume_uuid);
        Ok(response.volume_uuid)
    }

    /// Deletes a volume by its UUID.
    ///
    /// Unknown or already-deleted UUIDs surface as the server's RPC
    /// error, not a local precondition failure.
    #[instrument(skip(self))]
    pub async fn delete_volume(&self, volume_uuid: &str) -> Result<()> {
        let request = DeleteVolumeRequest {
            volume_uuid: volume_uuid.to_string(),
        };

        let _: DeleteVolumeResponse = self.call("deleteVolume", request).await?;

        info!("Deleted volume {}", volume_uuid);
        Ok(())
    }
}

impl Clone for ManagementClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            url: self.url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            request_id: AtomicU64::new(self.request_id.load(Ordering::Relaxed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_is_trimmed() {
        let client = ManagementClient::new("http://head.example.com:7860/api/", "admin", "pw");
        assert_eq!(client.url(), "http://head.example.com:7860/api");
    }

    #[test]
    fn test_next_id_increments() {
        let client = ManagementClient::new("http://head.example.com:7860/api", "admin", "pw");
        assert_eq!(client.next_id(), 1);
        assert_eq!(client.next_id(), 2);
        assert_eq!(client.next_id(), 3);
    }

    #[test]
    fn test_clone_snapshots_id_counter() {
        let client = ManagementClient::new("http://head.example.com:7860/api", "admin", "pw");
        client.next_id();
        client.next_id();

        let cloned = client.clone();
        assert_eq!(cloned.url(), client.url());
        assert_eq!(cloned.next_id(), 3);
    }

    #[test]
    fn test_create_volume_request_wire_shape() {
        let request = CreateVolumeRequest {
            name: "vol1".to_string(),
            root_user_id: "u1".to_string(),
            root_group_id: "g1".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "vol1",
                "root_user_id": "u1",
                "root_group_id": "g1",
            })
        );
    }
}
