//! # Quarry Management API Client
//!
//! An async Rust client for the management API of the Quarry distributed
//! storage system. The management service speaks JSON-RPC 2.0 over HTTP
//! POST and authenticates callers with HTTP basic authentication.
//!
//! ## Features
//!
//! - **Volume lifecycle**: create and delete volumes through typed calls
//! - **Stateless calls**: every operation is a single request/response
//!   round trip; the client keeps no protocol state between calls
//! - **Shareable**: one client instance can be used from many tasks
//!   concurrently; configuration is immutable after construction
//!
//! ## Examples
//!
//! ```rust,no_run
//! use quarry_api::ManagementClient;
//!
//! # async fn run() -> quarry_api::Result<()> {
//! let client = ManagementClient::new("http://head.quarry.local:7860/api", "admin", "secret");
//!
//! let uuid = client.create_volume("scratch", "alice", "staff").await?;
//! println!("created volume {uuid}");
//!
//! client.delete_volume(&uuid).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod rpc;

pub use client::{
    CreateVolumeRequest, CreateVolumeResponse, DeleteVolumeRequest, DeleteVolumeResponse,
    ManagementClient,
};
pub use error::{ApiError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
