//! # cloud-api-sdk
//!
//! Typed Rust client for the cloud management REST API.
//!
//! ## Overview
//!
//! Every API operation is a plain async function in [`operations`] that takes a
//! params struct and an optional [`ClientConfig`]. [`setup_config`] binds one
//! configuration into the whole surface so callers stop threading it through
//! every call:
//!
//! ```rust,no_run
//! use cloud_api_sdk::operations::clusters::ListClustersParams;
//! use cloud_api_sdk::{setup_config, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> cloud_api_sdk::Result<()> {
//!     let config = ClientConfig::builder("https://api.example.com")
//!         .api_key("your-api-key")
//!         .timeout_ms(5_000)
//!         .build()?;
//!     let client = setup_config(config);
//!
//!     let clusters = client
//!         .list_clusters(ListClustersParams {
//!             project_id: Some("proj-1".into()),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("{} clusters", clusters.data.items.len());
//!
//!     // Same operation, looked up by its OpenAPI id.
//!     let raw = client
//!         .call("listClusters", serde_json::json!({ "projectId": "proj-1" }))
//!         .await?;
//!     println!("status {}", raw.status);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Bound client and by-name operation lookup |
//! | [`config`] | Base URL, headers, timeout and cancellation |
//! | [`operations`] | One async function per API operation, plus the registry |
//! | [`models`] | Request and response bodies |
//! | [`transport`] | URL resolution, header merging, the single fetch path |
//! | [`openapi`] | Cleanup pass run over the OpenAPI document before generation |

pub mod client;
pub mod config;
pub mod models;
pub mod openapi;
pub mod operations;
pub mod response;
pub mod transport;

pub use client::{setup_config, BoundClient, BoundOperation};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use response::{ApiResponse, ResponseBody};
pub use tokio_util::sync::CancellationToken;
pub use transport::{PreparedRequest, RequestOptions};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{CancelReason, Error, ErrorContext, TransportError};
