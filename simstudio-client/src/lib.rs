#![forbid(unsafe_code)]

//! Client for executing Sim Studio workflows over HTTP.
//!
//! Two endpoints are wrapped: `POST /api/workflows/{id}/execute` and
//! `GET /api/workflows/{id}/status`. Every failure, whether transport, HTTP or
//! decoding, surfaces as a [`ClientError`] whose `code` and `http_status`
//! identify the cause.
//!
//! ```no_run
//! use simstudio_client::{codes, ClientConfig, WorkflowClient};
//!
//! # async fn example() {
//! let config = ClientConfig::new("sk-...").with_base_url("https://simstudio.ai/");
//! let client = WorkflowClient::from_config(config).expect("transport");
//!
//! match client.execute("my-workflow", None).await {
//!     Ok(result) if result.success => println!("{:?}", result.output),
//!     Ok(result) => println!("workflow failed: {:?}", result.error),
//!     Err(e) if e.code() == Some(codes::TIMEOUT) => println!("timed out"),
//!     Err(e) if e.http_status == Some(404) => println!("workflow not found"),
//!     Err(e) => println!("error: {e}"),
//! }
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod response;
pub mod types;

pub use crate::client::{WorkflowClient, API_KEY_HEADER};
pub use crate::config::{normalize_base_url, ClientConfig, DEFAULT_BASE_URL, DEFAULT_EXECUTE_TIMEOUT};
pub use crate::error::{codes, ClientError, Result};
pub use crate::http::{HttpRequestParts, HttpResponseParts, HttpTransport, ReqwestTransport, TransportError};
pub use crate::types::{ExecutionResult, WorkflowStatus};
