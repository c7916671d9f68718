use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::config::{ClientConfig, DEFAULT_EXECUTE_TIMEOUT};
use crate::error::{codes, ClientError, Result};
use crate::http::{
    redact_headers, HttpRequestParts, HttpResponseParts, HttpTransport, ReqwestTransport,
    TransportError,
};
use crate::response::{decode_success, error_from_response};
use crate::types::{ExecutionResult, WorkflowStatus};

pub const API_KEY_HEADER: &str = "X-API-Key";

/// How transport failures of one operation are reported.
#[derive(Debug, Clone, Copy)]
struct Operation {
    context: &'static str,
    code: &'static str,
}

const EXECUTE: Operation = Operation {
    context: "Failed to execute workflow",
    code: codes::EXECUTION_ERROR,
};

const STATUS: Operation = Operation {
    context: "Failed to get workflow status",
    code: codes::STATUS_ERROR,
};

/// Client for executing workflows and querying their deployment status.
///
/// The client owns its configuration and transport. Requests take `&self`;
/// changing the key or URL takes `&mut self` and applies to later calls.
/// Dropping the client closes it.
///
/// ```no_run
/// use simstudio_client::WorkflowClient;
/// use serde_json::json;
///
/// # async fn example() -> Result<(), simstudio_client::ClientError> {
/// let client = WorkflowClient::new(std::env::var("SIMSTUDIO_API_KEY").unwrap_or_default())?;
///
/// if client.validate("my-workflow").await {
///     let result = client
///         .execute("my-workflow", Some(&json!({"message": "hi"})))
///         .await?;
///     println!("success={} output={:?}", result.success, result.output);
/// }
/// # Ok(())
/// # }
/// ```
pub struct WorkflowClient {
    config: ClientConfig,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl std::fmt::Debug for WorkflowClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowClient")
            .field("config", &self.config)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl WorkflowClient {
    /// Client for the default service origin.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(api_key))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new().map_err(|e| {
            ClientError::new(format!("Failed to initialize HTTP transport: {e}"))
        })?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config,
            transport: Some(transport),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.config.set_api_key(api_key);
    }

    pub fn set_base_url(&mut self, base_url: impl AsRef<str>) {
        self.config.set_base_url(base_url);
    }

    pub fn is_closed(&self) -> bool {
        self.transport.is_none()
    }

    /// Executes a workflow with the default 30 second timeout.
    ///
    /// `None` and `null` input are sent as `{}`.
    pub async fn execute(
        &self,
        workflow_id: &str,
        input: Option<&JsonValue>,
    ) -> Result<ExecutionResult> {
        self.execute_with_timeout(workflow_id, input, DEFAULT_EXECUTE_TIMEOUT)
            .await
    }

    pub async fn execute_with_timeout(
        &self,
        workflow_id: &str,
        input: Option<&JsonValue>,
        timeout: Duration,
    ) -> Result<ExecutionResult> {
        let url = self.endpoint(workflow_id, "execute", EXECUTE)?;
        let body = match input {
            Some(v) if !v.is_null() => serde_json::to_vec(v).map_err(|e| {
                ClientError::new(format!("{}: {e}", EXECUTE.context)).with_code(EXECUTE.code)
            })?,
            _ => b"{}".to_vec(),
        };

        let resp = self
            .send(EXECUTE, Method::POST, url, Some(body), Some(timeout))
            .await?;
        decode_success(&resp, EXECUTE.context, EXECUTE.code)
    }

    /// Same contract as [`Self::execute_with_timeout`].
    ///
    /// The service executes synchronously today; this is where polling for a
    /// long-running execution would go.
    pub async fn execute_sync(
        &self,
        workflow_id: &str,
        input: Option<&JsonValue>,
        timeout: Duration,
    ) -> Result<ExecutionResult> {
        self.execute_with_timeout(workflow_id, input, timeout).await
    }

    pub async fn get_status(&self, workflow_id: &str) -> Result<WorkflowStatus> {
        let url = self.endpoint(workflow_id, "status", STATUS)?;
        let resp = self.send(STATUS, Method::GET, url, None, None).await?;
        decode_success(&resp, STATUS.context, STATUS.code)
    }

    /// Whether the workflow is deployed. Any error reads as `false`.
    pub async fn validate(&self, workflow_id: &str) -> bool {
        match self.get_status(workflow_id).await {
            Ok(status) => status.is_deployed,
            Err(e) => {
                warn!(
                    workflow_id,
                    error = %e,
                    code = ?e.code,
                    http_status = ?e.http_status,
                    "workflow status check failed, reporting not deployed"
                );
                false
            }
        }
    }

    /// Like [`Self::validate`] but returns the status error instead of `false`.
    pub async fn validate_strict(&self, workflow_id: &str) -> Result<bool> {
        Ok(self.get_status(workflow_id).await?.is_deployed)
    }

    /// Releases the transport. Safe to call more than once.
    pub fn close(&mut self) {
        if let Some(transport) = self.transport.take() {
            transport.close();
            debug!(base_url = %self.config.base_url(), "workflow client closed");
        }
    }

    fn endpoint(&self, workflow_id: &str, action: &str, op: Operation) -> Result<url::Url> {
        let raw = format!(
            "{}/api/workflows/{}/{}",
            self.config.base_url(),
            urlencoding::encode(workflow_id),
            action
        );
        url::Url::parse(&raw).map_err(|e| {
            ClientError::new(format!("{}: invalid URL {raw}: {e}", op.context)).with_code(op.code)
        })
    }

    fn default_headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert(
            API_KEY_HEADER.to_string(),
            self.config.api_key_str().to_string(),
        );
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    async fn send(
        &self,
        op: Operation,
        method: Method,
        url: url::Url,
        body: Option<Vec<u8>>,
        timeout: Option<Duration>,
    ) -> Result<HttpResponseParts> {
        let Some(transport) = self.transport.as_ref() else {
            return Err(transport_error(op, TransportError::Closed, timeout));
        };

        let req = HttpRequestParts {
            method,
            url,
            headers: self.default_headers(),
            body,
        };
        debug!(
            method = %req.method,
            url = %req.url,
            headers = ?redact_headers(&req.headers, &[API_KEY_HEADER]),
            "sending request"
        );

        let resp = transport
            .send(req, timeout)
            .await
            .map_err(|e| transport_error(op, e, timeout))?;
        debug!(
            status = resp.status,
            bytes = resp.body.len(),
            content_type = resp.content_type().unwrap_or("-"),
            "received response"
        );

        if !resp.is_success() {
            return Err(error_from_response(&resp));
        }
        Ok(resp)
    }
}

impl Drop for WorkflowClient {
    fn drop(&mut self) {
        self.close();
    }
}

fn transport_error(op: Operation, err: TransportError, timeout: Option<Duration>) -> ClientError {
    match (err, timeout) {
        (TransportError::Timeout, Some(timeout)) => ClientError::new(format!(
            "Workflow execution timed out after {:?} seconds",
            timeout.as_secs_f64()
        ))
        .with_code(codes::TIMEOUT),
        (err, _) => ClientError::new(format!("{}: {err}", op.context)).with_code(op.code),
    }
}
