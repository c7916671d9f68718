use thiserror::Error;

/// Well-known values of [`ClientError::code`].
///
/// Codes supplied by the service in an error body are passed through verbatim,
/// so this list is not exhaustive.
pub mod codes {
    pub const TIMEOUT: &str = "TIMEOUT";
    pub const EXECUTION_ERROR: &str = "EXECUTION_ERROR";
    pub const STATUS_ERROR: &str = "STATUS_ERROR";

    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const USAGE_LIMIT_EXCEEDED: &str = "USAGE_LIMIT_EXCEEDED";
    pub const INVALID_JSON: &str = "INVALID_JSON";
}

/// The single error type returned by every client operation.
///
/// `http_status` is only set when the failure came from an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ClientError {
    pub message: String,
    pub code: Option<String>,
    pub http_status: Option<u16>,
}

impl ClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            http_status: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn is_timeout(&self) -> bool {
        self.code() == Some(codes::TIMEOUT)
    }

    /// Short human-readable explanation for the common failure shapes.
    pub fn hint(&self) -> Option<&'static str> {
        match self.code() {
            Some(codes::UNAUTHORIZED) => return Some("invalid API key"),
            Some(codes::TIMEOUT) => return Some("workflow execution timed out"),
            Some(codes::USAGE_LIMIT_EXCEEDED) => return Some("usage limit exceeded"),
            Some(codes::INVALID_JSON) => return Some("invalid JSON in request body"),
            _ => {}
        }
        match self.http_status {
            Some(404) => Some("workflow not found"),
            Some(403) => Some("workflow is not deployed"),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
