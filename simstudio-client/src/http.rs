use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;

#[derive(Debug, Clone)]
pub struct HttpRequestParts {
    pub method: Method,
    pub url: url::Url,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct HttpResponseParts {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponseParts {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Header lookup by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("timeout")]
    Timeout,
    #[error("connect/dns/tls error: {0}")]
    Network(String),
    #[error("client has been closed")]
    Closed,
    #[error("http error: {0}")]
    Other(String),
}

/// Sends one request and returns the full response.
///
/// `timeout` bounds the whole exchange; `None` leaves the transport default in place.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(
        &self,
        req: HttpRequestParts,
        timeout: Option<Duration>,
    ) -> Result<HttpResponseParts, TransportError>;

    /// Called once when the owning client is closed.
    fn close(&self) {}
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("simstudio-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        req: HttpRequestParts,
        timeout: Option<Duration>,
    ) -> Result<HttpResponseParts, TransportError> {
        let mut rb = self.client.request(req.method, req.url);
        if let Some(timeout) = timeout {
            rb = rb.timeout(timeout);
        }

        for (k, v) in req.headers {
            rb = rb.header(k, v);
        }

        if let Some(body) = req.body {
            rb = rb.body(body);
        }

        let resp = rb.send().await.map_err(map_reqwest_error)?;
        let status = resp.status().as_u16();

        let mut headers = BTreeMap::new();
        for (k, v) in resp.headers().iter() {
            if let Ok(s) = v.to_str() {
                headers.insert(k.to_string(), s.to_string());
            }
        }

        let body = resp.bytes().await.map_err(map_reqwest_error)?.to_vec();

        Ok(HttpResponseParts { status, headers, body })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        return TransportError::Timeout;
    }
    if e.is_connect() || e.is_request() {
        return TransportError::Network(e.to_string());
    }
    TransportError::Other(e.to_string())
}

pub const REDACTED: &str = "<redacted>";

/// Copy of `headers` with the values of `sensitive` names replaced, matched case-insensitively.
pub fn redact_headers(
    headers: &BTreeMap<String, String>,
    sensitive: &[&str],
) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(k, v)| {
            if sensitive.iter().any(|s| k.eq_ignore_ascii_case(s)) {
                (k.clone(), REDACTED.to_string())
            } else {
                (k.clone(), v.clone())
            }
        })
        .collect()
}
