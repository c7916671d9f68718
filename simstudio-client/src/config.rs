use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

pub const DEFAULT_BASE_URL: &str = "https://simstudio.ai";

pub const DEFAULT_EXECUTE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings owned by a single [`crate::WorkflowClient`].
///
/// The base URL is stored without trailing slashes so endpoint paths can be
/// appended directly.
#[derive(Debug)]
pub struct ClientConfig {
    api_key: SecretString,
    base_url: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: normalize_base_url(DEFAULT_BASE_URL),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.set_base_url(base_url);
        self
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    pub(crate) fn api_key_str(&self) -> &str {
        self.api_key.expose_secret()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = SecretString::from(api_key.into());
    }

    pub fn set_base_url(&mut self, base_url: impl AsRef<str>) {
        self.base_url = normalize_base_url(base_url.as_ref());
    }
}

pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
