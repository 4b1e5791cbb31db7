use crate::{
    error::{LeonardoError, Result},
    secrets::{Credential, SecretSource},
};
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://cloud.leonardo.ai/api/rest/v1";

pub const API_KEY_ENV: &str = "LEONARDO_API_KEY";
pub const API_KEY_SOURCE_ENV: &str = "LEONARDO_API_KEY_SOURCE";
pub const BASE_URL_ENV: &str = "LEONARDO_BASE_URL";

#[derive(Debug, Clone)]
pub struct LeonardoConfig {
    pub api_key: Option<Credential>,
    pub api_key_source: Option<SecretSource>,
    /// Why `LEONARDO_API_KEY_SOURCE` could not be parsed, if it was set but malformed.
    pub api_key_source_error: Option<String>,
    pub base_url: Option<String>,
    pub validate_requests: bool,
    pub http_client: Option<reqwest::Client>,
}

impl Default for LeonardoConfig {
    fn default() -> Self {
        LeonardoConfig {
            api_key: None,
            api_key_source: None,
            api_key_source_error: None,
            base_url: None,
            validate_requests: true,
            http_client: None,
        }
    }
}

impl LeonardoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `LEONARDO_API_KEY`, `LEONARDO_API_KEY_SOURCE` and `LEONARDO_BASE_URL`.
    ///
    /// A malformed `LEONARDO_API_KEY_SOURCE` is kept as an error and reported
    /// when the client is built without an explicit key.
    pub fn from_env() -> Self {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .map(Credential::new)
            .filter(|c| !c.is_blank());
        let (api_key_source, api_key_source_error) = match env::var(API_KEY_SOURCE_ENV) {
            Ok(raw) => match SecretSource::parse(&raw) {
                Ok(source) => (Some(source), None),
                Err(e) => (None, Some(e.to_string())),
            },
            Err(_) => (None, None),
        };
        let base_url = env::var(BASE_URL_ENV).ok().filter(|s| !s.trim().is_empty());

        LeonardoConfig {
            api_key,
            api_key_source,
            api_key_source_error,
            base_url,
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Credential::new(api_key));
        self
    }

    pub fn with_api_key_source(mut self, source: SecretSource) -> Self {
        self.api_key_source = Some(source);
        self.api_key_source_error = None;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Turning validation off sends every value as-is and leaves rejection to the service.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_requests = enabled;
        self
    }

    /// Supplies the transport. Timeouts, proxies and TLS settings belong on this client.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .map(|s| s.trim().trim_end_matches('/'))
            .unwrap_or(DEFAULT_BASE_URL)
    }

    /// An explicit key wins over a secret source. The key must be usable as
    /// an `Authorization` header value.
    pub fn resolve_credential(&self) -> Result<Credential> {
        let credential = self.lookup_credential()?;
        credential.authorization_header()?;
        Ok(credential)
    }

    fn lookup_credential(&self) -> Result<Credential> {
        if let Some(api_key) = self.api_key.as_ref().filter(|c| !c.is_blank()) {
            return Ok(api_key.clone());
        }
        if let Some(source) = &self.api_key_source {
            return source.resolve();
        }
        if let Some(error) = &self.api_key_source_error {
            return Err(LeonardoError::ConfigError(format!(
                "invalid {}: {}",
                API_KEY_SOURCE_ENV, error
            )));
        }
        Err(LeonardoError::ConfigError(format!(
            "Leonardo API key is required (set {} or {})",
            API_KEY_ENV, API_KEY_SOURCE_ENV
        )))
    }
}
