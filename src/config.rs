//! Connection configuration bound into a client.
//!
//! A [`ClientConfig`] is immutable once built. Per-call overrides are expressed
//! by deriving a new config (`with_*` helpers), which shares the underlying
//! connection pool with the original.

use crate::{Error, ErrorContext, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::env;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Header carrying the project identifier.
pub const PROJECT_ID_HEADER: &str = "x-project-id";

const SENSITIVE_HEADERS: &[&str] = &[API_KEY_HEADER, "authorization"];

/// Base URL, default headers, timeout and cancellation applied to every request.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    headers: HeaderMap,
    timeout: Option<Duration>,
    cancellation: Option<CancellationToken>,
    http: reqwest::Client,
}

impl ClientConfig {
    pub fn builder(base_url: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(base_url)
    }

    /// Build a config from the environment.
    ///
    /// - `CLOUD_API_BASE_URL` (required)
    /// - `CLOUD_API_KEY`
    /// - `CLOUD_PROJECT_ID`
    /// - `CLOUD_API_TIMEOUT_MS`
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("CLOUD_API_BASE_URL").map_err(|_| {
            Error::configuration_with_context(
                "CLOUD_API_BASE_URL is not set",
                ErrorContext::new()
                    .with_field_path("CLOUD_API_BASE_URL")
                    .with_source("config"),
            )
        })?;

        let mut builder = ClientConfigBuilder::new(base_url);
        if let Ok(key) = env::var("CLOUD_API_KEY") {
            builder = builder.api_key(key);
        }
        if let Ok(project) = env::var("CLOUD_PROJECT_ID") {
            builder = builder.project_id(project);
        }
        if let Some(ms) = env::var("CLOUD_API_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
        {
            builder = builder.timeout_ms(ms);
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Same config pointed at another origin. A trailing slash is stripped.
    pub fn with_base_url(&self, base_url: &str) -> Result<Self> {
        Ok(self.rebased(normalize_base_url(base_url)?))
    }

    /// Copy with an already-normalized base URL.
    pub(crate) fn rebased(&self, base_url: String) -> Self {
        let mut next = self.clone();
        next.base_url = base_url;
        next
    }

    /// Same config with one header added or replaced.
    pub fn with_header(&self, name: &str, value: &str) -> Result<Self> {
        let mut next = self.clone();
        let (name, value) = parse_header(name, value)?;
        next.headers.insert(name, value);
        Ok(next)
    }

    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let mut next = self.clone();
        next.timeout = Some(timeout);
        next
    }

    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        let mut next = self.clone();
        next.cancellation = Some(token);
        next
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: Vec<(String, String)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                let shown = if SENSITIVE_HEADERS.contains(&k.as_str()) {
                    "<redacted>".to_string()
                } else {
                    v.to_str().unwrap_or("<binary>").to_string()
                };
                (k.as_str().to_string(), shown)
            })
            .collect();
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("headers", &headers)
            .field("timeout", &self.timeout)
            .field("cancellation", &self.cancellation.is_some())
            .finish()
    }
}

/// Builder for [`ClientConfig`]. Header and URL validation is deferred to `build`.
pub struct ClientConfigBuilder {
    base_url: String,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
    cancellation: Option<CancellationToken>,
    http: Option<reqwest::Client>,
}

impl ClientConfigBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            headers: Vec::new(),
            timeout: None,
            cancellation: None,
            http: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn api_key(self, key: impl Into<String>) -> Self {
        self.header(API_KEY_HEADER, key)
    }

    pub fn project_id(self, project: impl Into<String>) -> Self {
        self.header(PROJECT_ID_HEADER, project)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout_ms(self, ms: u64) -> Self {
        self.timeout(Duration::from_millis(ms))
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Reuse an existing connection pool instead of building a new one.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        let base_url = normalize_base_url(&self.base_url)?;

        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let (name, value) = parse_header(name, value)?;
            headers.insert(name, value);
        }

        let http = match self.http {
            Some(client) => client,
            None => crate::transport::build_http_client()?,
        };

        Ok(ClientConfig {
            base_url,
            headers,
            timeout: self.timeout,
            cancellation: self.cancellation,
            http,
        })
    }
}

/// Validate an origin and strip trailing slashes.
pub(crate) fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed).map_err(|e| {
        Error::configuration_with_context(
            "base URL is not a valid absolute URL",
            ErrorContext::new()
                .with_field_path("config.base_url")
                .with_details(format!("{raw}: {e}"))
                .with_source("config"),
        )
    })?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::configuration_with_context(
            "base URL must use http or https",
            ErrorContext::new()
                .with_field_path("config.base_url")
                .with_details(raw.to_string())
                .with_source("config"),
        ));
    }
    Ok(trimmed.to_string())
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
        Error::configuration_with_context(
            "invalid header name",
            ErrorContext::new()
                .with_field_path(format!("config.headers.{name}"))
                .with_details(e.to_string())
                .with_source("config"),
        )
    })?;
    let header_value = HeaderValue::from_str(value).map_err(|e| {
        Error::configuration_with_context(
            "invalid header value",
            ErrorContext::new()
                .with_field_path(format!("config.headers.{name}"))
                .with_details(e.to_string())
                .with_source("config"),
        )
    })?;
    Ok((header_name, header_value))
}
