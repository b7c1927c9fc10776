use crate::config::ClientConfig;
use crate::error::{CancelReason, TransportError};
use crate::response::{ApiResponse, ResponseBody};
use crate::{Error, ErrorContext, Result};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Proxy};
use serde::Serialize;
use std::env;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Per-call request options: method, extra headers, query, JSON body and an
/// optional cancellation token.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub cancellation: Option<CancellationToken>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
            cancellation: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Append a query pair only when the value is present.
    pub fn query_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(name, v),
            None => self,
        }
    }

    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn json<T: Serialize>(self, body: &T) -> Result<Self> {
        Ok(self.body(serde_json::to_value(body)?))
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// A fully built request that only lacks a configuration.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub path: String,
    pub options: RequestOptions,
}

impl PreparedRequest {
    pub fn new(path: impl Into<String>, options: RequestOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub async fn send(self, config: Option<&ClientConfig>) -> Result<ApiResponse<ResponseBody>> {
        fetch(&self.path, self.options, config).await
    }
}

/// Build the shared `reqwest::Client` used by a configuration.
///
/// Pool knobs are env-overridable:
/// - `CLOUD_API_POOL_MAX_IDLE_PER_HOST` (default 32)
/// - `CLOUD_API_POOL_IDLE_TIMEOUT_SECS` (default 90)
/// - `CLOUD_API_CONNECT_TIMEOUT_SECS` (default 10)
/// - `CLOUD_API_PROXY_URL`
///
/// No overall request timeout is set here; that is owned by [`fetch`].
pub fn build_http_client() -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .pool_max_idle_per_host(env_parse("CLOUD_API_POOL_MAX_IDLE_PER_HOST").unwrap_or(32))
        .pool_idle_timeout(Some(Duration::from_secs(
            env_parse("CLOUD_API_POOL_IDLE_TIMEOUT_SECS").unwrap_or(90),
        )))
        .connect_timeout(Duration::from_secs(
            env_parse("CLOUD_API_CONNECT_TIMEOUT_SECS").unwrap_or(10),
        ));

    if let Ok(proxy_url) = env::var("CLOUD_API_PROXY_URL") {
        match Proxy::all(&proxy_url) {
            Ok(proxy) => builder = builder.proxy(proxy),
            Err(e) => warn!(proxy = %proxy_url, error = %e, "ignoring invalid proxy url"),
        }
    }

    builder
        .build()
        .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse::<T>().ok())
}

fn has_scheme(path: &str) -> bool {
    let lower = path.get(..8).unwrap_or(path).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Absolute URLs pass through untouched; relative paths are joined to the base once.
pub fn resolve_url(base_url: &str, path: &str) -> String {
    if has_scheme(path) {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if path.is_empty() {
        base.to_string()
    } else if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// `Content-Type: application/json` < configuration headers < per-call headers.
pub fn merge_headers(config_headers: &HeaderMap, per_call: &[(String, String)]) -> Result<HeaderMap> {
    let mut merged = HeaderMap::new();
    merged.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in config_headers {
        merged.insert(name.clone(), value.clone());
    }

    for (name, value) in per_call {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            Error::validation_with_context(
                "invalid per-call header name",
                ErrorContext::new()
                    .with_field_path(format!("options.headers.{name}"))
                    .with_details(e.to_string())
                    .with_source("transport"),
            )
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            Error::validation_with_context(
                "invalid per-call header value",
                ErrorContext::new()
                    .with_field_path(format!("options.headers.{name}"))
                    .with_details(e.to_string())
                    .with_source("transport"),
            )
        })?;
        merged.insert(header_name, header_value);
    }

    Ok(merged)
}

/// Issue a single request and normalize the result.
///
/// The cancellation source is the per-call token, else the configuration
/// token, else the configuration timeout. The timeout timer lives only as
/// long as this call and is dropped on every exit path.
pub async fn fetch(
    path: &str,
    options: RequestOptions,
    config: Option<&ClientConfig>,
) -> Result<ApiResponse<ResponseBody>> {
    let config = config.ok_or_else(|| {
        Error::configuration_with_context(
            "no client configuration supplied",
            ErrorContext::new()
                .with_details(format!("request to {path}"))
                .with_source("transport"),
        )
    })?;

    let url = resolve_url(config.base_url(), path);
    let headers = merge_headers(config.headers(), &options.headers)?;
    let method = options.method.clone();

    let mut request = config.http().request(method.clone(), &url).headers(headers);
    if !options.query.is_empty() {
        request = request.query(&options.query);
    }
    if let Some(body) = &options.body {
        request = request.body(serde_json::to_vec(body)?);
    }

    let signal = options
        .cancellation
        .clone()
        .or_else(|| config.cancellation().cloned());
    let timeout = if signal.is_none() {
        config.timeout()
    } else {
        None
    };

    debug!(method = %method, url = %url, "request start");
    let started = Instant::now();

    let exchange = async move {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;
        read_response(response).await
    };

    let outcome = match (signal, timeout) {
        (Some(token), _) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(Error::Cancelled { reason: CancelReason::Signal }),
                res = exchange => res,
            }
        }
        (None, Some(limit)) => match tokio::time::timeout(limit, exchange).await {
            Ok(res) => res,
            Err(_) => Err(Error::Cancelled {
                reason: CancelReason::Timeout(limit),
            }),
        },
        (None, None) => exchange.await,
    };

    let elapsed_ms = started.elapsed().as_millis() as u64;
    match &outcome {
        Ok(resp) => debug!(method = %method, url = %url, status = resp.status, elapsed_ms, "request done"),
        Err(Error::Cancelled { reason }) => {
            warn!(method = %method, url = %url, %reason, elapsed_ms, "request cancelled")
        }
        Err(Error::Http { status, .. }) => {
            debug!(method = %method, url = %url, status, elapsed_ms, "request failed")
        }
        Err(e) => warn!(method = %method, url = %url, error = %e, elapsed_ms, "request error"),
    }
    outcome
}

async fn read_response(response: reqwest::Response) -> Result<ApiResponse<ResponseBody>> {
    let status = response.status();
    let headers = response.headers().clone();
    let raw = response
        .bytes()
        .await
        .map_err(|e| Error::Transport(TransportError::Http(e)))?;
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_ascii_lowercase());

    if !status.is_success() {
        // Error bodies are surfaced as-is even when they fail to parse.
        let body = decode_body(content_type.as_deref(), raw.clone())
            .unwrap_or_else(|_| ResponseBody::Binary(raw));
        return Err(Error::Http {
            status: status.as_u16(),
            headers,
            body,
        });
    }

    let body = decode_body(content_type.as_deref(), raw)?;
    Ok(ApiResponse {
        data: body,
        status: status.as_u16(),
        headers,
    })
}

fn decode_body(content_type: Option<&str>, raw: Bytes) -> Result<ResponseBody> {
    if raw.is_empty() {
        return Ok(ResponseBody::Empty);
    }
    match content_type {
        Some(ct) if ct.contains("json") => Ok(ResponseBody::Json(serde_json::from_slice(&raw)?)),
        Some(ct) if ct.starts_with("text/") => Ok(ResponseBody::Text(
            String::from_utf8_lossy(&raw).into_owned(),
        )),
        _ => Ok(ResponseBody::Binary(raw)),
    }
}
