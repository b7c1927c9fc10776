use crate::models::ApiErrorBody;
use crate::response::ResponseBody;
use reqwest::header::HeaderMap;
use std::time::Duration;
use thiserror::Error;

/// Structured error context for configuration and argument problems.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g. "config.base_url", "args.clusterId")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g. expected shape, offending value)
    pub details: Option<String>,
    /// Source of the error (e.g. "config", "transport", "registry")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Why a request was abandoned before a response arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The configured timeout elapsed.
    Timeout(Duration),
    /// A caller-supplied cancellation token fired.
    Signal,
}

impl std::fmt::Display for CancelReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CancelReason::Timeout(d) => write!(f, "timed out after {}ms", d.as_millis()),
            CancelReason::Signal => f.write_str("cancelled by caller"),
        }
    }
}

/// Unified error type for every SDK call.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("HTTP error: status {status}")]
    Http {
        status: u16,
        headers: HeaderMap,
        body: ResponseBody,
    },

    #[error("Request cancelled: {reason}")]
    Cancelled { reason: CancelReason },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Low-level failures reported by the HTTP stack.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// HTTP status code, for `Http` errors only.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Decoded response body, for `Http` errors only.
    pub fn body(&self) -> Option<&ResponseBody> {
        match self {
            Error::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The API's structured error payload, when an `Http` error carried one.
    pub fn api_error(&self) -> Option<ApiErrorBody> {
        let body = self.body()?.as_json()?;
        serde_json::from_value(body.clone()).ok()
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::Cancelled {
                reason: CancelReason::Timeout(_)
            }
        )
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Validation { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }
}
