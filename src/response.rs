//! Normalized response envelope shared by every operation.

use crate::{Error, Result};
use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

/// Response body decoded according to its declared content type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Zero-length body (e.g. `204 No Content`).
    Empty,
    Json(serde_json::Value),
    Text(String),
    /// Anything that is neither JSON nor `text/*`.
    Binary(Bytes),
}

impl ResponseBody {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseBody::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResponseBody::Empty)
    }
}

/// `{data, status, headers}`: the uniform result of every call.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
    pub headers: HeaderMap,
}

impl<T> ApiResponse<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            status: self.status,
            headers: self.headers,
        }
    }

    fn try_map<U>(self, f: impl FnOnce(T) -> Result<U>) -> Result<ApiResponse<U>> {
        Ok(ApiResponse {
            data: f(self.data)?,
            status: self.status,
            headers: self.headers,
        })
    }
}

impl ApiResponse<ResponseBody> {
    /// Decode a JSON body into `T`. An empty body decodes as JSON `null`,
    /// so `Option<_>` and unit targets accept it.
    pub fn json<T: DeserializeOwned>(self) -> Result<ApiResponse<T>> {
        self.try_map(|body| match body {
            ResponseBody::Json(v) => Ok(serde_json::from_value(v)?),
            ResponseBody::Empty => Ok(serde_json::from_value(serde_json::Value::Null)?),
            ResponseBody::Text(s) => Ok(serde_json::from_str(&s)?),
            ResponseBody::Binary(b) => Ok(serde_json::from_slice(&b)?),
        })
    }

    pub fn text(self) -> Result<ApiResponse<String>> {
        self.try_map(|body| match body {
            ResponseBody::Text(s) => Ok(s),
            ResponseBody::Empty => Ok(String::new()),
            ResponseBody::Json(v) => Ok(v.to_string()),
            ResponseBody::Binary(b) => String::from_utf8(b.to_vec()).map_err(|e| {
                Error::validation_with_context(
                    "response body is not valid UTF-8",
                    crate::ErrorContext::new()
                        .with_details(e.to_string())
                        .with_source("response"),
                )
            }),
        })
    }

    pub fn bytes(self) -> Result<ApiResponse<Bytes>> {
        self.try_map(|body| match body {
            ResponseBody::Binary(b) => Ok(b),
            ResponseBody::Empty => Ok(Bytes::new()),
            ResponseBody::Text(s) => Ok(Bytes::from(s)),
            ResponseBody::Json(v) => Ok(Bytes::from(serde_json::to_vec(&v)?)),
        })
    }

    /// Accept any successful body and discard it.
    pub fn empty(self) -> Result<ApiResponse<()>> {
        Ok(self.map(|_| ()))
    }
}
