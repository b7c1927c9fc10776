//! HTTP transport: one request in, one normalized envelope out.

pub mod http;

pub use crate::error::TransportError;
pub use http::{
    build_http_client, fetch, merge_headers, resolve_url, PreparedRequest, RequestOptions,
};
