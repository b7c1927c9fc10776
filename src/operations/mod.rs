//! Generated operation functions, one per API endpoint.
//!
//! Every operation comes in two layers that share a params struct:
//! - `<op>_request(params)` builds a [`PreparedRequest`] (path, query, body, headers)
//! - `<op>(params, config)` sends it through [`fetch`](crate::transport::fetch)
//!   and decodes the typed response
//!
//! The [`registry`] maps OpenAPI operation ids to the request builders so the
//! bound client can dispatch by name.

pub mod applications;
pub mod clusters;
pub mod long_running;
pub mod projects;
pub mod registry;

pub use registry::OperationDef;

use crate::transport::PreparedRequest;
use crate::{Error, ErrorContext, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// RFC 3986 unreserved characters stay as-is inside a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode a path parameter as exactly one segment.
pub(crate) fn segment(name: &str, raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(Error::validation_with_context(
            "path parameter must not be empty",
            ErrorContext::new()
                .with_field_path(format!("params.{name}"))
                .with_source("operations"),
        ));
    }
    Ok(utf8_percent_encode(raw, PATH_SEGMENT).to_string())
}

pub(crate) type Prepared = Result<PreparedRequest>;
