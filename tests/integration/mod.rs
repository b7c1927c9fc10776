//! Integration tests with mock HTTP server

pub mod bound_client;
pub mod cancellation;
pub mod headers;
pub mod mock_server;
pub mod responses;
