//! Bound client: the generated operation surface with a configuration injected.
//!
//! [`setup_config`] binds a [`ClientConfig`](crate::ClientConfig) once; every
//! operation reached through the returned [`BoundClient`] behaves exactly like
//! calling the generated function with that configuration appended.

pub mod core;
mod typed;

pub use core::{setup_config, BoundClient, BoundOperation};
