//! Server library module.
//!
//! Exposes the router and its middleware so the binary and the
//! integration tests build the same application.

pub mod cache;
pub mod error;
pub mod routes;
