//! HTTP server module.
//!
//! Serves the router over plain HTTP and shuts down gracefully on
//! SIGTERM/SIGINT, draining in-flight connections first.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
