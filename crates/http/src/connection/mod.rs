//! HTTP connection handling module
//!
//! This module drives a single accepted connection through its whole life:
//! read, parse, dispatch to a handler, serialize, write, close.
//!
//! # Components
//!
//! - [`HttpConnection`]: the per-connection state machine
//! - [`ReadMode`]: how the request bytes are collected, either one bounded read
//!   (the default) or a `Content-Length` aware read loop
//!
//! Connections are never reused: one request, one response, then the stream is shut down.

mod http_connection;
mod message_writer;

pub use http_connection::DEFAULT_MAX_MESSAGE_SIZE;
pub use http_connection::DEFAULT_READ_CAPACITY;
pub use http_connection::HttpConnection;
pub use http_connection::ReadMode;
