//! A small, hand-rolled HTTP/1.1 engine
//!
//! This crate implements the wire level of a deliberately simple HTTP server: it reads one
//! request from an accepted connection, parses it without any external HTTP parser, hands
//! it to a [`handler::Handler`], writes the response back and closes the connection.
//!
//! # Features
//!
//! - Forgiving line-based request parsing that never fails
//! - Percent/plus decoding of query-string parameters
//! - Explicit `Content-Length` bookkeeping on responses
//! - Asynchronous I/O using tokio, one task per connection
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn};
//! use plain_http::connection::HttpConnection;
//! use plain_http::handler::make_handler;
//! use plain_http::protocol::{Request, Response};
//!
//! #[tokio::main]
//! async fn main() {
//!     info!(port = 8080, "start listening");
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:8080").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = Arc::new(make_handler(hello_world));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = handler.clone();
//!
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             let connection = HttpConnection::new(reader, writer);
//!             if let Err(e) = connection.process(handler).await {
//!                 error!("service has error, cause {}, connection shutdown", e);
//!             }
//!         });
//!     }
//! }
//!
//! async fn hello_world(request: Request) -> Response {
//!     info!(path = request.path(), "request path");
//!
//!     let mut response = Response::new();
//!     response.set_content("Hello World!\r\n", "text/plain");
//!     response
//! }
//! ```
//!
//! # Architecture
//!
//! - [`connection`]: per-connection state machine and read strategies
//! - [`protocol`]: request/response model and error types
//! - [`codec`]: request parsing, response serialization, query decoding
//! - [`handler`]: the handler trait connections dispatch to
//!
//! # Limitations
//!
//! - One request per connection, no keep-alive
//! - No chunked transfer encoding, no streaming bodies
//! - No TLS (use a reverse proxy for HTTPS)
//! - By default the request must fit in a single 4 KiB read; larger requests are truncated

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
