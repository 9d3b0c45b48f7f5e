//! Core HTTP protocol types.
//!
//! This module holds the request/response data model shared by the parser, the
//! connection state machine and the handlers registered by applications.
//!
//! - [`Request`]: method, path, headers, query and path parameters, raw body
//! - [`Response`]: status, headers and body, with [`Response::set_content`] keeping
//!   `Content-Length` consistent with the body
//! - Error types:
//!   - [`HttpError`]: Top-level error type of a connection
//!   - [`ParseError`]: Failures while receiving a request
//!   - [`SendError`]: Failures while writing a response
//!
//! Nothing here outlives a single request/response exchange.

mod request;
pub use request::Request;

mod response;
pub use response::CONTENT_LENGTH;
pub use response::CONTENT_TYPE;
pub use response::Response;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
