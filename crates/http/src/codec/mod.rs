//! HTTP codec module for decoding requests and encoding responses
//!
//! - [`RequestDecoder`] / [`parse_request`]: raw bytes to [`Request`](crate::protocol::Request)
//! - [`ResponseEncoder`]: [`Response`](crate::protocol::Response) to wire bytes
//! - [`query`]: percent/plus decoding of query-string values
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use plain_http::codec::{RequestDecoder, ResponseEncoder};
//! use plain_http::protocol::Response;
//! use tokio_util::codec::{Decoder, Encoder};
//!
//! let mut buffer = BytesMut::from("GET /api/employees?page=2 HTTP/1.1\r\nHost: localhost\r\n\r\n");
//! let request = RequestDecoder::new().decode(&mut buffer).unwrap().unwrap();
//! assert_eq!(request.param("page"), Some("2"));
//!
//! let mut response = Response::new();
//! response.set_content("[]", "application/json");
//! let mut out = BytesMut::new();
//! ResponseEncoder::new().encode(response, &mut out).unwrap();
//! assert!(out.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```

pub mod query;
mod request_decoder;
mod response_encoder;

pub use request_decoder::RequestDecoder;
pub use request_decoder::parse_request;
pub use response_encoder::ReasonPhrase;
pub use response_encoder::ResponseEncoder;
