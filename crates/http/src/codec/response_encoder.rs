//! HTTP response encoder implementation
//!
//! Serializes a [`Response`] into the bytes written back to the peer:
//!
//! ```text
//! HTTP/1.1 <status> <reason>\r\n
//! Name: Value\r\n
//! ...
//! \r\n
//! body
//! ```
//!
//! Headers are written exactly as the response holds them; the encoder does not add
//! `Content-Length` or any other header on its own.

use std::io;
use std::io::Write;

use bytes::{BufMut, BytesMut};
use http::StatusCode;
use tokio_util::codec::Encoder;

use crate::protocol::{Response, SendError};

/// Initial buffer size reserved for the status line and headers
const INIT_HEADER_SIZE: usize = 1024;

/// How the reason phrase of the status line is chosen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ReasonPhrase {
    /// Always write `OK`, whatever the status code is.
    #[default]
    AlwaysOk,

    /// Write the registered reason phrase for the status (`404 Not Found`), falling back
    /// to `OK` for codes without one.
    Canonical,
}

impl ReasonPhrase {
    pub fn for_status(self, status: u16) -> &'static str {
        match self {
            ReasonPhrase::AlwaysOk => "OK",
            ReasonPhrase::Canonical => StatusCode::from_u16(status).ok().and_then(|s| s.canonical_reason()).unwrap_or("OK"),
        }
    }
}

/// Encoder for HTTP responses implementing the [`Encoder`] trait.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseEncoder {
    reason_phrase: ReasonPhrase,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reason_phrase(reason_phrase: ReasonPhrase) -> Self {
        Self { reason_phrase }
    }
}

impl Encoder<Response> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(INIT_HEADER_SIZE + item.body().len());

        write!(FastWrite(dst), "HTTP/1.1 {} {}\r\n", item.status(), self.reason_phrase.for_status(item.status()))?;

        for (name, value) in item.headers() {
            dst.put_slice(name.as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        dst.put_slice(item.body());

        Ok(())
    }
}

/// Fast writer implementation for writing to BytesMut.
///
/// Lets `write!` format straight into the buffer we already reserved.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(encoder: &mut ResponseEncoder, response: Response) -> String {
        let mut buf = BytesMut::new();
        encoder.encode(response, &mut buf).unwrap();
        String::from_utf8(buf.to_vec()).unwrap()
    }

    #[test]
    fn encode_content_response() {
        let mut response = Response::new();
        response.set_header("Access-Control-Allow-Origin", "*");
        response.set_content("{\"ok\":true}", "application/json");

        let wire = encode(&mut ResponseEncoder::new(), response);

        assert_eq!(
            wire,
            "HTTP/1.1 200 OK\r\n\
             Access-Control-Allow-Origin: *\r\n\
             Content-Length: 11\r\n\
             Content-Type: application/json\r\n\
             \r\n\
             {\"ok\":true}"
        );
    }

    #[test]
    fn reason_phrase_is_ok_by_default() {
        let mut response = Response::with_status(404);
        response.set_content("Not Found", "text/plain");

        let wire = encode(&mut ResponseEncoder::new(), response);

        assert!(wire.starts_with("HTTP/1.1 404 OK\r\n"));
        assert!(wire.ends_with("\r\n\r\nNot Found"));
    }

    #[test]
    fn canonical_reason_phrase() {
        let mut encoder = ResponseEncoder::with_reason_phrase(ReasonPhrase::Canonical);

        assert!(encode(&mut encoder, Response::with_status(404)).starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(encode(&mut encoder, Response::with_status(500)).starts_with("HTTP/1.1 500 Internal Server Error\r\n"));
        assert!(encode(&mut encoder, Response::with_status(299)).starts_with("HTTP/1.1 299 OK\r\n"));
    }

    #[test]
    fn empty_response_has_no_headers() {
        let wire = encode(&mut ResponseEncoder::new(), Response::new());
        assert_eq!(wire, "HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn body_bytes_are_written_verbatim() {
        let mut response = Response::new();
        response.set_content(vec![0u8, 159, 146, 150], "application/octet-stream");

        let mut buf = BytesMut::new();
        ResponseEncoder::new().encode(response, &mut buf).unwrap();

        assert!(buf.ends_with(&[b'\r', b'\n', b'\r', b'\n', 0, 159, 146, 150]));
    }
}
