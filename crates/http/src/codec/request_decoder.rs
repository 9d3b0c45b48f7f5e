//! HTTP request decoder module
//!
//! This module turns the raw bytes received from a connection into a [`Request`].
//! The parser is line oriented and deliberately forgiving: it never fails, and input it
//! can't make sense of yields a request with blank fields that no route will match.
//!
//! # Wire format
//!
//! ```text
//! METHOD path[?query] HTTP/x.x\r\n
//! Name: value\r\n
//! ...
//! \r\n
//! body
//! ```
//!
//! - Lines are split on `\n`, a trailing `\r` is stripped from each line
//! - The request line is split on whitespace, tokens after the target are ignored
//! - Header lines are split on the first `:`, lines without a colon are skipped
//! - The header section ends at the first empty line
//! - Everything after that is the body, minus a single trailing `\n`
//!
//! No `Content-Length` boundary is applied here; the caller decides how many bytes make
//! up the message (see `ReadMode` in the connection module).

use std::collections::HashMap;

use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::codec::query::parse_query_string;
use crate::protocol::{ParseError, Request};

/// A decoder that treats everything buffered as one complete request.
///
/// An empty buffer yields `None`; anything else yields exactly one [`Request`] and
/// leaves the buffer empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestDecoder;

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        let message = src.split().freeze();
        trace!(message_size = message.len(), "decoding request");
        Ok(Some(parse_message(message)))
    }
}

/// Parses one request from `bytes`.
///
/// Empty input gives a request with an empty method and path, see [`Request::is_malformed`].
pub fn parse_request(bytes: &[u8]) -> Request {
    parse_message(Bytes::copy_from_slice(bytes))
}

fn parse_message(message: Bytes) -> Request {
    let mut rest: &[u8] = &message;

    let Some(request_line) = next_line(&mut rest) else {
        return Request::default();
    };

    let request_line = String::from_utf8_lossy(request_line);
    let mut tokens = request_line.split_whitespace();
    let method = tokens.next().unwrap_or_default();
    let target = tokens.next().unwrap_or_default();

    let (path, query_params) = match target.split_once('?') {
        Some((path, query)) => (path, parse_query_string(query)),
        None => (target, HashMap::new()),
    };

    let mut request = Request::new(method, path);
    request.set_query_params(query_params);

    loop {
        match next_line(&mut rest) {
            // the peer sent no header terminator, so there is no body either
            None => return request,
            Some([]) => break,
            Some(line) => {
                let line = String::from_utf8_lossy(line);
                if let Some((name, value)) = line.split_once(':') {
                    let value = value.strip_prefix(' ').unwrap_or(value);
                    request.insert_header(name, value);
                }
            }
        }
    }

    let body_start = message.len() - rest.len();
    let body_end = if rest.last() == Some(&b'\n') { message.len() - 1 } else { message.len() };
    request.set_body(message.slice(body_start..body_end));

    request
}

/// Splits the next `\n`-terminated line off `rest`, without the line ending.
///
/// Returns `None` once `rest` is exhausted.
fn next_line<'a>(rest: &mut &'a [u8]) -> Option<&'a [u8]> {
    if rest.is_empty() {
        return None;
    }

    let (line, remaining) = match rest.iter().position(|b| *b == b'\n') {
        Some(index) => (&rest[..index], &rest[index + 1..]),
        None => (*rest, &rest[rest.len()..]),
    };
    *rest = remaining;

    Some(line.strip_suffix(b"\r").unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn from_curl() {
        let str = indoc! {r##"
        GET /index.html HTTP/1.1
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        "##};

        let request = parse_request(str.as_bytes());

        assert_eq!(request.method(), "GET");
        assert_eq!(request.path(), "/index.html");
        assert!(request.query_params().is_empty());
        assert_eq!(request.headers().len(), 3);
        assert_eq!(request.header("Host"), Some("127.0.0.1:8080"));
        assert_eq!(request.header("User-Agent"), Some("curl/7.79.1"));
        assert_eq!(request.header("Accept"), Some("*/*"));
        assert!(request.body().is_empty());
    }

    #[test]
    fn crlf_request_with_body() {
        let raw = b"POST /api/auth/login HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: 31\r\n\r\n{\"username\":\"a\",\"password\":\"b\"}";

        let request = parse_request(raw);

        assert_eq!(request.method(), "POST");
        assert_eq!(request.path(), "/api/auth/login");
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.header("Content-Length"), Some("31"));
        assert_eq!(request.body_str(), r#"{"username":"a","password":"b"}"#);
    }

    #[test]
    fn query_string_is_split_from_path() {
        let request = parse_request(b"GET /api/employees/search?name=John+Doe&dept=R%26D&page HTTP/1.1\r\n\r\n");

        assert_eq!(request.path(), "/api/employees/search");
        assert_eq!(request.query_params().len(), 2);
        assert_eq!(request.param("name"), Some("John Doe"));
        assert_eq!(request.param("dept"), Some("R&D"));
        assert_eq!(request.param("page"), None);
    }

    #[test]
    fn multi_line_body_keeps_inner_newlines() {
        let raw = b"POST /api/employees/import HTTP/1.1\r\nContent-Type: text/csv\r\n\r\nid,name\r\n1,Ann\r\n2,Bob\n";

        let request = parse_request(raw);

        assert_eq!(request.body().as_ref(), b"id,name\r\n1,Ann\r\n2,Bob");
    }

    #[test]
    fn only_one_trailing_newline_is_removed() {
        let request = parse_request(b"POST / HTTP/1.1\n\nabc\n\n");
        assert_eq!(request.body().as_ref(), b"abc\n");
    }

    #[test]
    fn duplicate_headers_keep_last_value() {
        let request = parse_request(b"GET / HTTP/1.1\r\nX-Id: 1\r\nX-Id: 2\r\n\r\n");
        assert_eq!(request.header("X-Id"), Some("2"));
        assert_eq!(request.headers().len(), 1);
    }

    #[test]
    fn header_values_edge_cases() {
        let raw = b"GET / HTTP/1.1\r\nX-Empty:\r\nX-Blank: \r\nX-Tight:value\r\nX-Colon: a:b\r\nno colon here\r\n\r\n";

        let request = parse_request(raw);

        assert_eq!(request.header("X-Empty"), Some(""));
        assert_eq!(request.header("X-Blank"), Some(""));
        assert_eq!(request.header("X-Tight"), Some("value"));
        assert_eq!(request.header("X-Colon"), Some("a:b"));
        assert_eq!(request.headers().len(), 4);
    }

    #[test]
    fn missing_header_terminator_means_no_body() {
        let request = parse_request(b"GET /health HTTP/1.1\r\nHost: localhost\r\n");

        assert_eq!(request.path(), "/health");
        assert_eq!(request.header("Host"), Some("localhost"));
        assert!(request.body().is_empty());
    }

    #[test]
    fn empty_input_is_malformed() {
        let request = parse_request(b"");

        assert!(request.is_malformed());
        assert_eq!(request.method(), "");
        assert_eq!(request.path(), "");
        assert!(request.headers().is_empty());
        assert!(request.body().is_empty());
    }

    #[test]
    fn garbage_input_does_not_panic() {
        let request = parse_request(b"\r\n\r\n\xff\xfe");
        assert!(request.is_malformed());

        let request = parse_request(b"GET");
        assert_eq!(request.method(), "GET");
        assert_eq!(request.path(), "");

        let request = parse_request(&[0xC3, 0x28, b' ', b'/', b'\n']);
        assert!(!request.is_malformed());
        assert_eq!(request.path(), "/");
    }

    #[test]
    fn decoder_consumes_whole_buffer() {
        let mut decoder = RequestDecoder::new();
        let mut buf = BytesMut::from("DELETE /api/employees/3 HTTP/1.1\r\nAuthorization: Bearer t\r\n\r\n");

        let request = decoder.decode(&mut buf).unwrap().unwrap();

        assert_eq!(request.method(), "DELETE");
        assert_eq!(request.path(), "/api/employees/3");
        assert_eq!(request.header("Authorization"), Some("Bearer t"));
        assert!(buf.is_empty());
        assert!(decoder.decode(&mut buf).unwrap().is_none());
    }
}
