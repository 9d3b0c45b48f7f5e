use std::collections::BTreeMap;

use bytes::Bytes;

/// The header name kept in sync with the body by [`Response::set_content`].
pub const CONTENT_LENGTH: &str = "Content-Length";

pub const CONTENT_TYPE: &str = "Content-Type";

/// An HTTP response being populated by a handler.
///
/// Headers are kept in name order, which is also the order they are written to the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: BTreeMap<String, String>,
    body: Bytes,
}

impl Default for Response {
    fn default() -> Self {
        Self { status: 200, headers: BTreeMap::new(), body: Bytes::new() }
    }
}

impl Response {
    /// Creates an empty `200` response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty response with the given status.
    pub fn with_status(status: u16) -> Self {
        Self { status, ..Self::default() }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Inserts a header, replacing any previous value under the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Replaces the body and sets `Content-Type` and `Content-Length` to match it.
    pub fn set_content(&mut self, content: impl Into<Bytes>, content_type: impl Into<String>) {
        let content = content.into();
        self.headers.insert(CONTENT_TYPE.to_string(), content_type.into());
        self.headers.insert(CONTENT_LENGTH.to_string(), content.len().to_string());
        self.body = content;
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty_ok() {
        let response = Response::new();
        assert_eq!(response.status(), 200);
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
    }

    #[test]
    fn set_content_tracks_length() {
        let mut response = Response::new();

        response.set_content("{\"id\":1}", "application/json");
        assert_eq!(response.header(CONTENT_LENGTH), Some("8"));
        assert_eq!(response.header(CONTENT_TYPE), Some("application/json"));

        response.set_content("", "text/plain");
        assert_eq!(response.header(CONTENT_LENGTH), Some("0"));
        assert_eq!(response.header(CONTENT_TYPE), Some("text/plain"));
        assert!(response.body().is_empty());
    }

    #[test]
    fn set_content_counts_bytes_not_chars() {
        let mut response = Response::new();
        response.set_content("héllo", "text/plain; charset=utf-8");
        assert_eq!(response.header(CONTENT_LENGTH), Some("6"));
        assert_eq!(response.body().len(), 6);
    }

    #[test]
    fn set_header_overwrites() {
        let mut response = Response::with_status(404);
        response.set_header("X-Trace", "a");
        response.set_header("X-Trace", "b");
        assert_eq!(response.status(), 404);
        assert_eq!(response.header("X-Trace"), Some("b"));
        assert_eq!(response.headers().len(), 1);
    }
}
