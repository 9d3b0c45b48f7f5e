//! HTTP request model.
//!
//! A [`Request`] is produced by the wire parser from the bytes of a single read and is
//! later enriched by the router with path parameters. It owns all of its data, so it can
//! be moved freely between the connection task and the handler.

use std::borrow::Cow;
use std::collections::HashMap;

use bytes::Bytes;

/// A parsed HTTP request.
///
/// Query parameters are filled in while parsing, path parameters while routing. The two
/// live in separate maps; [`Request::param`] looks at both, path parameters first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    query_params: HashMap<String, String>,
    path_params: HashMap<String, String>,
    body: Bytes,
}

impl Request {
    /// Creates a request with the given method and path and nothing else.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self { method: method.into(), path: path.into(), ..Default::default() }
    }

    /// The method token, e.g. `GET`. Empty when the request line could not be read.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request path without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Looks up a header by its exact (case-sensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Like [`Request::header`], but returns `""` when the header is absent.
    pub fn header_value(&self, name: &str) -> &str {
        self.header(name).unwrap_or_default()
    }

    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    pub fn path_params(&self) -> &HashMap<String, String> {
        &self.path_params
    }

    /// Looks up a parameter by name, path parameters first, then query parameters.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).or_else(|| self.query_params.get(name)).map(String::as_str)
    }

    /// Like [`Request::param`], but returns `""` when the parameter is absent.
    pub fn param_value(&self, name: &str) -> &str {
        self.param(name).unwrap_or_default()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The body as text, with invalid UTF-8 sequences replaced.
    pub fn body_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Returns true if no method could be read from the request line.
    ///
    /// Such requests are never handed to a registered route.
    pub fn is_malformed(&self) -> bool {
        self.method.is_empty()
    }

    /// Inserts a header, replacing any previous value under the same name.
    pub fn insert_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Inserts a query parameter, replacing any previous value under the same name.
    pub fn insert_query_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.query_params.insert(name.into(), value.into());
    }

    /// Merges the parameters bound by a matched route pattern.
    pub fn bind_path_params<I>(&mut self, params: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.path_params.extend(params);
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = body.into();
    }

    pub(crate) fn set_query_params(&mut self, query_params: HashMap<String, String>) {
        self.query_params = query_params;
    }
}
