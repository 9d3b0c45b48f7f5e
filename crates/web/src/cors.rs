use plain_http::protocol::Response;

pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";

/// The CORS headers stamped onto every response, preflight answers included.
///
/// The default is fully permissive: any origin, the usual REST methods and the
/// `Content-Type`/`Authorization` request headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cors {
    allow_origin: String,
    allow_methods: String,
    allow_headers: String,
}

impl Default for Cors {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: "GET, POST, PUT, DELETE, OPTIONS".to_string(),
            allow_headers: "Content-Type, Authorization".to_string(),
        }
    }
}

impl Cors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_origin(mut self, origin: impl Into<String>) -> Self {
        self.allow_origin = origin.into();
        self
    }

    pub fn allow_methods(mut self, methods: impl Into<String>) -> Self {
        self.allow_methods = methods.into();
        self
    }

    pub fn allow_headers(mut self, headers: impl Into<String>) -> Self {
        self.allow_headers = headers.into();
        self
    }

    pub fn apply(&self, response: &mut Response) {
        response.set_header(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.as_str());
        response.set_header(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.as_str());
        response.set_header(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.as_str());
    }
}
