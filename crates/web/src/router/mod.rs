//! Method + path routing.
//!
//! A [`Router`] is built once through [`RouterBuilder`] and is read-only afterwards. Lookup
//! first tries an exact `METHOD:path` key, then scans parameterized and prefix routes of
//! the same method in the order they were registered; the first match wins.

mod pattern;

pub use pattern::{RoutePattern, Segment};

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::handler::RequestHandler;

/// One registered route.
pub struct Route {
    method: String,
    pattern: RoutePattern,
    handler: Box<dyn RequestHandler>,
}

impl Route {
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn handler(&self) -> &dyn RequestHandler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route").field("method", &self.method).field("pattern", &self.pattern).finish_non_exhaustive()
    }
}

/// The route table.
#[derive(Debug)]
pub struct Router {
    exact: HashMap<String, usize>,
    routes: Vec<Route>,
}

/// Result of a successful lookup: the handler plus the path parameters it bound.
pub struct RouteMatch<'router> {
    handler: &'router dyn RequestHandler,
    params: Vec<(String, String)>,
}

impl fmt::Debug for RouteMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch").field("params", &self.params).finish_non_exhaustive()
    }
}

impl<'router> RouteMatch<'router> {
    pub fn handler(&self) -> &'router dyn RequestHandler {
        self.handler
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn into_parts(self) -> (&'router dyn RequestHandler, Vec<(String, String)>) {
        (self.handler, self.params)
    }
}

fn exact_key(method: &str, path: &str) -> String {
    format!("{method}:{path}")
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Finds the handler for `method` and `path`.
    ///
    /// An exact hit binds no parameters, even when the registered pattern has `:name`
    /// segments.
    pub fn at<'router>(&'router self, method: &str, path: &str) -> Option<RouteMatch<'router>> {
        if let Some(&index) = self.exact.get(&exact_key(method, path)) {
            return Some(RouteMatch { handler: self.routes[index].handler(), params: Vec::new() });
        }

        self.routes.iter().filter(|route| route.method == method).find_map(|route| {
            route.pattern.matches(path).map(|params| RouteMatch { handler: route.handler(), params })
        })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct RouterBuilder {
    routes: Vec<Route>,
}

impl RouterBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `method` and `pattern`.
    ///
    /// Registering the same method and pattern again replaces the earlier handler; the
    /// route keeps the position of its first registration.
    pub fn route<H>(self, method: impl Into<String>, pattern: impl Into<String>, handler: H) -> Self
    where
        H: RequestHandler + 'static,
    {
        self.register(method.into(), RoutePattern::parse(pattern), Box::new(handler))
    }

    pub fn get<H: RequestHandler + 'static>(self, pattern: impl Into<String>, handler: H) -> Self {
        self.route("GET", pattern, handler)
    }

    pub fn post<H: RequestHandler + 'static>(self, pattern: impl Into<String>, handler: H) -> Self {
        self.route("POST", pattern, handler)
    }

    pub fn put<H: RequestHandler + 'static>(self, pattern: impl Into<String>, handler: H) -> Self {
        self.route("PUT", pattern, handler)
    }

    pub fn delete<H: RequestHandler + 'static>(self, pattern: impl Into<String>, handler: H) -> Self {
        self.route("DELETE", pattern, handler)
    }

    /// Registers a catch-all route matching every path that starts with `prefix`.
    pub fn prefix<H>(self, method: impl Into<String>, prefix: impl Into<String>, handler: H) -> Self
    where
        H: RequestHandler + 'static,
    {
        self.register(method.into(), RoutePattern::prefix(prefix), Box::new(handler))
    }

    /// `GET` catch-all, typically used to serve files below a directory.
    pub fn static_prefix<H: RequestHandler + 'static>(self, prefix: impl Into<String>, handler: H) -> Self {
        self.prefix("GET", prefix, handler)
    }

    fn register(mut self, method: String, pattern: RoutePattern, handler: Box<dyn RequestHandler>) -> Self {
        let existing = self.routes.iter_mut().find(|route| route.method == method && route.pattern == pattern);
        match existing {
            Some(route) => {
                warn!(method = %route.method, pattern = %route.pattern, "route registered twice, replacing handler");
                route.handler = handler;
            }
            None => self.routes.push(Route { method, pattern, handler }),
        }
        self
    }

    pub fn build(self) -> Router {
        let mut exact = HashMap::new();

        for (index, route) in self.routes.iter().enumerate() {
            debug!(method = %route.method, pattern = %route.pattern, "register route");
            if route.pattern.is_exact_key() {
                exact.insert(exact_key(&route.method, route.pattern.as_str()), index);
            }
        }

        Router { exact, routes: self.routes }
    }
}
