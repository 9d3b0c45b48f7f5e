//! The seam between a connection and whatever produces its response.
//!
//! [`HttpConnection`](crate::connection::HttpConnection) hands every parsed request to a
//! [`Handler`] and writes back the [`Response`] it returns. Routing, CORS defaults and the
//! not-found fallback live in a `Handler` implementation on top of this crate.
//!
//! Requests the connection refuses on its own, such as oversized ones, never reach
//! [`Handler::call`]; their response comes from [`Handler::reject`] so the handler can
//! still shape it.

use std::future::Future;

use async_trait::async_trait;

use crate::protocol::{Request, Response};

#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(&self, req: Request) -> Response;

    /// Builds the response for a request refused before parsing, e.g. `413`.
    fn reject(&self, status: u16, reason: &'static str) -> Response {
        let mut response = Response::with_status(status);
        response.set_content(reason, "text/plain");
        response
    }
}

/// A [`Handler`] backed by an async function, see [`make_handler`].
#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Response> + Send,
{
    async fn call(&self, req: Request) -> Response {
        (self.f)(req).await
    }
}

pub fn make_handler<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(Request) -> Fut,
    Fut: Future<Output = Response>,
{
    HandlerFn { f }
}
