use async_trait::async_trait;
use plain_http::protocol::{Request, Response};

/// A route handler: reads the request and populates the response it is given.
///
/// The response arrives with its CORS headers already set and status `200`. A handler
/// that leaves it untouched answers `200` with an empty body. Failures are the handler's
/// business: it should set an error status and body itself.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn invoke(&self, req: &Request, resp: &mut Response);
}

/// a plain closure holder, see [`handler_fn`]
pub struct FnHandler<F> {
    f: F,
}

impl<F> std::fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}

/// Wraps a synchronous `Fn(&Request, &mut Response)` as a [`RequestHandler`].
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: Fn(&Request, &mut Response) + Send + Sync,
{
    FnHandler { f }
}

#[async_trait]
impl<F> RequestHandler for FnHandler<F>
where
    F: Fn(&Request, &mut Response) + Send + Sync,
{
    async fn invoke(&self, req: &Request, resp: &mut Response) {
        (self.f)(req, resp);
    }
}
