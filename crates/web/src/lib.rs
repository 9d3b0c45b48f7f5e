//! Routing, CORS defaults and the accept loop on top of `plain-http`.
//!
//! ```no_run
//! use plain_web::{Request, Response, Router, Server, handler_fn};
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = Router::builder()
//!         .get("/hello/:name", handler_fn(|req: &Request, resp: &mut Response| {
//!             resp.set_content(format!("hello {}", req.param_value("name")), "text/plain");
//!         }))
//!         .build();
//!
//!     let server = Server::builder().address("127.0.0.1", 8080).router(router).build().unwrap();
//!     if let Err(e) = server.listen().await {
//!         eprintln!("{e}");
//!     }
//! }
//! ```

mod handler;

pub mod cors;
pub mod router;
pub mod server;

pub use cors::Cors;
pub use handler::FnHandler;
pub use handler::RequestHandler;
pub use handler::handler_fn;
pub use router::Router;
pub use server::BoundServer;
pub use server::DEFAULT_BACKLOG;
pub use server::Dispatcher;
pub use server::Server;
pub use server::ServerBuildError;
pub use server::ServerBuilder;
pub use server::ServerError;

pub use plain_http::codec::ReasonPhrase;
pub use plain_http::connection::ReadMode;
pub use plain_http::protocol::{Request, Response};
