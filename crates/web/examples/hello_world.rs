use plain_web::{Request, Response, Router, Server, handler_fn};
use tracing::error;

fn hello_world(_req: &Request, resp: &mut Response) {
    resp.set_content("hello world", "text/plain");
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    let router = Router::builder().get("/", handler_fn(hello_world)).build();

    let server = Server::builder().address("127.0.0.1", 3000).router(router).build().unwrap();
    if let Err(e) = server.listen().await {
        error!(cause = %e, "server stopped");
    }
}
