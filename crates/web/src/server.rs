use std::convert::Infallible;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use plain_http::codec::ReasonPhrase;
use plain_http::connection::{HttpConnection, ReadMode};
use plain_http::handler::Handler;
use plain_http::protocol::{Request, Response};
use thiserror::Error;
use tokio::net::{TcpListener, TcpSocket, lookup_host};
use tracing::{debug, error, info, warn};

use crate::cors::Cors;
use crate::router::Router;

/// Pending connections the listening socket queues before `accept`
pub const DEFAULT_BACKLOG: u32 = 3;

#[derive(Debug)]
pub struct ServerBuilder {
    router: Option<Router>,
    address: Option<(String, u16)>,
    backlog: u32,
    read_mode: ReadMode,
    reason_phrase: ReasonPhrase,
    cors: Cors,
}

impl ServerBuilder {
    fn new() -> Self {
        Self {
            router: None,
            address: None,
            backlog: DEFAULT_BACKLOG,
            read_mode: ReadMode::default(),
            reason_phrase: ReasonPhrase::default(),
            cors: Cors::default(),
        }
    }

    /// Host name or IP literal plus port; the host is resolved when the server binds.
    pub fn address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.address = Some((host.into(), port));
        self
    }

    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    pub fn backlog(mut self, backlog: u32) -> Self {
        self.backlog = backlog;
        self
    }

    pub fn read_mode(mut self, read_mode: ReadMode) -> Self {
        self.read_mode = read_mode;
        self
    }

    pub fn reason_phrase(mut self, reason_phrase: ReasonPhrase) -> Self {
        self.reason_phrase = reason_phrase;
        self
    }

    pub fn cors(mut self, cors: Cors) -> Self {
        self.cors = cors;
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let router = self.router.ok_or(ServerBuildError::MissingRouter)?;
        let (host, port) = self.address.ok_or(ServerBuildError::MissingAddress)?;
        Ok(Server {
            dispatcher: Dispatcher::new(router, self.cors),
            host,
            port,
            backlog: self.backlog,
            read_mode: self.read_mode,
            reason_phrase: self.reason_phrase,
        })
    }
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("router must be set")]
    MissingRouter,
    #[error("address must be set")]
    MissingAddress,
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("can't resolve {host}:{port}, cause: {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("{host}:{port} did not resolve to any address")]
    NoAddress { host: String, port: u16 },

    #[error("can't listen on {address}, cause: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },
}

/// A configured server that has not touched the network yet.
#[derive(Debug)]
pub struct Server {
    dispatcher: Dispatcher,
    host: String,
    port: u16,
    backlog: u32,
    read_mode: ReadMode,
    reason_phrase: ReasonPhrase,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Resolves the host, then binds a reusable-address socket and starts listening.
    pub async fn bind(self) -> Result<BoundServer, ServerError> {
        let address = lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|source| ServerError::Resolve { host: self.host.clone(), port: self.port, source })?
            .next()
            .ok_or_else(|| ServerError::NoAddress { host: self.host.clone(), port: self.port })?;

        let listener = listen(address, self.backlog).map_err(|source| ServerError::Bind { address, source })?;

        Ok(BoundServer {
            listener,
            dispatcher: Arc::new(self.dispatcher),
            read_mode: self.read_mode,
            reason_phrase: self.reason_phrase,
        })
    }

    /// [`bind`](Self::bind) followed by [`serve`](BoundServer::serve); only returns when
    /// the socket could not be set up.
    pub async fn listen(self) -> Result<Infallible, ServerError> {
        let bound = self.bind().await?;
        Ok(bound.serve().await)
    }
}

fn listen(address: SocketAddr, backlog: u32) -> io::Result<TcpListener> {
    let socket = if address.is_ipv4() { TcpSocket::new_v4()? } else { TcpSocket::new_v6()? };
    socket.set_reuseaddr(true)?;
    socket.bind(address)?;
    socket.listen(backlog)
}

/// A server whose socket is listening; [`serve`](Self::serve) starts accepting.
#[derive(Debug)]
pub struct BoundServer {
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    read_mode: ReadMode,
    reason_phrase: ReasonPhrase,
}

impl BoundServer {
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections forever, each one served on its own task.
    pub async fn serve(self) -> Infallible {
        match self.listener.local_addr() {
            Ok(local_addr) => info!(%local_addr, "start listening"),
            Err(e) => warn!(cause = %e, "start listening at unknown address"),
        }

        loop {
            let (tcp_stream, remote_addr) = match self.listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let dispatcher = Arc::clone(&self.dispatcher);
            let read_mode = self.read_mode;
            let reason_phrase = self.reason_phrase;

            tokio::spawn(async move {
                let (reader, writer) = tcp_stream.into_split();
                let connection =
                    HttpConnection::new(reader, writer).with_read_mode(read_mode).with_reason_phrase(reason_phrase);
                match connection.process(dispatcher).await {
                    Ok(()) => {
                        debug!(%remote_addr, "finished process, connection shutdown");
                    }
                    Err(e) => {
                        error!(%remote_addr, "service has error, cause {}, connection shutdown", e);
                    }
                }
            });
        }
    }
}

/// Turns a parsed request into a response: CORS, preflight, routing and the not-found
/// fallback. Requests refused by the connection get the CORS headers too.
#[derive(Debug)]
pub struct Dispatcher {
    router: Router,
    cors: Cors,
}

impl Dispatcher {
    pub fn new(router: Router, cors: Cors) -> Self {
        Self { router, cors }
    }
}

#[async_trait]
impl Handler for Dispatcher {
    async fn call(&self, mut req: Request) -> Response {
        let mut response = Response::new();
        self.cors.apply(&mut response);

        if req.method() == "OPTIONS" {
            response.set_content("", mime::TEXT_PLAIN.as_ref());
            return response;
        }

        let route_match = if req.is_malformed() { None } else { self.router.at(req.method(), req.path()) };

        match route_match {
            Some(route_match) => {
                let (handler, params) = route_match.into_parts();
                req.bind_path_params(params);
                handler.invoke(&req, &mut response).await;
            }
            None => {
                debug!(method = req.method(), path = req.path(), "no route matched");
                response.set_status(404);
                response.set_content("Not Found", mime::TEXT_PLAIN.as_ref());
            }
        }

        response
    }

    fn reject(&self, status: u16, reason: &'static str) -> Response {
        let mut response = Response::with_status(status);
        self.cors.apply(&mut response);
        response.set_content(reason, mime::TEXT_PLAIN.as_ref());
        response
    }
}
