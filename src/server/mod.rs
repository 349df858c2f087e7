//! Server module
//!
//! Owns the listener, the optional TLS acceptor, and the accept loop.

mod listener;
mod tls;

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::TlsAcceptor;

use crate::config::Config;
use crate::error::ServerError;
use crate::handler::{self, HandlerState};
use crate::logger;

/// Static file server bound to a single listener.
pub struct Server {
    port: u16,
    local_addr: SocketAddr,
    listener: TcpListener,
    tls: Option<TlsAcceptor>,
    state: Arc<HandlerState>,
}

impl Server {
    /// Build the server from an immutable configuration.
    ///
    /// When TLS paths are configured, both PEM files are read into memory
    /// and the acceptor is built BEFORE the listener binds: broken TLS
    /// material aborts construction rather than leaving a half-configured
    /// server accepting connections, and there is no plaintext fallback.
    /// Exactly one listener is created per construction.
    ///
    /// Must be called within a Tokio runtime.
    pub fn construct(config: &Config) -> Result<Self, ServerError> {
        let tls = match config.tls.as_ref() {
            Some(tls_config) => Some(tls::build_acceptor(&tls_config.key, &tls_config.cert)?),
            None => None,
        };

        let addr = config.socket_addr().map_err(ServerError::InvalidAddress)?;
        let listener = listener::bind(addr)?;
        let local_addr = listener.local_addr()?;

        let state = Arc::new(HandlerState {
            static_root: config.static_files.root.clone().into(),
            access_log: config.logging.access_log,
        });

        Ok(Self {
            port: config.server.port,
            local_addr,
            listener,
            tls,
            state,
        })
    }

    /// The configured port (8080 unless overridden).
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// The address the listener actually bound; resolves the real port
    /// when the configured port was 0.
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Whether the listener terminates TLS.
    pub const fn is_tls(&self) -> bool {
        self.tls.is_some()
    }

    /// Run the accept loop.
    ///
    /// Consumes the server, so a second `listen()` call is rejected at
    /// compile time. There is no shutdown API; the loop runs until the
    /// process exits. Accept failures are logged and the loop keeps going.
    pub async fn listen(self) -> Result<(), ServerError> {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer_addr)) => {
                    if self.state.access_log {
                        logger::log_connection_accepted(&peer_addr);
                    }
                    match self.tls.as_ref() {
                        Some(acceptor) => {
                            spawn_tls_connection(stream, acceptor.clone(), Arc::clone(&self.state));
                        }
                        None => spawn_connection(stream, Arc::clone(&self.state)),
                    }
                }
                Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
            }
        }
    }
}

/// Serve a plaintext connection in a spawned task.
fn spawn_connection(stream: TcpStream, state: Arc<HandlerState>) {
    tokio::spawn(async move {
        serve(stream, state).await;
    });
}

/// Complete the TLS handshake, then serve the connection in a spawned task.
/// A failed handshake terminates only that connection.
fn spawn_tls_connection(stream: TcpStream, acceptor: TlsAcceptor, state: Arc<HandlerState>) {
    tokio::spawn(async move {
        match acceptor.accept(stream).await {
            Ok(tls_stream) => serve(tls_stream, state).await,
            Err(e) => logger::log_error(&format!("TLS handshake failed: {e}")),
        }
    });
}

/// Drive one HTTP/1.1 connection to completion.
///
/// Errors here cover the whole connection lifetime, including file-stream
/// failures after response headers went out; they terminate this
/// connection only.
async fn serve<I>(io: I, state: Arc<HandlerState>)
where
    I: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin + Send + 'static,
{
    let io = TokioIo::new(io);
    let service = service_fn(move |req| {
        let state = Arc::clone(&state);
        async move { handler::handle_request(req, state).await }
    });

    if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
        logger::log_connection_error(&e);
    }
}
