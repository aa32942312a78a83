//! Server module
//!
//! Listener construction and per-connection serving. Each accepted
//! connection runs in its own task, so a slow upstream call on one
//! request never delays static requests on another connection.

use crate::config::AppState;
use crate::handler;
use crate::logger;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

/// Create the listening socket.
///
/// SO_REUSEADDR keeps quick edit-restart cycles from tripping over a
/// port still in TIME_WAIT. A bind failure here is fatal: the server
/// has no fallback port logic.
pub fn create_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

/// Serve one accepted connection in a spawned task.
pub fn spawn_connection(stream: TcpStream, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let service = service_fn(move |req| {
            let state = Arc::clone(&state);
            async move { handler::handle_request(req, state).await }
        });

        if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
            logger::log_connection_error(&err);
        }
    });
}
