// Connection handling module
// Accepts a single TCP connection and serves HTTP/1.1 on it

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use tokio::net::TcpStream;
use tokio::sync::watch;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Decrements the active connection counter when the connection task ends
struct ConnectionGuard(Arc<AtomicUsize>);

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Accept and process a connection, checking the connection limit.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
/// * `conn_counter` - Active connection counter
/// * `shutdown` - Flips to `true` when the server stops accepting
pub fn accept_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    conn_counter: &Arc<AtomicUsize>,
    shutdown: &watch::Receiver<bool>,
) {
    // Increment first, then check, so concurrent accepts cannot both slip under the limit
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);
    let guard = ConnectionGuard(Arc::clone(conn_counter));

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection from {peer_addr} rejected."
            ));
            drop(stream);
            return;
        }
    }

    logger::log_connection_accepted(&peer_addr);

    tokio::spawn(serve_connection(
        stream,
        peer_addr,
        Arc::clone(state),
        shutdown.clone(),
        guard,
    ));
}

/// Serve HTTP/1.1 on one connection, bounded by the configured timeout
///
/// Once `shutdown` flips, hyper finishes the request in flight (if any) and
/// closes the connection instead of waiting for the next one.
async fn serve_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    shutdown: watch::Receiver<bool>,
    _guard: ConnectionGuard,
) {
    let io = TokioIo::new(stream);
    let perf = &state.config.performance;
    let timeout = Duration::from_secs(std::cmp::max(perf.read_timeout, perf.write_timeout));

    let mut builder = http1::Builder::new();
    if perf.keep_alive_timeout > 0 {
        // Idle keep-alive connections are closed when the next request's
        // headers do not arrive in time
        builder
            .keep_alive(true)
            .timer(TokioTimer::new())
            .header_read_timeout(Duration::from_secs(perf.keep_alive_timeout));
    } else {
        builder.keep_alive(false);
    }

    let service_state = Arc::clone(&state);
    let conn = builder.serve_connection(
        io,
        service_fn(move |req| handler::handle_request(req, Arc::clone(&service_state), peer_addr)),
    );
    let mut conn = std::pin::pin!(conn);

    let served = tokio::time::timeout(timeout, async {
        tokio::select! {
            result = conn.as_mut() => result,
            () = stopped(shutdown) => {
                conn.as_mut().graceful_shutdown();
                conn.await
            }
        }
    });

    match served.await {
        Ok(Ok(())) => {}
        Ok(Err(err)) if err.is_timeout() => {
            logger::log_debug(&format!("Idle connection from {peer_addr} closed: {err}"));
        }
        Ok(Err(err)) => logger::log_connection_error(&err),
        Err(_) => logger::log_warning(&format!(
            "Connection from {peer_addr} timed out after {} seconds",
            timeout.as_secs()
        )),
    }
}

/// Resolves once shutdown is requested or the sender is gone
async fn stopped(mut shutdown: watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}
