//! Accept loop: one long-lived task per start cycle.
//!
//! # Responsibilities
//! - Pull connections off the listener until shutdown
//! - Spawn an independent dispatch task per connection (fire-and-forget)
//! - Swallow transient accept errors so one bad connection cannot stop the
//!   host
//!
//! # Design Decisions
//! - Fan-out is unbounded: accept latency stays flat, but request volume is
//!   not capped (a semaphore in front of accept would be the place to cap
//!   it if that capacity risk ever bites)
//! - Shutdown interrupts the blocking accept via `select!`; the listener
//!   socket closes when this task exits and drops it
//! - Connection tasks observe the same shutdown signal and gracefully close
//!   keep-alive connections after the in-flight exchange

use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::lifecycle::dispatch::Dispatcher;
use crate::lifecycle::shutdown::Shutdown;
use crate::net::listener::{Listener, ListenerError};

pub(crate) struct AcceptLoop {
    listener: Listener,
    dispatcher: Dispatcher,
    shutdown: Shutdown,
}

impl AcceptLoop {
    pub(crate) fn new(listener: Listener, dispatcher: Dispatcher, shutdown: Shutdown) -> Self {
        Self {
            listener,
            dispatcher,
            shutdown,
        }
    }

    /// Run until the shutdown signal fires or the listener reports itself
    /// closed.
    pub(crate) async fn run(self) {
        let mut shutdown_rx = self.shutdown.subscribe();

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    tracing::debug!("Accept loop shutting down");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer_addr)) => {
                        let dispatcher = self.dispatcher.clone();
                        let shutdown = self.shutdown.subscribe();
                        tokio::spawn(async move {
                            serve_connection(stream, peer_addr, dispatcher, shutdown).await;
                        });
                    }
                    Err(ListenerError::Accept(error)) if is_listener_closed(&error) => {
                        tracing::info!(%error, "Listener closed, accept loop exiting");
                        break;
                    }
                    Err(error) => {
                        tracing::warn!(%error, "Transient accept error");
                        // Pause so a persistent accept failure cannot spin
                        // the loop.
                        tokio::time::sleep(Duration::from_millis(50)).await;
                    }
                }
            }
        }
    }
}

/// Serve all HTTP/1.1 exchanges on one accepted connection.
///
/// Write failures mean the client went away; each request was already
/// contained by the dispatcher, so the error is logged and dropped.
async fn serve_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    dispatcher: Dispatcher,
    mut shutdown: tokio::sync::broadcast::Receiver<()>,
) {
    let io = TokioIo::new(stream);
    let service = service_fn(move |req| {
        let dispatcher = dispatcher.clone();
        async move { Ok::<_, Infallible>(dispatcher.dispatch(req).await) }
    });

    let conn = http1::Builder::new().serve_connection(io, service);
    tokio::pin!(conn);

    let mut draining = false;
    loop {
        tokio::select! {
            result = conn.as_mut() => {
                if let Err(error) = result {
                    tracing::debug!(peer_addr = %peer_addr, %error, "Connection ended with error");
                }
                break;
            }
            _ = shutdown.recv(), if !draining => {
                draining = true;
                conn.as_mut().graceful_shutdown();
            }
        }
    }
}

/// Accept errors that mean the listening socket itself is gone (the
/// shutdown race); everything else is a transient per-connection failure.
fn is_listener_closed(error: &std::io::Error) -> bool {
    matches!(
        error.kind(),
        std::io::ErrorKind::InvalidInput
            | std::io::ErrorKind::NotConnected
            | std::io::ErrorKind::BrokenPipe
    )
}
