//! Host lifecycle state machine and fluent registration surface.
//!
//! # Responsibilities
//! - Own the Stopped/Starting/Running/Stopping/Disposed state machine
//! - Serialize start/stop/dispose so at most one transition is in flight
//! - Resolve the bind address once and reuse it across start cycles
//! - Expose the fluent `handles` registration API
//!
//! # Design Decisions
//! - One `tokio::sync::Mutex` guards every transition; `stop` releases it
//!   while awaiting accept-loop quiescence so concurrent callers observe
//!   the Stopping state instead of blocking invisibly
//! - Registration is permitted in any state; the registry publishes
//!   snapshots, so routes added while running take effect on the next
//!   lookup

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::config::HostConfig;
use crate::cors::{preflight_handler, CorsPolicy};
use crate::http::request::HostRequest;
use crate::http::response::{BoxError, HandlerResponse};
use crate::lifecycle::accept::AcceptLoop;
use crate::lifecycle::dispatch::Dispatcher;
use crate::lifecycle::shutdown::Shutdown;
use crate::net::listener::Listener;
use crate::routing::registry::{RouteEntry, RouteRegistry};
use crate::routing::VerbSet;

/// Host lifecycle states. `Disposed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Stopped,
    Starting,
    Running,
    Stopping,
    Disposed,
}

impl fmt::Display for HostState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HostState::Stopped => "stopped",
            HostState::Starting => "starting",
            HostState::Running => "running",
            HostState::Stopping => "stopping",
            HostState::Disposed => "disposed",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by lifecycle operations.
#[derive(Debug, Error)]
pub enum HostError {
    /// `start` was called while the host is starting, running, or stopping.
    #[error("host cannot start while {0}")]
    InvalidState(HostState),

    /// The host has been disposed and can never start again.
    #[error("host has been disposed")]
    Disposed,

    /// The listener could not bind to the configured address.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
}

struct LifecycleState {
    state: HostState,
    /// Concrete address recorded on the first successful bind; later start
    /// cycles re-bind it so the host serves at the same address throughout
    /// its lifetime.
    bound_addr: Option<SocketAddr>,
    shutdown: Option<Shutdown>,
    accept_loop: Option<JoinHandle<()>>,
}

/// An embeddable HTTP host.
///
/// Routes are registered fluently, before or after [`start`](Self::start):
///
/// ```no_run
/// use fluent_host::{FluentHost, HandlerResponse, VerbSet};
///
/// # async fn run() -> Result<(), fluent_host::HostError> {
/// let host = FluentHost::bind("127.0.0.1:8080");
/// host.handles("/hello", VerbSet::GET, |_req| Ok(HandlerResponse::text("hi")))
///     .handles("*", VerbSet::ALL, |req| {
///         Ok(HandlerResponse::text_with_status(
///             format!("No handler found for the route {}.", req.path()),
///             404,
///         ))
///     });
/// host.start().await?;
/// # Ok(())
/// # }
/// ```
pub struct FluentHost {
    config: HostConfig,
    registry: Arc<RouteRegistry>,
    lifecycle: Mutex<LifecycleState>,
}

impl FluentHost {
    pub fn new(config: HostConfig) -> Self {
        Self {
            config,
            registry: Arc::new(RouteRegistry::new()),
            lifecycle: Mutex::new(LifecycleState {
                state: HostState::Stopped,
                bound_addr: None,
                shutdown: None,
                accept_loop: None,
            }),
        }
    }

    /// Host bound to `address`, e.g. `"127.0.0.1:8080"`. Port 0 picks an
    /// ephemeral port on first start.
    pub fn bind(address: impl Into<String>) -> Self {
        Self::new(HostConfig {
            bind_address: address.into(),
        })
    }

    /// Register a route handler.
    ///
    /// The most recent registration for a matching (pattern, verb) pair
    /// wins. The bare pattern `"*"` registers as the fallback, consulted
    /// only when no specific route matches.
    pub fn handles<H>(&self, pattern: impl Into<String>, verbs: VerbSet, handler: H) -> &Self
    where
        H: Fn(&HostRequest) -> Result<HandlerResponse, BoxError> + Send + Sync + 'static,
    {
        self.registry
            .register(RouteEntry::new(pattern.into(), verbs, Arc::new(handler), None));
        self
    }

    /// Register a CORS-enabled route handler.
    ///
    /// Also registers the synthesized preflight route: same pattern, verb
    /// OPTIONS only, sharing this policy.
    pub fn handles_with_cors<H>(
        &self,
        pattern: impl Into<String>,
        verbs: VerbSet,
        handler: H,
        policy: CorsPolicy,
    ) -> &Self
    where
        H: Fn(&HostRequest) -> Result<HandlerResponse, BoxError> + Send + Sync + 'static,
    {
        let pattern = pattern.into();
        let policy = Arc::new(policy);
        self.registry.register(RouteEntry::new(
            pattern.clone(),
            verbs,
            Arc::new(handler),
            Some(Arc::clone(&policy)),
        ));
        self.registry.register(RouteEntry::new(
            pattern,
            VerbSet::OPTIONS,
            preflight_handler(Arc::clone(&policy)),
            Some(policy),
        ));
        self
    }

    /// Consistent snapshot of registered routes in lookup order.
    pub fn handlers(&self) -> Vec<Arc<RouteEntry>> {
        self.registry.entries()
    }

    pub async fn state(&self) -> HostState {
        self.lifecycle.lock().await.state
    }

    /// Concrete bound address, once the host has started at least once.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        self.lifecycle.lock().await.bound_addr
    }

    /// Bind the listener and begin accepting requests.
    ///
    /// Fails with [`HostError::InvalidState`] while starting, running, or
    /// stopping, and with [`HostError::Disposed`] after
    /// [`dispose`](Self::dispose).
    pub async fn start(&self) -> Result<(), HostError> {
        let mut lifecycle = self.lifecycle.lock().await;

        match lifecycle.state {
            HostState::Disposed => return Err(HostError::Disposed),
            HostState::Starting | HostState::Running | HostState::Stopping => {
                return Err(HostError::InvalidState(lifecycle.state));
            }
            HostState::Stopped => {}
        }
        lifecycle.state = HostState::Starting;

        let address = match lifecycle.bound_addr {
            Some(addr) => addr.to_string(),
            None => self.config.bind_address.clone(),
        };
        let listener = match Listener::bind(&address).await {
            Ok(listener) => listener,
            Err(error) => {
                lifecycle.state = HostState::Stopped;
                return Err(HostError::Bind {
                    address,
                    source: error.into_io(),
                });
            }
        };
        let local_addr = listener.local_addr();
        lifecycle.bound_addr = Some(local_addr);

        let shutdown = Shutdown::new();
        let accept = AcceptLoop::new(
            listener,
            Dispatcher::new(Arc::clone(&self.registry)),
            shutdown.clone(),
        );
        lifecycle.accept_loop = Some(tokio::spawn(accept.run()));
        lifecycle.shutdown = Some(shutdown);
        lifecycle.state = HostState::Running;

        tracing::info!(
            address = %local_addr,
            routes = self.registry.len(),
            "Host started"
        );
        Ok(())
    }

    /// Stop accepting new requests and wait for the accept loop to quiesce.
    ///
    /// In-flight dispatches run to completion. A no-op when the host is
    /// already stopped or disposed.
    pub async fn stop(&self) {
        let handle = {
            let mut lifecycle = self.lifecycle.lock().await;
            if matches!(lifecycle.state, HostState::Stopped | HostState::Disposed) {
                return;
            }
            lifecycle.state = HostState::Stopping;
            if let Some(shutdown) = lifecycle.shutdown.take() {
                shutdown.trigger();
            }
            lifecycle.accept_loop.take()
        };

        // Quiesce outside the lock so concurrent callers observe Stopping.
        if let Some(handle) = handle {
            if let Err(error) = handle.await {
                tracing::debug!(%error, "Accept loop terminated abnormally");
            }
        }

        let mut lifecycle = self.lifecycle.lock().await;
        if lifecycle.state != HostState::Disposed {
            lifecycle.state = HostState::Stopped;
        }
        tracing::info!("Host stopped");
    }

    /// Stop the host and permanently retire it.
    ///
    /// Idempotent; every later [`start`](Self::start) fails with
    /// [`HostError::Disposed`].
    pub async fn dispose(&self) {
        {
            let lifecycle = self.lifecycle.lock().await;
            if lifecycle.state == HostState::Disposed {
                return;
            }
        }

        self.stop().await;

        let mut lifecycle = self.lifecycle.lock().await;
        lifecycle.state = HostState::Disposed;
        lifecycle.shutdown = None;
        lifecycle.accept_loop = None;
        tracing::info!("Host disposed");
    }
}
