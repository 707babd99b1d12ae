//! Embeddable HTTP host with fluent route registration.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌─────────────────────────────────────────────────┐
//!                    │                  FLUENT HOST                    │
//!                    │                                                 │
//!   Client Request   │  ┌─────────┐    ┌───────────┐    ┌──────────┐  │
//!   ─────────────────┼─▶│   net   │───▶│ lifecycle │───▶│ routing  │  │
//!                    │  │listener │    │  accept + │    │registry +│  │
//!                    │  └─────────┘    │  dispatch │    │ matcher  │  │
//!                    │                 └─────┬─────┘    └────┬─────┘  │
//!                    │                       │               │        │
//!                    │                       ▼               ▼        │
//!   Client Response  │  ┌─────────┐    ┌──────────┐    ┌──────────┐  │
//!   ◀────────────────┼──│  http   │◀───│  handler │◀───│   cors   │  │
//!                    │  │response │    │ function │    │preflight │  │
//!                    │  └─────────┘    └──────────┘    └──────────┘  │
//!                    │                                               │
//!                    │  ┌───────────────────────────────────────────┐│
//!                    │  │  config  │  observability  │ lifecycle FSM││
//!                    │  └───────────────────────────────────────────┘│
//!                    └─────────────────────────────────────────────────┘
//! ```
//!
//! A host is created with a bind address, routes are registered fluently
//! (before or after start), and each accepted request is dispatched on its
//! own task. Registering a route with a [`CorsPolicy`] also registers a
//! synthesized OPTIONS preflight route for the same pattern.
//!
//! ```no_run
//! use fluent_host::{FluentHost, HandlerResponse, VerbSet};
//!
//! # async fn run() -> Result<(), fluent_host::HostError> {
//! let host = FluentHost::bind("127.0.0.1:1234");
//! host.handles("/hello/world", VerbSet::GET, |_req| {
//!     Ok(HandlerResponse::text("Hello World!"))
//! });
//! host.start().await?;
//! # Ok(())
//! # }
//! ```

// Core subsystems
pub mod config;
pub mod cors;
pub mod http;
pub mod net;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::HostConfig;
pub use cors::CorsPolicy;
pub use http::request::HostRequest;
pub use http::response::{BoxError, HandlerResponse};
pub use lifecycle::host::{FluentHost, HostError, HostState};
pub use routing::VerbSet;
