//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! start() (host.rs):
//!     Guard state → bind listener → spawn accept loop → Running
//!
//! accept loop (accept.rs):
//!     accept connection → spawn dispatch task → loop
//!
//! dispatch (dispatch.rs):
//!     match route → CORS headers → invoke handler → write response
//!
//! stop() (host.rs):
//!     Guard state → trigger shutdown → await accept loop → Stopped
//! ```
//!
//! # Design Decisions
//! - State transitions serialize on one lock; at most one in flight
//! - Stop halts acceptance only; in-flight dispatches are never cancelled

pub mod accept;
pub mod dispatch;
pub mod host;
pub mod shutdown;

pub use host::{FluentHost, HostError, HostState};
pub use shutdown::Shutdown;
