//! Network layer subsystem.
//!
//! # Design Decisions
//! - The listener is owned by the accept loop for the whole start cycle;
//!   the socket closes when the loop exits and drops it
//! - No connection cap: the host fans out one task per accepted connection
//!   and deliberately imposes no backpressure

pub mod listener;

pub use listener::{Listener, ListenerError};
