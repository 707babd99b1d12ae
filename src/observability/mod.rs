//! Observability subsystem.
//!
//! The host logs through `tracing` with structured fields; nothing here is
//! required for embedding. Bring your own subscriber, or use
//! [`logging::init`] in binaries.

pub mod logging;
