//! HTTP request/response surface handed to route handlers.
//!
//! # Data Flow
//! ```text
//! hyper request
//!     → request.rs (verb + path extraction, body buffering)
//!     → handler function
//!     → response.rs (status, content type, charset, body bytes)
//!     → written back by the dispatcher
//! ```

pub mod request;
pub mod response;

pub use request::HostRequest;
pub use response::{BoxError, HandlerResponse};
