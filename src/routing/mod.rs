//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (any host state)
//!     → registry.rs (prepend specific / append fallback, atomic publish)
//!
//! Dispatch (per request)
//!     → registry snapshot load
//!     → matcher.rs (path pattern match) + verb.rs (verb set intersection)
//!     → first match wins
//! ```

pub mod matcher;
pub mod registry;
pub mod verb;

pub use registry::{HandlerFn, RouteEntry, RouteRegistry};
pub use verb::VerbSet;
