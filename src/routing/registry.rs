//! Route storage and lookup.
//!
//! # Responsibilities
//! - Store registered routes in lookup order
//! - Find the first route matching a (path, verb) pair
//! - Publish writes atomically so concurrent dispatch never observes a
//!   partially-mutated table
//!
//! # Design Decisions
//! - Snapshot-swap (`ArcSwap`) rather than a read-write lock: dispatch is
//!   read-heavy and snapshot loads are lock-free, so writers cannot starve
//!   readers and vice versa
//! - Specific routes are prepended (most recent wins); fallback routes are
//!   appended; held as two lists concatenated at lookup time
//! - Re-registering a pattern shadows the earlier entry without removing it

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::cors::CorsPolicy;
use crate::http::request::HostRequest;
use crate::http::response::{BoxError, HandlerResponse};
use crate::routing::matcher::path_matches;
use crate::routing::VerbSet;

/// Route handler function.
pub type HandlerFn =
    Arc<dyn Fn(&HostRequest) -> Result<HandlerResponse, BoxError> + Send + Sync>;

/// A single registered route. Immutable once created.
pub struct RouteEntry {
    pub pattern: String,
    pub verbs: VerbSet,
    pub handler: HandlerFn,
    pub cors: Option<Arc<CorsPolicy>>,
}

impl RouteEntry {
    pub fn new(
        pattern: String,
        verbs: VerbSet,
        handler: HandlerFn,
        cors: Option<Arc<CorsPolicy>>,
    ) -> Self {
        Self {
            pattern,
            verbs,
            handler,
            cors,
        }
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("pattern", &self.pattern)
            .field("verbs", &self.verbs)
            .field("cors", &self.cors.is_some())
            .finish_non_exhaustive()
    }
}

/// Immutable snapshot of every registered route.
#[derive(Default)]
struct RouteTable {
    specific: Vec<Arc<RouteEntry>>,
    fallback: Vec<Arc<RouteEntry>>,
}

impl RouteTable {
    fn with_route(&self, entry: Arc<RouteEntry>, is_fallback: bool) -> RouteTable {
        let mut specific = self.specific.clone();
        let mut fallback = self.fallback.clone();
        if is_fallback {
            fallback.push(entry);
        } else {
            specific.insert(0, entry);
        }
        RouteTable { specific, fallback }
    }

    fn lookup(&self, path: &str, verb: VerbSet) -> Option<Arc<RouteEntry>> {
        self.specific
            .iter()
            .chain(self.fallback.iter())
            .find(|entry| path_matches(&entry.pattern, path) && entry.verbs.intersects(verb))
            .cloned()
    }
}

/// Shared route registry: many concurrent readers during dispatch, the
/// occasional writer during registration.
pub struct RouteRegistry {
    table: ArcSwap<RouteTable>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self {
            table: ArcSwap::from_pointee(RouteTable::default()),
        }
    }

    /// Register a route. The bare `"*"` pattern registers as fallback and is
    /// consulted after every specific route regardless of registration
    /// order; everything else prepends.
    pub fn register(&self, entry: RouteEntry) {
        let is_fallback = entry.pattern == "*";
        let entry = Arc::new(entry);
        self.table
            .rcu(|table| table.with_route(Arc::clone(&entry), is_fallback));
        tracing::debug!(
            pattern = %entry.pattern,
            verbs = %entry.verbs,
            fallback = is_fallback,
            "Route registered"
        );
    }

    /// First route whose pattern matches the path and whose verb set
    /// intersects the request verb, in lookup order.
    pub fn lookup(&self, path: &str, verb: VerbSet) -> Option<Arc<RouteEntry>> {
        self.table.load().lookup(path, verb)
    }

    /// Consistent snapshot of all entries in lookup order.
    pub fn entries(&self) -> Vec<Arc<RouteEntry>> {
        let table = self.table.load();
        table
            .specific
            .iter()
            .chain(table.fallback.iter())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        let table = self.table.load();
        table.specific.len() + table.fallback.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new()
    }
}
