//! Per-request dispatch.
//!
//! # Responsibilities
//! - Look up the matching route for each request
//! - Apply CORS response headers when the matched route carries a policy
//! - Invoke the handler and convert its result to a wire response
//! - Contain handler faults to the single request (500, empty body)
//!
//! # Data Flow
//! ```text
//! hyper request
//!     → buffer body (HostRequest)
//!     → registry lookup (path, verb)
//!     → no match: 404, empty body
//!     → CORS headers (policy present + Origin header present)
//!     → handler invocation (Err or panic → 500, empty body)
//!     → status + content type + body written back
//! ```

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Request, Response, StatusCode};

use crate::http::request::HostRequest;
use crate::http::response::HandlerResponse;
use crate::routing::registry::{RouteEntry, RouteRegistry};

/// Dispatches accepted requests against the route registry. One instance is
/// shared by every connection task of a start cycle.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<RouteRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<RouteRegistry>) -> Self {
        Self { registry }
    }

    /// Handle one request end-to-end. Always produces a response; handler
    /// failures are converted, never propagated.
    pub async fn dispatch(&self, req: Request<Incoming>) -> Response<Full<Bytes>> {
        let request = HostRequest::from_incoming(req).await;

        let entry = match self.registry.lookup(request.path(), request.verb()) {
            Some(entry) => entry,
            None => {
                tracing::debug!(path = %request.path(), verb = %request.verb(), "No route matched");
                return empty_response(StatusCode::NOT_FOUND);
            }
        };

        self.respond(&entry, &request)
    }

    pub(crate) fn respond(
        &self,
        entry: &RouteEntry,
        request: &HostRequest,
    ) -> Response<Full<Bytes>> {
        // CORS headers are computed before the handler runs and stay on the
        // response even when the handler faults.
        let cors_headers = match (&entry.cors, request.header("origin")) {
            (Some(policy), Some(origin)) => policy.to_headers(origin),
            _ => Vec::new(),
        };

        let outcome = catch_unwind(AssertUnwindSafe(|| (entry.handler)(request)));

        let handler_response = match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(error)) => {
                tracing::warn!(path = %request.path(), %error, "Handler failed");
                HandlerResponse::empty(500)
            }
            Err(_) => {
                tracing::warn!(path = %request.path(), "Handler panicked");
                HandlerResponse::empty(500)
            }
        };

        let status = StatusCode::from_u16(handler_response.status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = handler_response.content_type_header();

        let mut response = Response::new(Full::new(handler_response.body));
        *response.status_mut() = status;
        for (name, value) in cors_headers {
            response.headers_mut().insert(name, value);
        }
        if let Ok(value) = HeaderValue::from_str(&content_type) {
            response.headers_mut().insert(CONTENT_TYPE, value);
        }
        response
    }
}

fn empty_response(status: StatusCode) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}
