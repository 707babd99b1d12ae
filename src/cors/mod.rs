//! Per-route CORS policy and preflight synthesis.
//!
//! # Responsibilities
//! - Hold a route's CORS policy (origins, verbs, headers, max age)
//! - Resolve the `Access-Control-Allow-Origin` value for a request origin
//! - Synthesize the OPTIONS preflight handler registered alongside every
//!   CORS-enabled route
//!
//! # Design Decisions
//! - Origin resolution is deterministic: a case-insensitive exact match
//!   echoes the request origin; otherwise a wildcard entry echoes it;
//!   otherwise no allow-origin header is emitted
//! - The policy is shared (`Arc`) between a route and its preflight twin

use std::sync::Arc;

use hyper::header::{
    HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
};

use crate::http::request::HostRequest;
use crate::http::response::HandlerResponse;
use crate::routing::registry::HandlerFn;
use crate::routing::VerbSet;

/// Cross-origin policy attached to a route and its synthesized preflight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    pub allowed_origins: Vec<String>,
    pub allowed_verbs: VerbSet,
    pub allowed_headers: Vec<String>,
    pub max_age_seconds: u32,
}

impl CorsPolicy {
    /// Policy with the default preflight cache lifetime of one day.
    pub fn new(
        origins: impl IntoIterator<Item = impl Into<String>>,
        verbs: VerbSet,
        headers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            allowed_origins: origins.into_iter().map(Into::into).collect(),
            allowed_verbs: verbs,
            allowed_headers: headers.into_iter().map(Into::into).collect(),
            max_age_seconds: 86_400,
        }
    }

    /// Wildcard policy: any origin, every verb, any header.
    pub fn allow_all() -> Self {
        Self::new(["*"], VerbSet::ALL, ["*"])
    }

    pub fn with_max_age(mut self, seconds: u32) -> Self {
        self.max_age_seconds = seconds;
        self
    }

    /// True when the request origin is permitted by this policy.
    pub fn allows_origin(&self, origin: &str) -> bool {
        self.allowed_origins
            .iter()
            .any(|allowed| allowed == "*" || allowed.eq_ignore_ascii_case(origin))
    }

    /// Resolve the `Access-Control-Allow-Origin` value for a request origin.
    ///
    /// Exact match wins and echoes the request origin; otherwise a wildcard
    /// entry echoes it; otherwise `None` and the header is omitted.
    pub fn resolve_origin(&self, request_origin: &str) -> Option<String> {
        if request_origin.is_empty() {
            return None;
        }
        let permitted = self
            .allowed_origins
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(request_origin))
            || self.allowed_origins.iter().any(|allowed| allowed == "*");
        permitted.then(|| request_origin.to_string())
    }

    /// CORS response headers for a request origin.
    ///
    /// The allow-origin header is omitted when the origin is not permitted;
    /// the other three are always emitted.
    pub(crate) fn to_headers(&self, request_origin: &str) -> Vec<(HeaderName, HeaderValue)> {
        let mut headers = Vec::with_capacity(4);
        if let Some(origin) = self.resolve_origin(request_origin) {
            if let Ok(value) = HeaderValue::from_str(&origin) {
                headers.push((ACCESS_CONTROL_ALLOW_ORIGIN, value));
            }
        }
        if let Ok(value) = HeaderValue::from_str(&self.allowed_verbs.to_string()) {
            headers.push((ACCESS_CONTROL_ALLOW_METHODS, value));
        }
        if let Ok(value) = HeaderValue::from_str(&self.allowed_headers.join(", ")) {
            headers.push((ACCESS_CONTROL_ALLOW_HEADERS, value));
        }
        headers.push((ACCESS_CONTROL_MAX_AGE, HeaderValue::from(self.max_age_seconds)));
        headers
    }
}

/// Build the preflight handler registered alongside a CORS-enabled route.
///
/// Responds 200 with an empty body when the request origin is permitted,
/// 400 otherwise. A preflight without an `Origin` header is rejected.
pub(crate) fn preflight_handler(policy: Arc<CorsPolicy>) -> HandlerFn {
    Arc::new(move |request: &HostRequest| {
        let origin = request.header("origin").unwrap_or("");
        let allowed = !origin.is_empty() && policy.allows_origin(origin);
        if !allowed {
            tracing::debug!(origin = %origin, "Preflight origin rejected");
        }
        Ok(HandlerResponse::empty(if allowed { 200 } else { 400 }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::Method;

    #[test]
    fn exact_origin_match_echoes_request_origin() {
        let policy = CorsPolicy::new(["https://allowed.test"], VerbSet::GET, ["content-type"]);
        assert_eq!(
            policy.resolve_origin("https://allowed.test").as_deref(),
            Some("https://allowed.test")
        );
        assert_eq!(
            policy.resolve_origin("HTTPS://ALLOWED.TEST").as_deref(),
            Some("HTTPS://ALLOWED.TEST")
        );
        assert_eq!(policy.resolve_origin("https://blocked.test"), None);
    }

    #[test]
    fn wildcard_echoes_any_origin() {
        let policy = CorsPolicy::allow_all();
        assert_eq!(
            policy.resolve_origin("https://anywhere.test").as_deref(),
            Some("https://anywhere.test")
        );
        assert_eq!(policy.resolve_origin(""), None);
    }

    #[test]
    fn headers_omit_allow_origin_for_blocked_origin() {
        let policy = CorsPolicy::new(["https://allowed.test"], VerbSet::GET | VerbSet::POST, ["x-token"]);
        let headers = policy.to_headers("https://blocked.test");

        assert!(headers.iter().all(|(name, _)| *name != ACCESS_CONTROL_ALLOW_ORIGIN));
        let methods = headers
            .iter()
            .find(|(name, _)| *name == ACCESS_CONTROL_ALLOW_METHODS)
            .map(|(_, value)| value.to_str().unwrap().to_string());
        assert_eq!(methods.as_deref(), Some("GET, POST"));
        let max_age = headers
            .iter()
            .find(|(name, _)| *name == ACCESS_CONTROL_MAX_AGE)
            .map(|(_, value)| value.to_str().unwrap().to_string());
        assert_eq!(max_age.as_deref(), Some("86400"));
    }

    #[test]
    fn preflight_allows_and_rejects() {
        let policy = Arc::new(CorsPolicy::new(
            ["https://allowed.test"],
            VerbSet::GET,
            ["content-type"],
        ));
        let handler = preflight_handler(policy);

        let allowed = HostRequest::synthetic(
            Method::OPTIONS,
            "/data",
            &[("origin", "https://allowed.test")],
        );
        assert_eq!((handler)(&allowed).unwrap().status, 200);

        let blocked = HostRequest::synthetic(
            Method::OPTIONS,
            "/data",
            &[("origin", "https://blocked.test")],
        );
        assert_eq!((handler)(&blocked).unwrap().status, 400);

        let missing = HostRequest::synthetic(Method::OPTIONS, "/data", &[]);
        assert_eq!((handler)(&missing).unwrap().status, 400);
    }
}
