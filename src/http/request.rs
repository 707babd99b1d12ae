//! Request representation handed to route handlers.

use http_body_util::BodyExt;
use hyper::body::{Bytes, Incoming};
use hyper::header::HeaderMap;
use hyper::{Method, Request, Uri};

use crate::routing::VerbSet;

/// An accepted HTTP request with its body fully buffered.
///
/// Streaming request bodies are out of scope for the host, so the dispatch
/// path collects the body up front and handlers see plain bytes.
#[derive(Debug)]
pub struct HostRequest {
    method: Method,
    verb: VerbSet,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
}

impl HostRequest {
    /// Buffer an incoming hyper request.
    ///
    /// A body that fails to arrive (client gone mid-upload) buffers as
    /// empty; the client that vanished cannot read a response either, so
    /// the dispatch proceeds rather than failing.
    pub(crate) async fn from_incoming(req: Request<Incoming>) -> HostRequest {
        let (parts, body) = req.into_parts();
        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(error) => {
                tracing::debug!(%error, "Failed to buffer request body");
                Bytes::new()
            }
        };
        HostRequest {
            verb: VerbSet::from_method(&parts.method),
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request method as a single-verb set, for route matching.
    pub fn verb(&self) -> VerbSet {
        self.verb
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value as a string, if present and visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Deserialize the buffered body as JSON.
    pub fn body_json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    #[cfg(test)]
    pub(crate) fn synthetic(method: Method, path: &str, headers: &[(&str, &str)]) -> HostRequest {
        use hyper::header::{HeaderName, HeaderValue};
        use std::str::FromStr;

        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.insert(
                HeaderName::from_str(name).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        HostRequest {
            verb: VerbSet::from_method(&method),
            method,
            uri: path.parse().unwrap(),
            headers: map,
            body: Bytes::new(),
        }
    }
}
