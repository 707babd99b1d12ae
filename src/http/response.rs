//! Handler response values and constructors.
//!
//! # Responsibilities
//! - Carry status, content type, charset, and body bytes out of a handler
//! - Provide the plain-text and JSON convenience constructors
//!
//! # Design Decisions
//! - The dispatcher is agnostic to how the bytes were produced; these
//!   constructors are conveniences, not a required surface

use hyper::body::Bytes;
use serde::Serialize;

/// Boxed error carried out of handler functions. Any `Err` becomes a 500
/// with an empty body, contained to the one request.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Response produced by a route handler; consumed exactly once by the
/// dispatcher.
#[derive(Debug, Clone)]
pub struct HandlerResponse {
    pub status: u16,
    pub content_type: String,
    pub charset: String,
    pub body: Bytes,
}

impl HandlerResponse {
    /// 200 `text/plain` response.
    pub fn text(value: impl Into<String>) -> HandlerResponse {
        Self::text_with_status(value, 200)
    }

    pub fn text_with_status(value: impl Into<String>, status: u16) -> HandlerResponse {
        HandlerResponse {
            status,
            content_type: "text/plain".to_string(),
            charset: "utf-8".to_string(),
            body: Bytes::from(value.into()),
        }
    }

    /// 200 `application/json` response serialized from `value`.
    pub fn json<T: Serialize>(value: &T) -> Result<HandlerResponse, BoxError> {
        Self::json_with_status(value, 200)
    }

    pub fn json_with_status<T: Serialize>(
        value: &T,
        status: u16,
    ) -> Result<HandlerResponse, BoxError> {
        let body = serde_json::to_vec(value)?;
        Ok(HandlerResponse {
            status,
            content_type: "application/json".to_string(),
            charset: "utf-8".to_string(),
            body: Bytes::from(body),
        })
    }

    /// Empty-bodied response with the given status.
    pub fn empty(status: u16) -> HandlerResponse {
        HandlerResponse {
            status,
            content_type: "text/plain".to_string(),
            charset: "utf-8".to_string(),
            body: Bytes::new(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    /// `Content-Type` header value including the charset parameter.
    pub(crate) fn content_type_header(&self) -> String {
        format!("{}; charset={}", self.content_type, self.charset)
    }
}

/// Map a file path's extension to a content type, defaulting to
/// `text/plain`.
pub fn path_content_type(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, extension)| extension) {
        Some("html") => "text/html",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        _ => "text/plain",
    }
}
