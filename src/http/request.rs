//! Per-request context handed to every handler.
//!
//! # Responsibilities
//! - Carry the request ID (from `x-request-id`, or a fresh UUID v4)
//! - Record when dispatch started
//!
//! # Design Decisions
//! - Request ID assigned as early as possible for tracing
//! - An incoming ID is trusted as-is; it already passed header validation

use axum::http::Request;
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    started: Instant,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            started: Instant::now(),
        }
    }

    /// Context for `request`, reusing its `x-request-id` header when present.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Self::new(request_id)
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reuses_incoming_request_id() {
        let req = Request::builder()
            .header(X_REQUEST_ID, "abc-123")
            .body(())
            .unwrap();
        assert_eq!(RequestContext::from_request(&req).request_id(), "abc-123");
    }

    #[test]
    fn test_generates_uuid_when_missing() {
        let req = Request::builder().body(()).unwrap();
        let cx = RequestContext::from_request(&req);
        assert!(Uuid::parse_str(cx.request_id()).is_ok());
    }
}
