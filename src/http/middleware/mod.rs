//! Stock middleware for HTTP routes.
//!
//! Each function returns an [`HttpMiddleware`] ready for
//! [`Group::middleware`](crate::routing::Group::middleware).

pub mod auth;
pub mod recover;

pub use auth::bearer_auth;
pub use recover::recover;

use axum::http::HeaderValue;

use crate::http::{HttpMiddleware, X_REQUEST_ID};

/// Logs one event per handled request, after the inner chain returns.
pub fn trace_requests() -> HttpMiddleware {
    HttpMiddleware::from_fn(|cx, w, req, next| {
        next.call(cx, w, req);
        tracing::info!(
            request_id = %cx.request_id(),
            method = %req.method(),
            path = %req.uri().path(),
            status = w.status().as_u16(),
            elapsed_ms = cx.elapsed().as_millis() as u64,
            "Request handled"
        );
    })
}

/// Echoes the request ID back in the `x-request-id` response header.
pub fn request_id() -> HttpMiddleware {
    HttpMiddleware::from_fn(|cx, w, req, next| {
        next.call(cx, w, req);
        if let Ok(value) = HeaderValue::from_str(cx.request_id()) {
            w.headers_mut().insert(X_REQUEST_ID, value);
        }
    })
}
