//! Bearer-token guard.
//! Rejects requests without the expected `Authorization` header.

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;

use crate::error::RestError;
use crate::http::HttpMiddleware;

pub fn bearer_auth(token: impl Into<String>) -> HttpMiddleware {
    let expected = format!("Bearer {}", token.into());

    HttpMiddleware::from_fn(move |cx, w, req, next| {
        let presented = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        if presented == Some(expected.as_str()) {
            next.call(cx, w, req);
            return;
        }

        tracing::warn!(
            request_id = %cx.request_id(),
            path = %req.uri().path(),
            "Rejected request without valid bearer token"
        );
        w.rest_error(
            StatusCode::UNAUTHORIZED,
            &RestError::new(StatusCode::UNAUTHORIZED.as_u16().into(), "unauthorized"),
        );
    })
}
