//! Shared utilities for integration tests.

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use groupmux::{HandlerFunc, Middleware, RouteEntry, Router};
use tower::ServiceExt;

/// Records the order in which middleware and handlers ran.
#[allow(dead_code)]
pub type Trace = Vec<u32>;

#[allow(dead_code)]
pub type TestRouter = Router<(), Trace, ()>;
#[allow(dead_code)]
pub type TestMiddleware = Middleware<(), Trace, ()>;
#[allow(dead_code)]
pub type TestHandler = HandlerFunc<(), Trace, ()>;

/// `n` middleware; the i-th one pushes `i` and calls the next handler.
#[allow(dead_code)]
pub fn markers(n: u32) -> Vec<TestMiddleware> {
    (0..n)
        .map(|i| {
            let mw: TestMiddleware = Middleware::from_fn(move |cx, w: &mut Trace, req, next| {
                w.push(i);
                next.call(cx, w, req);
            });
            mw
        })
        .collect()
}

/// A leaf handler that pushes `tag`.
#[allow(dead_code)]
pub fn leaf(tag: u32) -> TestHandler {
    HandlerFunc::new(move |_, w: &mut Trace, _| w.push(tag))
}

/// Invokes a composed entry and returns what it recorded.
#[allow(dead_code)]
pub fn run(entry: &RouteEntry<(), Trace, ()>) -> Trace {
    let mut out = Trace::new();
    entry.call(&(), &mut out, &());
    out
}

/// Sends one request through an axum router in-process.
#[allow(dead_code)]
pub async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body)
}
