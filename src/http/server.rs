//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the axum router around a frozen route table
//! - Wire up tower-http layers (tracing, request timeout)
//! - Buffer request bodies up to the configured limit
//! - Dispatch to the composed handler, or answer 404
//! - Serve with graceful shutdown

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::error::RestError;
use crate::http::{HttpRouteTable, RequestContext, ResponseWriter};
use crate::routing::path;

/// State injected into the dispatch handler.
#[derive(Clone)]
struct DispatchState {
    table: Arc<HttpRouteTable>,
    body_limit: usize,
}

/// HTTP front end for a built route table.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    pub fn new(table: HttpRouteTable, config: ServerConfig) -> Self {
        let state = DispatchState {
            table: Arc::new(table),
            body_limit: config.body_limit_bytes,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: DispatchState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.request_timeout_secs,
                    ))),
            )
    }

    /// The underlying axum router, for embedding or in-process testing.
    pub fn into_router(self) -> Router {
        self.router
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn dispatch(State(state): State<DispatchState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, state.body_limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, limit = state.body_limit, "Failed to buffer request body");
            let mut w = ResponseWriter::new();
            w.rest_error(
                StatusCode::PAYLOAD_TOO_LARGE,
                &RestError::plain("request body too large"),
            );
            return w.into_response();
        }
    };
    let request = Request::from_parts(parts, body);

    let cx = RequestContext::from_request(&request);
    let path = path::normalize(request.uri().path());
    let mut w = ResponseWriter::new();

    match state.table.lookup(request.method(), &path) {
        Some(entry) => {
            tracing::debug!(
                request_id = %cx.request_id(),
                method = %request.method(),
                path = %path,
                "Dispatching request"
            );
            entry.call(&cx, &mut w, &request);
        }
        None => {
            tracing::warn!(
                request_id = %cx.request_id(),
                method = %request.method(),
                path = %path,
                "No route matched"
            );
            w.rest_error(
                StatusCode::NOT_FOUND,
                &RestError::plain("no matching route found"),
            );
        }
    }

    w.into_response()
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
