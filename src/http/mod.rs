//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, trace + timeout layers)
//!     → dispatch: buffer body, normalize path
//!     → RouteTable lookup (exact method + path)
//!     → composed handler(RequestContext, ResponseWriter, Request<Bytes>)
//!     → response.rs (ResponseWriter → axum Response)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - The routing core stays transport-agnostic; this module only picks the
//!   concrete context, response and request carriers
//! - Misses answer 404 with a REST error body; no method negotiation

pub mod builtin;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

use axum::body::Bytes;

pub use request::{RequestContext, X_REQUEST_ID};
pub use response::ResponseWriter;
pub use server::HttpServer;

use crate::config::mount::Catalog;
use crate::routing::{HandlerFunc, Middleware, RouteTable, Router};

/// Request carrier: the original request with its body fully buffered.
pub type HttpRequest = axum::http::Request<Bytes>;

pub type HttpHandler = HandlerFunc<RequestContext, ResponseWriter, HttpRequest>;
pub type HttpMiddleware = Middleware<RequestContext, ResponseWriter, HttpRequest>;
pub type HttpRouter = Router<RequestContext, ResponseWriter, HttpRequest>;
pub type HttpRouteTable = RouteTable<RequestContext, ResponseWriter, HttpRequest>;
pub type HttpCatalog = Catalog<RequestContext, ResponseWriter, HttpRequest>;
