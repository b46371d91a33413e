//! Built-in handlers and middleware, addressable by name from config.

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use serde::Serialize;

use crate::http::middleware::{recover, request_id, trace_requests};
use crate::http::{HttpCatalog, HttpHandler, HttpRequest, RequestContext, ResponseWriter};

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
}

#[derive(Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
}

fn health(_: &RequestContext, w: &mut ResponseWriter, _: &HttpRequest) {
    w.json(StatusCode::OK, &HealthStatus { status: "ok" });
}

fn hello(_: &RequestContext, w: &mut ResponseWriter, _: &HttpRequest) {
    w.text(StatusCode::OK, "Hello, World!");
}

/// Writes the request body back, with the request's content type.
fn echo(_: &RequestContext, w: &mut ResponseWriter, req: &HttpRequest) {
    if let Some(content_type) = req.headers().get(CONTENT_TYPE) {
        w.headers_mut().insert(CONTENT_TYPE, content_type.clone());
    }
    w.write(req.body());
}

fn version(_: &RequestContext, w: &mut ResponseWriter, _: &HttpRequest) {
    w.json(
        StatusCode::OK,
        &VersionInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        },
    );
}

/// Handlers `health`, `hello`, `echo`, `version`; middleware `trace`,
/// `request-id`, `recover`.
pub fn builtin_catalog() -> HttpCatalog {
    let mut catalog = HttpCatalog::new();
    catalog
        .register_handler("health", HttpHandler::new(health))
        .register_handler("hello", HttpHandler::new(hello))
        .register_handler("echo", HttpHandler::new(echo))
        .register_handler("version", HttpHandler::new(version))
        .register_middleware("trace", trace_requests())
        .register_middleware("request-id", request_id())
        .register_middleware("recover", recover());
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::Request;

    fn call(name: &str, req: HttpRequest) -> ResponseWriter {
        let catalog = builtin_catalog();
        let mut w = ResponseWriter::new();
        catalog
            .handler(name)
            .unwrap()
            .call(&RequestContext::new("t"), &mut w, &req);
        w
    }

    #[test]
    fn test_catalog_names() {
        let catalog = builtin_catalog();
        for name in ["health", "hello", "echo", "version"] {
            assert!(catalog.handler(name).is_some(), "{name}");
        }
        for name in ["trace", "request-id", "recover"] {
            assert!(catalog.middleware(name).is_some(), "{name}");
        }
    }

    #[test]
    fn test_health() {
        let w = call("health", Request::new(Bytes::new()));
        assert_eq!(w.body(), br#"{"status":"ok"}"#);
    }

    #[test]
    fn test_echo_copies_body_and_type() {
        let req = Request::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Bytes::from_static(b"{\"a\":1}"))
            .unwrap();
        let w = call("echo", req);
        assert_eq!(w.body(), b"{\"a\":1}");
        assert_eq!(w.headers()[CONTENT_TYPE], "application/json");
    }
}
