//! Panic containment.
//!
//! A panicking handler must not take the connection task down with it. The
//! partial response is discarded and replaced by a 500.

use axum::http::StatusCode;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::RestError;
use crate::http::HttpMiddleware;

pub fn recover() -> HttpMiddleware {
    HttpMiddleware::from_fn(|cx, w, req, next| {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| next.call(cx, w, req)));
        if let Err(payload) = outcome {
            tracing::error!(
                request_id = %cx.request_id(),
                method = %req.method(),
                path = %req.uri().path(),
                panic = %panic_message(payload.as_ref()),
                "Handler panicked"
            );
            w.clear();
            w.rest_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &RestError::plain("internal server error"),
            );
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpHandler, RequestContext, ResponseWriter};
    use axum::body::Bytes;
    use axum::http::Request;

    #[test]
    fn test_panic_becomes_500() {
        let handler = recover().wrap(HttpHandler::new(|_, w, _| {
            w.write_str("half-written");
            panic!("boom");
        }));
        let req = Request::builder().body(Bytes::new()).unwrap();
        let mut w = ResponseWriter::new();
        handler.call(&RequestContext::new("r"), &mut w, &req);

        assert_eq!(w.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let err: RestError = serde_json::from_slice(w.body()).unwrap();
        assert_eq!(err, RestError::plain("internal server error"));
    }

    #[test]
    fn test_no_panic_untouched() {
        let handler = recover().wrap(HttpHandler::new(|_, w, _| w.write_str("fine")));
        let req = Request::builder().body(Bytes::new()).unwrap();
        let mut w = ResponseWriter::new();
        handler.call(&RequestContext::new("r"), &mut w, &req);
        assert_eq!(w.body(), b"fine");
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "non-string panic payload");
    }
}
