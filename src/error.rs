//! Error types.
//!
//! # Responsibilities
//! - Report route-tree misconfiguration at registration time
//! - Carry REST-style errors (code + message) to HTTP clients
//!
//! # Design Decisions
//! - Registration errors are returned, never raised as panics
//! - A rejected registration leaves the tree untouched

use axum::http::Method;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors raised while declaring the route tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// A route was registered without a handler.
    #[error("missing handler for {method} {path}")]
    MissingHandler { method: Method, path: String },

    /// A non-empty relative path or prefix did not start with '/'.
    #[error("path must begin with '/' in path '{path}'")]
    InvalidPath { path: String },

    /// The (method, path) pair is already claimed somewhere in the tree.
    #[error("duplicate route {method} {path}")]
    DuplicateRoute { method: Method, path: String },

    /// Another group already owns this absolute prefix.
    #[error("duplicate group prefix '{prefix}'")]
    DuplicateGroup { prefix: String },
}

/// Code of a [`RestError`] that carries a bare message.
pub const NON_REST_ERROR: i32 = 0;

/// Error record returned to REST clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestError {
    #[serde(rename = "errcode")]
    pub code: i32,
    #[serde(rename = "errmsg")]
    pub message: String,
}

impl RestError {
    /// A categorized error.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// An uncategorized error; displays as the bare message.
    pub fn plain(message: impl Into<String>) -> Self {
        Self::new(NON_REST_ERROR, message)
    }

    pub fn is_categorized(&self) -> bool {
        self.code != NON_REST_ERROR
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_categorized() {
            write!(f, "REST error {} {}", self.code, self.message)
        } else {
            f.write_str(&self.message)
        }
    }
}

impl std::error::Error for RestError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rest_error_is_verbatim() {
        let err = RestError::plain("something broke");
        assert!(!err.is_categorized());
        assert_eq!(err.to_string(), "something broke");
    }

    #[test]
    fn test_categorized_rest_error_includes_code() {
        let err = RestError::new(40401, "no such device");
        assert_eq!(err.to_string(), "REST error 40401 no such device");
    }

    #[test]
    fn test_rest_error_wire_names() {
        let json = serde_json::to_value(RestError::new(7, "bad")).unwrap();
        assert_eq!(json, serde_json::json!({ "errcode": 7, "errmsg": "bad" }));

        let back: RestError = serde_json::from_str(r#"{"errcode":0,"errmsg":"x"}"#).unwrap();
        assert_eq!(back, RestError::plain("x"));
    }

    #[test]
    fn test_route_error_messages() {
        let err = RouteError::InvalidPath { path: "t7".into() };
        assert_eq!(err.to_string(), "path must begin with '/' in path 't7'");

        let err = RouteError::DuplicateRoute {
            method: Method::DELETE,
            path: "/g1/t4".into(),
        };
        assert_eq!(err.to_string(), "duplicate route DELETE /g1/t4");
    }
}
