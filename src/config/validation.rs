//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeout > 0, body limit > 0, address parses)
//! - Check route methods, paths and prefixes are well-formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Duplicate routes are left to the router, which sees the joined paths

use axum::http::Method;
use std::net::SocketAddr;

use crate::config::schema::{AppConfig, GroupConfig};
use crate::routing::path;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("{at}: invalid method '{method}'")]
    Method { at: String, method: String },

    #[error("{at}: path must be empty or begin with '/', got '{path}'")]
    Path { at: String, path: String },

    #[error("{at}: handler name is empty")]
    EmptyHandler { at: String },
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.server.bind_address.clone(),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "server.request_timeout_secs",
        });
    }
    if config.server.body_limit_bytes == 0 {
        errors.push(ValidationError::Zero {
            field: "server.body_limit_bytes",
        });
    }

    validate_group(&config.routes, "routes", &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parses an uppercase HTTP method token.
pub fn parse_method(method: &str) -> Option<Method> {
    if method.is_empty() || method.bytes().any(|b| b.is_ascii_lowercase()) {
        return None;
    }
    Method::from_bytes(method.as_bytes()).ok()
}

fn validate_group(group: &GroupConfig, at: &str, errors: &mut Vec<ValidationError>) {
    if !path::is_valid_relative(&group.prefix) {
        errors.push(ValidationError::Path {
            at: at.to_string(),
            path: group.prefix.clone(),
        });
    }

    for (i, route) in group.routes.iter().enumerate() {
        let at = format!("{at}.routes[{i}]");
        if parse_method(&route.method).is_none() {
            errors.push(ValidationError::Method {
                at: at.clone(),
                method: route.method.clone(),
            });
        }
        if !path::is_valid_relative(&route.path) {
            errors.push(ValidationError::Path {
                at: at.clone(),
                path: route.path.clone(),
            });
        }
        if route.handler.trim().is_empty() {
            errors.push(ValidationError::EmptyHandler { at });
        }
    }

    for (i, child) in group.groups.iter().enumerate() {
        validate_group(child, &format!("{at}.groups[{i}]"), errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    fn route(method: &str, path: &str, handler: &str) -> RouteConfig {
        RouteConfig {
            method: method.into(),
            path: path.into(),
            handler: handler.into(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.server.bind_address = "not-an-address".into();
        config.server.request_timeout_secs = 0;
        config.routes.routes.push(route("get", "/a", "hello"));
        config.routes.groups.push(GroupConfig {
            prefix: "v1".into(),
            routes: vec![route("POST", "b", " ")],
            ..Default::default()
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("not-an-address".into()),
                ValidationError::Zero {
                    field: "server.request_timeout_secs"
                },
                ValidationError::Method {
                    at: "routes.routes[0]".into(),
                    method: "get".into()
                },
                ValidationError::Path {
                    at: "routes.groups[0]".into(),
                    path: "v1".into()
                },
                ValidationError::Path {
                    at: "routes.groups[0].routes[0]".into(),
                    path: "b".into()
                },
                ValidationError::EmptyHandler {
                    at: "routes.groups[0].routes[0]".into()
                },
            ]
        );
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("DELETE"), Some(Method::DELETE));
        assert_eq!(parse_method("PURGE").map(|m| m.to_string()), Some("PURGE".into()));
        assert_eq!(parse_method("get"), None);
        assert_eq!(parse_method(""), None);
        assert_eq!(parse_method("GE T"), None);
    }
}
