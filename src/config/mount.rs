//! Turns a declarative [`GroupConfig`] tree into a live [`Router`].
//!
//! Handlers and middleware are referenced by name and resolved against a
//! [`Catalog`]. Groups are created, middleware applied and routes registered
//! in document order, so the resulting router is exactly what the equivalent
//! sequence of builder calls would produce.

use std::collections::HashMap;
use std::fmt;

use crate::config::schema::GroupConfig;
use crate::config::validation::parse_method;
use crate::error::RouteError;
use crate::routing::{Group, HandlerFunc, Middleware, Router};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MountError {
    #[error("unknown middleware '{name}'")]
    UnknownMiddleware { name: String },

    #[error("invalid method '{method}'")]
    InvalidMethod { method: String },

    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Named handlers and middleware.
pub struct Catalog<C, W, R> {
    handlers: HashMap<String, HandlerFunc<C, W, R>>,
    middleware: HashMap<String, Middleware<C, W, R>>,
}

impl<C, W, R> Catalog<C, W, R> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            middleware: HashMap::new(),
        }
    }

    /// Registers `handler` under `name`, replacing any previous one.
    pub fn register_handler(
        &mut self,
        name: impl Into<String>,
        handler: HandlerFunc<C, W, R>,
    ) -> &mut Self {
        self.handlers.insert(name.into(), handler);
        self
    }

    /// Registers `mw` under `name`, replacing any previous one.
    pub fn register_middleware(
        &mut self,
        name: impl Into<String>,
        mw: Middleware<C, W, R>,
    ) -> &mut Self {
        self.middleware.insert(name.into(), mw);
        self
    }

    pub fn handler(&self, name: &str) -> Option<HandlerFunc<C, W, R>> {
        self.handlers.get(name).cloned()
    }

    pub fn middleware(&self, name: &str) -> Option<Middleware<C, W, R>> {
        self.middleware.get(name).cloned()
    }
}

impl<C, W, R> Default for Catalog<C, W, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, W, R> fmt::Debug for Catalog<C, W, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut handlers: Vec<_> = self.handlers.keys().collect();
        let mut middleware: Vec<_> = self.middleware.keys().collect();
        handlers.sort();
        middleware.sort();
        f.debug_struct("Catalog")
            .field("handlers", &handlers)
            .field("middleware", &middleware)
            .finish()
    }
}

/// Builds a router from `root`. The root's own `prefix` is ignored.
///
/// A route naming a handler the catalog does not have is registered without
/// one, so it fails as [`RouteError::MissingHandler`].
pub fn mount<C, W, R>(
    root: &GroupConfig,
    catalog: &Catalog<C, W, R>,
) -> Result<Router<C, W, R>, MountError> {
    let router = Router::new();
    populate(&*router, root, catalog)?;
    Ok(router)
}

fn populate<C, W, R>(
    group: &Group<C, W, R>,
    config: &GroupConfig,
    catalog: &Catalog<C, W, R>,
) -> Result<(), MountError> {
    for name in &config.middleware {
        let mw = catalog
            .middleware(name)
            .ok_or_else(|| MountError::UnknownMiddleware { name: name.clone() })?;
        group.middleware(mw);
    }

    for route in &config.routes {
        let method = parse_method(&route.method).ok_or_else(|| MountError::InvalidMethod {
            method: route.method.clone(),
        })?;
        let handler = catalog.handler(&route.handler);
        if handler.is_none() {
            tracing::warn!(handler = %route.handler, "Handler not found in catalog");
        }
        group.handle(method, &route.path, handler)?;
    }

    for child in &config.groups {
        let sub = group.group(&child.prefix)?;
        populate(&sub, child, catalog)?;
    }

    Ok(())
}
