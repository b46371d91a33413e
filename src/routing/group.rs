//! Route groups and the router that owns them.
//!
//! # Responsibilities
//! - Keep the group tree (arena of nodes, each with a parent index)
//! - Inherit prefixes at group creation and middleware at registration
//! - Reject missing handlers, malformed paths and duplicates tree-wide
//!
//! # Design Decisions
//! - One `Rc<RefCell<Registry>>` per tree; every `Group` handle points into it
//! - Composition is eager: middleware added later never reaches routes that
//!   are already registered
//! - Validate before commit: a rejected call changes nothing

use axum::http::Method;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::error::RouteError;
use crate::routing::handler::{self, HandlerFunc, Middleware};
use crate::routing::path;
use crate::routing::table::{RouteEntry, RouteTable};

/// Index of a group in its router's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(usize);

impl GroupId {
    pub const ROOT: GroupId = GroupId(0);
}

struct GroupNode<C, W, R> {
    prefix: String,
    parent: Option<GroupId>,
    middleware: Vec<Middleware<C, W, R>>,
}

struct Registry<C, W, R> {
    groups: Vec<GroupNode<C, W, R>>,
    /// Absolute prefixes of every non-root group.
    prefixes: HashSet<String>,
    routes: HashSet<(Method, String)>,
    entries: Vec<RouteEntry<C, W, R>>,
}

impl<C, W, R> Registry<C, W, R> {
    fn node(&self, id: GroupId) -> &GroupNode<C, W, R> {
        &self.groups[id.0]
    }

    /// Middleware that applies to routes of `id`, outermost first.
    fn chain(&self, id: GroupId) -> Vec<Middleware<C, W, R>> {
        let mut lineage = Vec::new();
        let mut current = Some(id);
        while let Some(g) = current {
            lineage.push(g);
            current = self.node(g).parent;
        }

        lineage
            .iter()
            .rev()
            .flat_map(|&g| self.node(g).middleware.iter().cloned())
            .collect()
    }
}

fn reject(err: RouteError) -> RouteError {
    tracing::warn!(error = %err, "Route registration rejected");
    err
}

/// A prefix scope in the route tree.
pub struct Group<C, W, R> {
    id: GroupId,
    registry: Rc<RefCell<Registry<C, W, R>>>,
}

impl<C, W, R> Group<C, W, R> {
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Absolute prefix; empty for the root.
    pub fn prefix(&self) -> String {
        self.registry.borrow().node(self.id).prefix.clone()
    }

    /// Creates a child group whose prefix is this group's prefix joined with
    /// `prefix`.
    pub fn group(&self, prefix: &str) -> Result<Group<C, W, R>, RouteError> {
        if !path::is_valid_relative(prefix) {
            return Err(reject(RouteError::InvalidPath {
                path: prefix.to_string(),
            }));
        }

        let mut registry = self.registry.borrow_mut();
        let absolute = path::join(&registry.node(self.id).prefix, prefix);
        if registry.prefixes.contains(&absolute) {
            return Err(reject(RouteError::DuplicateGroup { prefix: absolute }));
        }

        let id = GroupId(registry.groups.len());
        tracing::debug!(prefix = %absolute, parent = self.id.0, "Group created");
        registry.prefixes.insert(absolute.clone());
        registry.groups.push(GroupNode {
            prefix: absolute,
            parent: Some(self.id),
            middleware: Vec::new(),
        });

        Ok(Group {
            id,
            registry: Rc::clone(&self.registry),
        })
    }

    /// Appends `mw` to this group's middleware. Applies to routes registered
    /// afterwards through this group or any of its descendants.
    pub fn middleware(&self, mw: Middleware<C, W, R>) -> &Self {
        self.registry.borrow_mut().groups[self.id.0].middleware.push(mw);
        self
    }

    /// Registers a route. `path` is relative to this group and must be empty
    /// (the group's own prefix) or start with '/'.
    pub fn handle(
        &self,
        method: Method,
        path: &str,
        handler: impl Into<Option<HandlerFunc<C, W, R>>>,
    ) -> Result<&Self, RouteError> {
        if !path::is_valid_relative(path) {
            return Err(reject(RouteError::InvalidPath {
                path: path.to_string(),
            }));
        }

        let absolute = path::route_path(&self.registry.borrow().node(self.id).prefix, path);

        let handler: Option<HandlerFunc<C, W, R>> = handler.into();
        let Some(handler) = handler else {
            return Err(reject(RouteError::MissingHandler {
                method,
                path: absolute,
            }));
        };

        let chain = {
            let registry = self.registry.borrow();
            if registry.routes.contains(&(method.clone(), absolute.clone())) {
                return Err(reject(RouteError::DuplicateRoute {
                    method,
                    path: absolute,
                }));
            }
            registry.chain(self.id)
        };

        // No borrow held: `wrap` may run arbitrary code.
        let composed = handler::compose(&chain, handler);

        let mut registry = self.registry.borrow_mut();
        registry.routes.insert((method.clone(), absolute.clone()));

        tracing::debug!(
            method = %method,
            path = %absolute,
            middleware = chain.len(),
            "Route registered"
        );
        registry
            .entries
            .push(RouteEntry::new(method, absolute, composed));
        Ok(self)
    }

    /// Register a handler for GET requests
    pub fn get(
        &self,
        path: &str,
        handler: impl Into<Option<HandlerFunc<C, W, R>>>,
    ) -> Result<&Self, RouteError> {
        self.handle(Method::GET, path, handler)
    }

    /// Register a handler for POST requests
    pub fn post(
        &self,
        path: &str,
        handler: impl Into<Option<HandlerFunc<C, W, R>>>,
    ) -> Result<&Self, RouteError> {
        self.handle(Method::POST, path, handler)
    }

    /// Register a handler for PUT requests
    pub fn put(
        &self,
        path: &str,
        handler: impl Into<Option<HandlerFunc<C, W, R>>>,
    ) -> Result<&Self, RouteError> {
        self.handle(Method::PUT, path, handler)
    }

    /// Register a handler for DELETE requests
    pub fn delete(
        &self,
        path: &str,
        handler: impl Into<Option<HandlerFunc<C, W, R>>>,
    ) -> Result<&Self, RouteError> {
        self.handle(Method::DELETE, path, handler)
    }

    /// Register a handler for PATCH requests
    pub fn patch(
        &self,
        path: &str,
        handler: impl Into<Option<HandlerFunc<C, W, R>>>,
    ) -> Result<&Self, RouteError> {
        self.handle(Method::PATCH, path, handler)
    }

    /// Register a handler for HEAD requests
    pub fn head(
        &self,
        path: &str,
        handler: impl Into<Option<HandlerFunc<C, W, R>>>,
    ) -> Result<&Self, RouteError> {
        self.handle(Method::HEAD, path, handler)
    }

    /// Register a handler for OPTIONS requests
    pub fn options(
        &self,
        path: &str,
        handler: impl Into<Option<HandlerFunc<C, W, R>>>,
    ) -> Result<&Self, RouteError> {
        self.handle(Method::OPTIONS, path, handler)
    }
}

impl<C, W, R> Clone for Group<C, W, R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<C, W, R> fmt::Debug for Group<C, W, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("id", &self.id)
            .field("prefix", &self.prefix())
            .finish()
    }
}

/// The root group of a route tree.
///
/// Dereferences to [`Group`], so routes and middleware can be attached to the
/// root directly.
///
/// ```
/// use groupmux::routing::{HandlerFunc, Router};
///
/// # fn main() -> Result<(), groupmux::RouteError> {
/// let router: Router<(), Vec<&'static str>, ()> = Router::new();
/// let api = router.group("/api")?;
/// api.get("/users", HandlerFunc::new(|_, w: &mut Vec<&'static str>, _| w.push("users")))?;
///
/// let table = router.build();
/// assert_eq!(table.entries()[0].path(), "/api/users");
/// # Ok(())
/// # }
/// ```
pub struct Router<C, W, R> {
    root: Group<C, W, R>,
}

impl<C, W, R> Router<C, W, R> {
    pub fn new() -> Self {
        let registry = Registry {
            groups: vec![GroupNode {
                prefix: String::new(),
                parent: None,
                middleware: Vec::new(),
            }],
            prefixes: HashSet::new(),
            routes: HashSet::new(),
            entries: Vec::new(),
        };

        Self {
            root: Group {
                id: GroupId::ROOT,
                registry: Rc::new(RefCell::new(registry)),
            },
        }
    }

    /// Number of routes registered so far.
    pub fn len(&self) -> usize {
        self.root.registry.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The i-th registered route.
    pub fn entry(&self, i: usize) -> Option<RouteEntry<C, W, R>> {
        self.root.registry.borrow().entries.get(i).cloned()
    }

    /// Snapshot of every registered route, in registration order.
    pub fn entries(&self) -> Vec<RouteEntry<C, W, R>> {
        self.root.registry.borrow().entries.clone()
    }

    /// Freezes the routes registered so far into a dispatch table.
    pub fn build(&self) -> RouteTable<C, W, R> {
        let table = RouteTable::new(self.entries());
        tracing::info!(routes = table.len(), "Route table built");
        table
    }
}

impl<C, W, R> Default for Router<C, W, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, W, R> Deref for Router<C, W, R> {
    type Target = Group<C, W, R>;

    fn deref(&self) -> &Self::Target {
        &self.root
    }
}

impl<C, W, R> fmt::Debug for Router<C, W, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.root.registry.borrow();
        f.debug_struct("Router")
            .field("groups", &registry.groups.len())
            .field("routes", &registry.entries)
            .finish()
    }
}
