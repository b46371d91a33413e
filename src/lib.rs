//! Route groups with eagerly composed middleware.
//!
//! Declare a tree of groups, each with a path prefix and its own ordered
//! middleware, attach routes anywhere in the tree, then freeze everything
//! into a [`RouteTable`] whose handlers are already wrapped in every
//! applicable middleware, outermost ancestor first.

pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod routing;

pub use error::{RestError, RouteError, NON_REST_ERROR};
pub use routing::{Group, HandlerFunc, Middleware, RouteEntry, RouteTable, Router};
