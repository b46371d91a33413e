//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Declaration (at startup):
//!     Router::new()                 root group, prefix ""
//!     → group.group("/api")         child group, prefix joined once
//!     → group.middleware(mw)        appended to the group's own list
//!     → group.get("/users", h)      path joined, ancestors' middleware
//!                                   collected root → leaf, h wrapped,
//!                                   entry appended
//!
//! Freeze:
//!     router.build()
//!     → RouteTable (immutable, Send + Sync)
//!     → shared via Arc with the dispatcher
//! ```
//!
//! # Design Decisions
//! - Handlers are composed at registration, never per request
//! - Duplicates are detected tree-wide, not per group
//! - Lookup is an exact (method, path) match

pub mod group;
pub mod handler;
pub mod path;
pub mod table;

pub use group::{Group, GroupId, Router};
pub use handler::{compose, HandlerFunc, Middleware};
pub use table::{RouteEntry, RouteTable};
