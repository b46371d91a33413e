//! Frozen route entries and the dispatch table.
//!
//! # Design Decisions
//! - Entries are immutable once created
//! - The table is an exact (method, path) map; no patterns, no prefixes
//! - Entry order is registration order

use axum::http::Method;
use std::collections::HashMap;
use std::fmt;

use crate::routing::handler::HandlerFunc;

/// One leaf route with its fully composed handler.
pub struct RouteEntry<C, W, R> {
    method: Method,
    path: String,
    handler: HandlerFunc<C, W, R>,
}

impl<C, W, R> RouteEntry<C, W, R> {
    pub(crate) fn new(method: Method, path: String, handler: HandlerFunc<C, W, R>) -> Self {
        Self {
            method,
            path,
            handler,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Absolute path, no trailing slash except for the root "/".
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The handler wrapped in every applicable middleware.
    pub fn handler(&self) -> &HandlerFunc<C, W, R> {
        &self.handler
    }

    #[inline]
    pub fn call(&self, cx: &C, w: &mut W, req: &R) {
        self.handler.call(cx, w, req)
    }
}

impl<C, W, R> Clone for RouteEntry<C, W, R> {
    fn clone(&self) -> Self {
        Self {
            method: self.method.clone(),
            path: self.path.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<C, W, R> fmt::Debug for RouteEntry<C, W, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Immutable, dispatch-ready set of routes.
///
/// Built by [`Router::build`](crate::routing::Router::build). Safe to share
/// between request tasks behind an `Arc`.
pub struct RouteTable<C, W, R> {
    entries: Vec<RouteEntry<C, W, R>>,
    index: HashMap<(Method, String), usize>,
}

impl<C, W, R> RouteTable<C, W, R> {
    pub(crate) fn new(entries: Vec<RouteEntry<C, W, R>>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| ((e.method.clone(), e.path.clone()), i))
            .collect();
        Self { entries, index }
    }

    /// Exact lookup. `path` must already be normalized.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<&RouteEntry<C, W, R>> {
        self.index
            .get(&(method.clone(), path.to_string()))
            .map(|&i| &self.entries[i])
    }

    /// Entries in registration order.
    pub fn entries(&self) -> &[RouteEntry<C, W, R>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C, W, R> fmt::Debug for RouteTable<C, W, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.entries).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(method: Method, path: &str, tag: u32) -> RouteEntry<(), Vec<u32>, ()> {
        RouteEntry::new(
            method,
            path.to_string(),
            HandlerFunc::new(move |_, w: &mut Vec<u32>, _| w.push(tag)),
        )
    }

    #[test]
    fn test_lookup_matches_method_and_path() {
        let table = RouteTable::new(vec![
            entry(Method::GET, "/a", 1),
            entry(Method::POST, "/a", 2),
            entry(Method::GET, "/", 3),
        ]);

        let mut out = Vec::new();
        table.lookup(&Method::POST, "/a").unwrap().call(&(), &mut out, &());
        table.lookup(&Method::GET, "/").unwrap().call(&(), &mut out, &());
        assert_eq!(out, vec![2, 3]);

        assert!(table.lookup(&Method::PUT, "/a").is_none());
        assert!(table.lookup(&Method::GET, "/b").is_none());
    }

    #[test]
    fn test_entries_keep_registration_order() {
        let table = RouteTable::new(vec![entry(Method::GET, "/z", 1), entry(Method::GET, "/a", 2)]);
        let paths: Vec<_> = table.entries().iter().map(|e| e.path()).collect();
        assert_eq!(paths, ["/z", "/a"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_empty_table() {
        let table: RouteTable<(), Vec<u32>, ()> = RouteTable::new(Vec::new());
        assert!(table.is_empty());
        assert!(table.lookup(&Method::GET, "/").is_none());
    }
}
