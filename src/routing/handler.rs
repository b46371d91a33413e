//! Handler and middleware values.
//!
//! # Design Decisions
//! - Handlers are `Arc`'d closures: cloning one is a refcount bump
//! - Middleware is a plain decorator, `HandlerFunc -> HandlerFunc`
//! - The context, response and request carriers (`C`, `W`, `R`) are opaque
//!   here; the HTTP layer picks concrete types

use std::fmt;
use std::sync::Arc;

/// A shareable request handler.
pub struct HandlerFunc<C, W, R> {
    inner: Arc<dyn Fn(&C, &mut W, &R) + Send + Sync>,
}

impl<C, W, R> HandlerFunc<C, W, R> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&C, &mut W, &R) + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Invokes the handler.
    #[inline]
    pub fn call(&self, cx: &C, w: &mut W, req: &R) {
        (self.inner)(cx, w, req)
    }
}

impl<C, W, R> Clone for HandlerFunc<C, W, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C, W, R> fmt::Debug for HandlerFunc<C, W, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFunc").finish_non_exhaustive()
    }
}

/// A handler decorator: takes the next handler, returns a wrapped one.
pub struct Middleware<C, W, R> {
    inner: Arc<dyn Fn(HandlerFunc<C, W, R>) -> HandlerFunc<C, W, R> + Send + Sync>,
}

impl<C, W, R> Middleware<C, W, R> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(HandlerFunc<C, W, R>) -> HandlerFunc<C, W, R> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Wraps `next` in this middleware.
    pub fn wrap(&self, next: HandlerFunc<C, W, R>) -> HandlerFunc<C, W, R> {
        (self.inner)(next)
    }
}

impl<C: 'static, W: 'static, R: 'static> Middleware<C, W, R> {
    /// Builds a middleware from an "around" function that receives the next
    /// handler and decides whether and when to call it.
    ///
    /// ```
    /// use groupmux::routing::{HandlerFunc, Middleware};
    ///
    /// let around = Middleware::<(), Vec<u32>, ()>::from_fn(|cx, w: &mut Vec<u32>, req, next| {
    ///     w.push(1);
    ///     next.call(cx, w, req);
    ///     w.push(3);
    /// });
    ///
    /// let handler = around.wrap(HandlerFunc::new(|_, w: &mut Vec<u32>, _| w.push(2)));
    /// let mut out = Vec::new();
    /// handler.call(&(), &mut out, &());
    /// assert_eq!(out, [1, 2, 3]);
    /// ```
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&C, &mut W, &R, &HandlerFunc<C, W, R>) + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Self::new(move |next| {
            let f = Arc::clone(&f);
            HandlerFunc::new(move |cx, w, req| (*f)(cx, w, req, &next))
        })
    }
}

impl<C, W, R> Clone for Middleware<C, W, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C, W, R> fmt::Debug for Middleware<C, W, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").finish_non_exhaustive()
    }
}

/// Wraps `handler` in `chain` so that `chain[0]` runs first at call time.
pub fn compose<C, W, R>(
    chain: &[Middleware<C, W, R>],
    handler: HandlerFunc<C, W, R>,
) -> HandlerFunc<C, W, R> {
    chain.iter().rev().fold(handler, |next, mw| mw.wrap(next))
}
