use http::{Request, Response};
use std::fmt;
use std::sync::Arc;

use crate::types::Body;

/// Terminal request handler.
///
/// Implemented for every `Fn(Request<Body>) -> Response<Body>` closure that
/// is `Send + Sync + 'static`.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request<Body>) -> Response<Body>;
}

impl<F> Handler for F
where
    F: Fn(Request<Body>) -> Response<Body> + Send + Sync + 'static,
{
    #[inline]
    fn call(&self, req: Request<Body>) -> Response<Body> {
        self(req)
    }
}

pub type BoxHandler = Arc<dyn Handler>;

/// Wraps a handler into another handler.
#[derive(Clone)]
pub struct Middleware(Arc<dyn Fn(BoxHandler) -> BoxHandler + Send + Sync>);

impl Middleware {
    pub fn new<F>(wrap: F) -> Self
    where
        F: Fn(BoxHandler) -> BoxHandler + Send + Sync + 'static,
    {
        Self(Arc::new(wrap))
    }

    /// Builds a middleware from a closure that receives the request and the
    /// next handler of the chain.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Request<Body>, &dyn Handler) -> Response<Body> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Self::new(move |next: BoxHandler| {
            let f = Arc::clone(&f);
            Arc::new(move |req: Request<Body>| (*f)(req, &*next)) as BoxHandler
        })
    }

    #[inline]
    pub fn wrap(&self, next: BoxHandler) -> BoxHandler {
        (self.0)(next)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Middleware(..)")
    }
}

/// Ordered middleware list. The first entry is the outermost layer.
#[derive(Debug, Clone, Default)]
pub struct MiddlewareChain {
    layers: Vec<Middleware>,
}

impl MiddlewareChain {
    pub fn new<I>(middlewares: I) -> Self
    where
        I: IntoIterator<Item = Middleware>,
    {
        Self {
            layers: middlewares.into_iter().collect(),
        }
    }

    /// Adds layers inside the existing ones.
    pub fn append<I>(&mut self, middlewares: I)
    where
        I: IntoIterator<Item = Middleware>,
    {
        self.layers.extend(middlewares);
    }

    /// Adds the layers of `outer` around the existing ones.
    pub fn prepend(&mut self, outer: &MiddlewareChain) {
        if outer.is_empty() {
            return;
        }
        let mut layers = Vec::with_capacity(outer.len() + self.len());
        layers.extend(outer.layers.iter().cloned());
        layers.append(&mut self.layers);
        self.layers = layers;
    }

    pub fn merge(&self, inner: &MiddlewareChain) -> MiddlewareChain {
        let mut layers = Vec::with_capacity(self.len() + inner.len());
        layers.extend(self.layers.iter().cloned());
        layers.extend(inner.layers.iter().cloned());
        Self { layers }
    }

    /// Composes the chain over `handler`, innermost layer first.
    pub fn handle(&self, handler: BoxHandler) -> BoxHandler {
        self.layers
            .iter()
            .rev()
            .fold(handler, |next, layer| layer.wrap(next))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl FromIterator<Middleware> for MiddlewareChain {
    fn from_iter<I: IntoIterator<Item = Middleware>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Middleware> for MiddlewareChain {
    fn from(middleware: Middleware) -> Self {
        Self {
            layers: vec![middleware],
        }
    }
}
