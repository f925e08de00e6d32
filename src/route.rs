use std::fmt;
use std::sync::OnceLock;

use crate::middleware::{BoxHandler, Middleware, MiddlewareChain};

/// Terminal handler of a tree node plus the middleware wrapped around it.
///
/// The chain may grow at both ends while the router is being built. The
/// composed handler is produced on the first match and reused afterwards;
/// that only happens on a sealed router, whose routes no longer change.
pub(crate) struct Route {
    handler: BoxHandler,
    middleware: MiddlewareChain,
    composed: OnceLock<BoxHandler>,
}

impl Route {
    pub(crate) fn new(handler: BoxHandler, middleware: MiddlewareChain) -> Self {
        Self {
            handler,
            middleware,
            composed: OnceLock::new(),
        }
    }

    pub(crate) fn prepend_middleware(&mut self, outer: &MiddlewareChain) {
        self.middleware.prepend(outer);
        self.composed = OnceLock::new();
    }

    pub(crate) fn append_middleware<I>(&mut self, middlewares: I)
    where
        I: IntoIterator<Item = Middleware>,
    {
        self.middleware.append(middlewares);
        self.composed = OnceLock::new();
    }

    pub(crate) fn chain(&self) -> BoxHandler {
        self.composed
            .get_or_init(|| self.middleware.handle(self.handler.clone()))
            .clone()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("middleware", &self.middleware.len())
            .field("composed", &self.composed.get().is_some())
            .finish()
    }
}
