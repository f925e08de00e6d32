use http::Method;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use super::{DuplicateRoutePolicy, RouterError, RouterOptions, RouterResult};
use crate::files::FileServer;
use crate::middleware::{BoxHandler, Handler, Middleware, MiddlewareChain};
use crate::pattern::{Segment, render, split_pattern};
use crate::readonly::RouterReadOnly;
use crate::route::Route;
use crate::tree::{Forest, Node, RegexCache, TreeError, traversal};

/// Build-phase router.
///
/// Every registration, middleware application and mount happens here, on a
/// single thread, before [`Router::seal`] turns the route set into a
/// [`RouterReadOnly`] that serves requests. A sealed router cannot be
/// changed, so topology edits can never race with dispatch.
pub struct Router {
    forest: Forest,
    middleware: MiddlewareChain,
    options: RouterOptions,
    regexes: RegexCache,
    file_server: Option<FileServer>,
    not_found: Option<BoxHandler>,
    not_allowed: Option<BoxHandler>,
}

impl Router {
    pub fn new(options: Option<RouterOptions>) -> Self {
        Self {
            forest: Forest::default(),
            middleware: MiddlewareChain::default(),
            options: options.unwrap_or_default(),
            regexes: RegexCache::default(),
            file_server: None,
            not_found: None,
            not_allowed: None,
        }
    }

    /// Like [`Router::new`], but rejects invalid options.
    pub fn try_new(options: Option<RouterOptions>) -> RouterResult<Self> {
        let options = options.unwrap_or_default();
        options.validate()?;
        Ok(Self::new(Some(options)))
    }

    /// Creates a router whose routes are all wrapped by `middlewares`.
    pub fn with_middleware<I>(options: Option<RouterOptions>, middlewares: I) -> Self
    where
        I: IntoIterator<Item = Middleware>,
    {
        let mut router = Self::new(options);
        router.middleware = MiddlewareChain::new(middlewares);
        router
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Adds global middleware for routes registered from now on. Routes that
    /// already exist keep their chain; see [`Router::use_middleware`].
    pub fn use_global<I>(&mut self, middlewares: I)
    where
        I: IntoIterator<Item = Middleware>,
    {
        self.middleware.append(middlewares);
    }

    pub fn handle<H: Handler>(&mut self, method: Method, pattern: &str, handler: H) -> RouterResult<()> {
        self.handle_with(method, pattern, handler, std::iter::empty())
    }

    /// Registers `handler` with route-specific middleware that runs inside
    /// the global chain.
    pub fn handle_with<H, I>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
        middlewares: I,
    ) -> RouterResult<()>
    where
        H: Handler,
        I: IntoIterator<Item = Middleware>,
    {
        tracing::event!(tracing::Level::TRACE, operation = "handle", method = %method, pattern = %pattern);

        let segments = split_pattern(pattern)?;
        let depth = segments.iter().filter(|s| s.is_wildcard()).count();
        self.check_depth(pattern, depth)?;

        let handler: BoxHandler = Arc::new(handler);
        let route = Route::new(
            handler,
            self.middleware.merge(&MiddlewareChain::new(middlewares)),
        );

        let policy = self.options.duplicate_routes;
        let node = self
            .forest
            .get_or_insert(&method)
            .add_child(&segments, &mut self.regexes)?;
        attach_route(node, route, policy, &method, || render(&segments))
    }

    pub fn get<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.handle(Method::GET, pattern, handler)
    }

    pub fn post<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.handle(Method::POST, pattern, handler)
    }

    pub fn put<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.handle(Method::PUT, pattern, handler)
    }

    pub fn delete<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.handle(Method::DELETE, pattern, handler)
    }

    pub fn patch<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.handle(Method::PATCH, pattern, handler)
    }

    pub fn options_route<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.handle(Method::OPTIONS, pattern, handler)
    }

    pub fn head<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.handle(Method::HEAD, pattern, handler)
    }

    pub fn connect<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.handle(Method::CONNECT, pattern, handler)
    }

    pub fn trace<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.handle(Method::TRACE, pattern, handler)
    }

    /// Appends `middlewares` to every route at or below `pattern`.
    ///
    /// `method` limits the walk to one method tree; `None` visits all of
    /// them. The pattern is resolved against existing nodes only, so a
    /// pattern that addresses nothing changes nothing. Returns the number of
    /// routes updated.
    pub fn use_middleware<I>(
        &mut self,
        method: Option<&Method>,
        pattern: &str,
        middlewares: I,
    ) -> RouterResult<usize>
    where
        I: IntoIterator<Item = Middleware>,
    {
        let segments = split_pattern(pattern)?;
        let middlewares: Vec<Middleware> = middlewares.into_iter().collect();

        let mut updated = 0usize;
        for (root_method, root) in self.forest.iter_mut() {
            if method.is_some_and(|m| m != root_method) {
                continue;
            }
            if let Some(node) = root.child_mut(&segments) {
                updated += traversal::for_each_route_mut(node, |route| {
                    route.append_middleware(middlewares.iter().cloned())
                });
            }
        }

        tracing::event!(
            tracing::Level::DEBUG,
            operation = "use_middleware",
            method = ?method,
            pattern = %pattern,
            middlewares = middlewares.len() as u64,
            routes = updated as u64
        );
        Ok(updated)
    }

    /// Grafts every route of `sub` below `prefix`.
    ///
    /// This router's global middleware is placed around the mounted routes,
    /// outside the chains they already carry. Parameter slots of mounted
    /// routes count the wildcards of `prefix` first. Every mounted route is
    /// checked before the first one is attached, so a failed mount leaves
    /// this router unchanged.
    pub fn mount(&mut self, prefix: &str, sub: Router) -> RouterResult<()> {
        let prefix_segments = split_pattern(prefix)?;
        let prefix_depth = prefix_segments.iter().filter(|s| s.is_wildcard()).count();
        let policy = self.options.duplicate_routes;

        let mut grafts = Vec::new();
        for (method, mut sub_root) in sub.forest.into_roots() {
            traversal::for_each_route_mut(&mut sub_root, |route| {
                route.prepend_middleware(&self.middleware)
            });
            self.check_depth(prefix, prefix_depth + traversal::max_param_slots(&sub_root))?;

            let routes: Vec<(Vec<Segment>, Route)> = traversal::drain_routes(sub_root)
                .into_iter()
                .map(|(segments, route)| (joined(&prefix_segments, &segments), route))
                .collect();
            grafts.push((method, routes));
        }

        for (method, routes) in &grafts {
            let scratch;
            let root = match self.forest.get(method) {
                Some(root) => root,
                None => {
                    scratch = Node::root(method.as_str());
                    &scratch
                }
            };
            for (segments, _) in routes {
                let reached = root.check_child(segments, &mut self.regexes)?;
                if policy == DuplicateRoutePolicy::Reject
                    && reached.is_some_and(|node| node.route.is_some())
                {
                    return Err(TreeError::DuplicateRoute {
                        method: method.to_string(),
                        path: render(segments),
                    }
                    .into());
                }
            }
        }

        for (method, routes) in grafts {
            let mounted = routes.len();
            let root = self.forest.get_or_insert(&method);
            for (segments, route) in routes {
                let node = root.add_child(&segments, &mut self.regexes)?;
                attach_route(node, route, policy, &method, || render(&segments))?;
            }

            tracing::event!(
                tracing::Level::DEBUG,
                operation = "mount",
                method = %method,
                prefix = %prefix,
                routes = mounted as u64
            );
        }

        Ok(())
    }

    /// Serves files below `root` for `GET` requests that match no route.
    pub fn serve_files(&mut self, root: impl AsRef<Path>, strip: bool) -> RouterResult<()> {
        let root = root.as_ref();
        if root.as_os_str().is_empty() {
            return Err(RouterError::EmptyFileRoot);
        }
        self.file_server = Some(FileServer::new(root, strip));
        Ok(())
    }

    pub fn not_found<H: Handler>(&mut self, handler: H) {
        self.not_found = Some(Arc::new(handler));
    }

    pub fn not_allowed<H: Handler>(&mut self, handler: H) {
        self.not_allowed = Some(Arc::new(handler));
    }

    /// Reports whether `pattern` reaches a route in the `method` tree.
    ///
    /// Literal tokens match the way request segments do, so `/users/7`
    /// finds a route registered as `/users/{id}`. The path is taken as
    /// written; no percent-decoding happens here.
    pub fn contains(&self, method: &Method, pattern: &str) -> RouterResult<bool> {
        let segments = split_pattern(pattern)?;
        Ok(self
            .forest
            .get(method)
            .and_then(|root| root.child(&segments))
            .is_some_and(|(node, _)| node.route.is_some()))
    }

    pub fn route_count(&self) -> usize {
        self.forest
            .iter()
            .map(|(_, root)| traversal::count_routes(root))
            .sum()
    }

    /// Ends the build phase.
    pub fn seal(self) -> RouterReadOnly {
        tracing::event!(
            tracing::Level::DEBUG,
            operation = "seal",
            routes = self.route_count() as u64,
            regexes = self.regexes.len() as u64,
            file_server = self.file_server.is_some()
        );

        RouterReadOnly::from_parts(
            self.forest,
            self.options,
            self.file_server,
            self.not_found,
            self.not_allowed,
        )
    }

    fn check_depth(&self, pattern: &str, depth: usize) -> RouterResult<()> {
        let limit = self.options.max_param_depth;
        if depth > limit {
            return Err(TreeError::ParamDepthExceeded {
                path: pattern.to_string(),
                depth,
                limit,
            }
            .into());
        }
        Ok(())
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(None)
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("forest", &self.forest)
            .field("middleware", &self.middleware)
            .field("options", &self.options)
            .field("file_server", &self.file_server)
            .field("not_found", &self.not_found.is_some())
            .field("not_allowed", &self.not_allowed.is_some())
            .finish()
    }
}

fn attach_route(
    node: &mut Node,
    route: Route,
    policy: DuplicateRoutePolicy,
    method: &Method,
    path: impl FnOnce() -> String,
) -> RouterResult<()> {
    if node.route.is_some() {
        match policy {
            DuplicateRoutePolicy::Reject => {
                return Err(TreeError::DuplicateRoute {
                    method: method.to_string(),
                    path: path(),
                }
                .into());
            }
            DuplicateRoutePolicy::Replace => {
                tracing::event!(tracing::Level::DEBUG, operation = "replace_route", method = %method);
            }
        }
    }
    node.route = Some(route);
    Ok(())
}

fn joined(prefix: &[Segment], rest: &[Segment]) -> Vec<Segment> {
    let mut all = Vec::with_capacity(prefix.len() + rest.len());
    all.extend_from_slice(prefix);
    all.extend_from_slice(rest);
    all
}
