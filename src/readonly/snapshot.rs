use http::Method;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::fmt;

use crate::files::FileServer;
use crate::middleware::BoxHandler;
use crate::params::Params;
use crate::router::{RouterError, RouterOptions, RouterResult};
use crate::tree::Forest;

/// A matched route: its composed handler chain and the captured params.
#[derive(Clone)]
pub struct RouteMatch {
    pub handler: BoxHandler,
    pub params: Params,
}

impl fmt::Debug for RouteMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Outcome of resolving a request line against a sealed router.
#[derive(Debug)]
pub enum Resolution {
    Found(RouteMatch),
    /// Unmatched `OPTIONS` request answered from the other method trees.
    Options { allow: String },
    /// Unmatched `GET` request handed to the file server.
    StaticFile,
    NotAllowed { allow: String },
    NotFound,
}

/// Serving-phase router produced by [`crate::Router::seal`].
///
/// Holds no interior mutability apart from the per-route composition cache,
/// so a single instance can be shared across threads behind an `Arc`.
pub struct RouterReadOnly {
    pub(crate) forest: Forest,
    pub(crate) options: RouterOptions,
    pub(crate) file_server: Option<FileServer>,
    pub(crate) not_found: Option<BoxHandler>,
    pub(crate) not_allowed: Option<BoxHandler>,
}

impl RouterReadOnly {
    pub(crate) fn from_parts(
        forest: Forest,
        options: RouterOptions,
        file_server: Option<FileServer>,
        not_found: Option<BoxHandler>,
        not_allowed: Option<BoxHandler>,
    ) -> Self {
        Self {
            forest,
            options,
            file_server,
            not_found,
            not_allowed,
        }
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    pub fn file_server(&self) -> Option<&FileServer> {
        self.file_server.as_ref()
    }

    /// Methods with at least one tree, in registration order.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.forest.iter().map(|(method, _)| method)
    }

    /// Looks up the route for `method path`. The path is percent-decoded
    /// before matching, so captured params hold decoded text.
    pub fn find(&self, method: &Method, path: &str) -> RouterResult<RouteMatch> {
        self.lookup(method, &decode_path(path))
            .ok_or_else(|| RouterError::RouteNotFound {
                method: method.clone(),
                path: path.to_string(),
            })
    }

    /// Decides what a request for `method path` would get, without running
    /// any handler.
    pub fn resolve(&self, method: &Method, path: &str) -> Resolution {
        let path = decode_path(path);
        let path: &str = &path;
        if let Some(found) = self.lookup(method, path) {
            return Resolution::Found(found);
        }

        if *method == Method::OPTIONS && self.options.handle_options {
            return match self.allowed_decoded(method, path) {
                Some(allow) => Resolution::Options { allow },
                None => Resolution::NotFound,
            };
        }

        if *method == Method::GET && self.file_server.is_some() {
            return Resolution::StaticFile;
        }

        if self.options.handle_method_not_allowed {
            if let Some(allow) = self.allowed_decoded(method, path) {
                return Resolution::NotAllowed { allow };
            }
        }

        Resolution::NotFound
    }

    /// Expects an already decoded path.
    fn lookup(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let root = self.forest.get(method)?;
        let (node, params) = root.child_by_path(path)?;
        let route = node.route.as_ref()?;

        tracing::event!(
            tracing::Level::TRACE,
            operation = "lookup",
            method = %method,
            path = %path,
            node = %node.id,
            params = params.len() as u64
        );

        Some(RouteMatch {
            handler: route.chain(),
            params,
        })
    }
}

/// Decodes `%XX` escapes in a request path. Invalid UTF-8 is replaced
/// rather than rejected.
pub(crate) fn decode_path(path: &str) -> Cow<'_, str> {
    percent_decode_str(path).decode_utf8_lossy()
}

impl fmt::Debug for RouterReadOnly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterReadOnly")
            .field("forest", &self.forest)
            .field("options", &self.options)
            .field("file_server", &self.file_server)
            .field("not_found", &self.not_found.is_some())
            .field("not_allowed", &self.not_allowed.is_some())
            .finish()
    }
}
