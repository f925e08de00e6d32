//! Tree-based HTTP request router.
//!
//! Routes are registered on a [`Router`], one tree per HTTP method, and the
//! router is then sealed into a [`RouterReadOnly`] that matches request
//! paths, runs the composed middleware chain and answers `OPTIONS`, 404 and
//! 405 on its own.

mod files;
mod middleware;
mod params;
mod pattern;
mod readonly;
mod route;
mod router;
mod tree;
mod types;

pub use files::FileServer;
pub use middleware::{BoxHandler, Handler, Middleware, MiddlewareChain};
pub use params::{Param, Params};
pub use pattern::{PatternError, PatternResult, Segment, split_pattern};
pub use readonly::{Resolution, RouteMatch, RouterReadOnly};
pub use router::{
    DuplicateRoutePolicy, Router, RouterError, RouterOptions, RouterOptionsBuilder,
    RouterOptionsError, RouterResult,
};
pub use tree::{TreeError, TreeResult};
pub use types::Body;
