mod errors;
mod options;
mod service;

pub use errors::{RouterError, RouterResult};
pub use options::{
    DuplicateRoutePolicy, RouterOptions, RouterOptionsBuilder, RouterOptionsError,
};
pub use service::Router;
