mod allowed;
mod dispatch;
mod snapshot;

pub use snapshot::{Resolution, RouteMatch, RouterReadOnly};
