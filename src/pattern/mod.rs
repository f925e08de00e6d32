mod error;
mod parser;
mod segment;

pub use error::{PatternError, PatternResult};
pub use parser::split_pattern;
pub(crate) use segment::render;
pub use segment::Segment;
