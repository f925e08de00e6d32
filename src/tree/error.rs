use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("wildcard '{{{requested}}}' conflicts with existing wildcard '{{{existing}}}' at the same position")]
    DuplicateWildcard { existing: String, requested: String },
    #[error("regex wildcard '{requested}' reuses pattern '{pattern}' already bound to '{existing}'")]
    ParamNameConflict {
        pattern: String,
        existing: String,
        requested: String,
    },
    #[error("regex for wildcard '{name}' failed to compile: {error}")]
    RegexInvalid {
        name: String,
        pattern: String,
        error: String,
    },
    #[error("duplicate route for {method} '{path}'")]
    DuplicateRoute { method: String, path: String },
    #[error("route '{path}' binds {depth} parameters; the limit is {limit}")]
    ParamDepthExceeded {
        path: String,
        depth: usize,
        limit: usize,
    },
}

pub type TreeResult<T> = Result<T, TreeError>;
