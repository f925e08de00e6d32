use http::Method;
use thiserror::Error;

use super::RouterOptionsError;
use crate::pattern::PatternError;
use crate::tree::TreeError;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("static file root must not be empty")]
    EmptyFileRoot,
    #[error(transparent)]
    Options(#[from] RouterOptionsError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error("no route matched for method {method} and path '{path}'")]
    RouteNotFound { method: Method, path: String },
}

pub type RouterResult<T> = Result<T, RouterError>;
