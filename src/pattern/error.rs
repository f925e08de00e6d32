use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("wildcard at byte {index} in pattern '{pattern}' has an empty name")]
    EmptyWildcardName { pattern: String, index: usize },
    #[error("wildcard '{name}' in pattern '{pattern}' has an empty regular expression")]
    EmptyRegex { pattern: String, name: String },
    #[error("wildcard opened at byte {index} in pattern '{pattern}' is never closed")]
    UnterminatedWildcard { pattern: String, index: usize },
    #[error("unexpected '}}' at byte {index} in pattern '{pattern}'")]
    UnexpectedClosingBrace { pattern: String, index: usize },
}

pub type PatternResult<T> = Result<T, PatternError>;
