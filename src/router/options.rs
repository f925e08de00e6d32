use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_PARAM_DEPTH: usize = 16;

/// What happens when a route is registered twice for the same method and
/// pattern, directly or through a mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DuplicateRoutePolicy {
    #[default]
    Reject,
    Replace,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouterOptions {
    /// Answer unmatched `OPTIONS` requests with an `Allow` header.
    pub handle_options: bool,
    /// Answer requests that match another method's route with 405.
    pub handle_method_not_allowed: bool,
    pub duplicate_routes: DuplicateRoutePolicy,
    pub max_param_depth: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            handle_options: true,
            handle_method_not_allowed: true,
            duplicate_routes: DuplicateRoutePolicy::default(),
            max_param_depth: DEFAULT_MAX_PARAM_DEPTH,
        }
    }
}

impl RouterOptions {
    pub fn builder() -> RouterOptionsBuilder {
        RouterOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), RouterOptionsError> {
        if self.max_param_depth == 0 {
            return Err(RouterOptionsError::MaxParamDepthInvalid { provided: 0 });
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct RouterOptionsBuilder {
    options: RouterOptions,
}

impl RouterOptionsBuilder {
    pub fn handle_options(mut self, value: bool) -> Self {
        self.options.handle_options = value;
        self
    }

    pub fn handle_method_not_allowed(mut self, value: bool) -> Self {
        self.options.handle_method_not_allowed = value;
        self
    }

    pub fn duplicate_routes(mut self, value: DuplicateRoutePolicy) -> Self {
        self.options.duplicate_routes = value;
        self
    }

    pub fn max_param_depth(mut self, value: usize) -> Self {
        self.options.max_param_depth = value;
        self
    }

    pub fn build(self) -> Result<RouterOptions, RouterOptionsError> {
        let options = self.options;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterOptionsError {
    #[error("max_param_depth must be at least 1 (got {provided})")]
    MaxParamDepthInvalid { provided: usize },
}
