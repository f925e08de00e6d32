use regex::Regex;
use std::sync::Arc;

use super::Tree;
use crate::pattern::Segment;
use crate::route::Route;

#[derive(Debug)]
pub(crate) enum NodeKind {
    Static,
    Wildcard,
    Regex { raw: Box<str>, regex: Regex },
}

/// One path segment of a method tree.
#[derive(Debug)]
pub(crate) struct Node {
    /// Literal text for static nodes, parameter name for wildcards.
    pub(crate) id: Arc<str>,
    pub(crate) kind: NodeKind,
    /// Wildcard ancestors from the method root down to this node, inclusive.
    pub(crate) param_slots: usize,
    pub(crate) children: Tree,
    pub(crate) route: Option<Route>,
}

impl Node {
    pub(crate) fn root(id: &str) -> Self {
        Self::with_kind(id, NodeKind::Static, 0)
    }

    pub(crate) fn with_kind(id: &str, kind: NodeKind, param_slots: usize) -> Self {
        Self {
            id: Arc::from(id),
            kind,
            param_slots,
            children: Tree::default(),
            route: None,
        }
    }

    #[inline]
    pub(crate) fn is_wildcard(&self) -> bool {
        !matches!(self.kind, NodeKind::Static)
    }

    pub(crate) fn regex_source(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Regex { raw, .. } => Some(&**raw),
            _ => None,
        }
    }

    /// Rebuilds the pattern token this node was created from.
    pub(crate) fn segment(&self) -> Segment {
        match &self.kind {
            NodeKind::Static => Segment::literal(&*self.id),
            NodeKind::Wildcard => Segment::wildcard(&*self.id),
            NodeKind::Regex { raw, .. } => Segment::regex(&*self.id, &**raw),
        }
    }
}
