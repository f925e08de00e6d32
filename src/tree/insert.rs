use hashbrown::HashMap as FastHashMap;
use regex::Regex;

use super::{Node, NodeKind, TreeError, TreeResult};
use crate::pattern::Segment;

/// Compiled wildcard expressions shared by every node of a router.
///
/// Expressions are anchored, so `{id:[0-9]+}` only accepts segments made
/// entirely of digits.
#[derive(Debug, Default)]
pub(crate) struct RegexCache {
    compiled: FastHashMap<Box<str>, Regex>,
}

impl RegexCache {
    pub(crate) fn compile(&mut self, name: &str, raw: &str) -> TreeResult<Regex> {
        if let Some(existing) = self.compiled.get(raw) {
            return Ok(existing.clone());
        }

        let regex = Regex::new(&format!("^(?:{raw})$")).map_err(|err| TreeError::RegexInvalid {
            name: name.to_string(),
            pattern: raw.to_string(),
            error: err.to_string(),
        })?;
        self.compiled.insert(raw.into(), regex.clone());
        Ok(regex)
    }

    pub(crate) fn len(&self) -> usize {
        self.compiled.len()
    }
}

impl Node {
    fn from_segment(
        segment: &Segment,
        parent_slots: usize,
        regexes: &mut RegexCache,
    ) -> TreeResult<Node> {
        let node = match segment {
            Segment::Literal(text) => Node::with_kind(text, NodeKind::Static, parent_slots),
            Segment::Wildcard {
                name,
                pattern: None,
            } => Node::with_kind(name, NodeKind::Wildcard, parent_slots + 1),
            Segment::Wildcard {
                name,
                pattern: Some(raw),
            } => {
                let regex = regexes.compile(name, raw)?;
                let kind = NodeKind::Regex {
                    raw: raw.as_str().into(),
                    regex,
                };
                Node::with_kind(name, kind, parent_slots + 1)
            }
        };
        Ok(node)
    }

    /// Resolves `segments` below this node, creating missing nodes, and
    /// returns the last one. Inserting the same segments twice yields the
    /// same node.
    ///
    /// Missing nodes are built as a detached chain and attached in one step,
    /// so an error leaves the tree exactly as it was.
    pub(crate) fn add_child(
        &mut self,
        segments: &[Segment],
        regexes: &mut RegexCache,
    ) -> TreeResult<&mut Node> {
        let mut node = self;
        let mut depth = 0usize;
        while let Some(segment) = segments.get(depth) {
            let Some(slot) = node.children.locate(segment) else {
                break;
            };
            node = node.children.get_mut(slot);
            depth += 1;
        }

        let mut fresh = Vec::with_capacity(segments.len() - depth);
        let mut param_slots = node.param_slots;
        for segment in &segments[depth..] {
            let child = Node::from_segment(segment, param_slots, regexes)?;
            tracing::event!(
                tracing::Level::TRACE,
                operation = "add_child",
                segment = %segment,
                param_slots = child.param_slots as u64
            );
            param_slots = child.param_slots;
            fresh.push(child);
        }

        let Some(mut head) = fresh.pop() else {
            return Ok(node);
        };
        let mut descent = Vec::with_capacity(fresh.len());
        while let Some(mut parent) = fresh.pop() {
            descent.push(parent.children.insert(head)?);
            head = parent;
        }

        let slot = node.children.insert(head)?;
        let mut leaf = node.children.get_mut(slot);
        for slot in descent.into_iter().rev() {
            leaf = leaf.children.get_mut(slot);
        }
        Ok(leaf)
    }

    /// Dry run of [`Node::add_child`].
    ///
    /// Returns the error `add_child` would raise for `segments`, or the node
    /// they already reach (`None` when part of the path would be created).
    pub(crate) fn check_child(
        &self,
        segments: &[Segment],
        regexes: &mut RegexCache,
    ) -> TreeResult<Option<&Node>> {
        let mut node = self;
        for (depth, segment) in segments.iter().enumerate() {
            match node.children.locate(segment) {
                Some(slot) => node = node.children.get(slot),
                None => {
                    let child = Node::from_segment(segment, node.param_slots, regexes)?;
                    node.children.admit(&child)?;
                    for rest in &segments[depth + 1..] {
                        if let Segment::Wildcard {
                            name,
                            pattern: Some(raw),
                        } = rest
                        {
                            regexes.compile(name, raw)?;
                        }
                    }
                    return Ok(None);
                }
            }
        }
        Ok(Some(node))
    }
}
