use smallvec::SmallVec;

use super::{ChildSlot, Node};
use crate::params::Params;
use crate::pattern::Segment;

type Captures<'n, 'v> = SmallVec<[(&'n Node, &'v str); 4]>;

impl Node {
    /// Resolves pre-split segments below this node.
    ///
    /// Literal tokens select a static child by id, else the first regex
    /// child they satisfy, else the wildcard; wildcard tokens select the
    /// wildcard child they describe. Captured values are the token text,
    /// so a wildcard token captures its own rendering: resolving `{b}`
    /// against a `{b}` child yields `b = "{b}"`.
    pub(crate) fn child(&self, segments: &[Segment]) -> Option<(&Node, Params)> {
        let texts: SmallVec<[String; 4]> = segments
            .iter()
            .filter(|segment| segment.is_wildcard())
            .map(Segment::to_string)
            .collect();
        let mut wildcard_texts = texts.iter();

        let mut node = self;
        let mut captures: Captures<'_, '_> = SmallVec::new();

        for segment in segments {
            let slot = select(node, segment)?;
            let child = node.children.get(slot);
            let text = match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Wildcard { .. } => wildcard_texts.next()?.as_str(),
            };
            if child.is_wildcard() {
                captures.push((child, text));
            }
            node = child;
        }

        Some((node, fill(node, &captures)))
    }

    pub(crate) fn child_mut(&mut self, segments: &[Segment]) -> Option<&mut Node> {
        let mut node = self;
        for segment in segments {
            let slot = select(node, segment)?;
            node = node.children.get_mut(slot);
        }
        Some(node)
    }

    /// Walks the raw request path below this node.
    ///
    /// One leading `/` is skipped before every step. The walk ends when the
    /// path is consumed; the caller decides whether the reached node carries
    /// a route.
    pub(crate) fn child_by_path(&self, path: &str) -> Option<(&Node, Params)> {
        let mut node = self;
        let mut rest = path;
        let mut captures: Captures<'_, '_> = SmallVec::new();

        loop {
            rest = rest.strip_prefix('/').unwrap_or(rest);
            if rest.is_empty() {
                break;
            }

            let (child, part, remaining) = node.children.by_path(rest)?;
            if let Some(part) = part {
                captures.push((child, part));
            }
            node = child;
            rest = remaining;
        }

        Some((node, fill(node, &captures)))
    }
}

fn select(node: &Node, segment: &Segment) -> Option<ChildSlot> {
    match segment {
        Segment::Literal(text) => node.children.by_id(text),
        Segment::Wildcard { .. } => node.children.locate(segment),
    }
}

// Captures arrive root first; each wildcard writes its own slot, so the
// order of assignment does not matter.
fn fill(leaf: &Node, captures: &[(&Node, &str)]) -> Params {
    let mut params = Params::with_slots(leaf.param_slots);
    for (node, value) in captures.iter().rev() {
        params.set(node.param_slots - 1, &node.id, value);
    }
    params
}
