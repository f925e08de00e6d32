use memchr::memchr;

use super::{Node, NodeKind, TreeError, TreeResult};
use crate::pattern::Segment;

/// Position of a child inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChildSlot {
    Static(usize),
    Regex(usize),
    Wildcard,
}

/// Children of a node.
///
/// Static children are kept in descending id order so that a longer id is
/// tried before any of its prefixes (`users` before `user`). Regex children
/// keep registration order; the first match wins. At most one plain
/// wildcard exists and it is tried last.
#[derive(Debug, Default)]
pub(crate) struct Tree {
    statics: Vec<Node>,
    regexps: Vec<Node>,
    wildcard: Option<Box<Node>>,
}

impl Tree {
    pub(crate) fn get(&self, slot: ChildSlot) -> &Node {
        match slot {
            ChildSlot::Static(idx) => &self.statics[idx],
            ChildSlot::Regex(idx) => &self.regexps[idx],
            ChildSlot::Wildcard => self
                .wildcard
                .as_deref()
                .expect("wildcard slot resolved without a wildcard child"),
        }
    }

    pub(crate) fn get_mut(&mut self, slot: ChildSlot) -> &mut Node {
        match slot {
            ChildSlot::Static(idx) => &mut self.statics[idx],
            ChildSlot::Regex(idx) => &mut self.regexps[idx],
            ChildSlot::Wildcard => self
                .wildcard
                .as_deref_mut()
                .expect("wildcard slot resolved without a wildcard child"),
        }
    }

    /// Reports the conflict inserting `node` would raise, without inserting.
    pub(crate) fn admit(&self, node: &Node) -> TreeResult<()> {
        match &node.kind {
            NodeKind::Static => Ok(()),
            NodeKind::Regex { raw, .. } => match self
                .regexps
                .iter()
                .find(|existing| existing.regex_source() == Some(&**raw))
            {
                Some(existing) => Err(TreeError::ParamNameConflict {
                    pattern: raw.to_string(),
                    existing: existing.id.to_string(),
                    requested: node.id.to_string(),
                }),
                None => Ok(()),
            },
            NodeKind::Wildcard => match &self.wildcard {
                Some(existing) => Err(TreeError::DuplicateWildcard {
                    existing: existing.id.to_string(),
                    requested: node.id.to_string(),
                }),
                None => Ok(()),
            },
        }
    }

    /// Adds a child that [`Tree::locate`] did not find.
    pub(crate) fn insert(&mut self, node: Node) -> TreeResult<ChildSlot> {
        self.admit(&node)?;
        match &node.kind {
            NodeKind::Static => {
                let idx = self
                    .statics
                    .iter()
                    .position(|existing| node.id > existing.id)
                    .unwrap_or(self.statics.len());
                self.statics.insert(idx, node);
                Ok(ChildSlot::Static(idx))
            }
            NodeKind::Regex { .. } => {
                self.regexps.push(node);
                Ok(ChildSlot::Regex(self.regexps.len() - 1))
            }
            NodeKind::Wildcard => {
                self.wildcard = Some(Box::new(node));
                Ok(ChildSlot::Wildcard)
            }
        }
    }

    /// Structural lookup: the child that was created from `segment`.
    pub(crate) fn locate(&self, segment: &Segment) -> Option<ChildSlot> {
        match segment {
            Segment::Literal(text) => self.static_position(text).map(ChildSlot::Static),
            Segment::Wildcard {
                name,
                pattern: Some(pattern),
            } => self
                .regexps
                .iter()
                .position(|node| {
                    &*node.id == name.as_str() && node.regex_source() == Some(pattern.as_str())
                })
                .map(ChildSlot::Regex),
            Segment::Wildcard {
                name,
                pattern: None,
            } => self
                .wildcard
                .as_deref()
                .filter(|node| &*node.id == name.as_str())
                .map(|_| ChildSlot::Wildcard),
        }
    }

    /// Matching lookup for one token: static by id, else the first regex the
    /// text satisfies, else the wildcard.
    pub(crate) fn by_id(&self, id: &str) -> Option<ChildSlot> {
        if id.is_empty() {
            return None;
        }
        if let Some(idx) = self.static_position(id) {
            return Some(ChildSlot::Static(idx));
        }
        if let Some(idx) = self.regexps.iter().position(|node| regex_matches(node, id)) {
            return Some(ChildSlot::Regex(idx));
        }
        self.wildcard.as_ref().map(|_| ChildSlot::Wildcard)
    }

    /// Matching lookup against the remaining request path.
    ///
    /// Returns the child, the text a wildcard captured (if any) and the rest
    /// of the path. A static id only has to be a prefix of `path`; the first
    /// one that is wins and siblings are not retried.
    pub(crate) fn by_path<'p>(&self, path: &'p str) -> Option<(&Node, Option<&'p str>, &'p str)> {
        if path.is_empty() {
            return None;
        }

        if let Some(node) = self
            .statics
            .iter()
            .find(|node| path.starts_with(&*node.id))
        {
            return Some((node, None, &path[node.id.len()..]));
        }

        let part = match memchr(b'/', path.as_bytes()) {
            Some(end) => &path[..end],
            None => path,
        };
        if part.is_empty() {
            return None;
        }
        let rest = &path[part.len()..];

        if let Some(node) = self.regexps.iter().find(|node| regex_matches(node, part)) {
            return Some((node, Some(part), rest));
        }

        self.wildcard
            .as_deref()
            .map(|node| (node, Some(part), rest))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Node> {
        self.statics
            .iter()
            .chain(self.regexps.iter())
            .chain(self.wildcard.as_deref())
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.statics
            .iter_mut()
            .chain(self.regexps.iter_mut())
            .chain(self.wildcard.as_deref_mut())
    }

    pub(crate) fn into_nodes(self) -> Vec<Node> {
        let mut nodes = self.statics;
        nodes.extend(self.regexps);
        nodes.extend(self.wildcard.map(|node| *node));
        nodes
    }

    fn static_position(&self, id: &str) -> Option<usize> {
        self.statics.iter().position(|node| &*node.id == id)
    }
}

#[inline]
fn regex_matches(node: &Node, text: &str) -> bool {
    match &node.kind {
        NodeKind::Regex { regex, .. } => regex.is_match(text),
        _ => false,
    }
}
