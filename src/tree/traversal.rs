use super::Node;
use crate::pattern::Segment;
use crate::route::Route;

const TRAVERSAL_STACK_CAPACITY: usize = 64;

/// Depth-first traversal over an immutable subtree.
/// Uses an explicit stack to avoid recursion on deep trees.
#[inline]
pub(crate) fn traverse<F>(root: &Node, mut action: F)
where
    F: FnMut(&Node),
{
    let mut stack: Vec<&Node> = Vec::with_capacity(TRAVERSAL_STACK_CAPACITY);
    stack.push(root);

    while let Some(node) = stack.pop() {
        action(node);
        stack.extend(node.children.iter());
    }
}

/// Depth-first traversal over a mutable subtree.
#[inline]
pub(crate) fn traverse_mut<F>(root: &mut Node, mut action: F)
where
    F: FnMut(&mut Node),
{
    let mut stack: Vec<&mut Node> = Vec::with_capacity(TRAVERSAL_STACK_CAPACITY);
    stack.push(root);

    while let Some(node) = stack.pop() {
        action(&mut *node);
        stack.extend(node.children.iter_mut());
    }
}

/// Visits every route of the subtree, the root's own route included.
/// Returns how many routes were visited.
pub(crate) fn for_each_route_mut<F>(root: &mut Node, mut action: F) -> usize
where
    F: FnMut(&mut Route),
{
    let mut visited = 0usize;
    traverse_mut(root, |node| {
        if let Some(route) = node.route.as_mut() {
            action(route);
            visited += 1;
        }
    });
    visited
}

pub(crate) fn count_routes(root: &Node) -> usize {
    let mut count = 0usize;
    traverse(root, |node| {
        if node.route.is_some() {
            count += 1;
        }
    });
    count
}

/// Deepest wildcard nesting of the subtree.
pub(crate) fn max_param_slots(root: &Node) -> usize {
    let mut max = root.param_slots;
    traverse(root, |node| max = max.max(node.param_slots));
    max
}

/// Takes the subtree apart into `(segments below root, route)` pairs.
///
/// Siblings come out in the order they are stored and a parent's route
/// precedes its descendants', so re-inserting the pairs in order rebuilds
/// the same regex precedence.
pub(crate) fn drain_routes(root: Node) -> Vec<(Vec<Segment>, Route)> {
    let mut out = Vec::new();
    let mut stack: Vec<(Node, Vec<Segment>)> = Vec::with_capacity(TRAVERSAL_STACK_CAPACITY);
    stack.push((root, Vec::new()));

    while let Some((mut node, path)) = stack.pop() {
        if let Some(route) = node.route.take() {
            out.push((path.clone(), route));
        }

        let children = std::mem::take(&mut node.children).into_nodes();
        for child in children.into_iter().rev() {
            let mut child_path = Vec::with_capacity(path.len() + 1);
            child_path.extend(path.iter().cloned());
            child_path.push(child.segment());
            stack.push((child, child_path));
        }
    }

    out
}
