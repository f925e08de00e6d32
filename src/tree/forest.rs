use http::Method;

use super::Node;

/// One tree per HTTP method, kept in the order methods were first
/// registered. Each root node's id is the method name.
#[derive(Debug, Default)]
pub(crate) struct Forest {
    roots: Vec<(Method, Node)>,
}

impl Forest {
    pub(crate) fn get(&self, method: &Method) -> Option<&Node> {
        self.roots
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, root)| root)
    }

    pub(crate) fn get_or_insert(&mut self, method: &Method) -> &mut Node {
        let idx = match self.roots.iter().position(|(m, _)| m == method) {
            Some(idx) => idx,
            None => {
                self.roots
                    .push((method.clone(), Node::root(method.as_str())));
                self.roots.len() - 1
            }
        };
        &mut self.roots[idx].1
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Method, &Node)> {
        self.roots.iter().map(|(method, root)| (method, root))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&Method, &mut Node)> {
        self.roots.iter_mut().map(|(method, root)| (&*method, root))
    }

    pub(crate) fn into_roots(self) -> Vec<(Method, Node)> {
        self.roots
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
