use http::Method;

use super::RouterReadOnly;
use super::snapshot::decode_path;

impl RouterReadOnly {
    /// Builds the `Allow` value for `path`.
    ///
    /// Every method tree other than `method` and `OPTIONS` that holds a
    /// route at `path` is listed in registration order, followed by
    /// `OPTIONS`. The path `*` lists every registered method instead.
    /// Returns `None` when nothing is allowed. `path` is percent-decoded
    /// first, as in [`RouterReadOnly::resolve`].
    pub fn allowed(&self, method: &Method, path: &str) -> Option<String> {
        self.allowed_decoded(method, &decode_path(path))
    }

    pub(super) fn allowed_decoded(&self, method: &Method, path: &str) -> Option<String> {
        let mut allow = String::new();

        if path == "*" {
            if self.forest.is_empty() {
                return None;
            }
            for (root_method, _) in self.forest.iter() {
                if *root_method != Method::OPTIONS {
                    push_method(&mut allow, root_method);
                }
            }
        } else {
            for (root_method, root) in self.forest.iter() {
                if root_method == method || *root_method == Method::OPTIONS {
                    continue;
                }
                let matched = root
                    .child_by_path(path)
                    .is_some_and(|(node, _)| node.route.is_some());
                if matched {
                    push_method(&mut allow, root_method);
                }
            }
            if allow.is_empty() {
                return None;
            }
        }

        push_method(&mut allow, &Method::OPTIONS);
        Some(allow)
    }
}

fn push_method(allow: &mut String, method: &Method) {
    if !allow.is_empty() {
        allow.push_str(", ");
    }
    allow.push_str(method.as_str());
}
