use http::Request;
use smallvec::SmallVec;
use std::ops::Index;
use std::sync::Arc;

/// A single wildcard binding captured while matching a request path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Param {
    pub key: Arc<str>,
    pub value: String,
}

/// Ordered wildcard bindings of one matched route.
///
/// Slots are positional: the n-th wildcard from the tree root lands in slot
/// `n - 1`. The sequence is pre-sized to the matched node's slot count and
/// filled by index, never appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    slots: SmallVec<[Param; 4]>,
}

impl Params {
    pub(crate) fn with_slots(count: usize) -> Self {
        let mut slots = SmallVec::with_capacity(count);
        slots.resize(count, Param::default());
        Self { slots }
    }

    #[inline]
    pub(crate) fn set(&mut self, slot: usize, key: &Arc<str>, value: &str) {
        if let Some(param) = self.slots.get_mut(slot) {
            param.key = Arc::clone(key);
            param.value = value.to_owned();
        }
    }

    /// Reads the params attached to a request by the dispatcher.
    pub fn from_request<B>(req: &Request<B>) -> Option<&Params> {
        req.extensions().get::<Params>()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|param| &*param.key == key)
            .map(|param| param.value.as_str())
    }

    /// Value bound to `key`, or the empty string when the route did not
    /// capture it.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn get_index(&self, index: usize) -> Option<&Param> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Index<usize> for Params {
    type Output = Param;

    fn index(&self, index: usize) -> &Param {
        &self.slots[index]
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
