use std::fmt;

use serde::{Deserialize, Serialize};

/// Traversal-order identity of a component.
///
/// The value `n` means "the n-th component boundary met by a pre-order walk of
/// the tree as it looked when the id was issued". It is not a key: any
/// mutation of the live tree may shift it to another component or make it
/// dangle. Re-resolve ids (for instance by listing components again) after
/// anything that could have re-rendered the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(usize);

impl ComponentId {
    pub fn new(value: usize) -> Self {
        Self(value)
    }

    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl From<usize> for ComponentId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
