use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The objects present in one frame, keyed by identity.
///
/// Identities missing from a frame are considered absent at that time step.
/// Building a record from an iterator with a repeated identity keeps the last
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRecord<K: Ord, V> {
    pub objects: BTreeMap<K, V>,
}

impl<K: Ord, V> FrameRecord<K, V> {
    pub fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
        }
    }

    /// Builds a record by deriving each object's identity with `key`.
    pub fn from_objects<I, F>(objects: I, key: F) -> Self
    where
        I: IntoIterator<Item = V>,
        F: Fn(&V) -> K,
    {
        objects.into_iter().map(|obj| (key(&obj), obj)).collect()
    }

    pub fn push(&mut self, identity: K, value: V) {
        self.objects.insert(identity, value);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<K: Ord, V> Default for FrameRecord<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for FrameRecord<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl<K: Ord, V> IntoIterator for FrameRecord<K, V> {
    type Item = (K, V);
    type IntoIter = std::collections::btree_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}
