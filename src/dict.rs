use linked_hash_map::{Iter, LinkedHashMap};

use crate::bytestring::ByteString;
use crate::value::Value;

/// A bencode dictionary.
///
/// Entries remember their insertion order for iteration, but the encoder always emits them
/// sorted by key bytes. Two dictionaries holding the same pairs encode identically no matter
/// how they were built.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: LinkedHashMap<ByteString, Value>,
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary { entries: LinkedHashMap::new() }
    }

    pub fn with_capacity(capacity: usize) -> Dictionary {
        Dictionary { entries: LinkedHashMap::with_capacity(capacity) }
    }

    /// Inserts a pair, returning the previous value if the key was already present.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Value>
    where
        K: Into<ByteString>,
        V: Into<Value>,
    {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &[u8]) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates in insertion order. Not the order used on the wire.
    pub fn iter(&self) -> Iter<'_, ByteString, Value> {
        self.entries.iter()
    }

    pub(crate) fn sorted_entries(&self) -> Vec<(&ByteString, &Value)> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        // keys are unique
        sorted.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        sorted
    }
}

impl<K, V> FromIterator<(K, V)> for Dictionary
where
    K: Into<ByteString>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Dictionary::new();
        dict.extend(iter);
        dict
    }
}

impl<K, V> Extend<(K, V)> for Dictionary
where
    K: Into<ByteString>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a ByteString, &'a Value);
    type IntoIter = Iter<'a, ByteString, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
