use std::{collections::hash_map, ops};

use ahash::AHashMap;
use compact_str::CompactString;

use crate::value::Variant;

/// The string-keyed mapping behind the Object kind.
///
/// Backed by a hash map; iteration order is unspecified. Equality is
/// recursive structural equality over the entries.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Object {
    entries: AHashMap<CompactString, Variant>,
}

impl Object {
    #[must_use]
    pub fn new() -> Object {
        Object::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Object {
        Object {
            entries: AHashMap::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a key/value pair, returning the previous value for the key
    /// if there was one.
    pub fn insert(
        &mut self,
        key: impl Into<CompactString>,
        value: impl Into<Variant>,
    ) -> Option<Variant> {
        self.entries.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Variant> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Variant> {
        self.entries.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Variant> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over `(key, value)` pairs in unspecified order.
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.entries.iter())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(CompactString::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Variant> {
        self.entries.values()
    }
}

/// # Panics
///
/// A missing key is a precondition violation and panics; use
/// [`Object::get`] for a non-panicking lookup.
impl ops::Index<&str> for Object {
    type Output = Variant;

    fn index(&self, key: &str) -> &Variant {
        self.entries
            .get(key)
            .unwrap_or_else(|| panic!("missing object key {key:?}"))
    }
}

pub struct Iter<'a>(hash_map::Iter<'a, CompactString, Variant>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Variant);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, value)| (key.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a str, &'a Variant);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

pub struct IntoIter(hash_map::IntoIter<CompactString, Variant>);

impl Iterator for IntoIter {
    type Item = (CompactString, Variant);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl IntoIterator for Object {
    type Item = (CompactString, Variant);
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        IntoIter(self.entries.into_iter())
    }
}

impl<K, V> FromIterator<(K, V)> for Object
where
    K: Into<CompactString>,
    V: Into<Variant>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Object {
        Object {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for Object
where
    K: Into<CompactString>,
    V: Into<Variant>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|(key, value)| (key.into(), value.into())));
    }
}
