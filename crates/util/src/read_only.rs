//! Read-only views over shared mutable maps
//!
//! A [`ReadOnlyView`] is a live projection of a map owned elsewhere. The owner
//! keeps a [`Shared`] handle and mutates through it; every holder of the view
//! sees those changes on the next read, while any mutation attempted through
//! the view (or through its [`Keys`] / [`Values`] collections) fails with
//! [`UtilError::Unsupported`].
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use nebula_util::{AsReadOnly, Shared, share};
//!
//! let map: Shared<HashMap<&str, i32>> = share(HashMap::new());
//! let view = map.as_read_only();
//!
//! map.write().insert("answer", 42);
//! assert_eq!(*view.get("answer").unwrap(), 42);
//! assert!(view.insert("answer", 0).is_err());
//! ```
//!
//! Reads take the lock with `read_recursive`, so nesting reads on one thread
//! (holding [`ReadOnlyView::keys`] while calling [`ReadOnlyView::get`]) cannot
//! deadlock. Guards returned by the view block the owner's writers until they
//! are dropped.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap, btree_map, hash_map};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};

use crate::error::UtilError;
use crate::guard::require_non_null;

/// Shared handle to a mutable map, owned by whoever mutates it.
pub type Shared<M> = Arc<RwLock<M>>;

/// Wrap a map into a [`Shared`] handle.
pub fn share<M>(map: M) -> Shared<M> {
    Arc::new(RwLock::new(map))
}

/// Non-mutating access to a map.
pub trait MapRead {
    /// Key type.
    type Key;
    /// Value type.
    type Value;

    /// Iterator over all entries in the map's own order.
    type Entries<'a>: Iterator<Item = (&'a Self::Key, &'a Self::Value)>
    where
        Self: 'a;

    /// Number of entries.
    fn entry_count(&self) -> usize;

    /// Iterate over all entries in the map's own order.
    fn entries(&self) -> Self::Entries<'_>;
}

/// Key lookup by a borrowed form `Q` of the key.
pub trait MapLookup<Q: ?Sized>: MapRead {
    /// Value stored under `key`, if any.
    fn lookup(&self, key: &Q) -> Option<&Self::Value>;
}

impl<K, V, S> MapRead for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;
    type Entries<'a>
        = hash_map::Iter<'a, K, V>
    where
        Self: 'a;

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> hash_map::Iter<'_, K, V> {
        self.iter()
    }
}

impl<K, V, S, Q> MapLookup<Q> for HashMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: Eq + Hash + ?Sized,
    S: BuildHasher,
{
    fn lookup(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }
}

impl<K: Ord, V> MapRead for BTreeMap<K, V> {
    type Key = K;
    type Value = V;
    type Entries<'a>
        = btree_map::Iter<'a, K, V>
    where
        Self: 'a;

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> btree_map::Iter<'_, K, V> {
        self.iter()
    }
}

impl<K, V, Q> MapLookup<Q> for BTreeMap<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    fn lookup(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }
}

fn reject<T>(operation: &'static str) -> Result<T, UtilError> {
    tracing::debug!(operation, "rejected mutation through read-only view");
    Err(UtilError::unsupported(operation))
}

/// Live, read-only projection of a [`Shared`] map.
///
/// Cloning a view is O(1); all clones observe the same underlying map.
pub struct ReadOnlyView<M> {
    source: Shared<M>,
}

impl<M> Clone for ReadOnlyView<M> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<M: MapRead> ReadOnlyView<M> {
    /// Create a view over `source` without copying its contents.
    pub fn new(source: &Shared<M>) -> Self {
        Self {
            source: Arc::clone(source),
        }
    }

    /// Create a view over an optional source.
    ///
    /// Fails with [`UtilError::InvalidArgument`] when `source` is absent.
    pub fn from_option(source: Option<&Shared<M>>) -> Result<Self, UtilError> {
        require_non_null(source, "source").map(Self::new)
    }

    /// Whether this view projects exactly `source`.
    pub fn is_view_of(&self, source: &Shared<M>) -> bool {
        Arc::ptr_eq(&self.source, source)
    }

    /// Value stored under `key`, or [`UtilError::KeyNotFound`].
    pub fn get<Q>(&self, key: &Q) -> Result<MappedRwLockReadGuard<'_, M::Value>, UtilError>
    where
        M: MapLookup<Q>,
        Q: ?Sized,
    {
        self.try_get(key).ok_or(UtilError::KeyNotFound)
    }

    /// Value stored under `key`, if any.
    pub fn try_get<Q>(&self, key: &Q) -> Option<MappedRwLockReadGuard<'_, M::Value>>
    where
        M: MapLookup<Q>,
        Q: ?Sized,
    {
        RwLockReadGuard::try_map(self.source.read_recursive(), |map| map.lookup(key)).ok()
    }

    /// Clone of the value stored under `key`, or [`UtilError::KeyNotFound`].
    pub fn get_cloned<Q>(&self, key: &Q) -> Result<M::Value, UtilError>
    where
        M: MapLookup<Q>,
        M::Value: Clone,
        Q: ?Sized,
    {
        self.source
            .read_recursive()
            .lookup(key)
            .cloned()
            .ok_or(UtilError::KeyNotFound)
    }

    /// Whether the underlying map currently holds `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        M: MapLookup<Q>,
        Q: ?Sized,
    {
        self.source.read_recursive().lookup(key).is_some()
    }

    /// Whether any entry currently holds `value`.
    pub fn contains_value(&self, value: &M::Value) -> bool
    where
        M::Value: PartialEq,
    {
        self.source
            .read_recursive()
            .entries()
            .any(|(_, v)| v == value)
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.source.read_recursive().entry_count()
    }

    /// Whether the underlying map is currently empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hold a read lock for iteration.
    pub fn read(&self) -> ReadOnlyGuard<'_, M> {
        ReadOnlyGuard {
            guard: self.source.read_recursive(),
        }
    }

    /// Read-only collection of the current keys.
    pub fn keys(&self) -> Keys<'_, M> {
        Keys {
            guard: self.source.read_recursive(),
        }
    }

    /// Read-only collection of the current values.
    pub fn values(&self) -> Values<'_, M> {
        Values {
            guard: self.source.read_recursive(),
        }
    }

    /// Always fails with [`UtilError::Unsupported`], even when `value` equals
    /// the stored one.
    pub fn set(&self, _key: M::Key, _value: M::Value) -> Result<(), UtilError> {
        reject("set")
    }

    /// Always fails with [`UtilError::Unsupported`].
    pub fn insert(&self, _key: M::Key, _value: M::Value) -> Result<Option<M::Value>, UtilError> {
        reject("insert")
    }

    /// Always fails with [`UtilError::Unsupported`].
    pub fn remove<Q: ?Sized>(&self, _key: &Q) -> Result<Option<M::Value>, UtilError> {
        reject("remove")
    }

    /// Always fails with [`UtilError::Unsupported`].
    pub fn clear(&self) -> Result<(), UtilError> {
        reject("clear")
    }
}

impl<M: MapRead> From<&Shared<M>> for ReadOnlyView<M> {
    fn from(source: &Shared<M>) -> Self {
        Self::new(source)
    }
}

impl<M> fmt::Debug for ReadOnlyView<M>
where
    M: MapRead,
    M::Key: fmt::Debug,
    M::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.source.read_recursive().entries())
            .finish()
    }
}

#[cfg(feature = "serde")]
impl<M> serde::Serialize for ReadOnlyView<M>
where
    M: MapRead,
    M::Key: serde::Serialize,
    M::Value: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.source.read_recursive().entries())
    }
}

/// Extension for obtaining a read-only view from a shared map.
pub trait AsReadOnly<M> {
    /// Create a [`ReadOnlyView`] over this map.
    fn as_read_only(&self) -> ReadOnlyView<M>;
}

impl<M: MapRead> AsReadOnly<M> for Shared<M> {
    fn as_read_only(&self) -> ReadOnlyView<M> {
        ReadOnlyView::new(self)
    }
}

/// Read lock over the map behind a [`ReadOnlyView`].
pub struct ReadOnlyGuard<'a, M> {
    guard: RwLockReadGuard<'a, M>,
}

impl<M: MapRead> ReadOnlyGuard<'_, M> {
    /// Iterate over all entries.
    pub fn iter(&self) -> M::Entries<'_> {
        self.guard.entries()
    }

    /// Value stored under `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&M::Value>
    where
        M: MapLookup<Q>,
        Q: ?Sized,
    {
        self.guard.lookup(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.guard.entry_count()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only key collection of a [`ReadOnlyView`].
pub struct Keys<'a, M> {
    guard: RwLockReadGuard<'a, M>,
}

impl<M: MapRead> Keys<'_, M> {
    /// Iterate over the keys.
    pub fn iter(&self) -> KeyIter<'_, M> {
        KeyIter {
            entries: self.guard.entries(),
        }
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.guard.entry_count()
    }

    /// Whether there are no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `key` is present.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        M: MapLookup<Q>,
        Q: ?Sized,
    {
        self.guard.lookup(key).is_some()
    }

    /// Always fails with [`UtilError::Unsupported`].
    pub fn insert(&self, _key: M::Key) -> Result<bool, UtilError> {
        reject("keys.insert")
    }

    /// Always fails with [`UtilError::Unsupported`].
    pub fn remove<Q: ?Sized>(&self, _key: &Q) -> Result<bool, UtilError> {
        reject("keys.remove")
    }

    /// Always fails with [`UtilError::Unsupported`].
    pub fn clear(&self) -> Result<(), UtilError> {
        reject("keys.clear")
    }
}

/// Read-only value collection of a [`ReadOnlyView`].
pub struct Values<'a, M> {
    guard: RwLockReadGuard<'a, M>,
}

impl<M: MapRead> Values<'_, M> {
    /// Iterate over the values.
    pub fn iter(&self) -> ValueIter<'_, M> {
        ValueIter {
            entries: self.guard.entries(),
        }
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.guard.entry_count()
    }

    /// Whether there are no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any entry holds `value`.
    pub fn contains(&self, value: &M::Value) -> bool
    where
        M::Value: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Always fails with [`UtilError::Unsupported`].
    pub fn insert(&self, _value: M::Value) -> Result<bool, UtilError> {
        reject("values.insert")
    }

    /// Always fails with [`UtilError::Unsupported`].
    pub fn remove(&self, _value: &M::Value) -> Result<bool, UtilError> {
        reject("values.remove")
    }

    /// Always fails with [`UtilError::Unsupported`].
    pub fn clear(&self) -> Result<(), UtilError> {
        reject("values.clear")
    }
}

impl<'b, M> IntoIterator for &'b ReadOnlyGuard<'_, M>
where
    M: MapRead + 'b,
{
    type Item = (&'b M::Key, &'b M::Value);
    type IntoIter = M::Entries<'b>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'b, M> IntoIterator for &'b Keys<'_, M>
where
    M: MapRead + 'b,
{
    type Item = &'b M::Key;
    type IntoIter = KeyIter<'b, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'b, M> IntoIterator for &'b Values<'_, M>
where
    M: MapRead + 'b,
{
    type Item = &'b M::Value;
    type IntoIter = ValueIter<'b, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the keys of a [`Keys`] collection.
pub struct KeyIter<'b, M: MapRead + 'b> {
    entries: M::Entries<'b>,
}

impl<'b, M: MapRead + 'b> Iterator for KeyIter<'b, M> {
    type Item = &'b M::Key;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

/// Iterator over the values of a [`Values`] collection.
pub struct ValueIter<'b, M: MapRead + 'b> {
    entries: M::Entries<'b>,
}

impl<'b, M: MapRead + 'b> Iterator for ValueIter<'b, M> {
    type Item = &'b M::Value;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: i32) -> Shared<HashMap<i32, String>> {
        share((0..n).map(|i| (i, i.to_string())).collect())
    }

    #[test]
    fn reads_delegate_to_source() {
        let map = numbered(10);
        let view = map.as_read_only();

        for i in 0..10 {
            assert_eq!(*view.get(&i).unwrap(), i.to_string());
        }
        assert_eq!(view.len(), 10);
        assert!(!view.is_empty());
        assert!(view.contains_key(&3));
        assert!(view.contains_value(&"7".to_string()));
        assert!(!view.contains_key(&10));
    }

    #[test]
    fn missing_key_is_key_not_found() {
        let view = numbered(1).as_read_only();
        assert_eq!(view.get(&42).unwrap_err(), UtilError::KeyNotFound);
        assert!(view.try_get(&42).is_none());
    }

    #[test]
    fn view_is_live_not_a_snapshot() {
        let map = numbered(2);
        let view = map.as_read_only();

        map.write().insert(5, "five".into());
        map.write().remove(&0);

        assert_eq!(*view.get(&5).unwrap(), "five");
        assert!(!view.contains_key(&0));
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn construction_does_not_copy() {
        let map = numbered(3);
        let view = ReadOnlyView::new(&map);
        assert!(view.is_view_of(&map));
        assert!(view.clone().is_view_of(&map));
        assert!(!view.is_view_of(&numbered(3)));
    }

    #[test]
    fn absent_source_is_invalid_argument() {
        let err = ReadOnlyView::<HashMap<String, i32>>::from_option(None).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn every_mutation_is_rejected() {
        let map = numbered(10);
        let view = map.as_read_only();

        assert!(view.set(0, "fish".into()).unwrap_err().is_unsupported());
        assert!(view.set(0, "0".into()).unwrap_err().is_unsupported());
        assert!(view.set(500, "NintySeven".into()).unwrap_err().is_unsupported());
        assert!(view.insert(15, "House".into()).unwrap_err().is_unsupported());
        assert!(view.remove(&5).unwrap_err().is_unsupported());
        assert!(view.clear().unwrap_err().is_unsupported());
        assert!(view.keys().clear().unwrap_err().is_unsupported());
        assert!(view.values().clear().unwrap_err().is_unsupported());

        let source = map.read();
        assert_eq!(source.len(), 10);
        assert_eq!(source.get(&0).map(String::as_str), Some("0"));
        assert!(!source.contains_key(&500));
    }

    #[test]
    fn nested_reads_on_one_thread() {
        let map = numbered(4);
        let view = map.as_read_only();

        let keys = view.keys();
        for key in keys.iter() {
            assert_eq!(*view.get(key).unwrap(), key.to_string());
        }
    }

    #[test]
    fn btree_views_iterate_in_key_order() {
        let map = share(BTreeMap::from([("b", 2), ("a", 1), ("c", 3)]));
        let view = map.as_read_only();

        let guard = view.read();
        let keys: Vec<_> = guard.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(guard.get("b"), Some(&2));
        assert_eq!(guard.len(), 3);
        assert!(!guard.is_empty());
    }

    #[test]
    fn borrowed_collections_iterate_in_for_loops() {
        let map = share(BTreeMap::from([(1, "one"), (2, "two")]));
        let view = map.as_read_only();

        let mut entries = Vec::new();
        for (key, value) in &view.read() {
            entries.push((*key, *value));
        }
        assert_eq!(entries, vec![(1, "one"), (2, "two")]);

        let keys = view.keys();
        let mut total = 0;
        for key in &keys {
            total += key;
        }
        assert_eq!(total, 3);
        assert_eq!(keys.iter().size_hint(), (2, Some(2)));
        drop(keys);

        let values = view.values();
        let collected: Vec<&str> = (&values).into_iter().copied().collect();
        assert_eq!(collected, vec!["one", "two"]);
    }

    #[test]
    fn empty_source_reports_empty() {
        let map = share(HashMap::<String, i32>::new());
        let view = map.as_read_only();

        assert!(view.is_empty());
        assert!(view.read().is_empty());
        assert_eq!(view.read().len(), 0);
        assert!(view.keys().is_empty());
        assert!(view.values().is_empty());
    }

    #[test]
    fn string_keys_accept_borrowed_lookups() {
        let map = share(HashMap::from([(String::from("k"), 1)]));
        let view = map.as_read_only();
        assert_eq!(view.get_cloned("k").unwrap(), 1);
    }
}
