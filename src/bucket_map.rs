//! BucketMap: public map surface over `BucketTable`.

use crate::bucket_table::{BucketTable, IntoIter, Iter};
use crate::error::{MapError, Result};
use crate::hasher::SlotBuildHasher;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::ops::Index;

/// Map from `K` to `V` stored in a `2^c - 1` slot table.
///
/// Every key occupies exactly the slot its hash selects. When a new key
/// lands on a slot held by a different key, the whole table doubles
/// (`c += 1`) and every entry is rehashed, repeating until the key fits.
///
/// ```
/// use bucket_map::{BucketMap, MapError};
///
/// let mut cars = BucketMap::new();
/// cars.set("Ford", "Mustang");
/// cars.set("Ford", "Focus");
/// assert_eq!(cars.get("Ford"), Ok(&"Focus"));
/// assert_eq!(cars.len(), 1);
///
/// assert_eq!(cars.get("Ferrari"), Err(MapError::KeyNotFound));
/// assert_eq!(cars.get_or("Ferrari", &"Testarossa"), &"Testarossa");
/// ```
pub struct BucketMap<K, V, S = SlotBuildHasher> {
    table: BucketTable<K, V, S>,
}

impl<K, V> BucketMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(SlotBuildHasher)
    }
}

impl<K, V, S> Default for BucketMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> BucketMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            table: BucketTable::with_hasher(hasher),
        }
    }

    pub fn hasher(&self) -> &S {
        self.table.hasher()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Current table length, always `2^capacity_exponent() - 1`.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn capacity_exponent(&self) -> u32 {
        self.table.capacity_exponent()
    }

    /// Associates `value` with `key`, replacing any previous value.
    ///
    /// May grow the table, possibly several times, if `key` collides with
    /// a different resident key.
    pub fn set(&mut self, key: K, value: V) {
        let _ = self.table.insert(key, value);
    }

    /// Returns the value stored for `key`, or `KeyNotFound`.
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table
            .find(key)
            .map(|e| e.value())
            .ok_or(MapError::KeyNotFound)
    }

    /// Returns the value stored for `key`, or `default` when absent.
    pub fn get_or<'a, Q>(&'a self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).unwrap_or(default)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Result<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table
            .find(key)
            .map(|e| (e.key(), e.value()))
            .ok_or(MapError::KeyNotFound)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.find(key).is_some()
    }

    /// Removes `key` and returns its value, or `KeyNotFound`. Never shrinks.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table
            .remove(key)
            .map(|(_, v)| v)
            .ok_or(MapError::KeyNotFound)
    }

    /// Entries in ascending slot order. Each call walks the table afresh.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.table.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl<'a, K, V, S> IntoIterator for &'a BucketMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for BucketMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_entries()
    }
}

impl<K, V, S> Extend<(K, V)> for BucketMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for BucketMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for BucketMap<K, V>
where
    K: Eq + Hash,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V, S, Q> Index<&Q> for BucketMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Hash + Eq + fmt::Debug,
    S: BuildHasher,
{
    type Output = V;

    /// Panics with `KeyNotFound` and the key's `Debug` form when `key` is absent.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", e, key),
        }
    }
}

// Sorted by the rendered `key: value` text so the output does not depend
// on slot order.
impl<K, V, S> fmt::Display for BucketMap<K, V, S>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rendered: Vec<String> = self
            .iter()
            .map(|(k, v)| format!("{:?}: {:?}", k, v))
            .collect();
        rendered.sort_unstable();
        write!(f, "BucketMap({})", rendered.join(", "))
    }
}

impl<K, V, S> fmt::Debug for BucketMap<K, V, S>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
