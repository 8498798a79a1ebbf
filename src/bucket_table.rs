//! BucketTable: the slot table, hash-to-slot indexing and whole-table growth.

use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::mem;

/// Capacity-exponent of a freshly constructed table (`2^10 - 1 = 1023` slots).
pub const INITIAL_CAPACITY_EXPONENT: u32 = 10;

#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    key: K,
    value: V,
    hash: u64,
}

pub(crate) struct BucketTable<K, V, S> {
    hasher: S,
    slots: Box<[Option<Entry<K, V>>]>, // length is always 2^exponent - 1
    occupied: usize,
    exponent: u32,
}

fn empty_slots<K, V>(exponent: u32) -> Box<[Option<Entry<K, V>>]> {
    assert!(exponent < usize::BITS, "capacity overflow");
    let len = (1usize << exponent) - 1;
    core::iter::repeat_with(|| None).take(len).collect()
}

impl<K, V, S> BucketTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub(crate) fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            slots: empty_slots(INITIAL_CAPACITY_EXPONENT),
            occupied: 0,
            exponent: INITIAL_CAPACITY_EXPONENT,
        }
    }

    pub(crate) fn hasher(&self) -> &S {
        &self.hasher
    }

    pub(crate) fn len(&self) -> usize {
        self.occupied
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn capacity_exponent(&self) -> u32 {
        self.exponent
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Slot position for `hash` under the current table length.
    #[inline]
    fn index_of(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    pub(crate) fn find<Q>(&self, q: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        self.slots[self.index_of(hash)]
            .as_ref()
            .filter(|e| e.hash == hash && e.key.borrow() == q)
    }

    /// Stores `(key, value)`, returning the value it replaced if the key
    /// was already present.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.make_hash(&key);
        self.place(Entry { key, value, hash }).map(|old| old.value)
    }

    // Any occupied slot holding a different key grows the whole table and
    // retries; there is no probing.
    fn place(&mut self, entry: Entry<K, V>) -> Option<Entry<K, V>> {
        loop {
            let idx = self.index_of(entry.hash);
            let collides = match &self.slots[idx] {
                None => false,
                Some(e) => e.hash != entry.hash || e.key != entry.key,
            };
            if collides {
                self.grow();
                continue;
            }
            let old = self.slots[idx].replace(entry);
            if old.is_none() {
                self.occupied += 1;
            }
            log::trace!(
                "bucket table: {} slot {} of {}",
                if old.is_none() { "filled" } else { "replaced" },
                idx,
                self.slots.len()
            );
            return old;
        }
    }

    fn grow(&mut self) {
        let next = self.exponent + 1;
        log::debug!(
            "bucket table growing: exponent {} -> {}, rehashing {} entries",
            self.exponent,
            next,
            self.occupied
        );
        let old = mem::replace(&mut self.slots, empty_slots(next));
        self.exponent = next;
        self.occupied = 0;
        // Reinsertion may itself collide and grow again; `place` handles it.
        for entry in old.into_vec().into_iter().flatten() {
            let replaced = self.place(entry);
            debug_assert!(replaced.is_none(), "rehash met a duplicate key");
        }
    }

    pub(crate) fn remove<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let idx = self.index_of(hash);
        let slot = &mut self.slots[idx];
        match slot {
            Some(e) if e.hash == hash && e.key.borrow() == q => {}
            _ => return None,
        }
        let entry = slot.take()?;
        self.occupied -= 1;
        Some((entry.key, entry.value))
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.slots.iter(),
            remaining: self.occupied,
        }
    }

    pub(crate) fn into_entries(self) -> IntoIter<K, V> {
        IntoIter {
            it: self.slots.into_vec().into_iter(),
            remaining: self.occupied,
        }
    }
}

impl<K, V> Entry<K, V> {
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn value(&self) -> &V {
        &self.value
    }
}

/// Iterator over occupied slots in ascending slot order.
pub struct Iter<'a, K, V> {
    it: core::slice::Iter<'a, Option<Entry<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.it.by_ref().find_map(Option::as_ref)?;
        self.remaining -= 1;
        Some((&e.key, &e.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            it: self.it.clone(),
            remaining: self.remaining,
        }
    }
}

/// Owning iterator over entries in ascending slot order.
pub struct IntoIter<K, V> {
    it: std::vec::IntoIter<Option<Entry<K, V>>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.it.by_ref().flatten().next()?;
        self.remaining -= 1;
        Some((e.key, e.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}
