//! # Separate-Chaining Hash Table
//!
//! A fixed-capacity hash table that resolves collisions by chaining entries that
//! share a bucket. Hashing and key equality are capabilities supplied by the caller
//! at construction time, so the table itself never requires `K: Hash + Eq`.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                     ChainedHashTable<K, V, H, E>                         │
//!   │                                                                          │
//!   │   buckets: Vec<Option<EntryId>>          entries: Vec<Slot<K, V>>        │
//!   │                                                                          │
//!   │   ┌─────┐                                ┌────┬──────────────────────┐   │
//!   │   │  0  │ ── None                        │ id │ slot                 │   │
//!   │   ├─────┤                                ├────┼──────────────────────┤   │
//!   │   │  1  │ ── Some(0) ──┐                 │ 0  │ Occupied(k1, next=2) │   │
//!   │   ├─────┤              │                 │ 1  │ Vacant(next_free)    │   │
//!   │   │  2  │ ── None      └──► 0 ──► 2      │ 2  │ Occupied(k9, next=∅) │   │
//!   │   ├─────┤                                │ 3  │ Occupied(k4, next=∅) │   │
//!   │   │  3  │ ── Some(3)                     └────┴──────────────────────┘   │
//!   │   └─────┘                                                                │
//!   │                                                                          │
//!   │   hasher: H (KeyHasher<K>)     equality: E (KeyEquality<K>)              │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Chain links are arena indices rather than pointers. Released entries become
//! `Vacant` and are threaded onto a free list so their arena slot is reused by the
//! next insertion.
//!
//! ## Slot Selection
//!
//! `slot = hasher.hash(key) % num_buckets`. The reduction is always applied, so a
//! hasher may return any `u64`.
//!
//! ## Operations
//!
//! | Method              | Complexity     | Description                                  |
//! |---------------------|----------------|----------------------------------------------|
//! | `new(h, e, n)`      | O(n)           | Allocate `n` empty buckets                   |
//! | `insert(k, v)`      | O(chain)       | Update in place, or append at chain tail     |
//! | `get(&k)`           | O(chain)       | First equal key in the chain                 |
//! | `remove(&k)`        | O(chain)       | Splice out; missing key is a no-op           |
//! | `size()`            | O(1)           | Maintained counter                           |
//! | `count_entries()`   | O(n + buckets) | Full scan, used by `verify_integrity`        |
//! | `values()`          | O(n + buckets) | Lazy, bucket-then-chain order                |
//! | `destroy()`         | O(n + buckets) | Consume and release everything               |
//!
//! ## Capacity
//!
//! The bucket count never changes. There is no rehashing, so lookups degrade
//! linearly as chains grow; choosing a bucket count for the expected load is the
//! caller's job.
//!
//! ## Thread Safety
//!
//! Not synchronized. Wrap in a `Mutex` if it must be shared across threads.

use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use log::{debug, trace, warn};

use crate::common::config::{DEFAULT_BUCKETS, EntryId, HashTableConfig, SlotIndex};
use crate::common::exception::{HashTableError, Result};
use crate::container::hash_function::{HashFunction, KeyHasher};
use crate::container::hash_table::HashTable;
use crate::container::key_equality::{EqComparator, KeyEquality};

/// One stored key/value pair.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    /// Bucket this entry was placed in when inserted.
    slot: SlotIndex,
    next: Option<EntryId>,
}

#[derive(Debug)]
enum Slot<K, V> {
    Occupied(Entry<K, V>),
    /// Released arena slot, linked to the next free one.
    Vacant(Option<EntryId>),
}

#[inline]
fn occupied<K, V>(slot: &Slot<K, V>, id: EntryId) -> &Entry<K, V> {
    match slot {
        Slot::Occupied(entry) => entry,
        Slot::Vacant(_) => unreachable!("chain links to released entry {id}"),
    }
}

/// Table wired to the crate's default xxh3 hasher and `PartialEq` equality.
pub type StdChainedHashTable<K, V> = ChainedHashTable<K, V, HashFunction<K>, EqComparator<K>>;

/// Fixed-capacity separate-chaining hash table.
///
/// See module-level documentation for details.
pub struct ChainedHashTable<K, V, H, E> {
    // Entries are declared first so they are released before the bucket array.
    entries: Vec<Slot<K, V>>,
    free_head: Option<EntryId>,
    buckets: Vec<Option<EntryId>>,
    num_buckets: usize,
    len: usize,
    hasher: H,
    equality: E,
}

impl<K, V, H, E> ChainedHashTable<K, V, H, E>
where
    H: KeyHasher<K>,
    E: KeyEquality<K>,
{
    /// Creates a table with `num_buckets` empty buckets.
    ///
    /// # Arguments
    ///
    /// * `hasher` - Maps keys to raw hash values.
    /// * `equality` - Decides whether two keys are the same key.
    /// * `num_buckets` - Number of buckets. Fixed for the table's lifetime.
    ///
    /// # Errors
    ///
    /// `ZeroBuckets` if `num_buckets` is zero, `AllocationFailed` if the bucket
    /// array cannot be allocated.
    pub fn new(hasher: H, equality: E, num_buckets: usize) -> Result<Self> {
        Self::from_config(hasher, equality, &HashTableConfig::new(num_buckets))
    }

    /// Creates a table with `DEFAULT_BUCKETS` buckets.
    pub fn with_default_buckets(hasher: H, equality: E) -> Result<Self> {
        Self::new(hasher, equality, DEFAULT_BUCKETS)
    }

    pub fn from_config(hasher: H, equality: E, config: &HashTableConfig) -> Result<Self> {
        config.validate()?;
        let num_buckets = config.num_buckets;

        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(num_buckets)
            .map_err(|e| HashTableError::allocation("buckets", num_buckets, e))?;
        buckets.resize(num_buckets, None);

        debug!("Created chained hash table with {} buckets", num_buckets);

        Ok(Self {
            entries: Vec::new(),
            free_head: None,
            buckets,
            num_buckets,
            len: 0,
            hasher,
            equality,
        })
    }

    #[inline]
    fn slot_for(&self, key: &K) -> SlotIndex {
        (self.hasher.hash(key) % self.num_buckets as u64) as SlotIndex
    }

    /// Walks the chain at `slot` and returns the matching entry with its predecessor.
    fn find_in_chain(&self, slot: SlotIndex, key: &K) -> Option<(Option<EntryId>, EntryId)> {
        let mut prev = None;
        let mut cursor = self.buckets[slot];

        while let Some(id) = cursor {
            let entry = self.node(id);
            if self.equality.equals(&entry.key, key) {
                return Some((prev, id));
            }
            prev = Some(id);
            cursor = entry.next;
        }
        None
    }

    /// Inserts `key` with `value`.
    ///
    /// If an equal key is already stored its value is replaced in place and the
    /// previous value is returned. Otherwise a new entry is appended at the tail of
    /// the key's chain.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        let slot = self.slot_for(&key);

        let mut tail = None;
        let mut cursor = self.buckets[slot];
        while let Some(id) = cursor {
            let entry = self.node(id);
            if self.equality.equals(&entry.key, &key) {
                trace!("insert: updating entry {} in slot {}", id, slot);
                let old = mem::replace(&mut self.node_mut(id).value, value);
                return Ok(Some(old));
            }
            tail = Some(id);
            cursor = entry.next;
        }

        let id = self.allocate(Entry {
            key,
            value,
            slot,
            next: None,
        })?;

        match tail {
            None => self.buckets[slot] = Some(id),
            Some(tail) => self.node_mut(tail).next = Some(id),
        }
        self.len += 1;

        trace!("insert: new entry {} in slot {}", id, slot);
        Ok(None)
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &K) -> Option<&V> {
        let slot = self.slot_for(key);
        self.find_in_chain(slot, key)
            .map(|(_, id)| &self.node(id).value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let slot = self.slot_for(key);
        let (_, id) = self.find_in_chain(slot, key)?;
        Some(&mut self.node_mut(id).value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key` and returns its value. Missing keys leave the table untouched.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` and hands back both the stored key and its value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let slot = self.slot_for(key);
        let Some((prev, id)) = self.find_in_chain(slot, key) else {
            trace!("remove: key not present in slot {}", slot);
            return None;
        };

        let removed = self.release(id);
        match prev {
            None => self.buckets[slot] = removed.next,
            Some(prev) => self.node_mut(prev).next = removed.next,
        }
        self.len -= 1;

        trace!("remove: released entry {} from slot {}", id, slot);
        Some((removed.key, removed.value))
    }

    /// Checks the structural invariants of every chain.
    ///
    /// Verifies that each entry sits in the bucket its key hashes to, that no chain
    /// holds two equal keys, and that the maintained size matches a full scan.
    pub fn verify_integrity(&self) -> Result<()> {
        let mut seen = 0usize;

        for (slot, head) in self.buckets.iter().enumerate() {
            let mut chain: Vec<EntryId> = Vec::new();
            let mut cursor = *head;

            while let Some(id) = cursor {
                if seen >= self.entries.len() {
                    return Err(self.violation(format!("cycle detected in chain {}", slot)));
                }
                let entry = match self.entries.get(id) {
                    Some(Slot::Occupied(entry)) => entry,
                    _ => {
                        return Err(
                            self.violation(format!("slot {} links to dead entry {}", slot, id))
                        );
                    }
                };
                if entry.slot != slot || self.slot_for(&entry.key) != slot {
                    return Err(self.violation(format!(
                        "entry {} cached slot {} but lives in slot {}",
                        id, entry.slot, slot
                    )));
                }
                if chain
                    .iter()
                    .any(|other| self.equality.equals(&self.node(*other).key, &entry.key))
                {
                    return Err(self.violation(format!("duplicate key in slot {}", slot)));
                }
                chain.push(id);
                seen += 1;
                cursor = entry.next;
            }
        }

        if seen != self.len {
            return Err(self.violation(format!(
                "size counter is {} but chains hold {} entries",
                self.len, seen
            )));
        }
        Ok(())
    }

    fn violation(&self, message: String) -> HashTableError {
        warn!("Hash table integrity check failed: {}", message);
        HashTableError::IntegrityViolation(message)
    }
}

impl<K, V> ChainedHashTable<K, V, HashFunction<K>, EqComparator<K>>
where
    HashFunction<K>: KeyHasher<K>,
    EqComparator<K>: KeyEquality<K>,
{
    /// Creates a table using the xxh3 `HashFunction` and `PartialEq` equality.
    pub fn with_std(num_buckets: usize) -> Result<Self> {
        Self::new(HashFunction::new(), EqComparator::new(), num_buckets)
    }
}

impl<K, V, H, E> ChainedHashTable<K, V, H, E> {
    /// Number of stored entries.
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn num_buckets(&self) -> usize {
        self.num_buckets
    }

    /// Entries per bucket. Unbounded since the table never grows.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.num_buckets as f64
    }

    /// Counts entries by walking every chain.
    pub fn count_entries(&self) -> usize {
        (0..self.num_buckets).map(|slot| self.chain_len(slot)).sum()
    }

    /// Length of the chain in `slot`, or 0 for slots outside the table.
    pub fn chain_len(&self, slot: SlotIndex) -> usize {
        let mut count = 0;
        let mut cursor = self.buckets.get(slot).copied().flatten();
        while let Some(id) = cursor {
            count += 1;
            cursor = self.node(id).next;
        }
        count
    }

    /// Iterates over `(key, value)` pairs in bucket-then-chain order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: &self.buckets,
            entries: &self.entries,
            bucket: 0,
            cursor: None,
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Lazily yields every stored value in bucket-then-chain order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Releases every entry but keeps the bucket array.
    pub fn clear(&mut self) {
        debug!("Clearing {} entries from chained hash table", self.len);
        self.entries.clear();
        self.free_head = None;
        self.buckets.fill(None);
        self.len = 0;
    }

    /// Tears the table down, releasing all entries and then the bucket array.
    pub fn destroy(self) {
        debug!(
            "Destroying chained hash table: {} entries across {} buckets",
            self.len, self.num_buckets
        );
        drop(self);
    }

    #[inline]
    fn node(&self, id: EntryId) -> &Entry<K, V> {
        occupied(&self.entries[id], id)
    }

    #[inline]
    fn node_mut(&mut self, id: EntryId) -> &mut Entry<K, V> {
        match &mut self.entries[id] {
            Slot::Occupied(entry) => entry,
            Slot::Vacant(_) => unreachable!("chain links to released entry {id}"),
        }
    }

    /// Stores `entry` in a free arena slot, growing the arena if none is free.
    fn allocate(&mut self, entry: Entry<K, V>) -> Result<EntryId> {
        if let Some(id) = self.free_head {
            self.free_head = match self.entries[id] {
                Slot::Vacant(next_free) => next_free,
                Slot::Occupied(_) => unreachable!("free list links to live entry {id}"),
            };
            self.entries[id] = Slot::Occupied(entry);
            return Ok(id);
        }

        self.entries
            .try_reserve(1)
            .map_err(|e| HashTableError::allocation("entries", self.entries.len() + 1, e))?;
        self.entries.push(Slot::Occupied(entry));
        Ok(self.entries.len() - 1)
    }

    fn release(&mut self, id: EntryId) -> Entry<K, V> {
        let slot = mem::replace(&mut self.entries[id], Slot::Vacant(self.free_head));
        self.free_head = Some(id);
        match slot {
            Slot::Occupied(entry) => entry,
            Slot::Vacant(_) => unreachable!("released entry {id} twice"),
        }
    }
}

impl<K, V, H, E> HashTable<K, V> for ChainedHashTable<K, V, H, E>
where
    H: KeyHasher<K>,
    E: KeyEquality<K>,
{
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        ChainedHashTable::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        ChainedHashTable::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        ChainedHashTable::remove(self, key)
    }

    fn size(&self) -> usize {
        ChainedHashTable::size(self)
    }
}

impl<K, V, H, E> fmt::Debug for ChainedHashTable<K, V, H, E>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, H, E> IntoIterator for &'a ChainedHashTable<K, V, H, E> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(&K, &V)` in bucket-then-chain order.
pub struct Iter<'a, K, V> {
    buckets: &'a [Option<EntryId>],
    entries: &'a [Slot<K, V>],
    bucket: SlotIndex,
    cursor: Option<EntryId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        // Stop early so a sparse table does not scan its trailing empty buckets.
        if self.remaining == 0 {
            return None;
        }
        loop {
            if let Some(id) = self.cursor {
                let entry = occupied(&self.entries[id], id);
                self.cursor = entry.next;
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }
            let head = self.buckets.get(self.bucket)?;
            self.cursor = *head;
            self.bucket += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
