use crate::common::exception::Result;

/// The core key/value protocol shared by the table implementations in this crate.
pub trait HashTable<K, V> {
    /// Inserts a key-value pair into the hash table.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to insert.
    /// * `value` - The value to be associated with the key.
    ///
    /// # Returns
    ///
    /// The value previously stored under an equal key, if any. Fails only when
    /// room for a new entry cannot be allocated.
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>>;

    /// Performs a point query on the hash table.
    fn get(&self, key: &K) -> Option<&V>;

    /// Deletes the entry for the given key. Missing keys are a no-op.
    ///
    /// # Returns
    ///
    /// The value that was stored under the key, if any.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Gets the number of entries stored in the hash table.
    fn size(&self) -> usize;
}
