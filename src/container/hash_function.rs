use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use xxhash_rust::xxh3;

use crate::common::config::HashValue;

/// Capability that maps a key to a raw hash value.
///
/// The table reduces the returned value modulo its bucket count, so an
/// implementation may return any `u64`. Implementations must agree with the
/// table's `KeyEquality`: keys that compare equal must hash equal.
pub trait KeyHasher<K> {
    fn hash(&self, key: &K) -> HashValue;
}

// Plain functions and closures of the right shape are hashers.
impl<K, F> KeyHasher<K> for F
where
    F: Fn(&K) -> HashValue,
{
    fn hash(&self, key: &K) -> HashValue {
        self(key)
    }
}

/// Represents a hash function for a given key type.
pub struct HashFunction<K> {
    _marker: PhantomData<K>,
}

impl<K> HashFunction<K> {
    /// Creates a new `HashFunction`.
    ///
    /// # Returns
    /// A new `HashFunction` instance.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<K> HashFunction<K>
where
    K: Any + Hash,
{
    /// Returns the hash value of the given key.
    ///
    /// # Parameters
    /// - `key`: The key to be hashed.
    ///
    /// # Returns
    /// The hashed value.
    pub fn get_hash(&self, key: &K) -> HashValue {
        let mut hasher = xxh3::Xxh3::new();
        let any = key as &dyn Any;

        if let Some(v) = any.downcast_ref::<i32>() {
            hasher.write_i32(*v);
        } else if let Some(v) = any.downcast_ref::<u32>() {
            hasher.write_u32(*v);
        } else if let Some(v) = any.downcast_ref::<i64>() {
            hasher.write_i64(*v);
        } else if let Some(v) = any.downcast_ref::<u64>() {
            hasher.write_u64(*v);
        } else if let Some(v) = any.downcast_ref::<String>() {
            hasher.write(v.as_bytes());
        } else if let Some(v) = any.downcast_ref::<&str>() {
            hasher.write(v.as_bytes());
        } else {
            // Fallback for types that implement `Hash`
            Hash::hash(key, &mut hasher);
        }

        hasher.finish()
    }
}

impl<K> KeyHasher<K> for HashFunction<K>
where
    K: Any + Hash,
{
    fn hash(&self, key: &K) -> HashValue {
        self.get_hash(key)
    }
}

impl<K> Default for HashFunction<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for HashFunction<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for HashFunction<K> {}

impl<K> fmt::Debug for HashFunction<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashFunction(xxh3)")
    }
}

/// Hashes an integer key to itself.
///
/// After the table's modulo reduction this places key `k` in slot
/// `k mod num_buckets`, which makes collisions easy to arrange.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHasher;

macro_rules! identity_hasher_for {
    ($($t:ty),*) => {
        $(
            impl KeyHasher<$t> for IdentityHasher {
                #[inline]
                fn hash(&self, key: &$t) -> HashValue {
                    *key as HashValue
                }
            }
        )*
    };
}

identity_hasher_for!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
