//! Fixed-capacity separate-chaining hash table.
//!
//! Provides:
//! - `ChainedHashTable`, generic over key, value, hasher and equality
//! - `KeyHasher` / `KeyEquality` capabilities, implemented for plain closures
//! - An xxh3 default hasher and a `PartialEq` default comparator

pub mod common;
pub mod container;

pub use common::config::{DEFAULT_BUCKETS, HashTableConfig};
pub use common::exception::{HashTableError, Result};
pub use container::chained_hash_table::{ChainedHashTable, StdChainedHashTable};
pub use container::hash_function::{HashFunction, IdentityHasher, KeyHasher};
pub use container::hash_table::HashTable;
pub use container::key_equality::{EqComparator, KeyEquality};
