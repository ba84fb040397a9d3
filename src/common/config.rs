use crate::common::exception::{HashTableError, Result};

pub type SlotIndex = usize; // bucket slot index
pub type HashValue = u64; // raw output of a key hasher
pub type EntryId = usize; // arena index of a chain entry

/// Bucket count used when the caller does not pick one.
pub const DEFAULT_BUCKETS: usize = 750_000;

/// Construction parameters for a `ChainedHashTable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashTableConfig {
    /// Number of bucket slots. Fixed for the lifetime of the table.
    pub num_buckets: usize,
}

impl HashTableConfig {
    pub fn new(num_buckets: usize) -> Self {
        Self { num_buckets }
    }

    pub fn with_num_buckets(mut self, num_buckets: usize) -> Self {
        self.num_buckets = num_buckets;
        self
    }

    /// Rejects configurations that would break the `num_buckets > 0` invariant.
    pub fn validate(&self) -> Result<()> {
        if self.num_buckets == 0 {
            return Err(HashTableError::ZeroBuckets);
        }
        Ok(())
    }
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self {
            num_buckets: DEFAULT_BUCKETS,
        }
    }
}
