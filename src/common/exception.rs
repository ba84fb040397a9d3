use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HashTableError {
    #[error("Failed to allocate room for {requested} {what}")]
    AllocationFailed {
        what: &'static str,
        requested: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("Hash table requires at least one bucket")]
    ZeroBuckets,
    #[error("Hash table integrity violation: {0}")]
    IntegrityViolation(String),
}

impl HashTableError {
    pub(crate) fn allocation(what: &'static str, requested: usize, source: TryReserveError) -> Self {
        HashTableError::AllocationFailed {
            what,
            requested,
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, HashTableError>;
