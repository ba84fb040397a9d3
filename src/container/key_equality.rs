use std::fmt;
use std::marker::PhantomData;

/// Capability that decides whether two keys name the same entry.
pub trait KeyEquality<K> {
    fn equals(&self, lhs: &K, rhs: &K) -> bool;
}

// Implement KeyEquality for function and closure types
impl<K, F> KeyEquality<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    fn equals(&self, lhs: &K, rhs: &K) -> bool {
        self(lhs, rhs)
    }
}

/// Equality through `PartialEq`.
pub struct EqComparator<K> {
    _marker: PhantomData<K>,
}

impl<K> EqComparator<K> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<K: PartialEq> KeyEquality<K> for EqComparator<K> {
    /// Compares two keys.
    ///
    /// # Parameters
    /// - `lhs`: Left-hand side key.
    /// - `rhs`: Right-hand side key.
    ///
    /// # Returns
    /// `true` if `lhs == rhs`.
    fn equals(&self, lhs: &K, rhs: &K) -> bool {
        lhs == rhs
    }
}

impl<K> Default for EqComparator<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for EqComparator<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for EqComparator<K> {}

impl<K> fmt::Debug for EqComparator<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EqComparator")
    }
}
