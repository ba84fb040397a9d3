use std::collections::HashMap;

use chainmap::{ChainedHashTable, EqComparator, IdentityHasher};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assert_ok;
use crate::common::logger::init_test_logger;

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a random operation mix against the table and `std::collections::HashMap`.
    #[test]
    fn test_matches_std_hashmap_under_random_operations() {
        init_test_logger();
        let mut rng = StdRng::seed_from_u64(0x5eed);
        // Few buckets and a small key space keep chains long and collisions frequent.
        let mut table: ChainedHashTable<u32, u32, IdentityHasher, EqComparator<u32>> =
            assert_ok!(ChainedHashTable::new(IdentityHasher, EqComparator::new(), 7));
        let mut model: HashMap<u32, u32> = HashMap::new();

        for step in 0..5_000u32 {
            let key = rng.gen_range(0..64u32);
            match rng.gen_range(0..3) {
                0 => {
                    let previous = assert_ok!(table.insert(key, step));
                    assert_eq!(previous, model.insert(key, step));
                }
                1 => assert_eq!(table.remove(&key), model.remove(&key)),
                _ => assert_eq!(table.get(&key), model.get(&key)),
            }
            assert_eq!(table.size(), model.len());
        }

        assert_ok!(table.verify_integrity());
        let mut seen: Vec<_> = table.iter().map(|(k, v)| (*k, *v)).collect();
        let mut expected: Vec<_> = model.into_iter().collect();
        seen.sort_unstable();
        expected.sort_unstable();
        assert_eq!(seen, expected);
    }
}
