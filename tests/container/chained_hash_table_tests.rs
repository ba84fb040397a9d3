use chainmap::{
    ChainedHashTable, EqComparator, HashTable, HashTableConfig, HashTableError, IdentityHasher,
    StdChainedHashTable,
};

use crate::common::logger::init_test_logger;
use crate::{assert_err_matches, assert_ok};

fn mod8_table() -> ChainedHashTable<u64, &'static str, IdentityHasher, EqComparator<u64>> {
    init_test_logger();
    assert_ok!(ChainedHashTable::new(IdentityHasher, EqComparator::new(), 8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_scenario() {
        let mut ht = mod8_table();

        assert_ok!(ht.insert(3, "a"));
        assert_ok!(ht.insert(11, "b")); // collides with 3
        assert_ok!(ht.insert(5, "c"));

        assert_eq!(ht.get(&3), Some(&"a"));
        assert_eq!(ht.get(&11), Some(&"b"));
        assert_eq!(ht.get(&5), Some(&"c"));
        assert_eq!(ht.size(), 3);

        ht.remove(&3);
        assert_eq!(ht.get(&3), None);
        assert_eq!(ht.get(&11), Some(&"b"));
        assert_eq!(ht.size(), 2);
        assert_ok!(ht.verify_integrity());
    }

    #[test]
    fn test_distinct_inserts_count() {
        init_test_logger();
        let mut ht: StdChainedHashTable<String, usize> = assert_ok!(ChainedHashTable::with_std(64));

        let num_keys = 500;
        for i in 0..num_keys {
            assert_eq!(assert_ok!(ht.insert(format!("key{}", i), i)), None);
        }

        assert_eq!(ht.size(), num_keys);
        assert_eq!(ht.count_entries(), num_keys);
        for i in 0..num_keys {
            assert_eq!(ht.get(&format!("key{}", i)), Some(&i));
        }
    }

    #[test]
    fn test_last_write_wins() {
        let mut ht = mod8_table();
        assert_ok!(ht.insert(42, "v1"));
        assert_ok!(ht.insert(42, "v2"));

        assert_eq!(ht.get(&42), Some(&"v2"));
        assert_eq!(ht.size(), 1);
        assert_eq!(ht.chain_len(42 % 8), 1);
    }

    #[test]
    fn test_missing_keys_are_absent() {
        let mut ht = mod8_table();
        assert_ok!(ht.insert(1, "one"));

        for key in [0, 2, 9, 17, u64::MAX] {
            assert_eq!(ht.get(&key), None);
            assert!(!ht.contains_key(&key));
        }
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let mut ht = mod8_table();
        assert_ok!(ht.insert(1, "one"));
        assert_ok!(ht.insert(9, "nine"));

        assert_eq!(ht.remove(&17), None); // same chain, not present
        assert_eq!(ht.remove(&4), None); // empty chain
        assert_eq!(ht.size(), 2);
        assert_eq!(ht.get(&9), Some(&"nine"));
    }

    #[test]
    fn test_insert_remove_insert() {
        let mut ht = mod8_table();
        assert_ok!(ht.insert(3, "a"));
        assert_ok!(ht.insert(11, "b"));

        assert_eq!(ht.remove(&3), Some("a"));
        assert_ok!(ht.insert(3, "a2"));

        assert_eq!(ht.size(), 2);
        assert_eq!(ht.get(&3), Some(&"a2"));
        assert_eq!(ht.get(&11), Some(&"b"));
        assert_eq!(ht.chain_len(3), 2);
        assert_ok!(ht.verify_integrity());
    }

    #[test]
    fn test_removing_one_collider_keeps_the_other() {
        let mut ht = mod8_table();
        for key in [2, 10, 18, 26] {
            assert_ok!(ht.insert(key, "x"));
        }

        for removed in [10, 26, 2] {
            ht.remove(&removed);
            assert_eq!(ht.get(&removed), None);
        }
        assert_eq!(ht.get(&18), Some(&"x"));
        assert_eq!(ht.size(), 1);
    }

    #[test]
    fn test_values_visit_everything_once() {
        let mut ht = mod8_table();
        assert_ok!(ht.insert(8, "zero-b"));
        assert_ok!(ht.insert(1, "one"));
        assert_ok!(ht.insert(0, "zero-c"));

        let values: Vec<_> = ht.values().copied().collect();
        assert_eq!(values, vec!["zero-b", "zero-c", "one"]);
    }

    #[test]
    fn test_generic_over_hash_table_trait() {
        fn fill<T: HashTable<u64, &'static str>>(table: &mut T) {
            for key in 0..4 {
                assert_ok!(table.insert(key, "v"));
            }
            table.remove(&0);
        }

        let mut ht = mod8_table();
        fill(&mut ht);
        assert_eq!(HashTable::size(&ht), 3);
        assert_eq!(HashTable::get(&ht, &1), Some(&"v"));
    }

    #[test]
    fn test_config_validation() {
        init_test_logger();
        let config = HashTableConfig::default().with_num_buckets(0);
        let result: chainmap::Result<StdChainedHashTable<u32, u32>> =
            ChainedHashTable::from_config(Default::default(), Default::default(), &config);
        assert_err_matches!(result, HashTableError::ZeroBuckets);
    }

    #[test]
    fn test_destroy_after_use() {
        let mut ht = mod8_table();
        for key in 0..100 {
            assert_ok!(ht.insert(key, "v"));
        }
        ht.destroy();
    }
}
