//! Basic usage example for the chained hash table
//!
//! This example demonstrates how to:
//! - Build a table from custom hash and equality closures
//! - Insert, update, look up and remove entries
//! - Walk the stored values for diagnostic output

use std::error::Error;

use chainmap::common::logger::initialize_logger;
use chainmap::{ChainedHashTable, EqComparator, IdentityHasher};
use log::info;

fn main() -> Result<(), Box<dyn Error>> {
    initialize_logger();

    // Eight buckets, keys hashed to themselves: 3 and 11 share bucket 3.
    let mut table: ChainedHashTable<u64, &str, _, _> =
        ChainedHashTable::new(IdentityHasher, EqComparator::new(), 8)?;
    table.insert(3, "a")?;
    table.insert(11, "b")?;
    table.insert(5, "c")?;
    info!("size after inserts: {}", table.size());

    for value in table.values() {
        println!("{}", value);
    }

    table.remove(&3);
    println!("get(3) = {:?}, get(11) = {:?}", table.get(&3), table.get(&11));

    // Case-insensitive keys through closures.
    let mut headers = ChainedHashTable::new(
        |name: &String| name.to_ascii_lowercase().bytes().map(u64::from).sum::<u64>(),
        |a: &String, b: &String| a.eq_ignore_ascii_case(b),
        64,
    )?;
    headers.insert("Content-Type".to_string(), "text/plain")?;
    headers.insert("content-type".to_string(), "application/json")?;
    println!("{:?}", headers);

    table.destroy();
    headers.destroy();
    Ok(())
}
