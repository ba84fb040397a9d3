mod chained_hash_table_tests;
mod model_tests;
