use bytes::Bytes;

use crate::args::Arg;
use crate::bloom::commands;
use crate::bloom::info::{BloomFilterInfo, ChunkInfo};
use crate::bloom::options::{BloomReserveOptions, InsertArgs};
use crate::client::{twin_methods, Dispatcher};
use crate::executor::CommandExecutor;

/// Scalable Bloom filter stored under one key.
pub struct BloomFilter<E> {
    name: String,
    dispatcher: Dispatcher<E>,
}

impl<E: CommandExecutor> BloomFilter<E> {
    pub(crate) fn new(name: String, dispatcher: Dispatcher<E>) -> Self {
        Self { name, dispatcher }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    twin_methods! {
        /// Create an empty filter; `error_rate` in (0, 1), `capacity` > 0.
        fn reserve / reserve_async(self, error_rate: f64, capacity: i64, options: BloomReserveOptions) -> ()
            = commands::bf_reserve(&self.name, error_rate, capacity, &options);

        /// `true` if the item was newly added.
        fn add / add_async(self, item: impl Into<Arg>) -> bool
            = commands::bf_add(&self.name, item);

        fn madd / madd_async(self, items: impl IntoIterator<Item = impl Into<Arg>>) -> Vec<bool>
            = commands::bf_madd(&self.name, items);

        /// Add items, creating the filter with `options` if it does not exist.
        fn insert / insert_async(self, options: InsertArgs, items: impl IntoIterator<Item = impl Into<Arg>>) -> Vec<bool>
            = commands::bf_insert(&self.name, &options, items);

        fn exists / exists_async(self, item: impl Into<Arg>) -> bool
            = commands::bf_exists(&self.name, item);

        fn mexists / mexists_async(self, items: impl IntoIterator<Item = impl Into<Arg>>) -> Vec<bool>
            = commands::bf_mexists(&self.name, items);

        fn info / info_async(self) -> BloomFilterInfo
            = commands::bf_info(&self.name);

        /// Number of items added (cardinality estimate).
        fn card / card_async(self) -> i64
            = commands::bf_card(&self.name);

        /// Start with `0`; stop when the returned chunk [`is_last`](ChunkInfo::is_last).
        fn scan_dump / scan_dump_async(self, iterator: i64) -> ChunkInfo
            = commands::bf_scandump(&self.name, iterator);

        fn load_chunk / load_chunk_async(self, iterator: i64, data: Bytes) -> ()
            = commands::bf_loadchunk(&self.name, iterator, data);
    }
}
