use bytes::Bytes;

use crate::args::Arg;
use crate::bloom::commands;
use crate::bloom::info::{ChunkInfo, CuckooFilterInfo};
use crate::bloom::options::{CuckooInsertArgs, CuckooReserveOptions};
use crate::client::{twin_methods, Dispatcher};
use crate::executor::CommandExecutor;

/// Cuckoo filter stored under one key; unlike Bloom it supports deletion.
pub struct CuckooFilter<E> {
    name: String,
    dispatcher: Dispatcher<E>,
}

impl<E: CommandExecutor> CuckooFilter<E> {
    pub(crate) fn new(name: String, dispatcher: Dispatcher<E>) -> Self {
        Self { name, dispatcher }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    twin_methods! {
        fn reserve / reserve_async(self, capacity: i64, options: CuckooReserveOptions) -> ()
            = commands::cf_reserve(&self.name, capacity, &options);

        fn add / add_async(self, item: impl Into<Arg>) -> bool
            = commands::cf_add(&self.name, item);

        /// Add only if absent; `false` when the item may already exist.
        fn add_nx / add_nx_async(self, item: impl Into<Arg>) -> bool
            = commands::cf_addnx(&self.name, item);

        /// Per item: `1` added, `-1` filter full.
        fn insert / insert_async(self, options: CuckooInsertArgs, items: impl IntoIterator<Item = impl Into<Arg>>) -> Vec<i64>
            = commands::cf_insert(&self.name, &options, items);

        /// Per item: `1` added, `0` already present, `-1` filter full.
        fn insert_nx / insert_nx_async(self, options: CuckooInsertArgs, items: impl IntoIterator<Item = impl Into<Arg>>) -> Vec<i64>
            = commands::cf_insertnx(&self.name, &options, items);

        fn exists / exists_async(self, item: impl Into<Arg>) -> bool
            = commands::cf_exists(&self.name, item);

        fn mexists / mexists_async(self, items: impl IntoIterator<Item = impl Into<Arg>>) -> Vec<bool>
            = commands::cf_mexists(&self.name, items);

        /// Delete one occurrence of the item.
        fn del / del_async(self, item: impl Into<Arg>) -> bool
            = commands::cf_del(&self.name, item);

        fn count / count_async(self, item: impl Into<Arg>) -> i64
            = commands::cf_count(&self.name, item);

        fn scan_dump / scan_dump_async(self, iterator: i64) -> ChunkInfo
            = commands::cf_scandump(&self.name, iterator);

        fn load_chunk / load_chunk_async(self, iterator: i64, data: Bytes) -> ()
            = commands::cf_loadchunk(&self.name, iterator, data);

        fn info / info_async(self) -> CuckooFilterInfo
            = commands::cf_info(&self.name);
    }
}
