use crate::args::Arg;
use crate::bloom::commands;
use crate::bloom::info::TopKFilterInfo;
use crate::bloom::options::TopKParams;
use crate::client::{twin_methods, Dispatcher};
use crate::executor::CommandExecutor;

/// Top-K heavy hitters sketch stored under one key.
pub struct TopK<E> {
    name: String,
    dispatcher: Dispatcher<E>,
}

impl<E: CommandExecutor> TopK<E> {
    pub(crate) fn new(name: String, dispatcher: Dispatcher<E>) -> Self {
        Self { name, dispatcher }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    twin_methods! {
        fn reserve / reserve_async(self, topk: i64, params: Option<TopKParams>) -> ()
            = commands::topk_reserve(&self.name, topk, params);

        /// Each slot holds the item pushed out of the top list, if any.
        fn add / add_async(self, items: impl IntoIterator<Item = impl Into<Arg>>) -> Vec<Option<String>>
            = commands::topk_add(&self.name, items);

        fn incr_by / incr_by_async(self, pairs: &[(&str, i64)]) -> Vec<Option<String>>
            = commands::topk_incrby(&self.name, pairs);

        fn query / query_async(self, items: impl IntoIterator<Item = impl Into<Arg>>) -> Vec<bool>
            = commands::topk_query(&self.name, items);

        fn count / count_async(self, items: impl IntoIterator<Item = impl Into<Arg>>) -> Vec<i64>
            = commands::topk_count(&self.name, items);

        fn list / list_async(self) -> Vec<String>
            = commands::topk_list(&self.name);

        fn list_with_count / list_with_count_async(self) -> Vec<(String, i64)>
            = commands::topk_list_with_count(&self.name);

        fn info / info_async(self) -> TopKFilterInfo
            = commands::topk_info(&self.name);
    }
}
