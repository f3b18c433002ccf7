use crate::args::Arg;
use crate::bloom::commands;
use crate::bloom::info::CountMinSketchInfo;
use crate::client::{twin_methods, Dispatcher};
use crate::executor::CommandExecutor;

/// Count-min sketch stored under one key.
pub struct CountMinSketch<E> {
    name: String,
    dispatcher: Dispatcher<E>,
}

impl<E: CommandExecutor> CountMinSketch<E> {
    pub(crate) fn new(name: String, dispatcher: Dispatcher<E>) -> Self {
        Self { name, dispatcher }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    twin_methods! {
        fn init_by_dim / init_by_dim_async(self, width: i64, depth: i64) -> ()
            = commands::cms_initbydim(&self.name, width, depth);

        /// Size the sketch from an error bound and a certainty, both in (0, 1).
        fn init_by_prob / init_by_prob_async(self, error: f64, probability: f64) -> ()
            = commands::cms_initbyprob(&self.name, error, probability);

        /// Returns the updated count of each item.
        fn incr_by / incr_by_async(self, pairs: &[(&str, i64)]) -> Vec<i64>
            = commands::cms_incrby(&self.name, pairs);

        fn incr_by_parallel / incr_by_parallel_async(self, items: &[&str], increments: &[i64]) -> Vec<i64>
            = commands::cms_incrby_parallel(&self.name, items, increments);

        fn query / query_async(self, items: impl IntoIterator<Item = impl Into<Arg>>) -> Vec<i64>
            = commands::cms_query(&self.name, items);

        /// Merge `sources` into this sketch, optionally weighting each one.
        fn merge / merge_async(self, sources: &[&str], weights: Option<&[i64]>) -> ()
            = commands::cms_merge(&self.name, sources, weights);

        fn info / info_async(self) -> CountMinSketchInfo
            = commands::cms_info(&self.name);
    }
}
