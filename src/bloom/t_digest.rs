use crate::bloom::commands;
use crate::bloom::info::TDigestInfo;
use crate::bloom::options::TDigestMergeOptions;
use crate::client::{twin_methods, Dispatcher};
use crate::executor::CommandExecutor;

/// t-digest quantile sketch stored under one key.
pub struct TDigest<E> {
    name: String,
    dispatcher: Dispatcher<E>,
}

impl<E: CommandExecutor> TDigest<E> {
    pub(crate) fn new(name: String, dispatcher: Dispatcher<E>) -> Self {
        Self { name, dispatcher }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    twin_methods! {
        fn create / create_async(self, compression: Option<i64>) -> ()
            = commands::tdigest_create(&self.name, compression);

        fn reset / reset_async(self) -> ()
            = commands::tdigest_reset(&self.name);

        fn add / add_async(self, values: &[f64]) -> ()
            = commands::tdigest_add(&self.name, values);

        /// Merge `sources` into this digest.
        fn merge / merge_async(self, sources: &[&str], options: TDigestMergeOptions) -> ()
            = commands::tdigest_merge(&self.name, sources, &options);

        fn min / min_async(self) -> f64
            = commands::tdigest_min(&self.name);

        fn max / max_async(self) -> f64
            = commands::tdigest_max(&self.name);

        fn quantile / quantile_async(self, quantiles: &[f64]) -> Vec<f64>
            = commands::tdigest_quantile(&self.name, quantiles);

        fn cdf / cdf_async(self, values: &[f64]) -> Vec<f64>
            = commands::tdigest_cdf(&self.name, values);

        /// Mean of the observations between the `low` and `high` quantiles.
        fn trimmed_mean / trimmed_mean_async(self, low: f64, high: f64) -> f64
            = commands::tdigest_trimmed_mean(&self.name, low, high);

        fn rank / rank_async(self, values: &[f64]) -> Vec<i64>
            = commands::tdigest_rank(&self.name, values);

        fn rev_rank / rev_rank_async(self, values: &[f64]) -> Vec<i64>
            = commands::tdigest_revrank(&self.name, values);

        fn by_rank / by_rank_async(self, ranks: &[i64]) -> Vec<f64>
            = commands::tdigest_byrank(&self.name, ranks);

        fn by_rev_rank / by_rev_rank_async(self, ranks: &[i64]) -> Vec<f64>
            = commands::tdigest_byrevrank(&self.name, ranks);

        fn info / info_async(self) -> TDigestInfo
            = commands::tdigest_info(&self.name);
    }
}
