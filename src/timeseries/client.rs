use crate::client::{twin_methods, Dispatcher};
use crate::executor::CommandExecutor;
use crate::timeseries::commands;
use crate::timeseries::options::{
    Aggregation, IncrArgs, MRangeOptions, RangeOptions, TimeBound, TimeSeriesOptions, Timestamp,
};
use crate::timeseries::results::{Sample, TimeSeries, TimeSeriesInfo};

/// RedisTimeSeries façade. Keys are passed per call since most commands
/// span several series.
pub struct RedisTimeSeries<E> {
    dispatcher: Dispatcher<E>,
}

impl<E: CommandExecutor> RedisTimeSeries<E> {
    pub(crate) fn new(dispatcher: Dispatcher<E>) -> Self {
        Self { dispatcher }
    }

    twin_methods! {
        fn create / create_async(self, key: &str, options: &TimeSeriesOptions) -> ()
            = commands::ts_create(key, options);

        fn alter / alter_async(self, key: &str, options: &TimeSeriesOptions) -> ()
            = commands::ts_alter(key, options);

        /// Append one sample, creating the series when missing. Returns the stored timestamp.
        fn add / add_async(self, key: &str, timestamp: Timestamp, value: f64, options: &TimeSeriesOptions) -> i64
            = commands::ts_add(key, timestamp, value, options);

        fn madd / madd_async(self, samples: &[(&str, Timestamp, f64)]) -> Vec<i64>
            = commands::ts_madd(samples);

        fn incr_by / incr_by_async(self, key: &str, value: f64, options: &IncrArgs) -> i64
            = commands::ts_incr_by(key, value, options);

        fn decr_by / decr_by_async(self, key: &str, value: f64, options: &IncrArgs) -> i64
            = commands::ts_decr_by(key, value, options);

        /// Compact `source` into `dest` with the given aggregation.
        fn create_rule / create_rule_async(self, source: &str, dest: &str, aggregation: Aggregation) -> ()
            = commands::ts_create_rule(source, dest, aggregation);

        fn delete_rule / delete_rule_async(self, source: &str, dest: &str) -> ()
            = commands::ts_delete_rule(source, dest);

        /// Samples removed.
        fn del / del_async(self, key: &str, from: TimeBound, to: TimeBound) -> i64
            = commands::ts_del(key, from, to);

        fn range / range_async(self, key: &str, from: TimeBound, to: TimeBound, options: &RangeOptions) -> Vec<Sample>
            = commands::ts_range(key, from, to, options);

        fn rev_range / rev_range_async(self, key: &str, from: TimeBound, to: TimeBound, options: &RangeOptions) -> Vec<Sample>
            = commands::ts_revrange(key, from, to, options);

        fn mrange / mrange_async(self, from: TimeBound, to: TimeBound, options: &MRangeOptions) -> Vec<TimeSeries>
            = commands::ts_mrange(from, to, options);

        fn mrev_range / mrev_range_async(self, from: TimeBound, to: TimeBound, options: &MRangeOptions) -> Vec<TimeSeries>
            = commands::ts_mrevrange(from, to, options);

        /// Latest sample; `None` for an empty series.
        fn get / get_async(self, key: &str, latest: bool) -> Option<Sample>
            = commands::ts_get(key, latest);

        /// Latest sample of every series matching `filters`.
        fn mget / mget_async(self, with_labels: bool, filters: &[&str]) -> Vec<TimeSeries>
            = commands::ts_mget(with_labels, filters);

        fn info / info_async(self, key: &str) -> TimeSeriesInfo
            = commands::ts_info(key, false);

        /// `TS.INFO` with per-chunk detail from `DEBUG`.
        fn debug_info / debug_info_async(self, key: &str) -> TimeSeriesInfo
            = commands::ts_info(key, true);

        /// Keys of series matching `filters`.
        fn query_index / query_index_async(self, filters: &[&str]) -> Vec<String>
            = commands::ts_queryindex(filters);
    }
}
