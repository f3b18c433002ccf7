//! RedisTimeSeries: series management, sample ingestion, range queries and
//! compaction rules.

pub mod commands;
pub mod keywords;
pub mod options;
pub mod results;

mod client;

pub use client::RedisTimeSeries;
pub use keywords::{AggregationType, BucketTimestamp, DuplicatePolicy, TsKeyword};
pub use options::{
    Aggregation, Align, IncrArgs, MRangeOptions, RangeOptions, TimeBound, TimeSeriesOptions, Timestamp,
};
pub use results::{Rule, Sample, TimeSeries, TimeSeriesInfo};
