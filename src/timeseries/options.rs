//! Option objects for TS.* commands.

use crate::args::{Arg, ArgList};
use crate::error::{ModuleError, Result};
use crate::timeseries::keywords::{AggregationType, BucketTimestamp, DuplicatePolicy, TsKeyword};

/// Sample timestamp: server clock (`*`) or explicit milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timestamp {
    #[default]
    Auto,
    At(i64),
}

impl From<Timestamp> for Arg {
    fn from(ts: Timestamp) -> Self {
        match ts {
            Timestamp::Auto => Arg::Token("*"),
            Timestamp::At(ms) => Arg::Int(ms),
        }
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Self::At(ms)
    }
}

/// Range endpoint: `-` (earliest), `+` (latest) or milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBound {
    Earliest,
    Latest,
    At(i64),
}

impl From<TimeBound> for Arg {
    fn from(bound: TimeBound) -> Self {
        match bound {
            TimeBound::Earliest => Arg::Token("-"),
            TimeBound::Latest => Arg::Token("+"),
            TimeBound::At(ms) => Arg::Int(ms),
        }
    }
}

impl From<i64> for TimeBound {
    fn from(ms: i64) -> Self {
        Self::At(ms)
    }
}

/// Bucket alignment for aggregated ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    End,
    At(i64),
}

impl From<Align> for Arg {
    fn from(align: Align) -> Self {
        match align {
            Align::Start => Arg::Token("-"),
            Align::End => Arg::Token("+"),
            Align::At(ms) => Arg::Int(ms),
        }
    }
}

/// `AGGREGATION type bucket_ms`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregation {
    pub kind: AggregationType,
    pub bucket_ms: i64,
}

impl Aggregation {
    pub fn new(kind: AggregationType, bucket_ms: i64) -> Self {
        Self { kind, bucket_ms }
    }

    pub(crate) fn append_to(&self, args: &mut ArgList) -> Result<()> {
        if self.bucket_ms <= 0 {
            return Err(ModuleError::invalid(format!(
                "bucket duration must be positive, got {}",
                self.bucket_ms
            )));
        }
        args.arg(TsKeyword::Aggregation).arg(self.kind).arg(self.bucket_ms);
        Ok(())
    }
}

/// Which command the series options are rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SeriesCommand {
    Create,
    Alter,
    Add,
}

/// Series settings shared by TS.CREATE / TS.ALTER / TS.ADD / TS.INCRBY.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeriesOptions {
    /// Milliseconds; 0 keeps the server default.
    pub retention: i64,
    pub uncompressed: bool,
    /// Bytes; 0 keeps the server default.
    pub chunk_size: i64,
    pub duplicate_policy: Option<DuplicatePolicy>,
    pub labels: Vec<(String, String)>,
}

impl TimeSeriesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn retention(mut self, ms: i64) -> Self {
        self.retention = ms;
        self
    }

    pub fn uncompressed(mut self) -> Self {
        self.uncompressed = true;
        self
    }

    pub fn chunk_size(mut self, bytes: i64) -> Self {
        self.chunk_size = bytes;
        self
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = Some(policy);
        self
    }

    pub fn label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push((name.into(), value.into()));
        self
    }

    /// `[RETENTION r] [UNCOMPRESSED] [CHUNK_SIZE c] [DUPLICATE_POLICY p] [LABELS l v…]`
    ///
    /// TS.ALTER cannot change the encoding, and TS.ADD spells the policy
    /// `ON_DUPLICATE`.
    pub(crate) fn append_to(&self, args: &mut ArgList, command: SeriesCommand) -> Result<()> {
        if self.retention < 0 {
            return Err(ModuleError::invalid("RETENTION must not be negative"));
        }
        if self.chunk_size < 0 {
            return Err(ModuleError::invalid("CHUNK_SIZE must not be negative"));
        }
        args.positive(TsKeyword::Retention, self.retention)
            .flag(self.uncompressed && command != SeriesCommand::Alter, TsKeyword::Uncompressed)
            .positive(TsKeyword::ChunkSize, self.chunk_size);
        let policy_keyword = match command {
            SeriesCommand::Add => TsKeyword::OnDuplicate,
            _ => TsKeyword::DuplicatePolicy,
        };
        args.opt(policy_keyword, self.duplicate_policy);
        if !self.labels.is_empty() {
            args.arg(TsKeyword::Labels);
            for (name, value) in &self.labels {
                args.arg(name).arg(value);
            }
        }
        Ok(())
    }
}

/// `TS.INCRBY` / `TS.DECRBY` extras.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncrArgs {
    pub timestamp: Option<Timestamp>,
    pub options: TimeSeriesOptions,
}

impl IncrArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timestamp(mut self, ts: Timestamp) -> Self {
        self.timestamp = Some(ts);
        self
    }

    pub fn options(mut self, options: TimeSeriesOptions) -> Self {
        self.options = options;
        self
    }

    pub(crate) fn append_to(&self, args: &mut ArgList) -> Result<()> {
        args.opt(TsKeyword::Timestamp, self.timestamp);
        self.options.append_to(args, SeriesCommand::Create)
    }
}

/// Filters and aggregation for TS.RANGE / TS.REVRANGE.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeOptions {
    pub latest: bool,
    pub filter_by_ts: Vec<i64>,
    pub filter_by_value: Option<(f64, f64)>,
    /// 0 returns every sample.
    pub count: i64,
    pub align: Option<Align>,
    pub aggregation: Option<Aggregation>,
    pub bucket_timestamp: Option<BucketTimestamp>,
    pub empty: bool,
}

impl RangeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(mut self) -> Self {
        self.latest = true;
        self
    }

    pub fn filter_by_ts(mut self, timestamps: impl IntoIterator<Item = i64>) -> Self {
        self.filter_by_ts = timestamps.into_iter().collect();
        self
    }

    pub fn filter_by_value(mut self, min: f64, max: f64) -> Self {
        self.filter_by_value = Some((min, max));
        self
    }

    pub fn count(mut self, count: i64) -> Self {
        self.count = count;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = Some(aggregation);
        self
    }

    pub fn bucket_timestamp(mut self, bt: BucketTimestamp) -> Self {
        self.bucket_timestamp = Some(bt);
        self
    }

    pub fn empty(mut self) -> Self {
        self.empty = true;
        self
    }

    /// `[LATEST] [FILTER_BY_TS t…] [FILTER_BY_VALUE min max]`
    pub(crate) fn append_filters(&self, args: &mut ArgList) -> Result<()> {
        args.flag(self.latest, TsKeyword::Latest);
        if !self.filter_by_ts.is_empty() {
            args.arg(TsKeyword::FilterByTs).args(self.filter_by_ts.iter().copied());
        }
        if let Some((min, max)) = self.filter_by_value {
            if min > max {
                return Err(ModuleError::invalid("FILTER_BY_VALUE min exceeds max"));
            }
            args.arg(TsKeyword::FilterByValue).arg(min).arg(max);
        }
        Ok(())
    }

    /// `[COUNT c] [[ALIGN a] AGGREGATION t b [BUCKETTIMESTAMP bt] [EMPTY]]`
    pub(crate) fn append_aggregation(&self, args: &mut ArgList) -> Result<()> {
        if self.count < 0 {
            return Err(ModuleError::invalid("COUNT must not be negative"));
        }
        args.positive(TsKeyword::Count, self.count);
        match &self.aggregation {
            Some(aggregation) => {
                args.opt(TsKeyword::Align, self.align);
                aggregation.append_to(args)?;
                args.opt(TsKeyword::BucketTimestamp, self.bucket_timestamp)
                    .flag(self.empty, TsKeyword::Empty);
            }
            None if self.align.is_some() || self.bucket_timestamp.is_some() || self.empty => {
                return Err(ModuleError::invalid(
                    "ALIGN, BUCKETTIMESTAMP and EMPTY require AGGREGATION",
                ));
            }
            None => {}
        }
        Ok(())
    }
}

/// TS.MRANGE / TS.MREVRANGE options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MRangeOptions {
    pub range: RangeOptions,
    pub with_labels: bool,
    pub selected_labels: Vec<String>,
    pub filters: Vec<String>,
    pub group_by: Option<(String, AggregationType)>,
}

impl MRangeOptions {
    /// At least one `label=value` style filter is required.
    pub fn new<I, S>(filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            filters: filters.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn range(mut self, range: RangeOptions) -> Self {
        self.range = range;
        self
    }

    pub fn with_labels(mut self) -> Self {
        self.with_labels = true;
        self
    }

    pub fn selected_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn group_by(mut self, label: impl Into<String>, reducer: AggregationType) -> Self {
        self.group_by = Some((label.into(), reducer));
        self
    }

    /// `[LATEST] [FILTER_BY_TS…] [FILTER_BY_VALUE…] [WITHLABELS | SELECTED_LABELS l…]
    /// [COUNT c] [[ALIGN a] AGGREGATION…] FILTER f… [GROUPBY l REDUCE r]`
    pub(crate) fn append_to(&self, args: &mut ArgList) -> Result<()> {
        if self.filters.is_empty() {
            return Err(ModuleError::invalid("FILTER must not be empty"));
        }
        if self.with_labels && !self.selected_labels.is_empty() {
            return Err(ModuleError::invalid("WITHLABELS and SELECTED_LABELS are exclusive"));
        }
        self.range.append_filters(args)?;
        args.flag(self.with_labels, TsKeyword::WithLabels);
        if !self.selected_labels.is_empty() {
            args.arg(TsKeyword::SelectedLabels).args(self.selected_labels.iter());
        }
        self.range.append_aggregation(args)?;
        args.arg(TsKeyword::Filter).args(self.filters.iter());
        if let Some((label, reducer)) = &self.group_by {
            args.arg(TsKeyword::GroupBy)
                .arg(label)
                .arg(TsKeyword::Reduce)
                .arg(*reducer);
        }
        Ok(())
    }
}
