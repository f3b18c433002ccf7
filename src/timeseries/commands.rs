//! Request builders for TS.*.

use crate::args::ArgList;
use crate::command::{CommandSpec, Request};
use crate::error::{require_key, ModuleError, Result};
use crate::reply::decode;
use crate::timeseries::keywords::TsKeyword;
use crate::timeseries::options::*;
use crate::timeseries::results::{self, Sample, TimeSeries, TimeSeriesInfo};

fn key_args(key: &str) -> Result<ArgList> {
    require_key("key", key)?;
    let mut args = ArgList::new();
    args.arg(key);
    Ok(args)
}

fn filter_args<S: AsRef<str>>(args: &mut ArgList, filters: &[S]) -> Result<()> {
    if filters.is_empty() {
        return Err(ModuleError::invalid("filters must not be empty"));
    }
    args.arg(TsKeyword::Filter).args(filters.iter().map(|f| f.as_ref()));
    Ok(())
}

const CREATE: CommandSpec<()> = CommandSpec::write("TS.CREATE", decode::ok);
const ALTER: CommandSpec<()> = CommandSpec::write("TS.ALTER", decode::ok);
const ADD: CommandSpec<i64> = CommandSpec::write("TS.ADD", decode::integer);
const MADD: CommandSpec<Vec<i64>> = CommandSpec::write("TS.MADD", decode::integer_list);
const INCRBY: CommandSpec<i64> = CommandSpec::write("TS.INCRBY", decode::integer);
const DECRBY: CommandSpec<i64> = CommandSpec::write("TS.DECRBY", decode::integer);
const CREATERULE: CommandSpec<()> = CommandSpec::write("TS.CREATERULE", decode::ok);
const DELETERULE: CommandSpec<()> = CommandSpec::write("TS.DELETERULE", decode::ok);
const DEL: CommandSpec<i64> = CommandSpec::write("TS.DEL", decode::integer);
const RANGE: CommandSpec<Vec<Sample>> = CommandSpec::read("TS.RANGE", results::samples);
const REVRANGE: CommandSpec<Vec<Sample>> = CommandSpec::read("TS.REVRANGE", results::samples);
const MRANGE: CommandSpec<Vec<TimeSeries>> = CommandSpec::read("TS.MRANGE", results::mrange);
const MREVRANGE: CommandSpec<Vec<TimeSeries>> = CommandSpec::read("TS.MREVRANGE", results::mrange);
const GET: CommandSpec<Option<Sample>> = CommandSpec::read("TS.GET", results::optional_sample);
const MGET: CommandSpec<Vec<TimeSeries>> = CommandSpec::read("TS.MGET", results::mget);
const INFO: CommandSpec<TimeSeriesInfo> = CommandSpec::read("TS.INFO", results::info);
const QUERYINDEX: CommandSpec<Vec<String>> = CommandSpec::read("TS.QUERYINDEX", decode::string_list);

/// `TS.CREATE key [RETENTION r] [UNCOMPRESSED] [CHUNK_SIZE c] [DUPLICATE_POLICY p] [LABELS l v…]`
pub fn ts_create(key: &str, options: &TimeSeriesOptions) -> Result<Request<()>> {
    let mut args = key_args(key)?;
    options.append_to(&mut args, SeriesCommand::Create)?;
    Ok(CREATE.request(args))
}

pub fn ts_alter(key: &str, options: &TimeSeriesOptions) -> Result<Request<()>> {
    let mut args = key_args(key)?;
    options.append_to(&mut args, SeriesCommand::Alter)?;
    Ok(ALTER.request(args))
}

/// `TS.ADD key ts value [options]` → the stored timestamp.
pub fn ts_add(key: &str, timestamp: Timestamp, value: f64, options: &TimeSeriesOptions) -> Result<Request<i64>> {
    let mut args = key_args(key)?;
    args.arg(timestamp).arg(value);
    options.append_to(&mut args, SeriesCommand::Add)?;
    Ok(ADD.request(args))
}

/// `TS.MADD key ts value …`
pub fn ts_madd<S: AsRef<str>>(samples: &[(S, Timestamp, f64)]) -> Result<Request<Vec<i64>>> {
    if samples.is_empty() {
        return Err(ModuleError::invalid("samples must not be empty"));
    }
    let mut args = ArgList::with_capacity(samples.len() * 3);
    for (key, timestamp, value) in samples {
        require_key("key", key.as_ref())?;
        args.arg(key.as_ref()).arg(*timestamp).arg(*value);
    }
    Ok(MADD.request(args))
}

pub fn ts_incr_by(key: &str, value: f64, options: &IncrArgs) -> Result<Request<i64>> {
    let mut args = key_args(key)?;
    args.arg(value);
    options.append_to(&mut args)?;
    Ok(INCRBY.request(args))
}

pub fn ts_decr_by(key: &str, value: f64, options: &IncrArgs) -> Result<Request<i64>> {
    let mut args = key_args(key)?;
    args.arg(value);
    options.append_to(&mut args)?;
    Ok(DECRBY.request(args))
}

/// `TS.CREATERULE src dst AGGREGATION type bucket`
pub fn ts_create_rule(source: &str, dest: &str, aggregation: Aggregation) -> Result<Request<()>> {
    require_key("destination key", dest)?;
    let mut args = key_args(source)?;
    args.arg(dest);
    aggregation.append_to(&mut args)?;
    Ok(CREATERULE.request(args))
}

pub fn ts_delete_rule(source: &str, dest: &str) -> Result<Request<()>> {
    require_key("destination key", dest)?;
    let mut args = key_args(source)?;
    args.arg(dest);
    Ok(DELETERULE.request(args))
}

/// `TS.DEL key from to` → samples removed.
pub fn ts_del(key: &str, from: TimeBound, to: TimeBound) -> Result<Request<i64>> {
    let mut args = key_args(key)?;
    args.arg(from).arg(to);
    Ok(DEL.request(args))
}

fn range_args(key: &str, from: TimeBound, to: TimeBound, options: &RangeOptions) -> Result<ArgList> {
    let mut args = key_args(key)?;
    args.arg(from).arg(to);
    options.append_filters(&mut args)?;
    options.append_aggregation(&mut args)?;
    Ok(args)
}

pub fn ts_range(key: &str, from: TimeBound, to: TimeBound, options: &RangeOptions) -> Result<Request<Vec<Sample>>> {
    Ok(RANGE.request(range_args(key, from, to, options)?))
}

pub fn ts_revrange(
    key: &str,
    from: TimeBound,
    to: TimeBound,
    options: &RangeOptions,
) -> Result<Request<Vec<Sample>>> {
    Ok(REVRANGE.request(range_args(key, from, to, options)?))
}

fn mrange_args(from: TimeBound, to: TimeBound, options: &MRangeOptions) -> Result<ArgList> {
    let mut args = ArgList::new();
    args.arg(from).arg(to);
    options.append_to(&mut args)?;
    Ok(args)
}

pub fn ts_mrange(from: TimeBound, to: TimeBound, options: &MRangeOptions) -> Result<Request<Vec<TimeSeries>>> {
    Ok(MRANGE.request(mrange_args(from, to, options)?))
}

pub fn ts_mrevrange(from: TimeBound, to: TimeBound, options: &MRangeOptions) -> Result<Request<Vec<TimeSeries>>> {
    Ok(MREVRANGE.request(mrange_args(from, to, options)?))
}

/// `TS.GET key [LATEST]`; `None` for an empty series.
pub fn ts_get(key: &str, latest: bool) -> Result<Request<Option<Sample>>> {
    let mut args = key_args(key)?;
    args.flag(latest, TsKeyword::Latest);
    Ok(GET.request(args))
}

/// `TS.MGET [WITHLABELS] FILTER f…`
pub fn ts_mget<S: AsRef<str>>(with_labels: bool, filters: &[S]) -> Result<Request<Vec<TimeSeries>>> {
    let mut args = ArgList::new();
    args.flag(with_labels, TsKeyword::WithLabels);
    filter_args(&mut args, filters)?;
    Ok(MGET.request(args))
}

/// `TS.INFO key [DEBUG]`
pub fn ts_info(key: &str, debug: bool) -> Result<Request<TimeSeriesInfo>> {
    let mut args = key_args(key)?;
    args.flag(debug, TsKeyword::Debug);
    Ok(INFO.request(args))
}

/// `TS.QUERYINDEX f…`
pub fn ts_queryindex<S: AsRef<str>>(filters: &[S]) -> Result<Request<Vec<String>>> {
    if filters.is_empty() {
        return Err(ModuleError::invalid("filters must not be empty"));
    }
    let mut args = ArgList::new();
    args.args(filters.iter().map(|f| f.as_ref()));
    Ok(QUERYINDEX.request(args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::Reply;
    use crate::timeseries::keywords::AggregationType;
    use pretty_assertions::assert_eq;

    fn wire<T: 'static>(req: &Request<T>) -> Vec<String> {
        req.command().to_strings()
    }

    #[test]
    fn add_with_auto_timestamp() {
        let req = ts_add("temp", Timestamp::Auto, 21.5, &TimeSeriesOptions::new()).unwrap();
        assert_eq!(wire(&req), vec!["TS.ADD", "temp", "*", "21.5"]);
        assert_eq!(req.decode(Reply::Integer(1_700_000_000_000)).unwrap(), 1_700_000_000_000);
    }

    #[test]
    fn madd_requires_samples() {
        assert!(ts_madd::<&str>(&[]).unwrap_err().is_invalid_argument());
        let req = ts_madd(&[("a", Timestamp::At(1), 1.0), ("b", Timestamp::Auto, 2.0)]).unwrap();
        assert_eq!(wire(&req), vec!["TS.MADD", "a", "1", "1", "b", "*", "2"]);
    }

    #[test]
    fn incr_with_timestamp() {
        let req = ts_incr_by("c", 1.0, &IncrArgs::new().timestamp(Timestamp::At(10))).unwrap();
        assert_eq!(wire(&req), vec!["TS.INCRBY", "c", "1", "TIMESTAMP", "10"]);
    }

    #[test]
    fn rules() {
        let req = ts_create_rule("t", "t:avg", Aggregation::new(AggregationType::Avg, 60_000)).unwrap();
        assert_eq!(wire(&req), vec!["TS.CREATERULE", "t", "t:avg", "AGGREGATION", "avg", "60000"]);
        assert!(ts_create_rule("t", "t:avg", Aggregation::new(AggregationType::Avg, 0))
            .unwrap_err()
            .is_invalid_argument());
        assert_eq!(wire(&ts_delete_rule("t", "t:avg").unwrap()), vec!["TS.DELETERULE", "t", "t:avg"]);
    }

    #[test]
    fn range_bounds() {
        let options = RangeOptions::new().filter_by_ts([1, 2]).count(5);
        let req = ts_range("t", TimeBound::Earliest, TimeBound::Latest, &options).unwrap();
        assert_eq!(
            wire(&req),
            vec!["TS.RANGE", "t", "-", "+", "FILTER_BY_TS", "1", "2", "COUNT", "5"]
        );
        let req = ts_revrange("t", TimeBound::At(0), TimeBound::At(100), &RangeOptions::new()).unwrap();
        assert_eq!(wire(&req), vec!["TS.REVRANGE", "t", "0", "100"]);
    }

    #[test]
    fn mrange_and_mget() {
        let options = MRangeOptions::new(["area=north"]).with_labels();
        assert_eq!(
            wire(&ts_mrevrange(TimeBound::Earliest, TimeBound::Latest, &options).unwrap()),
            vec!["TS.MREVRANGE", "-", "+", "WITHLABELS", "FILTER", "area=north"]
        );
        assert_eq!(
            wire(&ts_mget(true, &["area=north", "floor!="]).unwrap()),
            vec!["TS.MGET", "WITHLABELS", "FILTER", "area=north", "floor!="]
        );
        assert!(ts_mget::<&str>(false, &[]).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn get_info_queryindex() {
        assert_eq!(wire(&ts_get("t", true).unwrap()), vec!["TS.GET", "t", "LATEST"]);
        assert_eq!(wire(&ts_info("t", false).unwrap()), vec!["TS.INFO", "t"]);
        assert_eq!(wire(&ts_info("t", true).unwrap()), vec!["TS.INFO", "t", "DEBUG"]);
        assert_eq!(wire(&ts_queryindex(&["a=b"]).unwrap()), vec!["TS.QUERYINDEX", "a=b"]);
        assert_eq!(wire(&ts_del("t", TimeBound::At(1), TimeBound::At(2)).unwrap()), vec!["TS.DEL", "t", "1", "2"]);
    }
}
