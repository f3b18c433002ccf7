//! Request builders for BF / CF / CMS / TOPK / TDIGEST.
//!
//! Every builder validates its input and returns a [`Request`]; nothing is
//! sent here.

use bytes::Bytes;

use crate::args::{non_empty, Arg, ArgList};
use crate::bloom::info::{self, *};
use crate::bloom::keywords::BloomKeyword;
use crate::bloom::options::*;
use crate::command::{CommandSpec, Request};
use crate::error::{require_key, ModuleError, Result};
use crate::reply::decode;
use crate::reply::Reply;

fn key_args(key: &str) -> Result<ArgList> {
    require_key("key", key)?;
    let mut args = ArgList::new();
    args.arg(key);
    Ok(args)
}

fn require_probability(what: &str, value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ModuleError::invalid(format!("{what} must be in (0, 1), got {value}")))
    }
}

fn require_positive(what: &str, value: i64) -> Result<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(ModuleError::invalid(format!("{what} must be positive, got {value}")))
    }
}

/// `key item…`, with at least one item.
fn key_items<I, T>(key: &str, items: I) -> Result<ArgList>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    let mut args = key_args(key)?;
    args.args(non_empty("items", items)?);
    Ok(args)
}

/// `key item1 n1 item2 n2 …`
fn key_increments<S: AsRef<str>>(key: &str, pairs: &[(S, i64)]) -> Result<ArgList> {
    if pairs.is_empty() {
        return Err(ModuleError::invalid("items must not be empty"));
    }
    let mut args = key_args(key)?;
    for (item, increment) in pairs {
        args.arg(item.as_ref()).arg(*increment);
    }
    Ok(args)
}

/// `dest numkeys src…`
fn dest_sources<S: AsRef<str>>(dest: &str, sources: &[S]) -> Result<ArgList> {
    if sources.is_empty() {
        return Err(ModuleError::invalid("sources must not be empty"));
    }
    let mut args = key_args(dest)?;
    args.arg(sources.len());
    for source in sources {
        require_key("source key", source.as_ref())?;
        args.arg(source.as_ref());
    }
    Ok(args)
}

// ── Bloom filter ───────────────────────────────────────────────────

const BF_RESERVE: CommandSpec<()> = CommandSpec::write("BF.RESERVE", decode::ok);
const BF_ADD: CommandSpec<bool> = CommandSpec::write("BF.ADD", decode::boolean);
const BF_MADD: CommandSpec<Vec<bool>> = CommandSpec::write("BF.MADD", decode::boolean_list);
const BF_INSERT: CommandSpec<Vec<bool>> = CommandSpec::write("BF.INSERT", decode::boolean_list);
const BF_EXISTS: CommandSpec<bool> = CommandSpec::read("BF.EXISTS", decode::boolean);
const BF_MEXISTS: CommandSpec<Vec<bool>> = CommandSpec::read("BF.MEXISTS", decode::boolean_list);
const BF_INFO: CommandSpec<BloomFilterInfo> = CommandSpec::read("BF.INFO", info::bloom_filter_info);
const BF_CARD: CommandSpec<i64> = CommandSpec::read("BF.CARD", decode::integer);
const BF_SCANDUMP: CommandSpec<ChunkInfo> = CommandSpec::read("BF.SCANDUMP", info::chunk_info);
const BF_LOADCHUNK: CommandSpec<()> = CommandSpec::write("BF.LOADCHUNK", decode::ok);

/// `BF.RESERVE key error_rate capacity [EXPANSION n] [NONSCALING]`
pub fn bf_reserve(
    key: &str,
    error_rate: f64,
    capacity: i64,
    options: &BloomReserveOptions,
) -> Result<Request<()>> {
    require_probability("error_rate", error_rate)?;
    require_positive("capacity", capacity)?;
    let mut args = key_args(key)?;
    args.arg(error_rate).arg(capacity).append(options.build());
    Ok(BF_RESERVE.request(args))
}

pub fn bf_add(key: &str, item: impl Into<Arg>) -> Result<Request<bool>> {
    let mut args = key_args(key)?;
    args.arg(item);
    Ok(BF_ADD.request(args))
}

pub fn bf_madd<I, T>(key: &str, items: I) -> Result<Request<Vec<bool>>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    Ok(BF_MADD.request(key_items(key, items)?))
}

/// `BF.INSERT key [CAPACITY c] [ERROR e] [EXPANSION x] [NOCREATE] [NONSCALING] ITEMS i…`
pub fn bf_insert<I, T>(key: &str, options: &InsertArgs, items: I) -> Result<Request<Vec<bool>>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    let items = non_empty("items", items)?;
    let mut args = key_args(key)?;
    args.append(options.build()).arg(BloomKeyword::Items).args(items);
    Ok(BF_INSERT.request(args))
}

pub fn bf_exists(key: &str, item: impl Into<Arg>) -> Result<Request<bool>> {
    let mut args = key_args(key)?;
    args.arg(item);
    Ok(BF_EXISTS.request(args))
}

pub fn bf_mexists<I, T>(key: &str, items: I) -> Result<Request<Vec<bool>>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    Ok(BF_MEXISTS.request(key_items(key, items)?))
}

pub fn bf_info(key: &str) -> Result<Request<BloomFilterInfo>> {
    Ok(BF_INFO.request(key_args(key)?))
}

pub fn bf_card(key: &str) -> Result<Request<i64>> {
    Ok(BF_CARD.request(key_args(key)?))
}

pub fn bf_scandump(key: &str, iterator: i64) -> Result<Request<ChunkInfo>> {
    let mut args = key_args(key)?;
    args.arg(iterator);
    Ok(BF_SCANDUMP.request(args))
}

pub fn bf_loadchunk(key: &str, iterator: i64, data: Bytes) -> Result<Request<()>> {
    let mut args = key_args(key)?;
    args.arg(iterator).arg(data);
    Ok(BF_LOADCHUNK.request(args))
}

// ── Cuckoo filter ──────────────────────────────────────────────────

const CF_RESERVE: CommandSpec<()> = CommandSpec::write("CF.RESERVE", decode::ok);
const CF_ADD: CommandSpec<bool> = CommandSpec::write("CF.ADD", decode::boolean);
const CF_ADDNX: CommandSpec<bool> = CommandSpec::write("CF.ADDNX", decode::boolean);
const CF_INSERT: CommandSpec<Vec<i64>> = CommandSpec::write("CF.INSERT", decode::integer_list);
const CF_INSERTNX: CommandSpec<Vec<i64>> = CommandSpec::write("CF.INSERTNX", decode::integer_list);
const CF_EXISTS: CommandSpec<bool> = CommandSpec::read("CF.EXISTS", decode::boolean);
const CF_MEXISTS: CommandSpec<Vec<bool>> = CommandSpec::read("CF.MEXISTS", decode::boolean_list);
const CF_DEL: CommandSpec<bool> = CommandSpec::write("CF.DEL", decode::boolean);
const CF_COUNT: CommandSpec<i64> = CommandSpec::read("CF.COUNT", decode::integer);
const CF_SCANDUMP: CommandSpec<ChunkInfo> = CommandSpec::read("CF.SCANDUMP", info::chunk_info);
const CF_LOADCHUNK: CommandSpec<()> = CommandSpec::write("CF.LOADCHUNK", decode::ok);
const CF_INFO: CommandSpec<CuckooFilterInfo> =
    CommandSpec::read("CF.INFO", info::cuckoo_filter_info);

/// `CF.RESERVE key capacity [BUCKETSIZE b] [MAXITERATIONS m] [EXPANSION e]`
pub fn cf_reserve(key: &str, capacity: i64, options: &CuckooReserveOptions) -> Result<Request<()>> {
    require_positive("capacity", capacity)?;
    let mut args = key_args(key)?;
    args.arg(capacity).append(options.build());
    Ok(CF_RESERVE.request(args))
}

pub fn cf_add(key: &str, item: impl Into<Arg>) -> Result<Request<bool>> {
    let mut args = key_args(key)?;
    args.arg(item);
    Ok(CF_ADD.request(args))
}

pub fn cf_addnx(key: &str, item: impl Into<Arg>) -> Result<Request<bool>> {
    let mut args = key_args(key)?;
    args.arg(item);
    Ok(CF_ADDNX.request(args))
}

fn cf_insert_args<I, T>(key: &str, options: &CuckooInsertArgs, items: I) -> Result<ArgList>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    let items = non_empty("items", items)?;
    let mut args = key_args(key)?;
    args.append(options.build()).arg(BloomKeyword::Items).args(items);
    Ok(args)
}

/// `CF.INSERT key [CAPACITY c] [NOCREATE] ITEMS i…`; per item `1` added, `-1` full.
pub fn cf_insert<I, T>(key: &str, options: &CuckooInsertArgs, items: I) -> Result<Request<Vec<i64>>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    Ok(CF_INSERT.request(cf_insert_args(key, options, items)?))
}

/// `CF.INSERTNX …`; per item `1` added, `0` already present, `-1` full.
pub fn cf_insertnx<I, T>(
    key: &str,
    options: &CuckooInsertArgs,
    items: I,
) -> Result<Request<Vec<i64>>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    Ok(CF_INSERTNX.request(cf_insert_args(key, options, items)?))
}

pub fn cf_exists(key: &str, item: impl Into<Arg>) -> Result<Request<bool>> {
    let mut args = key_args(key)?;
    args.arg(item);
    Ok(CF_EXISTS.request(args))
}

pub fn cf_mexists<I, T>(key: &str, items: I) -> Result<Request<Vec<bool>>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    Ok(CF_MEXISTS.request(key_items(key, items)?))
}

pub fn cf_del(key: &str, item: impl Into<Arg>) -> Result<Request<bool>> {
    let mut args = key_args(key)?;
    args.arg(item);
    Ok(CF_DEL.request(args))
}

pub fn cf_count(key: &str, item: impl Into<Arg>) -> Result<Request<i64>> {
    let mut args = key_args(key)?;
    args.arg(item);
    Ok(CF_COUNT.request(args))
}

pub fn cf_scandump(key: &str, iterator: i64) -> Result<Request<ChunkInfo>> {
    let mut args = key_args(key)?;
    args.arg(iterator);
    Ok(CF_SCANDUMP.request(args))
}

pub fn cf_loadchunk(key: &str, iterator: i64, data: Bytes) -> Result<Request<()>> {
    let mut args = key_args(key)?;
    args.arg(iterator).arg(data);
    Ok(CF_LOADCHUNK.request(args))
}

pub fn cf_info(key: &str) -> Result<Request<CuckooFilterInfo>> {
    Ok(CF_INFO.request(key_args(key)?))
}

// ── Count-min sketch ───────────────────────────────────────────────

const CMS_INITBYDIM: CommandSpec<()> = CommandSpec::write("CMS.INITBYDIM", decode::ok);
const CMS_INITBYPROB: CommandSpec<()> = CommandSpec::write("CMS.INITBYPROB", decode::ok);
const CMS_INCRBY: CommandSpec<Vec<i64>> = CommandSpec::write("CMS.INCRBY", decode::integer_list);
const CMS_QUERY: CommandSpec<Vec<i64>> = CommandSpec::read("CMS.QUERY", decode::integer_list);
const CMS_MERGE: CommandSpec<()> = CommandSpec::write("CMS.MERGE", decode::ok);
const CMS_INFO: CommandSpec<CountMinSketchInfo> =
    CommandSpec::read("CMS.INFO", info::count_min_sketch_info);

pub fn cms_initbydim(key: &str, width: i64, depth: i64) -> Result<Request<()>> {
    require_positive("width", width)?;
    require_positive("depth", depth)?;
    let mut args = key_args(key)?;
    args.arg(width).arg(depth);
    Ok(CMS_INITBYDIM.request(args))
}

pub fn cms_initbyprob(key: &str, error: f64, probability: f64) -> Result<Request<()>> {
    require_probability("error", error)?;
    require_probability("probability", probability)?;
    let mut args = key_args(key)?;
    args.arg(error).arg(probability);
    Ok(CMS_INITBYPROB.request(args))
}

/// `CMS.INCRBY key item1 n1 …`
pub fn cms_incrby<S: AsRef<str>>(key: &str, pairs: &[(S, i64)]) -> Result<Request<Vec<i64>>> {
    Ok(CMS_INCRBY.request(key_increments(key, pairs)?))
}

/// [`cms_incrby`] from parallel item / increment slices.
pub fn cms_incrby_parallel<S: AsRef<str>>(
    key: &str,
    items: &[S],
    increments: &[i64],
) -> Result<Request<Vec<i64>>> {
    if items.len() != increments.len() {
        return Err(ModuleError::invalid(format!(
            "items and increments differ in length ({} vs {})",
            items.len(),
            increments.len()
        )));
    }
    let pairs: Vec<(&str, i64)> = items
        .iter()
        .map(AsRef::as_ref)
        .zip(increments.iter().copied())
        .collect();
    cms_incrby(key, &pairs)
}

pub fn cms_query<I, T>(key: &str, items: I) -> Result<Request<Vec<i64>>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    Ok(CMS_QUERY.request(key_items(key, items)?))
}

/// `CMS.MERGE dest numkeys src… [WEIGHTS w…]`
pub fn cms_merge<S: AsRef<str>>(
    dest: &str,
    sources: &[S],
    weights: Option<&[i64]>,
) -> Result<Request<()>> {
    let mut args = dest_sources(dest, sources)?;
    if let Some(weights) = weights {
        if weights.len() != sources.len() {
            return Err(ModuleError::invalid(format!(
                "weights and sources differ in length ({} vs {})",
                weights.len(),
                sources.len()
            )));
        }
        args.arg(BloomKeyword::Weights).args(weights.iter().copied());
    }
    Ok(CMS_MERGE.request(args))
}

pub fn cms_info(key: &str) -> Result<Request<CountMinSketchInfo>> {
    Ok(CMS_INFO.request(key_args(key)?))
}

// ── Top-K ──────────────────────────────────────────────────────────

const TOPK_RESERVE: CommandSpec<()> = CommandSpec::write("TOPK.RESERVE", decode::ok);
const TOPK_ADD: CommandSpec<Vec<Option<String>>> =
    CommandSpec::write("TOPK.ADD", decode::optional_string_list);
const TOPK_INCRBY: CommandSpec<Vec<Option<String>>> =
    CommandSpec::write("TOPK.INCRBY", decode::optional_string_list);
const TOPK_QUERY: CommandSpec<Vec<bool>> = CommandSpec::read("TOPK.QUERY", decode::boolean_list);
const TOPK_COUNT: CommandSpec<Vec<i64>> = CommandSpec::read("TOPK.COUNT", decode::integer_list);
const TOPK_LIST: CommandSpec<Vec<String>> = CommandSpec::read("TOPK.LIST", decode::string_list);
const TOPK_LIST_WITHCOUNT: CommandSpec<Vec<(String, i64)>> =
    CommandSpec::read("TOPK.LIST", items_with_count);
const TOPK_INFO: CommandSpec<TopKFilterInfo> = CommandSpec::read("TOPK.INFO", info::top_k_info);

/// `[item1, count1, item2, count2, …]`
fn items_with_count(reply: Reply) -> Result<Vec<(String, i64)>> {
    decode::flat_pairs(reply)?
        .into_iter()
        .map(|(item, count)| Ok((item, decode::expect_i64(&count, "count")?)))
        .collect()
}

/// `TOPK.RESERVE key topk [width depth decay]`
pub fn topk_reserve(key: &str, topk: i64, params: Option<TopKParams>) -> Result<Request<()>> {
    require_positive("topk", topk)?;
    let mut args = key_args(key)?;
    args.arg(topk);
    if let Some(params) = params {
        require_positive("width", params.width)?;
        require_positive("depth", params.depth)?;
        if !(params.decay > 0.0 && params.decay <= 1.0) {
            return Err(ModuleError::invalid(format!(
                "decay must be in (0, 1], got {}",
                params.decay
            )));
        }
        args.arg(params.width).arg(params.depth).arg(params.decay);
    }
    Ok(TOPK_RESERVE.request(args))
}

/// `TOPK.ADD key item…`; each slot holds the item expelled from the list, if any.
pub fn topk_add<I, T>(key: &str, items: I) -> Result<Request<Vec<Option<String>>>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    Ok(TOPK_ADD.request(key_items(key, items)?))
}

pub fn topk_incrby<S: AsRef<str>>(
    key: &str,
    pairs: &[(S, i64)],
) -> Result<Request<Vec<Option<String>>>> {
    Ok(TOPK_INCRBY.request(key_increments(key, pairs)?))
}

pub fn topk_query<I, T>(key: &str, items: I) -> Result<Request<Vec<bool>>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    Ok(TOPK_QUERY.request(key_items(key, items)?))
}

pub fn topk_count<I, T>(key: &str, items: I) -> Result<Request<Vec<i64>>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    Ok(TOPK_COUNT.request(key_items(key, items)?))
}

pub fn topk_list(key: &str) -> Result<Request<Vec<String>>> {
    Ok(TOPK_LIST.request(key_args(key)?))
}

/// `TOPK.LIST key WITHCOUNT`
pub fn topk_list_with_count(key: &str) -> Result<Request<Vec<(String, i64)>>> {
    let mut args = key_args(key)?;
    args.arg(BloomKeyword::WithCount);
    Ok(TOPK_LIST_WITHCOUNT.request(args))
}

pub fn topk_info(key: &str) -> Result<Request<TopKFilterInfo>> {
    Ok(TOPK_INFO.request(key_args(key)?))
}

// ── T-Digest ───────────────────────────────────────────────────────

const TDIGEST_CREATE: CommandSpec<()> = CommandSpec::write("TDIGEST.CREATE", decode::ok);
const TDIGEST_RESET: CommandSpec<()> = CommandSpec::write("TDIGEST.RESET", decode::ok);
const TDIGEST_ADD: CommandSpec<()> = CommandSpec::write("TDIGEST.ADD", decode::ok);
const TDIGEST_MERGE: CommandSpec<()> = CommandSpec::write("TDIGEST.MERGE", decode::ok);
const TDIGEST_MIN: CommandSpec<f64> = CommandSpec::read("TDIGEST.MIN", decode::double);
const TDIGEST_MAX: CommandSpec<f64> = CommandSpec::read("TDIGEST.MAX", decode::double);
const TDIGEST_QUANTILE: CommandSpec<Vec<f64>> =
    CommandSpec::read("TDIGEST.QUANTILE", decode::double_list);
const TDIGEST_CDF: CommandSpec<Vec<f64>> = CommandSpec::read("TDIGEST.CDF", decode::double_list);
const TDIGEST_TRIMMED_MEAN: CommandSpec<f64> =
    CommandSpec::read("TDIGEST.TRIMMED_MEAN", decode::double);
const TDIGEST_RANK: CommandSpec<Vec<i64>> =
    CommandSpec::read("TDIGEST.RANK", decode::integer_list);
const TDIGEST_REVRANK: CommandSpec<Vec<i64>> =
    CommandSpec::read("TDIGEST.REVRANK", decode::integer_list);
const TDIGEST_BYRANK: CommandSpec<Vec<f64>> =
    CommandSpec::read("TDIGEST.BYRANK", decode::double_list);
const TDIGEST_BYREVRANK: CommandSpec<Vec<f64>> =
    CommandSpec::read("TDIGEST.BYREVRANK", decode::double_list);
const TDIGEST_INFO: CommandSpec<TDigestInfo> =
    CommandSpec::read("TDIGEST.INFO", info::t_digest_info);

/// `TDIGEST.CREATE key [COMPRESSION c]`
pub fn tdigest_create(key: &str, compression: Option<i64>) -> Result<Request<()>> {
    let mut args = key_args(key)?;
    if let Some(compression) = compression {
        require_positive("compression", compression)?;
        args.arg(BloomKeyword::Compression).arg(compression);
    }
    Ok(TDIGEST_CREATE.request(args))
}

pub fn tdigest_reset(key: &str) -> Result<Request<()>> {
    Ok(TDIGEST_RESET.request(key_args(key)?))
}

pub fn tdigest_add(key: &str, values: &[f64]) -> Result<Request<()>> {
    Ok(TDIGEST_ADD.request(key_items(key, values.iter().copied())?))
}

/// `TDIGEST.MERGE dest numkeys src… [COMPRESSION c] [OVERRIDE]`
pub fn tdigest_merge<S: AsRef<str>>(
    dest: &str,
    sources: &[S],
    options: &TDigestMergeOptions,
) -> Result<Request<()>> {
    let mut args = dest_sources(dest, sources)?;
    args.append(options.build());
    Ok(TDIGEST_MERGE.request(args))
}

pub fn tdigest_min(key: &str) -> Result<Request<f64>> {
    Ok(TDIGEST_MIN.request(key_args(key)?))
}

pub fn tdigest_max(key: &str) -> Result<Request<f64>> {
    Ok(TDIGEST_MAX.request(key_args(key)?))
}

pub fn tdigest_quantile(key: &str, quantiles: &[f64]) -> Result<Request<Vec<f64>>> {
    Ok(TDIGEST_QUANTILE.request(key_items(key, quantiles.iter().copied())?))
}

pub fn tdigest_cdf(key: &str, values: &[f64]) -> Result<Request<Vec<f64>>> {
    Ok(TDIGEST_CDF.request(key_items(key, values.iter().copied())?))
}

/// `TDIGEST.TRIMMED_MEAN key low high` with `0 <= low < high <= 1`.
pub fn tdigest_trimmed_mean(key: &str, low: f64, high: f64) -> Result<Request<f64>> {
    if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low >= high {
        return Err(ModuleError::invalid(format!(
            "trimmed mean cut-offs must satisfy 0 <= low < high <= 1, got {low}..{high}"
        )));
    }
    let mut args = key_args(key)?;
    args.arg(low).arg(high);
    Ok(TDIGEST_TRIMMED_MEAN.request(args))
}

pub fn tdigest_rank(key: &str, values: &[f64]) -> Result<Request<Vec<i64>>> {
    Ok(TDIGEST_RANK.request(key_items(key, values.iter().copied())?))
}

pub fn tdigest_revrank(key: &str, values: &[f64]) -> Result<Request<Vec<i64>>> {
    Ok(TDIGEST_REVRANK.request(key_items(key, values.iter().copied())?))
}

pub fn tdigest_byrank(key: &str, ranks: &[i64]) -> Result<Request<Vec<f64>>> {
    Ok(TDIGEST_BYRANK.request(key_items(key, ranks.iter().copied())?))
}

pub fn tdigest_byrevrank(key: &str, ranks: &[i64]) -> Result<Request<Vec<f64>>> {
    Ok(TDIGEST_BYREVRANK.request(key_items(key, ranks.iter().copied())?))
}

pub fn tdigest_info(key: &str) -> Result<Request<TDigestInfo>> {
    Ok(TDIGEST_INFO.request(key_args(key)?))
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Access;
    use pretty_assertions::assert_eq;

    fn wire<T: 'static>(req: &Request<T>) -> Vec<String> {
        req.command().to_strings()
    }

    #[test]
    fn bf_reserve_with_options() {
        let req = bf_reserve("k", 0.01, 1000, &BloomReserveOptions::new().expansion(2)).unwrap();
        assert_eq!(wire(&req), vec!["BF.RESERVE", "k", "0.01", "1000", "EXPANSION", "2"]);
        assert_eq!(req.command().access(), Access::Write);
    }

    #[test]
    fn bf_reserve_validates() {
        let opts = BloomReserveOptions::new();
        assert!(bf_reserve("", 0.01, 10, &opts).unwrap_err().is_invalid_argument());
        assert!(bf_reserve("k", 0.0, 10, &opts).unwrap_err().is_invalid_argument());
        assert!(bf_reserve("k", 1.0, 10, &opts).unwrap_err().is_invalid_argument());
        assert!(bf_reserve("k", 0.01, 0, &opts).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn bf_insert_items_follow_options() {
        let opts = InsertArgs::new().capacity(100).no_create(true);
        let req = bf_insert("k", &opts, ["a", "b"]).unwrap();
        assert_eq!(
            wire(&req),
            vec!["BF.INSERT", "k", "CAPACITY", "100", "NOCREATE", "ITEMS", "a", "b"]
        );
        let reply = Reply::Array(vec![Reply::Integer(1), Reply::Integer(0)]);
        assert_eq!(req.decode(reply).unwrap(), vec![true, false]);
    }

    #[test]
    fn item_lists_follow_the_key() {
        assert_eq!(wire(&bf_madd("k", ["a", "b"]).unwrap()), vec!["BF.MADD", "k", "a", "b"]);
        assert_eq!(
            wire(&tdigest_add("k", &[1.0, 2.5]).unwrap()),
            vec!["TDIGEST.ADD", "k", "1", "2.5"]
        );
    }

    #[test]
    fn building_twice_is_identical() {
        let options = InsertArgs::new().capacity(10).error_rate(0.1).non_scaling(true);
        assert_eq!(
            wire(&bf_insert("k", &options, ["x"]).unwrap()),
            wire(&bf_insert("k", &options, ["x"]).unwrap())
        );
    }

    #[test]
    fn empty_item_lists_are_rejected() {
        assert!(bf_madd("k", Vec::<String>::new()).unwrap_err().is_invalid_argument());
        assert!(cf_insert("k", &CuckooInsertArgs::new(), Vec::<&str>::new())
            .unwrap_err()
            .is_invalid_argument());
        assert!(tdigest_add("k", &[]).unwrap_err().is_invalid_argument());
        assert!(cms_incrby::<&str>("k", &[]).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn exists_is_read_access() {
        let req = bf_exists("k", "x").unwrap();
        assert_eq!(req.command().access(), Access::Read);
        assert!(req.decode(Reply::Integer(1)).unwrap());
    }

    #[test]
    fn cf_insertnx_keeps_tri_state() {
        let req = cf_insertnx("k", &CuckooInsertArgs::new().capacity(50), ["a", "b", "c"]).unwrap();
        assert_eq!(
            wire(&req),
            vec!["CF.INSERTNX", "k", "CAPACITY", "50", "ITEMS", "a", "b", "c"]
        );
        let reply = Reply::Array(vec![Reply::Integer(1), Reply::Integer(0), Reply::Integer(-1)]);
        assert_eq!(req.decode(reply).unwrap(), vec![1, 0, -1]);
    }

    #[test]
    fn cf_reserve_grammar() {
        let opts = CuckooReserveOptions::new().bucket_size(4).expansion(1);
        let req = cf_reserve("k", 1024, &opts).unwrap();
        assert_eq!(
            wire(&req),
            vec!["CF.RESERVE", "k", "1024", "BUCKETSIZE", "4", "EXPANSION", "1"]
        );
    }

    #[test]
    fn cms_incrby_interleaves_pairs() {
        let req = cms_incrby("k", &[("a", 1), ("b", 5)]).unwrap();
        assert_eq!(wire(&req), vec!["CMS.INCRBY", "k", "a", "1", "b", "5"]);
    }

    #[test]
    fn cms_incrby_parallel_length_mismatch() {
        let err = cms_incrby_parallel("k", &["a", "b"], &[1]).unwrap_err();
        assert!(err.is_invalid_argument());
        let req = cms_incrby_parallel("k", &["a"], &[3]).unwrap();
        assert_eq!(wire(&req), vec!["CMS.INCRBY", "k", "a", "3"]);
    }

    #[test]
    fn cms_merge_weights() {
        let req = cms_merge("dest", &["a", "b"], Some(&[1, 2][..])).unwrap();
        assert_eq!(
            wire(&req),
            vec!["CMS.MERGE", "dest", "2", "a", "b", "WEIGHTS", "1", "2"]
        );
        assert!(cms_merge("dest", &["a", "b"], Some(&[1][..])).unwrap_err().is_invalid_argument());
        assert!(cms_merge::<&str>("dest", &[], None).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn topk_reserve_params_travel_together() {
        let req = topk_reserve("k", 10, None).unwrap();
        assert_eq!(wire(&req), vec!["TOPK.RESERVE", "k", "10"]);
        let req = topk_reserve("k", 10, Some(TopKParams::new(50, 4, 0.9))).unwrap();
        assert_eq!(wire(&req), vec!["TOPK.RESERVE", "k", "10", "50", "4", "0.9"]);
        assert!(topk_reserve("k", 10, Some(TopKParams::new(50, 4, 1.5)))
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn topk_add_reports_expelled() {
        let req = topk_add("k", ["a", "b"]).unwrap();
        let reply = Reply::Array(vec![Reply::Null, Reply::bulk("z")]);
        assert_eq!(req.decode(reply).unwrap(), vec![None, Some("z".to_string())]);
    }

    #[test]
    fn topk_list_with_count_pairs() {
        let req = topk_list_with_count("k").unwrap();
        assert_eq!(wire(&req), vec!["TOPK.LIST", "k", "WITHCOUNT"]);
        let reply = Reply::Array(vec![
            Reply::bulk("a"),
            Reply::Integer(7),
            Reply::bulk("b"),
            Reply::Integer(3),
        ]);
        assert_eq!(
            req.decode(reply).unwrap(),
            vec![("a".to_string(), 7), ("b".to_string(), 3)]
        );
    }

    #[test]
    fn tdigest_create_and_merge() {
        assert_eq!(wire(&tdigest_create("t", None).unwrap()), vec!["TDIGEST.CREATE", "t"]);
        assert_eq!(
            wire(&tdigest_create("t", Some(200)).unwrap()),
            vec!["TDIGEST.CREATE", "t", "COMPRESSION", "200"]
        );
        assert!(tdigest_create("t", Some(0)).unwrap_err().is_invalid_argument());

        let opts = TDigestMergeOptions::new().compression(100).override_dest(true);
        let req = tdigest_merge("d", &["s1", "s2"], &opts).unwrap();
        assert_eq!(
            wire(&req),
            vec!["TDIGEST.MERGE", "d", "2", "s1", "s2", "COMPRESSION", "100", "OVERRIDE"]
        );
    }

    #[test]
    fn tdigest_quantile_decodes_doubles() {
        let req = tdigest_quantile("t", &[0.5, 0.99]).unwrap();
        assert_eq!(wire(&req), vec!["TDIGEST.QUANTILE", "t", "0.5", "0.99"]);
        let reply = Reply::Array(vec![Reply::bulk("3.5"), Reply::bulk("inf")]);
        assert_eq!(req.decode(reply).unwrap(), vec![3.5, f64::INFINITY]);
    }

    #[test]
    fn tdigest_trimmed_mean_bounds() {
        assert!(tdigest_trimmed_mean("t", 0.1, 0.9).is_ok());
        assert!(tdigest_trimmed_mean("t", 0.5, 0.5).unwrap_err().is_invalid_argument());
        assert!(tdigest_trimmed_mean("t", -0.1, 0.5).unwrap_err().is_invalid_argument());
        assert!(tdigest_trimmed_mean("t", 0.1, 1.5).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn scandump_and_loadchunk() {
        let req = bf_scandump("k", 0).unwrap();
        assert_eq!(wire(&req), vec!["BF.SCANDUMP", "k", "0"]);
        let req = cf_loadchunk("k", 1, Bytes::from_static(b"abc")).unwrap();
        assert_eq!(wire(&req), vec!["CF.LOADCHUNK", "k", "1", "abc"]);
    }
}
