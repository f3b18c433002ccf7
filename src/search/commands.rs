//! Request builders for the FT.* commands.

use crate::args::{non_empty, Arg, ArgList};
use crate::command::{Access, CommandSpec, Request};
use crate::error::{require_key, ModuleError, Result};
use crate::reply::decode;
use crate::reply::Reply;
use crate::search::keywords::SearchKeyword;
use crate::search::options::{
    AggregateOptions, SearchOptions, SpellCheckOptions, SugAddOptions, SugGetOptions,
};
use crate::search::results::{self, *};
use crate::search::schema::{Field, IndexOptions};

fn index_args(index: &str) -> Result<ArgList> {
    require_key("index name", index)?;
    let mut args = ArgList::new();
    args.arg(index);
    Ok(args)
}

fn schema_fields(args: &mut ArgList, fields: &[Field]) -> Result<()> {
    if fields.is_empty() {
        return Err(ModuleError::invalid("schema must have at least one field"));
    }
    for field in fields {
        require_key("field name", field.name())?;
        field.append_to(args);
    }
    Ok(())
}

const FT_CREATE: CommandSpec<()> = CommandSpec::write("FT.CREATE", decode::ok);
const FT_ALTER: CommandSpec<()> = CommandSpec::write("FT.ALTER", decode::ok);
const FT_DROPINDEX: CommandSpec<()> = CommandSpec::write("FT.DROPINDEX", decode::ok);
const FT_INFO: CommandSpec<IndexInfo> = CommandSpec::read("FT.INFO", results::index_info);
const FT_EXPLAIN: CommandSpec<String> = CommandSpec::read("FT.EXPLAIN", decode::string);
const FT_ALIASADD: CommandSpec<()> = CommandSpec::write("FT.ALIASADD", decode::ok);
const FT_ALIASUPDATE: CommandSpec<()> = CommandSpec::write("FT.ALIASUPDATE", decode::ok);
const FT_ALIASDEL: CommandSpec<()> = CommandSpec::write("FT.ALIASDEL", decode::ok);
const FT_TAGVALS: CommandSpec<Vec<String>> = CommandSpec::read("FT.TAGVALS", decode::string_list);
const FT_LIST: CommandSpec<Vec<String>> = CommandSpec::read("FT._LIST", decode::string_list);
const FT_CONFIG_SET: CommandSpec<()> = CommandSpec::write("FT.CONFIG SET", decode::ok);
const FT_CONFIG_GET: CommandSpec<Vec<(String, Option<String>)>> =
    CommandSpec::read("FT.CONFIG GET", results::config_pairs);
const FT_SYNUPDATE: CommandSpec<()> = CommandSpec::write("FT.SYNUPDATE", decode::ok);
const FT_SYNDUMP: CommandSpec<Vec<(String, Vec<String>)>> =
    CommandSpec::read("FT.SYNDUMP", results::synonym_dump);
const FT_DICTADD: CommandSpec<i64> = CommandSpec::write("FT.DICTADD", decode::integer);
const FT_DICTDEL: CommandSpec<i64> = CommandSpec::write("FT.DICTDEL", decode::integer);
const FT_DICTDUMP: CommandSpec<Vec<String>> = CommandSpec::read("FT.DICTDUMP", decode::string_list);
const FT_SUGADD: CommandSpec<i64> = CommandSpec::write("FT.SUGADD", decode::integer);
const FT_SUGDEL: CommandSpec<bool> = CommandSpec::write("FT.SUGDEL", decode::boolean);
const FT_SUGLEN: CommandSpec<i64> = CommandSpec::read("FT.SUGLEN", decode::integer);
const FT_SPELLCHECK: CommandSpec<Vec<SpellCheckResult>> =
    CommandSpec::read("FT.SPELLCHECK", results::spell_check);
const FT_CURSOR_READ: CommandSpec<AggregateResult> =
    CommandSpec::read("FT.CURSOR READ", results::aggregate_cursor_result);
const FT_CURSOR_DEL: CommandSpec<()> = CommandSpec::write("FT.CURSOR DEL", decode::ok);

/// `FT.CREATE idx [options…] SCHEMA field…`
pub fn ft_create(index: &str, options: &IndexOptions, fields: &[Field]) -> Result<Request<()>> {
    let mut args = index_args(index)?;
    args.append(options.build()).arg(SearchKeyword::Schema);
    schema_fields(&mut args, fields)?;
    Ok(FT_CREATE.request(args))
}

/// `FT.ALTER idx SCHEMA ADD field…`
pub fn ft_alter_add(index: &str, fields: &[Field]) -> Result<Request<()>> {
    let mut args = index_args(index)?;
    args.arg(SearchKeyword::Schema).arg(SearchKeyword::Add);
    schema_fields(&mut args, fields)?;
    Ok(FT_ALTER.request(args))
}

/// `FT.DROPINDEX idx [DD]`
pub fn ft_dropindex(index: &str, delete_docs: bool) -> Result<Request<()>> {
    let mut args = index_args(index)?;
    args.flag(delete_docs, SearchKeyword::DeleteDocs);
    Ok(FT_DROPINDEX.request(args))
}

pub fn ft_info(index: &str) -> Result<Request<IndexInfo>> {
    Ok(FT_INFO.request(index_args(index)?))
}

/// `FT.SEARCH idx query [options…]`
pub fn ft_search(
    index: &str,
    query: &str,
    options: &SearchOptions,
    default_dialect: Option<u32>,
) -> Result<Request<SearchResult>> {
    require_key("query", query)?;
    let mut args = index_args(index)?;
    args.arg(query).append(options.build(default_dialect)?);
    let shape = options.reply_shape();
    Ok(Request::new("FT.SEARCH", Access::Read, args, move |reply| {
        results::search_result(reply, shape)
    }))
}

/// `FT.AGGREGATE idx query [options…]`; the reply carries a cursor id when
/// the options request one.
pub fn ft_aggregate(
    index: &str,
    query: &str,
    options: &AggregateOptions,
    default_dialect: Option<u32>,
) -> Result<Request<AggregateResult>> {
    require_key("query", query)?;
    let mut args = index_args(index)?;
    args.arg(query).append(options.build(default_dialect)?);
    let decode: fn(Reply) -> Result<AggregateResult> = if options.uses_cursor() {
        results::aggregate_cursor_result
    } else {
        results::aggregate_result
    };
    Ok(Request::new("FT.AGGREGATE", Access::Read, args, decode))
}

/// `FT.CURSOR READ idx id [COUNT c]`
pub fn ft_cursor_read(index: &str, cursor_id: i64, count: Option<i64>) -> Result<Request<AggregateResult>> {
    let mut args = index_args(index)?;
    args.arg(cursor_id).opt(SearchKeyword::Count, count);
    Ok(FT_CURSOR_READ.request(args))
}

pub fn ft_cursor_del(index: &str, cursor_id: i64) -> Result<Request<()>> {
    let mut args = index_args(index)?;
    args.arg(cursor_id);
    Ok(FT_CURSOR_DEL.request(args))
}

/// `FT.EXPLAIN idx query [DIALECT d]`
pub fn ft_explain(index: &str, query: &str, dialect: Option<u32>) -> Result<Request<String>> {
    require_key("query", query)?;
    let mut args = index_args(index)?;
    args.arg(query).opt(SearchKeyword::Dialect, dialect);
    Ok(FT_EXPLAIN.request(args))
}

fn alias_args(alias: &str, index: Option<&str>) -> Result<ArgList> {
    require_key("alias", alias)?;
    let mut args = ArgList::new();
    args.arg(alias);
    if let Some(index) = index {
        require_key("index name", index)?;
        args.arg(index);
    }
    Ok(args)
}

/// `FT.ALIASADD alias idx`
pub fn ft_aliasadd(alias: &str, index: &str) -> Result<Request<()>> {
    Ok(FT_ALIASADD.request(alias_args(alias, Some(index))?))
}

pub fn ft_aliasupdate(alias: &str, index: &str) -> Result<Request<()>> {
    Ok(FT_ALIASUPDATE.request(alias_args(alias, Some(index))?))
}

pub fn ft_aliasdel(alias: &str) -> Result<Request<()>> {
    Ok(FT_ALIASDEL.request(alias_args(alias, None)?))
}

pub fn ft_tagvals(index: &str, field: &str) -> Result<Request<Vec<String>>> {
    require_key("field name", field)?;
    let mut args = index_args(index)?;
    args.arg(field);
    Ok(FT_TAGVALS.request(args))
}

/// `FT._LIST`
pub fn ft_list() -> Request<Vec<String>> {
    FT_LIST.request(ArgList::new())
}

pub fn ft_config_set(option: &str, value: impl Into<Arg>) -> Result<Request<()>> {
    require_key("option", option)?;
    let mut args = ArgList::new();
    args.arg(option).arg(value);
    Ok(FT_CONFIG_SET.request(args))
}

/// `FT.CONFIG GET option`; `*` returns every option.
pub fn ft_config_get(option: &str) -> Result<Request<Vec<(String, Option<String>)>>> {
    require_key("option", option)?;
    let mut args = ArgList::new();
    args.arg(option);
    Ok(FT_CONFIG_GET.request(args))
}

/// `FT.SYNUPDATE idx group [SKIPINITIALSCAN] term…`
pub fn ft_synupdate<I, T>(
    index: &str,
    group: &str,
    skip_initial_scan: bool,
    terms: I,
) -> Result<Request<()>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    require_key("synonym group", group)?;
    let terms = non_empty("terms", terms)?;
    let mut args = index_args(index)?;
    args.arg(group)
        .flag(skip_initial_scan, SearchKeyword::SkipInitialScan)
        .args(terms);
    Ok(FT_SYNUPDATE.request(args))
}

pub fn ft_syndump(index: &str) -> Result<Request<Vec<(String, Vec<String>)>>> {
    Ok(FT_SYNDUMP.request(index_args(index)?))
}

fn dict_terms<I, T>(dict: &str, terms: I) -> Result<ArgList>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    require_key("dictionary", dict)?;
    let terms = non_empty("terms", terms)?;
    let mut args = ArgList::new();
    args.arg(dict).args(terms);
    Ok(args)
}

/// `FT.DICTADD dict term…`; returns the number of new terms.
pub fn ft_dictadd<I, T>(dict: &str, terms: I) -> Result<Request<i64>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    Ok(FT_DICTADD.request(dict_terms(dict, terms)?))
}

pub fn ft_dictdel<I, T>(dict: &str, terms: I) -> Result<Request<i64>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    Ok(FT_DICTDEL.request(dict_terms(dict, terms)?))
}

pub fn ft_dictdump(dict: &str) -> Result<Request<Vec<String>>> {
    require_key("dictionary", dict)?;
    let mut args = ArgList::new();
    args.arg(dict);
    Ok(FT_DICTDUMP.request(args))
}

/// `FT.SUGADD key string score [INCR] [PAYLOAD p]`; returns the dictionary size.
pub fn ft_sugadd(key: &str, string: &str, score: f64, options: &SugAddOptions) -> Result<Request<i64>> {
    require_key("key", key)?;
    require_key("suggestion", string)?;
    let mut args = ArgList::new();
    args.arg(key).arg(string).arg(score).append(options.build());
    Ok(FT_SUGADD.request(args))
}

/// `FT.SUGGET key prefix [FUZZY] [WITHSCORES] [WITHPAYLOADS] [MAX n]`
pub fn ft_sugget(key: &str, prefix: &str, options: &SugGetOptions) -> Result<Request<Vec<Suggestion>>> {
    require_key("key", key)?;
    require_key("prefix", prefix)?;
    let mut args = ArgList::new();
    args.arg(key).arg(prefix).append(options.build());
    let (with_scores, with_payloads) = options.flags();
    Ok(Request::new("FT.SUGGET", Access::Read, args, move |reply| {
        results::suggestions(reply, with_scores, with_payloads)
    }))
}

pub fn ft_sugdel(key: &str, string: &str) -> Result<Request<bool>> {
    require_key("key", key)?;
    let mut args = ArgList::new();
    args.arg(key).arg(string);
    Ok(FT_SUGDEL.request(args))
}

pub fn ft_suglen(key: &str) -> Result<Request<i64>> {
    require_key("key", key)?;
    let mut args = ArgList::new();
    args.arg(key);
    Ok(FT_SUGLEN.request(args))
}

/// `FT.SPELLCHECK idx query [DISTANCE d] [TERMS INCLUDE|EXCLUDE dict]… [DIALECT d]`
pub fn ft_spellcheck(
    index: &str,
    query: &str,
    options: &SpellCheckOptions,
) -> Result<Request<Vec<SpellCheckResult>>> {
    require_key("query", query)?;
    let mut args = index_args(index)?;
    args.arg(query).append(options.build()?);
    Ok(FT_SPELLCHECK.request(args))
}
