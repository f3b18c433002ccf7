//! Request builders for GRAPH.*.

use crate::args::{Arg, ArgList};
use crate::command::{Access, CommandSpec, Request};
use crate::config::ModulesConfig;
use crate::error::{require_key, Result};
use crate::graph::keywords::GraphKeyword;
use crate::graph::result::{self, first_column_strings, ResultSet, SlowLogEntry};
use crate::graph::values::GraphSchema;
use crate::reply::decode;
use crate::reply::Reply;

/// Trailing query options taken from [`ModulesConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryFlags {
    pub compact: bool,
    pub timeout_ms: Option<u64>,
}

impl Default for QueryFlags {
    fn default() -> Self {
        Self {
            compact: true,
            timeout_ms: None,
        }
    }
}

impl From<&ModulesConfig> for QueryFlags {
    fn from(config: &ModulesConfig) -> Self {
        Self {
            compact: config.graph_compact,
            timeout_ms: config.graph_timeout_ms,
        }
    }
}

const DELETE: CommandSpec<String> = CommandSpec::write("GRAPH.DELETE", decode::string);
const EXPLAIN: CommandSpec<Vec<String>> = CommandSpec::read("GRAPH.EXPLAIN", decode::string_list);
const PROFILE: CommandSpec<Vec<String>> = CommandSpec::write("GRAPH.PROFILE", decode::string_list);
const SLOWLOG: CommandSpec<Vec<SlowLogEntry>> = CommandSpec::read("GRAPH.SLOWLOG", result::slow_log);
const CONFIG_SET: CommandSpec<()> = CommandSpec::write("GRAPH.CONFIG SET", decode::ok);
const CONFIG_GET: CommandSpec<Vec<(String, Reply)>> = CommandSpec::read("GRAPH.CONFIG GET", result::config_pairs);
const LIST: CommandSpec<Vec<String>> = CommandSpec::read("GRAPH.LIST", decode::string_list);

pub const LABELS_QUERY: &str = "CALL db.labels()";
pub const RELATIONSHIP_TYPES_QUERY: &str = "CALL db.relationshipTypes()";
pub const PROPERTY_KEYS_QUERY: &str = "CALL db.propertyKeys()";

/// `graph query [TIMEOUT ms] [--compact]`
fn query_args(graph: &str, query: &str, flags: QueryFlags) -> Result<ArgList> {
    require_key("graph name", graph)?;
    require_key("query", query)?;
    let mut args = ArgList::new();
    args.arg(graph)
        .arg(query)
        .opt(GraphKeyword::Timeout, flags.timeout_ms)
        .flag(flags.compact, GraphKeyword::Compact);
    Ok(args)
}

fn result_request(
    name: &'static str,
    access: Access,
    args: ArgList,
    compact: bool,
    schema: Option<GraphSchema>,
) -> Request<ResultSet> {
    Request::new(name, access, args, move |reply| {
        if compact {
            result::compact_result(reply, schema.as_ref())
        } else {
            result::verbose_result(reply)
        }
    })
}

/// `GRAPH.QUERY`; names in the result resolve through `schema` when given.
pub fn graph_query(
    graph: &str,
    query: &str,
    flags: QueryFlags,
    schema: Option<GraphSchema>,
) -> Result<Request<ResultSet>> {
    let args = query_args(graph, query, flags)?;
    Ok(result_request("GRAPH.QUERY", Access::Write, args, flags.compact, schema))
}

/// `GRAPH.RO_QUERY`
pub fn graph_ro_query(
    graph: &str,
    query: &str,
    flags: QueryFlags,
    schema: Option<GraphSchema>,
) -> Result<Request<ResultSet>> {
    let args = query_args(graph, query, flags)?;
    Ok(result_request("GRAPH.RO_QUERY", Access::Read, args, flags.compact, schema))
}

/// A schema procedure call, decoded to its single string column.
pub fn graph_schema_call(graph: &str, procedure: &str, flags: QueryFlags) -> Result<Request<Vec<String>>> {
    let args = query_args(graph, procedure, flags)?;
    Ok(Request::new("GRAPH.RO_QUERY", Access::Read, args, move |reply| {
        first_column_strings(reply, flags.compact)
    }))
}

pub fn graph_delete(graph: &str) -> Result<Request<String>> {
    require_key("graph name", graph)?;
    let mut args = ArgList::new();
    args.arg(graph);
    Ok(DELETE.request(args))
}

/// `GRAPH.EXPLAIN graph query`
pub fn graph_explain(graph: &str, query: &str) -> Result<Request<Vec<String>>> {
    require_key("graph name", graph)?;
    require_key("query", query)?;
    let mut args = ArgList::new();
    args.arg(graph).arg(query);
    Ok(EXPLAIN.request(args))
}

/// `GRAPH.PROFILE graph query [--compact]`
pub fn graph_profile(graph: &str, query: &str, flags: QueryFlags) -> Result<Request<Vec<String>>> {
    require_key("graph name", graph)?;
    require_key("query", query)?;
    let mut args = ArgList::new();
    args.arg(graph).arg(query).flag(flags.compact, GraphKeyword::Compact);
    Ok(PROFILE.request(args))
}

pub fn graph_slowlog(graph: &str) -> Result<Request<Vec<SlowLogEntry>>> {
    require_key("graph name", graph)?;
    let mut args = ArgList::new();
    args.arg(graph);
    Ok(SLOWLOG.request(args))
}

pub fn graph_config_set(name: &str, value: impl Into<Arg>) -> Result<Request<()>> {
    require_key("config name", name)?;
    let mut args = ArgList::new();
    args.arg(name).arg(value);
    Ok(CONFIG_SET.request(args))
}

/// `GRAPH.CONFIG GET name` (`*` for all).
pub fn graph_config_get(name: &str) -> Result<Request<Vec<(String, Reply)>>> {
    require_key("config name", name)?;
    let mut args = ArgList::new();
    args.arg(name);
    Ok(CONFIG_GET.request(args))
}

pub fn graph_list() -> Request<Vec<String>> {
    LIST.request(ArgList::new())
}
