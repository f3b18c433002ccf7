//! Request builders for RG.*.

use crate::args::ArgList;
use crate::command::{Access, CommandSpec, Request};
use crate::error::{require_items, require_key, ModuleError, Result};
use crate::gears::keywords::ExecutionMode;
use crate::gears::options::PyExecuteOptions;
use crate::gears::results::{
    self, ClusterInfo, ExecutionInfo, ExecutionPlan, GearsResults, PyExecuteResult, PyStats, Registration,
    Requirement,
};
use crate::reply::{decode, Reply};

fn id_args(id: &str) -> Result<ArgList> {
    require_key("execution id", id)?;
    let mut args = ArgList::new();
    args.arg(id);
    Ok(args)
}

const PYEXECUTE: CommandSpec<PyExecuteResult> = CommandSpec::write("RG.PYEXECUTE", results::py_execute_result);
const ABORTEXECUTION: CommandSpec<()> = CommandSpec::write("RG.ABORTEXECUTION", decode::ok);
const DROPEXECUTION: CommandSpec<()> = CommandSpec::write("RG.DROPEXECUTION", decode::ok);
const DUMPEXECUTIONS: CommandSpec<Vec<ExecutionInfo>> = CommandSpec::read("RG.DUMPEXECUTIONS", results::executions);
const DUMPREGISTRATIONS: CommandSpec<Vec<Registration>> =
    CommandSpec::read("RG.DUMPREGISTRATIONS", results::registrations);
const GETEXECUTION: CommandSpec<Vec<ExecutionPlan>> = CommandSpec::read("RG.GETEXECUTION", results::execution_plans);
const GETRESULTS: CommandSpec<GearsResults> = CommandSpec::read("RG.GETRESULTS", results::gears_results);
const GETRESULTSBLOCKING: CommandSpec<GearsResults> =
    CommandSpec::read("RG.GETRESULTSBLOCKING", results::gears_results);
const INFOCLUSTER: CommandSpec<ClusterInfo> = CommandSpec::read("RG.INFOCLUSTER", results::cluster_info);
const PYSTATS: CommandSpec<PyStats> = CommandSpec::read("RG.PYSTATS", results::py_stats);
const PYDUMPREQS: CommandSpec<Vec<Requirement>> = CommandSpec::read("RG.PYDUMPREQS", results::requirements);
const REFRESHCLUSTER: CommandSpec<()> = CommandSpec::write("RG.REFRESHCLUSTER", decode::ok);
const TRIGGER: CommandSpec<Vec<String>> = CommandSpec::write("RG.TRIGGER", decode::string_list);
const UNREGISTER: CommandSpec<()> = CommandSpec::write("RG.UNREGISTER", decode::ok);
const CONFIGSET: CommandSpec<Vec<String>> = CommandSpec::write("RG.CONFIGSET", decode::string_list);

/// `RG.PYEXECUTE code [UNBLOCKING] [REQUIREMENTS r…]`
pub fn rg_pyexecute(code: &str, options: &PyExecuteOptions) -> Result<Request<PyExecuteResult>> {
    if code.trim().is_empty() {
        return Err(ModuleError::invalid("code must not be empty"));
    }
    let mut args = ArgList::new();
    args.arg(code);
    options.append_to(&mut args);
    Ok(PYEXECUTE.request(args))
}

pub fn rg_abortexecution(id: &str) -> Result<Request<()>> {
    Ok(ABORTEXECUTION.request(id_args(id)?))
}

pub fn rg_dropexecution(id: &str) -> Result<Request<()>> {
    Ok(DROPEXECUTION.request(id_args(id)?))
}

pub fn rg_dumpexecutions() -> Request<Vec<ExecutionInfo>> {
    DUMPEXECUTIONS.request(ArgList::new())
}

pub fn rg_dumpregistrations() -> Request<Vec<Registration>> {
    DUMPREGISTRATIONS.request(ArgList::new())
}

/// `RG.GETEXECUTION id [SHARD|CLUSTER]`
pub fn rg_getexecution(id: &str, mode: ExecutionMode) -> Result<Request<Vec<ExecutionPlan>>> {
    let mut args = id_args(id)?;
    if let Some(keyword) = mode.keyword() {
        args.arg(keyword);
    }
    Ok(GETEXECUTION.request(args))
}

pub fn rg_getresults(id: &str) -> Result<Request<GearsResults>> {
    Ok(GETRESULTS.request(id_args(id)?))
}

/// Waits server-side until the execution finishes.
pub fn rg_getresultsblocking(id: &str) -> Result<Request<GearsResults>> {
    Ok(GETRESULTSBLOCKING.request(id_args(id)?))
}

pub fn rg_infocluster() -> Request<ClusterInfo> {
    INFOCLUSTER.request(ArgList::new())
}

pub fn rg_pystats() -> Request<PyStats> {
    PYSTATS.request(ArgList::new())
}

pub fn rg_pydumpreqs() -> Request<Vec<Requirement>> {
    PYDUMPREQS.request(ArgList::new())
}

pub fn rg_refreshcluster() -> Request<()> {
    REFRESHCLUSTER.request(ArgList::new())
}

/// `RG.TRIGGER name arg…` → the registration's results.
pub fn rg_trigger<S: AsRef<str>>(trigger: &str, trigger_args: &[S]) -> Result<Request<Vec<String>>> {
    require_key("trigger", trigger)?;
    let mut args = ArgList::with_capacity(trigger_args.len() + 1);
    args.arg(trigger).args(trigger_args.iter().map(|a| a.as_ref()));
    Ok(TRIGGER.request(args))
}

pub fn rg_unregister(id: &str) -> Result<Request<()>> {
    require_key("registration id", id)?;
    let mut args = ArgList::new();
    args.arg(id);
    Ok(UNREGISTER.request(args))
}

/// `RG.CONFIGGET key…`, each value paired with its key. Unknown keys come
/// back as an error string from the server and are kept as-is.
pub fn rg_configget<S: AsRef<str>>(keys: &[S]) -> Result<Request<Vec<(String, Option<String>)>>> {
    require_items("keys", keys)?;
    let names: Vec<String> = keys.iter().map(|k| k.as_ref().to_string()).collect();
    let mut args = ArgList::with_capacity(names.len());
    args.args(names.iter().map(String::as_str));
    Ok(Request::new("RG.CONFIGGET", Access::Read, args, move |reply: Reply| {
        let fragment = reply.clone();
        let values = decode::optional_string_list(reply)?;
        if values.len() != names.len() {
            return Err(ModuleError::decode(
                format!("expected {} config values, got {}", names.len(), values.len()),
                &fragment,
            ));
        }
        Ok(names.into_iter().zip(values).collect())
    }))
}

/// `RG.CONFIGSET key value…` → one status line per key.
pub fn rg_configset<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> Result<Request<Vec<String>>> {
    require_items("config pairs", pairs)?;
    let mut args = ArgList::with_capacity(pairs.len() * 2);
    for (key, value) in pairs {
        require_key("config key", key.as_ref())?;
        args.arg(key.as_ref()).arg(value.as_ref());
    }
    Ok(CONFIGSET.request(args))
}
