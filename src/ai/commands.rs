//! Request builders for AI.*.

use bytes::Bytes;

use crate::ai::dag::{self, append_model_io, Dag, DagOpResult};
use crate::ai::keywords::{AiKeyword, Backend};
use crate::ai::model::{self, InfoResult, Model, Script, ScriptExecuteArgs};
use crate::ai::tensor::{self, Tensor, TensorFormat};
use crate::args::ArgList;
use crate::command::{Access, CommandSpec, Request};
use crate::error::{require_key, ModuleError, Result};
use crate::reply::decode;

fn key_args(key: &str) -> Result<ArgList> {
    require_key("key", key)?;
    let mut args = ArgList::new();
    args.arg(key);
    Ok(args)
}

/// Legacy uncounted `INPUTS i… OUTPUTS o…`.
fn legacy_io<S: AsRef<str>, T: AsRef<str>>(args: &mut ArgList, inputs: &[S], outputs: &[T]) -> Result<()> {
    if inputs.is_empty() || outputs.is_empty() {
        return Err(ModuleError::invalid("inputs and outputs must not be empty"));
    }
    args.arg(AiKeyword::Inputs)
        .args(inputs.iter().map(|s| s.as_ref()))
        .arg(AiKeyword::Outputs)
        .args(outputs.iter().map(|s| s.as_ref()));
    Ok(())
}

/// `type dim… (BLOB b | VALUES v…)`
pub(crate) fn tensor_args(args: &mut ArgList, tensor: &Tensor) -> Result<()> {
    if tensor.shape.is_empty() {
        return Err(ModuleError::invalid("tensor shape must not be empty"));
    }
    args.arg(tensor.data_type).args(tensor.shape.iter().copied());
    match (&tensor.blob, &tensor.values) {
        (Some(blob), _) => {
            args.arg(AiKeyword::Blob).arg(blob);
        }
        (None, Some(values)) if !values.is_empty() => {
            args.arg(AiKeyword::Values).args(values.iter().cloned());
        }
        _ => return Err(ModuleError::invalid("tensor needs a blob or values")),
    }
    Ok(())
}

fn model_blob(model: &Model) -> Result<&Bytes> {
    if model.backend == Backend::Tf && (model.inputs.is_empty() || model.outputs.is_empty()) {
        return Err(ModuleError::invalid("TF models require inputs and outputs"));
    }
    model
        .blob
        .as_ref()
        .ok_or_else(|| ModuleError::invalid("model blob is required"))
}

/// `backend device [TAG t] [BATCHSIZE n [MINBATCHSIZE m [MINBATCHTIMEOUT t]]]
/// [INPUTS n i…] [OUTPUTS n o…] BLOB b`
fn model_store_args(args: &mut ArgList, model: &Model) -> Result<()> {
    let blob = model_blob(model)?;
    args.arg(model.backend).arg(model.device).opt(AiKeyword::Tag, model.tag.as_ref());
    if model.batch_size > 0 {
        args.arg(AiKeyword::BatchSize).arg(model.batch_size);
        if model.min_batch_size > 0 {
            args.arg(AiKeyword::MinBatchSize).arg(model.min_batch_size);
            args.positive(AiKeyword::MinBatchTimeout, model.min_batch_timeout);
        }
    }
    if !model.inputs.is_empty() {
        args.counted(AiKeyword::Inputs, model.inputs.iter());
    }
    if !model.outputs.is_empty() {
        args.counted(AiKeyword::Outputs, model.outputs.iter());
    }
    args.arg(AiKeyword::Blob).arg(blob);
    Ok(())
}

/// Legacy `AI.MODELSET` grammar: uncounted INPUTS/OUTPUTS, no MINBATCHTIMEOUT.
fn model_set_args(args: &mut ArgList, model: &Model) -> Result<()> {
    let blob = model_blob(model)?;
    args.arg(model.backend).arg(model.device).opt(AiKeyword::Tag, model.tag.as_ref());
    if model.batch_size > 0 {
        args.arg(AiKeyword::BatchSize).arg(model.batch_size);
        args.positive(AiKeyword::MinBatchSize, model.min_batch_size);
    }
    if !model.inputs.is_empty() {
        args.arg(AiKeyword::Inputs).args(model.inputs.iter());
    }
    if !model.outputs.is_empty() {
        args.arg(AiKeyword::Outputs).args(model.outputs.iter());
    }
    args.arg(AiKeyword::Blob).arg(blob);
    Ok(())
}

fn script_source(script: &Script) -> Result<&str> {
    if script.source.is_empty() {
        return Err(ModuleError::invalid("script source must not be empty"));
    }
    Ok(&script.source)
}

/// `device [TAG t] ENTRY_POINTS n e… SOURCE src`
fn script_store_args(args: &mut ArgList, script: &Script) -> Result<()> {
    let source = script_source(script)?;
    if script.entry_points.is_empty() {
        return Err(ModuleError::invalid("script entry points must not be empty"));
    }
    args.arg(script.device)
        .opt(AiKeyword::Tag, script.tag.as_ref())
        .counted(AiKeyword::EntryPoints, script.entry_points.iter())
        .arg(AiKeyword::Source)
        .arg(source);
    Ok(())
}

/// `device [TAG t] SOURCE src`
fn script_set_args(args: &mut ArgList, script: &Script) -> Result<()> {
    let source = script_source(script)?;
    args.arg(script.device)
        .opt(AiKeyword::Tag, script.tag.as_ref())
        .arg(AiKeyword::Source)
        .arg(source);
    Ok(())
}

const TENSORSET: CommandSpec<()> = CommandSpec::write("AI.TENSORSET", decode::ok);
const TENSORGET: CommandSpec<Tensor> = CommandSpec::read("AI.TENSORGET", tensor::tensor);
const MODELSTORE: CommandSpec<()> = CommandSpec::write("AI.MODELSTORE", decode::ok);
const MODELSET: CommandSpec<()> = CommandSpec::write("AI.MODELSET", decode::ok);
const MODELGET: CommandSpec<Model> = CommandSpec::read("AI.MODELGET", model::model);
const MODELDEL: CommandSpec<()> = CommandSpec::write("AI.MODELDEL", decode::ok);
const MODELEXECUTE: CommandSpec<()> = CommandSpec::write("AI.MODELEXECUTE", decode::ok);
const MODELRUN: CommandSpec<()> = CommandSpec::write("AI.MODELRUN", decode::ok);
const SCRIPTSTORE: CommandSpec<()> = CommandSpec::write("AI.SCRIPTSTORE", decode::ok);
const SCRIPTSET: CommandSpec<()> = CommandSpec::write("AI.SCRIPTSET", decode::ok);
const SCRIPTGET: CommandSpec<Script> = CommandSpec::read("AI.SCRIPTGET", model::script);
const SCRIPTDEL: CommandSpec<()> = CommandSpec::write("AI.SCRIPTDEL", decode::ok);
const SCRIPTEXECUTE: CommandSpec<()> = CommandSpec::write("AI.SCRIPTEXECUTE", decode::ok);
const SCRIPTRUN: CommandSpec<()> = CommandSpec::write("AI.SCRIPTRUN", decode::ok);
const INFO: CommandSpec<InfoResult> = CommandSpec::read("AI.INFO", model::info_result);
const RESETSTAT: CommandSpec<()> = CommandSpec::write("AI.INFO", decode::ok);
const MODELSCAN: CommandSpec<Vec<(String, String)>> = CommandSpec::read("AI._MODELSCAN", model::scan_entries);
const SCRIPTSCAN: CommandSpec<Vec<(String, String)>> = CommandSpec::read("AI._SCRIPTSCAN", model::scan_entries);
const CONFIG: CommandSpec<()> = CommandSpec::write("AI.CONFIG", decode::ok);

// ── Tensors ────────────────────────────────────────────────────────

/// `AI.TENSORSET key type dim… (BLOB b | VALUES v…)`
pub fn tensor_set(key: &str, tensor: &Tensor) -> Result<Request<()>> {
    let mut args = key_args(key)?;
    tensor_args(&mut args, tensor)?;
    Ok(TENSORSET.request(args))
}

/// `AI.TENSORGET key META [BLOB|VALUES]`
pub fn tensor_get(key: &str, format: TensorFormat) -> Result<Request<Tensor>> {
    let mut args = key_args(key)?;
    format.append_to(&mut args);
    Ok(TENSORGET.request(args))
}

// ── Models ─────────────────────────────────────────────────────────

pub fn model_store(key: &str, model: &Model) -> Result<Request<()>> {
    let mut args = key_args(key)?;
    model_store_args(&mut args, model)?;
    Ok(MODELSTORE.request(args))
}

/// Pre-1.2 `AI.MODELSET`.
pub fn model_set(key: &str, model: &Model) -> Result<Request<()>> {
    let mut args = key_args(key)?;
    model_set_args(&mut args, model)?;
    Ok(MODELSET.request(args))
}

/// `AI.MODELGET key META [BLOB]`
pub fn model_get(key: &str, with_blob: bool) -> Result<Request<Model>> {
    let mut args = key_args(key)?;
    args.arg(AiKeyword::Meta).flag(with_blob, AiKeyword::Blob);
    Ok(MODELGET.request(args))
}

pub fn model_del(key: &str) -> Result<Request<()>> {
    Ok(MODELDEL.request(key_args(key)?))
}

/// `AI.MODELEXECUTE key INPUTS n i… OUTPUTS n o… [TIMEOUT t]`
pub fn model_execute<S: AsRef<str>, T: AsRef<str>>(
    key: &str,
    inputs: &[S],
    outputs: &[T],
    timeout: Option<i64>,
) -> Result<Request<()>> {
    let mut args = key_args(key)?;
    append_model_io(&mut args, inputs, outputs, timeout)?;
    Ok(MODELEXECUTE.request(args))
}

/// Legacy `AI.MODELRUN key INPUTS i… OUTPUTS o…`
pub fn model_run<S: AsRef<str>, T: AsRef<str>>(
    key: &str,
    inputs: &[S],
    outputs: &[T],
) -> Result<Request<()>> {
    let mut args = key_args(key)?;
    legacy_io(&mut args, inputs, outputs)?;
    Ok(MODELRUN.request(args))
}

// ── Scripts ────────────────────────────────────────────────────────

pub fn script_store(key: &str, script: &Script) -> Result<Request<()>> {
    let mut args = key_args(key)?;
    script_store_args(&mut args, script)?;
    Ok(SCRIPTSTORE.request(args))
}

pub fn script_set(key: &str, script: &Script) -> Result<Request<()>> {
    let mut args = key_args(key)?;
    script_set_args(&mut args, script)?;
    Ok(SCRIPTSET.request(args))
}

/// `AI.SCRIPTGET key META SOURCE`
pub fn script_get(key: &str) -> Result<Request<Script>> {
    let mut args = key_args(key)?;
    args.arg(AiKeyword::Meta).arg(AiKeyword::Source);
    Ok(SCRIPTGET.request(args))
}

pub fn script_del(key: &str) -> Result<Request<()>> {
    Ok(SCRIPTDEL.request(key_args(key)?))
}

/// `AI.SCRIPTEXECUTE key fn [KEYS n …] [INPUTS n …] [ARGS n …] [OUTPUTS n …] [TIMEOUT t]`
pub fn script_execute(key: &str, function: &str, options: &ScriptExecuteArgs) -> Result<Request<()>> {
    require_key("function", function)?;
    let mut args = key_args(key)?;
    args.arg(function);
    options.append_to(&mut args)?;
    Ok(SCRIPTEXECUTE.request(args))
}

/// Legacy `AI.SCRIPTRUN key fn INPUTS i… OUTPUTS o…`
pub fn script_run<S: AsRef<str>, T: AsRef<str>>(
    key: &str,
    function: &str,
    inputs: &[S],
    outputs: &[T],
) -> Result<Request<()>> {
    require_key("function", function)?;
    let mut args = key_args(key)?;
    args.arg(function);
    legacy_io(&mut args, inputs, outputs)?;
    Ok(SCRIPTRUN.request(args))
}

// ── DAG ────────────────────────────────────────────────────────────

fn dag_request(
    name: &'static str,
    access: Access,
    dag: &Dag,
    read_only: bool,
) -> Result<Request<Vec<DagOpResult>>> {
    let args = dag.build(read_only)?;
    let tensor_outputs = dag.tensor_outputs();
    Ok(Request::new(name, access, args, move |reply| {
        dag::dag_results(reply, &tensor_outputs)
    }))
}

/// `AI.DAGEXECUTE [LOAD n k…] [PERSIST n k…] [ROUTING k] [TIMEOUT t] |> op…`
pub fn dag_execute(dag: &Dag) -> Result<Request<Vec<DagOpResult>>> {
    dag_request("AI.DAGEXECUTE", Access::Write, dag, false)
}

pub fn dag_execute_ro(dag: &Dag) -> Result<Request<Vec<DagOpResult>>> {
    dag_request("AI.DAGEXECUTE_RO", Access::Read, dag, true)
}

// ── Introspection & config ─────────────────────────────────────────

pub fn info(key: &str) -> Result<Request<InfoResult>> {
    Ok(INFO.request(key_args(key)?))
}

/// `AI.INFO key RESETSTAT`
pub fn reset_stat(key: &str) -> Result<Request<()>> {
    let mut args = key_args(key)?;
    args.arg(AiKeyword::ResetStat);
    Ok(RESETSTAT.request(args))
}

pub fn model_scan() -> Request<Vec<(String, String)>> {
    MODELSCAN.request(ArgList::new())
}

pub fn script_scan() -> Request<Vec<(String, String)>> {
    SCRIPTSCAN.request(ArgList::new())
}

/// `AI.CONFIG LOADBACKEND backend path`
pub fn load_backend(backend: Backend, path: &str) -> Result<Request<()>> {
    require_key("backend path", path)?;
    let mut args = ArgList::new();
    args.arg(AiKeyword::LoadBackend).arg(backend).arg(path);
    Ok(CONFIG.request(args))
}

/// `AI.CONFIG BACKENDSPATH path`
pub fn set_backends_path(path: &str) -> Result<Request<()>> {
    require_key("backends path", path)?;
    let mut args = ArgList::new();
    args.arg(AiKeyword::BackendsPath).arg(path);
    Ok(CONFIG.request(args))
}
