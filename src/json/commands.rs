//! Request builders for JSON.*.
//!
//! Values go through `serde_json` on both sides: arguments are serialized to
//! JSON text, replies are parsed from JSON text.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::args::{Arg, ArgList};
use crate::command::{Access, CommandSpec, Request};
use crate::error::{require_key, ModuleError, Result};
use crate::json::keywords::JsonType;
use crate::json::options::{GetArgs, SetArgs};
use crate::reply::decode;
use crate::reply::Reply;

fn key_path(key: &str, path: &str) -> Result<ArgList> {
    require_key("key", key)?;
    require_key("path", path)?;
    let mut args = ArgList::new();
    args.arg(key).arg(path);
    Ok(args)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Arg> {
    Ok(Arg::Str(serde_json::to_string(value)?))
}

fn json_values<T: Serialize>(values: &[T]) -> Result<Vec<Arg>> {
    if values.is_empty() {
        return Err(ModuleError::invalid("values must not be empty"));
    }
    values.iter().map(to_json).collect()
}

// ── Decoders ───────────────────────────────────────────────────────

/// `OK` → true; null (NX/XX condition not met) → false.
pub fn set_reply(reply: Reply) -> Result<bool> {
    if reply.is_null() {
        return Ok(false);
    }
    decode::ok(reply).map(|()| true)
}

/// JSON text, or null.
pub fn json_value<T: DeserializeOwned>(reply: Reply) -> Result<Option<T>> {
    if reply.is_null() {
        return Ok(None);
    }
    let text = decode::bytes(reply)?;
    Ok(Some(serde_json::from_slice(&text)?))
}

pub fn json_values_list<T: DeserializeOwned>(reply: Reply) -> Result<Vec<Option<T>>> {
    decode::array(reply)?.into_iter().map(json_value).collect()
}

pub fn json_number(reply: Reply) -> Result<serde_json::Value> {
    let text = decode::bytes(reply)?;
    Ok(serde_json::from_slice(&text)?)
}

/// Type name, or null for a missing key. JSONPath queries answer with an
/// array; its first entry is used.
pub fn json_type(reply: Reply) -> Result<Option<JsonType>> {
    let fragment = reply.clone();
    let reply = match reply {
        Reply::Array(items) => match items.into_iter().next() {
            Some(first) => first,
            None => return Ok(None),
        },
        other => other,
    };
    let Some(name) = decode::optional_string(reply)? else {
        return Ok(None);
    };
    JsonType::from_wire(&name)
        .map(Some)
        .ok_or_else(|| ModuleError::decode(format!("unknown JSON type {name}"), &fragment))
}

fn optional_string_list(reply: Reply) -> Result<Option<Vec<String>>> {
    if reply.is_null() {
        return Ok(None);
    }
    decode::string_list(reply).map(Some)
}

const DEL: CommandSpec<i64> = CommandSpec::write("JSON.DEL", decode::integer);
const FORGET: CommandSpec<i64> = CommandSpec::write("JSON.FORGET", decode::integer);
const TYPE: CommandSpec<Option<JsonType>> = CommandSpec::read("JSON.TYPE", json_type);
const NUMINCRBY: CommandSpec<serde_json::Value> = CommandSpec::write("JSON.NUMINCRBY", json_number);
const NUMMULTBY: CommandSpec<serde_json::Value> = CommandSpec::write("JSON.NUMMULTBY", json_number);
const STRAPPEND: CommandSpec<i64> = CommandSpec::write("JSON.STRAPPEND", decode::integer);
const STRLEN: CommandSpec<Option<i64>> = CommandSpec::read("JSON.STRLEN", decode::optional_integer);
const ARRAPPEND: CommandSpec<i64> = CommandSpec::write("JSON.ARRAPPEND", decode::integer);
const ARRINDEX: CommandSpec<i64> = CommandSpec::read("JSON.ARRINDEX", decode::integer);
const ARRINSERT: CommandSpec<i64> = CommandSpec::write("JSON.ARRINSERT", decode::integer);
const ARRLEN: CommandSpec<Option<i64>> = CommandSpec::read("JSON.ARRLEN", decode::optional_integer);
const ARRTRIM: CommandSpec<i64> = CommandSpec::write("JSON.ARRTRIM", decode::integer);
const OBJKEYS: CommandSpec<Option<Vec<String>>> = CommandSpec::read("JSON.OBJKEYS", optional_string_list);
const OBJLEN: CommandSpec<Option<i64>> = CommandSpec::read("JSON.OBJLEN", decode::optional_integer);
const CLEAR: CommandSpec<i64> = CommandSpec::write("JSON.CLEAR", decode::integer);
const TOGGLE: CommandSpec<bool> = CommandSpec::write("JSON.TOGGLE", decode::boolean);
const DEBUG_MEMORY: CommandSpec<i64> = CommandSpec::read("JSON.DEBUG MEMORY", decode::integer);
const RESP: CommandSpec<Reply> = CommandSpec::read("JSON.RESP", decode::raw);

// ── Builders ───────────────────────────────────────────────────────

/// `JSON.SET key path json [NX|XX]`
pub fn json_set<T: Serialize + ?Sized>(key: &str, path: &str, value: &T, condition: SetArgs) -> Result<Request<bool>> {
    let mut args = key_path(key, path)?;
    args.arg(to_json(value)?);
    condition.append_to(&mut args);
    Ok(Request::new("JSON.SET", Access::Write, args, set_reply))
}

/// `JSON.GET key [INDENT s] [NEWLINE s] [SPACE s] path…`
pub fn json_get<T: DeserializeOwned + 'static>(
    key: &str,
    options: &GetArgs,
    default_path: &str,
) -> Result<Request<Option<T>>> {
    require_key("key", key)?;
    let mut args = ArgList::new();
    args.arg(key);
    options.append_to(&mut args, default_path);
    Ok(Request::new("JSON.GET", Access::Read, args, json_value::<T>))
}

/// `JSON.GET` without parsing: the JSON text as sent by the server.
pub fn json_get_raw(key: &str, options: &GetArgs, default_path: &str) -> Result<Request<Option<String>>> {
    require_key("key", key)?;
    let mut args = ArgList::new();
    args.arg(key);
    options.append_to(&mut args, default_path);
    Ok(Request::new("JSON.GET", Access::Read, args, decode::optional_string))
}

/// `JSON.MGET key… path`
pub fn json_mget<T: DeserializeOwned + 'static, S: AsRef<str>>(
    keys: &[S],
    path: &str,
) -> Result<Request<Vec<Option<T>>>> {
    if keys.is_empty() {
        return Err(ModuleError::invalid("keys must not be empty"));
    }
    require_key("path", path)?;
    let mut args = ArgList::new();
    for key in keys {
        require_key("key", key.as_ref())?;
        args.arg(key.as_ref());
    }
    args.arg(path);
    Ok(Request::new("JSON.MGET", Access::Read, args, json_values_list::<T>))
}

pub fn json_del(key: &str, path: &str) -> Result<Request<i64>> {
    Ok(DEL.request(key_path(key, path)?))
}

pub fn json_forget(key: &str, path: &str) -> Result<Request<i64>> {
    Ok(FORGET.request(key_path(key, path)?))
}

pub fn json_type_of(key: &str, path: &str) -> Result<Request<Option<JsonType>>> {
    Ok(TYPE.request(key_path(key, path)?))
}

pub fn json_num_incr_by(key: &str, path: &str, by: f64) -> Result<Request<serde_json::Value>> {
    let mut args = key_path(key, path)?;
    args.arg(by);
    Ok(NUMINCRBY.request(args))
}

pub fn json_num_mult_by(key: &str, path: &str, by: f64) -> Result<Request<serde_json::Value>> {
    let mut args = key_path(key, path)?;
    args.arg(by);
    Ok(NUMMULTBY.request(args))
}

/// `JSON.STRAPPEND key path "text"`; the suffix is sent JSON-quoted.
pub fn json_str_append(key: &str, path: &str, suffix: &str) -> Result<Request<i64>> {
    let mut args = key_path(key, path)?;
    args.arg(to_json(suffix)?);
    Ok(STRAPPEND.request(args))
}

pub fn json_str_len(key: &str, path: &str) -> Result<Request<Option<i64>>> {
    Ok(STRLEN.request(key_path(key, path)?))
}

/// `JSON.ARRAPPEND key path json…`
pub fn json_arr_append<T: Serialize>(key: &str, path: &str, values: &[T]) -> Result<Request<i64>> {
    let mut args = key_path(key, path)?;
    args.args(json_values(values)?);
    Ok(ARRAPPEND.request(args))
}

/// `JSON.ARRINDEX key path json [start [stop]]`
pub fn json_arr_index<T: Serialize + ?Sized>(
    key: &str,
    path: &str,
    value: &T,
    start: Option<i64>,
    stop: Option<i64>,
) -> Result<Request<i64>> {
    let mut args = key_path(key, path)?;
    args.arg(to_json(value)?);
    match (start, stop) {
        (None, Some(_)) => return Err(ModuleError::invalid("stop requires start")),
        (Some(start), stop) => {
            args.arg(start).args(stop);
        }
        (None, None) => {}
    }
    Ok(ARRINDEX.request(args))
}

/// `JSON.ARRINSERT key path index json…`
pub fn json_arr_insert<T: Serialize>(key: &str, path: &str, index: i64, values: &[T]) -> Result<Request<i64>> {
    let mut args = key_path(key, path)?;
    args.arg(index).args(json_values(values)?);
    Ok(ARRINSERT.request(args))
}

pub fn json_arr_len(key: &str, path: &str) -> Result<Request<Option<i64>>> {
    Ok(ARRLEN.request(key_path(key, path)?))
}

/// `JSON.ARRPOP key path [index]`
pub fn json_arr_pop<T: DeserializeOwned + 'static>(
    key: &str,
    path: &str,
    index: Option<i64>,
) -> Result<Request<Option<T>>> {
    let mut args = key_path(key, path)?;
    args.args(index);
    Ok(Request::new("JSON.ARRPOP", Access::Write, args, json_value::<T>))
}

pub fn json_arr_trim(key: &str, path: &str, start: i64, stop: i64) -> Result<Request<i64>> {
    let mut args = key_path(key, path)?;
    args.arg(start).arg(stop);
    Ok(ARRTRIM.request(args))
}

pub fn json_obj_keys(key: &str, path: &str) -> Result<Request<Option<Vec<String>>>> {
    Ok(OBJKEYS.request(key_path(key, path)?))
}

pub fn json_obj_len(key: &str, path: &str) -> Result<Request<Option<i64>>> {
    Ok(OBJLEN.request(key_path(key, path)?))
}

pub fn json_clear(key: &str, path: &str) -> Result<Request<i64>> {
    Ok(CLEAR.request(key_path(key, path)?))
}

pub fn json_toggle(key: &str, path: &str) -> Result<Request<bool>> {
    Ok(TOGGLE.request(key_path(key, path)?))
}

/// `JSON.DEBUG MEMORY key path`
pub fn json_debug_memory(key: &str, path: &str) -> Result<Request<i64>> {
    Ok(DEBUG_MEMORY.request(key_path(key, path)?))
}

/// `JSON.RESP key path`: the value as a plain reply tree.
pub fn json_resp(key: &str, path: &str) -> Result<Request<Reply>> {
    Ok(RESP.request(key_path(key, path)?))
}
