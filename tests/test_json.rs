//! Integration tests: RedisJSON façade and batching.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use redis_modules::json::{self, GetArgs, JsonType, SetArgs};
use redis_modules::{Access, ModuleError, ModulesConfig, RedisErrorKind, RedisModules, Reply};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
}

#[test]
fn set_then_get_typed() {
    let (modules, mock) = modules();
    let doc = modules.json("user:1");
    mock.reply(Reply::status("OK"))
        .reply(Reply::bulk(r#"{"id":1,"name":"ada"}"#));

    let user = User { id: 1, name: "ada".into() };
    assert!(doc.set(None, &user, SetArgs::None).unwrap());
    let back: Option<User> = doc.get(&GetArgs::new()).unwrap();
    assert_eq!(back, Some(user));
    assert_eq!(
        mock.sent(),
        vec![
            vec!["JSON.SET", "user:1", ".", r#"{"id":1,"name":"ada"}"#],
            vec!["JSON.GET", "user:1", "."],
        ]
    );
}

#[test]
fn conditional_set_not_applied() {
    let (modules, mock) = modules();
    mock.reply(Reply::Null);
    assert!(!modules.json("k").set(Some("$.a"), &1, SetArgs::Nx).unwrap());
    assert_eq!(mock.last(), vec!["JSON.SET", "k", "$.a", "1", "NX"]);
}

#[test]
fn arr_append_validation() {
    let (modules, mock) = modules();
    let err = modules.json("").arr_append(None, &["a"]).unwrap_err();
    assert!(err.is_invalid_argument());
    let empty: [&str; 0] = [];
    assert!(modules.json("k").arr_append(None, &empty).unwrap_err().is_invalid_argument());
    assert!(mock.sent().is_empty());

    mock.reply(Reply::Integer(2));
    assert_eq!(modules.json("k").arr_append(None, &["a", "b"]).unwrap(), 2);
    assert_eq!(mock.last(), vec!["JSON.ARRAPPEND", "k", ".", "\"a\"", "\"b\""]);
}

#[test]
fn configured_root_path() {
    let mock = Arc::new(MockExecutor::new());
    let modules = RedisModules::with_config(Arc::clone(&mock), ModulesConfig::default().with_json_root_path("$"));
    mock.reply(Reply::Array(vec![Reply::bulk("object")]));
    assert_eq!(modules.json("k").type_of(None).unwrap(), Some(JsonType::Object));
    assert_eq!(mock.last(), vec!["JSON.TYPE", "k", "$"]);
    assert_eq!(mock.last_access(), Some(Access::Read));
}

#[test]
fn mget_across_keys() {
    let (modules, mock) = modules();
    mock.reply(Reply::Array(vec![Reply::bulk("3"), Reply::Null]));
    let values: Vec<Option<i64>> = modules.json_mget(&["a", "b"], ".count").unwrap();
    assert_eq!(values, vec![Some(3), None]);
    assert_eq!(mock.last(), vec!["JSON.MGET", "a", "b", ".count"]);
}

#[test]
fn numbers_come_back_as_json() {
    let (modules, mock) = modules();
    mock.reply(Reply::bulk("2.5"));
    assert_eq!(modules.json("k").num_incr_by(Some(".n"), 1.5).unwrap(), json!(2.5));
}

#[test]
fn batch_runs_once_in_order() {
    let (modules, mock) = modules();
    mock.reply(Reply::status("OK")).reply(Reply::Integer(1));

    let batch = modules.batch();
    let set = batch.queue(json::commands::json_set("key", ".", &json!({"id": 1}), SetArgs::None).unwrap());
    let len = batch.queue(json::commands::json_obj_len("key", ".").unwrap());
    assert_eq!(batch.len(), 2);

    let mut results = batch.execute().unwrap();
    assert_eq!(mock.pipelines(), 1);
    assert!(results.take(set).unwrap());
    assert_eq!(results.take(len).unwrap(), Some(1));
    assert_eq!(
        mock.sent(),
        vec![vec!["JSON.SET", "key", ".", r#"{"id":1}"#], vec!["JSON.OBJLEN", "key", "."]]
    );
    assert!(batch.is_empty());
}

#[test]
fn batch_keeps_per_command_errors() {
    let (modules, mock) = modules();
    mock.reply(Reply::Integer(5)).reply(Reply::bulk("not json"));

    let batch = modules.batch();
    let len = batch.queue(json::commands::json_str_len("k", ".s").unwrap());
    let value = batch.queue(json::commands::json_get::<i64>("k", &GetArgs::new(), ".").unwrap());
    let mut results = batch.execute().unwrap();
    assert_eq!(results.take(len).unwrap(), Some(5));
    assert!(results.take(value).is_err());
}

#[test]
fn batch_server_error_fails_the_flush() {
    let (modules, mock) = modules();
    mock.reply(Reply::Integer(5)).error("WRONGTYPE Operation against a key holding the wrong kind of value");

    let batch = modules.batch();
    batch.queue(json::commands::json_str_len("k", ".s").unwrap());
    batch.queue(json::commands::json_obj_len("k", ".").unwrap());
    let err = batch.execute().unwrap_err();
    assert!(matches!(err, ModuleError::Redis { kind: RedisErrorKind::WrongType, .. }));
    assert_eq!(mock.pipelines(), 1);
}

#[tokio::test]
async fn async_get_raw() {
    let (modules, mock) = modules();
    mock.reply(Reply::bulk("[1,2]"));
    let raw = modules.json("k").get_raw_async(&GetArgs::new().indent("  ")).await.unwrap();
    assert_eq!(raw.as_deref(), Some("[1,2]"));
    assert_eq!(mock.last(), vec!["JSON.GET", "k", "INDENT", "  ", "."]);
}
