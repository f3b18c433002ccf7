//! Integration tests: RedisAI façade.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use redis_modules::ai::{Backend, Dag, DagOpResult, DataType, Device, Model, Tensor, TensorFormat, TensorValue};
use redis_modules::{Access, Reply};

#[test]
fn tensor_set_and_get() {
    let (modules, mock) = modules();
    let ai = modules.ai();
    mock.reply(Reply::status("OK")).reply(flat(&[
        ("dtype", Reply::bulk("FLOAT")),
        ("shape", ints(&[2])),
        ("values", Reply::bulk_array(["1.5", "2"])),
    ]));

    ai.tensor_set("t", &Tensor::from_values(DataType::Float, vec![2], [1.5, 2.0])).unwrap();
    assert_eq!(mock.last(), vec!["AI.TENSORSET", "t", "FLOAT", "2", "VALUES", "1.5", "2"]);

    let tensor = ai.tensor_get("t", TensorFormat::Values).unwrap();
    assert_eq!(tensor.shape, vec![2]);
    assert_eq!(
        tensor.values,
        Some(vec![TensorValue::Float(1.5), TensorValue::Float(2.0)])
    );
    assert_eq!(mock.last(), vec!["AI.TENSORGET", "t", "META", "VALUES"]);
    assert_eq!(mock.last_access(), Some(Access::Read));
}

#[test]
fn tensorflow_model_needs_io_names() {
    let (modules, mock) = modules();
    let model = Model::new(Backend::Tf, Device::Cpu, b"graph".to_vec());
    assert!(modules.ai().model_store("m", &model).unwrap_err().is_invalid_argument());
    assert!(mock.sent().is_empty());
}

#[test]
fn model_execute_wire() {
    let (modules, mock) = modules();
    mock.reply(Reply::status("OK"));
    modules.ai().model_execute("m", &["a", "b"], &["c"], Some(100)).unwrap();
    assert_eq!(
        mock.last(),
        vec!["AI.MODELEXECUTE", "m", "INPUTS", "2", "a", "b", "OUTPUTS", "1", "c", "TIMEOUT", "100"]
    );
}

#[test]
fn dag_results_follow_ops() {
    let (modules, mock) = modules();
    mock.reply(Reply::Array(vec![
        Reply::status("OK"),
        Reply::status("OK"),
        flat(&[
            ("dtype", Reply::bulk("INT32")),
            ("shape", ints(&[1])),
            ("values", ints(&[7])),
        ]),
    ]));
    let dag = Dag::new()
        .tensor_set("a", Tensor::from_values(DataType::Int32, vec![1], [3i64]))
        .model_execute("m", ["a"], ["b"])
        .tensor_get("b", TensorFormat::Values);
    let results = modules.ai().dag_execute(&dag).unwrap();
    assert_eq!(results[0], DagOpResult::Status("OK".into()));
    let DagOpResult::Tensor(out) = &results[2] else {
        panic!("expected tensor");
    };
    assert_eq!(out.values, Some(vec![TensorValue::Int(7)]));
    assert_eq!(mock.last()[0], "AI.DAGEXECUTE");
}

#[test]
fn read_only_dag_rejects_persist() {
    let (modules, mock) = modules();
    let dag = Dag::new().persist(["x"]).tensor_get("x", TensorFormat::Meta);
    assert!(modules.ai().dag_execute_ro(&dag).unwrap_err().is_invalid_argument());
    assert!(mock.sent().is_empty());
}

#[tokio::test]
async fn model_scan_async() {
    let (modules, mock) = modules();
    mock.reply(Reply::Array(vec![Reply::bulk_array(["m1", "v1"]), Reply::bulk_array(["m2", ""])]));
    let models = modules.ai().model_scan_async().await.unwrap();
    assert_eq!(
        models,
        vec![("m1".to_string(), "v1".to_string()), ("m2".to_string(), String::new())]
    );
}
