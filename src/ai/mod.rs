//! RedisAI: tensors, models, scripts and DAG execution.

pub mod commands;
pub mod dag;
pub mod keywords;
pub mod model;
pub mod tensor;

mod client;

pub use client::RedisAi;
pub use dag::{Dag, DagOp, DagOpResult};
pub use keywords::{AiKeyword, Backend, DataType};
pub use model::{InfoResult, Model, Script, ScriptExecuteArgs};
pub use tensor::{Device, Tensor, TensorFormat, TensorValue};
