use crate::ai::commands;
use crate::ai::dag::{Dag, DagOpResult};
use crate::ai::keywords::Backend;
use crate::ai::model::{InfoResult, Model, Script, ScriptExecuteArgs};
use crate::ai::tensor::{Tensor, TensorFormat};
use crate::client::{twin_methods, Dispatcher};
use crate::error::Result;
use crate::executor::CommandExecutor;

/// RedisAI façade. Keys are passed per call since tensors, models and
/// scripts live side by side.
pub struct RedisAi<E> {
    dispatcher: Dispatcher<E>,
}

impl<E: CommandExecutor> RedisAi<E> {
    pub(crate) fn new(dispatcher: Dispatcher<E>) -> Self {
        Self { dispatcher }
    }

    twin_methods! {
        fn tensor_set / tensor_set_async(self, key: &str, tensor: &Tensor) -> ()
            = commands::tensor_set(key, tensor);

        fn tensor_get / tensor_get_async(self, key: &str, format: TensorFormat) -> Tensor
            = commands::tensor_get(key, format);

        fn model_store / model_store_async(self, key: &str, model: &Model) -> ()
            = commands::model_store(key, model);

        /// Deprecated server-side in favour of [`model_store`](Self::model_store).
        fn model_set / model_set_async(self, key: &str, model: &Model) -> ()
            = commands::model_set(key, model);

        fn model_get / model_get_async(self, key: &str, with_blob: bool) -> Model
            = commands::model_get(key, with_blob);

        fn model_del / model_del_async(self, key: &str) -> ()
            = commands::model_del(key);

        fn model_execute / model_execute_async(self, key: &str, inputs: &[&str], outputs: &[&str], timeout: Option<i64>) -> ()
            = commands::model_execute(key, inputs, outputs, timeout);

        fn model_run / model_run_async(self, key: &str, inputs: &[&str], outputs: &[&str]) -> ()
            = commands::model_run(key, inputs, outputs);

        fn script_store / script_store_async(self, key: &str, script: &Script) -> ()
            = commands::script_store(key, script);

        fn script_set / script_set_async(self, key: &str, script: &Script) -> ()
            = commands::script_set(key, script);

        fn script_get / script_get_async(self, key: &str) -> Script
            = commands::script_get(key);

        fn script_del / script_del_async(self, key: &str) -> ()
            = commands::script_del(key);

        fn script_execute / script_execute_async(self, key: &str, function: &str, args: &ScriptExecuteArgs) -> ()
            = commands::script_execute(key, function, args);

        fn script_run / script_run_async(self, key: &str, function: &str, inputs: &[&str], outputs: &[&str]) -> ()
            = commands::script_run(key, function, inputs, outputs);

        /// One result per op; only TENSORGET ops yield tensors.
        fn dag_execute / dag_execute_async(self, dag: &Dag) -> Vec<DagOpResult>
            = commands::dag_execute(dag);

        fn dag_execute_ro / dag_execute_ro_async(self, dag: &Dag) -> Vec<DagOpResult>
            = commands::dag_execute_ro(dag);

        fn info / info_async(self, key: &str) -> InfoResult
            = commands::info(key);

        fn reset_stat / reset_stat_async(self, key: &str) -> ()
            = commands::reset_stat(key);

        fn load_backend / load_backend_async(self, backend: Backend, path: &str) -> ()
            = commands::load_backend(backend, path);

        fn set_backends_path / set_backends_path_async(self, path: &str) -> ()
            = commands::set_backends_path(path);
    }

    /// `(key, tag)` of every stored model.
    pub fn model_scan(&self) -> Result<Vec<(String, String)>> {
        self.dispatcher.call(commands::model_scan())
    }

    pub async fn model_scan_async(&self) -> Result<Vec<(String, String)>> {
        self.dispatcher.call_async(commands::model_scan()).await
    }

    pub fn script_scan(&self) -> Result<Vec<(String, String)>> {
        self.dispatcher.call(commands::script_scan())
    }

    pub async fn script_scan_async(&self) -> Result<Vec<(String, String)>> {
        self.dispatcher.call_async(commands::script_scan()).await
    }
}
