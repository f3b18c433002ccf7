use crate::client::{twin_methods, Dispatcher};
use crate::error::Result;
use crate::executor::CommandExecutor;
use crate::gears::commands;
use crate::gears::keywords::ExecutionMode;
use crate::gears::options::PyExecuteOptions;
use crate::gears::results::{
    ClusterInfo, ExecutionInfo, ExecutionPlan, GearsResults, PyExecuteResult, PyStats, Registration, Requirement,
};

/// RedisGears façade: run Python functions, inspect executions and
/// registrations.
pub struct RedisGears<E> {
    dispatcher: Dispatcher<E>,
}

impl<E: CommandExecutor> RedisGears<E> {
    pub(crate) fn new(dispatcher: Dispatcher<E>) -> Self {
        Self { dispatcher }
    }

    twin_methods! {
        fn py_execute / py_execute_async(self, code: &str, options: &PyExecuteOptions) -> PyExecuteResult
            = commands::rg_pyexecute(code, options);

        fn abort_execution / abort_execution_async(self, id: &str) -> ()
            = commands::rg_abortexecution(id);

        fn drop_execution / drop_execution_async(self, id: &str) -> ()
            = commands::rg_dropexecution(id);

        fn get_execution / get_execution_async(self, id: &str, mode: ExecutionMode) -> Vec<ExecutionPlan>
            = commands::rg_getexecution(id, mode);

        fn get_results / get_results_async(self, id: &str) -> GearsResults
            = commands::rg_getresults(id);

        fn get_results_blocking / get_results_blocking_async(self, id: &str) -> GearsResults
            = commands::rg_getresultsblocking(id);

        fn trigger / trigger_async(self, trigger: &str, args: &[&str]) -> Vec<String>
            = commands::rg_trigger(trigger, args);

        fn unregister / unregister_async(self, id: &str) -> ()
            = commands::rg_unregister(id);

        fn config_get / config_get_async(self, keys: &[&str]) -> Vec<(String, Option<String>)>
            = commands::rg_configget(keys);

        fn config_set / config_set_async(self, pairs: &[(&str, &str)]) -> Vec<String>
            = commands::rg_configset(pairs);
    }

    pub fn dump_executions(&self) -> Result<Vec<ExecutionInfo>> {
        self.dispatcher.call(commands::rg_dumpexecutions())
    }

    pub async fn dump_executions_async(&self) -> Result<Vec<ExecutionInfo>> {
        self.dispatcher.call_async(commands::rg_dumpexecutions()).await
    }

    pub fn dump_registrations(&self) -> Result<Vec<Registration>> {
        self.dispatcher.call(commands::rg_dumpregistrations())
    }

    pub async fn dump_registrations_async(&self) -> Result<Vec<Registration>> {
        self.dispatcher.call_async(commands::rg_dumpregistrations()).await
    }

    pub fn info_cluster(&self) -> Result<ClusterInfo> {
        self.dispatcher.call(commands::rg_infocluster())
    }

    pub async fn info_cluster_async(&self) -> Result<ClusterInfo> {
        self.dispatcher.call_async(commands::rg_infocluster()).await
    }

    pub fn refresh_cluster(&self) -> Result<()> {
        self.dispatcher.call(commands::rg_refreshcluster())
    }

    pub async fn refresh_cluster_async(&self) -> Result<()> {
        self.dispatcher.call_async(commands::rg_refreshcluster()).await
    }

    pub fn py_stats(&self) -> Result<PyStats> {
        self.dispatcher.call(commands::rg_pystats())
    }

    pub async fn py_stats_async(&self) -> Result<PyStats> {
        self.dispatcher.call_async(commands::rg_pystats()).await
    }

    pub fn py_dump_reqs(&self) -> Result<Vec<Requirement>> {
        self.dispatcher.call(commands::rg_pydumpreqs())
    }

    pub async fn py_dump_reqs_async(&self) -> Result<Vec<Requirement>> {
        self.dispatcher.call_async(commands::rg_pydumpreqs()).await
    }
}
