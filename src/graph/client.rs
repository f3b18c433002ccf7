use crate::args::Arg;
use crate::client::{twin_methods, Dispatcher};
use crate::error::Result;
use crate::executor::CommandExecutor;
use crate::graph::commands::{self, QueryFlags};
use crate::graph::params::{with_params, ParamValue};
use crate::graph::result::{ResultSet, SlowLogEntry};
use crate::graph::values::GraphSchema;
use crate::reply::Reply;

/// RedisGraph façade bound to one graph.
pub struct RedisGraph<E> {
    name: String,
    dispatcher: Dispatcher<E>,
}

impl<E: CommandExecutor> RedisGraph<E> {
    pub(crate) fn new(name: String, dispatcher: Dispatcher<E>) -> Self {
        Self { name, dispatcher }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn flags(&self) -> QueryFlags {
        QueryFlags::from(self.dispatcher.config())
    }

    twin_methods! {
        fn query / query_async(self, query: &str) -> ResultSet
            = commands::graph_query(&self.name, query, self.flags(), None);

        fn read_only_query / read_only_query_async(self, query: &str) -> ResultSet
            = commands::graph_ro_query(&self.name, query, self.flags(), None);

        /// Bind `$name` parameters through a `CYPHER` prefix.
        fn query_with_params / query_with_params_async(self, query: &str, params: &[(&str, ParamValue)]) -> ResultSet
            = commands::graph_query(&self.name, &with_params(query, params)?, self.flags(), None);

        /// Drops the graph and all its entities.
        fn delete / delete_async(self) -> String
            = commands::graph_delete(&self.name);

        fn explain / explain_async(self, query: &str) -> Vec<String>
            = commands::graph_explain(&self.name, query);

        /// Runs the query and returns the execution plan with per-operation timings.
        fn profile / profile_async(self, query: &str) -> Vec<String>
            = commands::graph_profile(&self.name, query, self.flags());

        fn slow_log / slow_log_async(self) -> Vec<SlowLogEntry>
            = commands::graph_slowlog(&self.name);

        fn config_set / config_set_async(self, name: &str, value: impl Into<Arg>) -> ()
            = commands::graph_config_set(name, value);

        fn config_get / config_get_async(self, name: &str) -> Vec<(String, Reply)>
            = commands::graph_config_get(name);
    }

    /// Every graph on the server.
    pub fn list(&self) -> Result<Vec<String>> {
        self.dispatcher.call(commands::graph_list())
    }

    pub async fn list_async(&self) -> Result<Vec<String>> {
        self.dispatcher.call_async(commands::graph_list()).await
    }

    /// Labels, relationship types and property keys, in index order.
    pub fn schema(&self) -> Result<GraphSchema> {
        let flags = self.flags();
        let call = |procedure: &str| -> Result<Vec<String>> {
            self.dispatcher
                .call(commands::graph_schema_call(&self.name, procedure, flags)?)
        };
        Ok(GraphSchema {
            labels: call(commands::LABELS_QUERY)?,
            relationship_types: call(commands::RELATIONSHIP_TYPES_QUERY)?,
            property_keys: call(commands::PROPERTY_KEYS_QUERY)?,
        })
    }

    pub async fn schema_async(&self) -> Result<GraphSchema> {
        let flags = self.flags();
        let labels = commands::graph_schema_call(&self.name, commands::LABELS_QUERY, flags)?;
        let types = commands::graph_schema_call(&self.name, commands::RELATIONSHIP_TYPES_QUERY, flags)?;
        let keys = commands::graph_schema_call(&self.name, commands::PROPERTY_KEYS_QUERY, flags)?;
        Ok(GraphSchema {
            labels: self.dispatcher.call_async(labels).await?,
            relationship_types: self.dispatcher.call_async(types).await?,
            property_keys: self.dispatcher.call_async(keys).await?,
        })
    }

    /// Fetch the schema, then run `query` with label, relationship and
    /// property names resolved.
    pub fn query_resolved(&self, query: &str) -> Result<ResultSet> {
        let schema = self.schema()?;
        self.dispatcher
            .call(commands::graph_query(&self.name, query, self.flags(), Some(schema))?)
    }

    pub async fn query_resolved_async(&self, query: &str) -> Result<ResultSet> {
        let schema = self.schema_async().await?;
        let request = commands::graph_query(&self.name, query, self.flags(), Some(schema))?;
        self.dispatcher.call_async(request).await
    }
}
