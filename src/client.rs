//! Entry point binding an executor to the module façades.
//!
//! ```ignore
//! let modules = RedisModules::new(my_executor);
//! let filter = modules.bloom_filter("seen-urls");
//! filter.reserve(0.01, 10_000, BloomReserveOptions::default())?;
//! filter.add("https://example.com")?;
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::ai::RedisAi;
use crate::batch::Batch;
use crate::bloom::{BloomFilter, CountMinSketch, CuckooFilter, TDigest, TopK};
use crate::command::Request;
use crate::config::ModulesConfig;
use crate::error::Result;
use crate::executor::CommandExecutor;
use crate::gears::RedisGears;
use crate::graph::RedisGraph;
use crate::json::{self, RedisJson};
use crate::search::RediSearch;
use crate::timeseries::RedisTimeSeries;

/// Shared by every façade: runs a request through the executor and decodes
/// the reply. Holds no state besides the executor and config handles.
pub(crate) struct Dispatcher<E> {
    executor: Arc<E>,
    config: Arc<ModulesConfig>,
}

impl<E> Clone for Dispatcher<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            config: Arc::clone(&self.config),
        }
    }
}

impl<E: CommandExecutor> Dispatcher<E> {
    pub(crate) fn new(executor: Arc<E>, config: Arc<ModulesConfig>) -> Self {
        Self { executor, config }
    }

    pub(crate) fn config(&self) -> &ModulesConfig {
        &self.config
    }

    /// Blocking build → execute → decode cycle.
    pub(crate) fn call<T: 'static>(&self, request: Request<T>) -> Result<T> {
        let (command, decode) = request.into_parts();
        tracing::debug!(
            command = command.name(),
            args = command.args().len(),
            access = ?command.access(),
            "dispatching module command"
        );
        let reply = self.executor.execute(command)?;
        decode(reply)
    }

    /// Async build → execute → decode cycle.
    pub(crate) async fn call_async<T: 'static>(&self, request: Request<T>) -> Result<T> {
        let (command, decode) = request.into_parts();
        tracing::debug!(
            command = command.name(),
            args = command.args().len(),
            access = ?command.access(),
            "dispatching module command"
        );
        let reply = self.executor.execute_async(command).await?;
        decode(reply)
    }
}

/// Generate a blocking façade method and its `_async` twin from one
/// request-builder expression. The façade must have a `dispatcher` field.
///
/// ```ignore
/// twin_methods! {
///     /// `BF.ADD`
///     fn add / add_async(self, item: impl Into<Arg>) -> bool = commands::bf_add(&self.name, item);
/// }
/// ```
macro_rules! twin_methods {
    ($(
        $(#[$meta:meta])*
        fn $name:ident / $async_name:ident ($self:ident $(, $arg:ident : $ty:ty)* $(,)?) -> $ret:ty = $request:expr;
    )*) => {
        $(
            $(#[$meta])*
            pub fn $name(&$self $(, $arg: $ty)*) -> $crate::error::Result<$ret> {
                let request = $request?;
                $self.dispatcher.call(request)
            }

            $(#[$meta])*
            pub async fn $async_name(&$self $(, $arg: $ty)*) -> $crate::error::Result<$ret> {
                let request = $request?;
                $self.dispatcher.call_async(request).await
            }
        )*
    };
}

pub(crate) use twin_methods;

/// Factory for module façades sharing one executor.
pub struct RedisModules<E> {
    executor: Arc<E>,
    config: Arc<ModulesConfig>,
}

impl<E> Clone for RedisModules<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            config: Arc::clone(&self.config),
        }
    }
}

impl<E: CommandExecutor> RedisModules<E> {
    /// Bind an executor with default [`ModulesConfig`].
    pub fn new(executor: E) -> Self {
        Self::with_config(Arc::new(executor), ModulesConfig::default())
    }

    /// Bind a shared executor with explicit config.
    pub fn with_config(executor: Arc<E>, config: ModulesConfig) -> Self {
        Self {
            executor,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ModulesConfig {
        &self.config
    }

    pub fn executor(&self) -> &Arc<E> {
        &self.executor
    }

    fn dispatcher(&self) -> Dispatcher<E> {
        Dispatcher::new(Arc::clone(&self.executor), Arc::clone(&self.config))
    }

    /// Blocking execution of a request built with any module's `commands` functions.
    pub fn call<T: 'static>(&self, request: Request<T>) -> Result<T> {
        self.dispatcher().call(request)
    }

    /// Async execution of a request built with any module's `commands` functions.
    pub async fn call_async<T: 'static>(&self, request: Request<T>) -> Result<T> {
        self.dispatcher().call_async(request).await
    }

    /// A new, empty batch on this executor.
    pub fn batch(&self) -> Batch<E> {
        Batch::new(Arc::clone(&self.executor))
    }

    pub fn bloom_filter(&self, name: impl Into<String>) -> BloomFilter<E> {
        BloomFilter::new(name.into(), self.dispatcher())
    }

    pub fn cuckoo_filter(&self, name: impl Into<String>) -> CuckooFilter<E> {
        CuckooFilter::new(name.into(), self.dispatcher())
    }

    pub fn count_min_sketch(&self, name: impl Into<String>) -> CountMinSketch<E> {
        CountMinSketch::new(name.into(), self.dispatcher())
    }

    pub fn top_k(&self, name: impl Into<String>) -> TopK<E> {
        TopK::new(name.into(), self.dispatcher())
    }

    pub fn t_digest(&self, name: impl Into<String>) -> TDigest<E> {
        TDigest::new(name.into(), self.dispatcher())
    }

    /// RediSearch façade bound to one index.
    pub fn search(&self, index: impl Into<String>) -> RediSearch<E> {
        RediSearch::new(index.into(), self.dispatcher())
    }

    pub fn ai(&self) -> RedisAi<E> {
        RedisAi::new(self.dispatcher())
    }

    pub fn graph(&self, name: impl Into<String>) -> RedisGraph<E> {
        RedisGraph::new(name.into(), self.dispatcher())
    }

    /// RedisJSON façade bound to one key.
    pub fn json(&self, key: impl Into<String>) -> RedisJson<E> {
        RedisJson::new(key.into(), self.dispatcher())
    }

    /// `JSON.MGET`: one value per key, `None` where the key or path is missing.
    pub fn json_mget<T: DeserializeOwned + 'static>(&self, keys: &[&str], path: &str) -> Result<Vec<Option<T>>> {
        self.call(json::commands::json_mget(keys, path)?)
    }

    pub async fn json_mget_async<T: DeserializeOwned + 'static>(
        &self,
        keys: &[&str],
        path: &str,
    ) -> Result<Vec<Option<T>>> {
        let request = json::commands::json_mget(keys, path)?;
        self.call_async(request).await
    }

    pub fn time_series(&self) -> RedisTimeSeries<E> {
        RedisTimeSeries::new(self.dispatcher())
    }

    pub fn gears(&self) -> RedisGears<E> {
        RedisGears::new(self.dispatcher())
    }
}
