//! Shared helpers for integration tests.
//!
//! [`MockExecutor`] stands in for a server: it records every command it is
//! handed and answers with replies scripted up front, in order.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

use redis_modules::{Access, Command, CommandExecutor, ModuleError, RedisModules, Reply, Result};

#[derive(Default)]
pub struct MockExecutor {
    replies: Mutex<VecDeque<Result<Reply>>>,
    sent: Mutex<Vec<(Access, Vec<String>)>>,
    pipelines: Mutex<usize>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next reply.
    pub fn reply(&self, reply: Reply) -> &Self {
        self.replies.lock().push_back(Ok(reply));
        self
    }

    /// Queue a server error.
    pub fn error(&self, message: &str) -> &Self {
        self.replies.lock().push_back(Err(ModuleError::redis(message)));
        self
    }

    /// Every command seen so far, rendered as wire strings.
    pub fn sent(&self) -> Vec<Vec<String>> {
        self.sent.lock().iter().map(|(_, wire)| wire.clone()).collect()
    }

    pub fn last(&self) -> Vec<String> {
        self.sent.lock().last().map(|(_, wire)| wire.clone()).unwrap_or_default()
    }

    pub fn last_access(&self) -> Option<Access> {
        self.sent.lock().last().map(|(access, _)| *access)
    }

    pub fn pipelines(&self) -> usize {
        *self.pipelines.lock()
    }

    fn answer(&self, command: Command) -> Result<Reply> {
        self.sent.lock().push((command.access(), command.to_strings()));
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ModuleError::redis("ERR no scripted reply")))
    }
}

impl CommandExecutor for MockExecutor {
    fn write_async(&self, command: Command) -> impl Future<Output = Result<Reply>> + Send {
        let reply = self.answer(command);
        async move { reply }
    }

    fn read_async(&self, command: Command) -> impl Future<Output = Result<Reply>> + Send {
        let reply = self.answer(command);
        async move { reply }
    }

    fn pipeline_async(&self, commands: Vec<Command>) -> impl Future<Output = Result<Vec<Reply>>> + Send {
        *self.pipelines.lock() += 1;
        let replies: Result<Vec<Reply>> = commands.into_iter().map(|c| self.answer(c)).collect();
        async move { replies }
    }
}

/// Route crate logs to the test output; `RUST_LOG=redis_modules=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A client over a fresh mock, plus a handle to inspect it.
pub fn modules() -> (RedisModules<MockExecutor>, Arc<MockExecutor>) {
    init_tracing();
    let mock = Arc::new(MockExecutor::new());
    let modules = RedisModules::with_config(Arc::clone(&mock), Default::default());
    (modules, mock)
}

/// Flat `[name, value, …]` reply from pairs.
pub fn flat(pairs: &[(&str, Reply)]) -> Reply {
    Reply::Array(
        pairs
            .iter()
            .flat_map(|(k, v)| [Reply::bulk(k), v.clone()])
            .collect(),
    )
}

pub fn ints(values: &[i64]) -> Reply {
    Reply::Array(values.iter().copied().map(Reply::Integer).collect())
}
