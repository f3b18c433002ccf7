//! The transport seam.
//!
//! Connection pooling, pipelining on the wire, cluster routing, reconnects
//! and timeouts all live behind [`CommandExecutor`]. This crate only builds
//! commands and decodes replies.

use std::future::Future;
use std::sync::Arc;

use crate::command::{Access, Command};
use crate::error::Result;
use crate::reply::Reply;
use crate::runtime;

/// Executes module commands over some transport.
///
/// Implementations only need the async methods; the blocking variants
/// default to driving them on the shared runtime. Transports with a native
/// blocking path should override them. Server error replies must be
/// surfaced as `Err` (see [`ModuleError::redis`](crate::error::ModuleError::redis)),
/// never as `Ok(Reply)`.
pub trait CommandExecutor: Send + Sync {
    /// Execute a mutating command.
    fn write_async(&self, command: Command) -> impl Future<Output = Result<Reply>> + Send;

    /// Execute a non-mutating command (may be routed to a replica).
    fn read_async(&self, command: Command) -> impl Future<Output = Result<Reply>> + Send;

    /// Send a batch of commands as one exchange; replies in submission order.
    fn pipeline_async(
        &self,
        commands: Vec<Command>,
    ) -> impl Future<Output = Result<Vec<Reply>>> + Send;

    /// Blocking [`write_async`](Self::write_async).
    fn write(&self, command: Command) -> Result<Reply> {
        runtime::block_on(self.write_async(command))
    }

    /// Blocking [`read_async`](Self::read_async).
    fn read(&self, command: Command) -> Result<Reply> {
        runtime::block_on(self.read_async(command))
    }

    /// Blocking [`pipeline_async`](Self::pipeline_async).
    fn pipeline(&self, commands: Vec<Command>) -> Result<Vec<Reply>> {
        runtime::block_on(self.pipeline_async(commands))
    }

    /// Dispatch on the command's access mode.
    fn execute(&self, command: Command) -> Result<Reply> {
        match command.access() {
            Access::Read => self.read(command),
            Access::Write => self.write(command),
        }
    }

    /// Async [`execute`](Self::execute).
    fn execute_async(&self, command: Command) -> impl Future<Output = Result<Reply>> + Send {
        async move {
            match command.access() {
                Access::Read => self.read_async(command).await,
                Access::Write => self.write_async(command).await,
            }
        }
    }
}

impl<E: CommandExecutor> CommandExecutor for Arc<E> {
    fn write_async(&self, command: Command) -> impl Future<Output = Result<Reply>> + Send {
        (**self).write_async(command)
    }

    fn read_async(&self, command: Command) -> impl Future<Output = Result<Reply>> + Send {
        (**self).read_async(command)
    }

    fn pipeline_async(
        &self,
        commands: Vec<Command>,
    ) -> impl Future<Output = Result<Vec<Reply>>> + Send {
        (**self).pipeline_async(commands)
    }

    fn write(&self, command: Command) -> Result<Reply> {
        (**self).write(command)
    }

    fn read(&self, command: Command) -> Result<Reply> {
        (**self).read(command)
    }

    fn pipeline(&self, commands: Vec<Command>) -> Result<Vec<Reply>> {
        (**self).pipeline(commands)
    }
}
