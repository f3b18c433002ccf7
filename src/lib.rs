//! Typed command builders and reply decoders for Redis modules.
//!
//! Every module command is a [`Request`]: the wire arguments plus the
//! decoder for its reply. Requests are executed through a
//! [`CommandExecutor`] supplied by the caller, either one at a time via the
//! façades handed out by [`RedisModules`] or several at once in a [`Batch`].

pub mod args;
pub mod batch;
pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod reply;
pub mod runtime;

pub mod ai;
pub mod bloom;
pub mod gears;
pub mod graph;
pub mod json;
pub mod search;
pub mod timeseries;

pub use args::{Arg, ArgList, Keyword};
pub use batch::{Batch, BatchHandle, BatchResults};
pub use client::RedisModules;
pub use command::{Access, Command, CommandSpec, Request};
pub use config::ModulesConfig;
pub use error::{ModuleError, RedisErrorKind, Result};
pub use executor::CommandExecutor;
pub use reply::Reply;
