//! RedisJSON document commands, with values carried through `serde_json`.

pub mod commands;
pub mod keywords;
pub mod options;

mod client;

pub use client::RedisJson;
pub use keywords::{JsonKeyword, JsonType};
pub use options::{GetArgs, SetArgs};
