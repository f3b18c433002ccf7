//! RedisGears: Python function execution and registrations.

pub mod commands;
pub mod keywords;
pub mod options;
pub mod results;

mod client;

pub use client::RedisGears;
pub use keywords::{ExecutionMode, GearsKeyword};
pub use options::PyExecuteOptions;
pub use results::{
    ClusterInfo, ExecutionInfo, ExecutionPlan, GearsResults, PyExecuteResult, PyStats, Registration,
    RegistrationData, Requirement, ShardInfo,
};
