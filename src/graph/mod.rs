//! RedisGraph: Cypher queries and compact result decoding.

pub mod commands;
pub mod keywords;
pub mod params;
pub mod result;
pub mod values;

mod client;

pub use client::RedisGraph;
pub use commands::QueryFlags;
pub use keywords::GraphKeyword;
pub use params::ParamValue;
pub use result::{Header, ResultSet, SlowLogEntry, Statistics};
pub use values::{
    ColumnType, GraphEdge, GraphNode, GraphPoint, GraphSchema, GraphValue, Label, Property, ScalarType,
};
