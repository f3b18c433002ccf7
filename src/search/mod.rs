//! RediSearch: index management, full-text search, aggregations,
//! suggestions and spellchecking.

pub mod commands;
pub mod keywords;
pub mod options;
pub mod results;
pub mod schema;

mod client;

pub use client::RediSearch;
pub use keywords::{
    DistanceMetric, FieldType, GeoUnit, IndexOn, ReduceFunction, SearchKeyword, SortOrder,
    VectorAlgorithm,
};
pub use options::{
    AggregateOptions, AggregateStep, GeoFilter, Highlight, NumericFilter, Reducer,
    SearchOptions, SearchReplyShape, SpellCheckOptions, SugAddOptions, SugGetOptions, Summarize,
};
pub use results::{
    AggregateResult, Document, FieldInfo, IndexInfo, SearchResult, SpellCheckResult, Suggestion,
};
pub use schema::{Field, FieldKind, IndexOptions};
