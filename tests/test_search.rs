//! Integration tests: RediSearch façade.

mod common;

use std::sync::Arc;

use common::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use redis_modules::search::results::search_result;
use redis_modules::search::{Field, IndexOn, IndexOptions, SearchOptions, SearchReplyShape};
use redis_modules::{Access, ModulesConfig, RedisModules, Reply};

#[test]
fn create_index() {
    let (modules, mock) = modules();
    mock.reply(Reply::status("OK"));
    let options = IndexOptions::new().on(IndexOn::Hash).prefix("doc:");
    modules
        .search("idx")
        .create(options, &[Field::text("title").sortable(), Field::numeric("price")])
        .unwrap();
    assert_eq!(
        mock.last(),
        vec![
            "FT.CREATE", "idx", "ON", "HASH", "PREFIX", "1", "doc:", "SCHEMA", "title", "TEXT", "SORTABLE",
            "price", "NUMERIC",
        ]
    );
    assert_eq!(mock.last_access(), Some(Access::Write));
}

#[test]
fn search_with_scores() {
    let (modules, mock) = modules();
    mock.reply(Reply::Array(vec![
        Reply::Integer(2),
        Reply::bulk("doc:1"),
        Reply::bulk("1.5"),
        Reply::bulk_array(["title", "hello"]),
        Reply::bulk("doc:2"),
        Reply::bulk("0.5"),
        Reply::bulk_array(["title", "world"]),
    ]));
    let result = modules
        .search("idx")
        .search("hello|world", SearchOptions::new().with_scores().limit(0, 10))
        .unwrap();
    assert_eq!(result.total, 2);
    assert_eq!(result.documents[0].score, Some(1.5));
    assert_eq!(result.documents[1].get("title"), Some("world"));
    assert_eq!(
        mock.last(),
        vec!["FT.SEARCH", "idx", "hello|world", "WITHSCORES", "LIMIT", "0", "10"]
    );
}

#[test]
fn configured_dialect_fills_in() {
    let mock = Arc::new(MockExecutor::new());
    let modules = RedisModules::with_config(Arc::clone(&mock), ModulesConfig::default().with_search_dialect(2));
    mock.reply(Reply::Array(vec![Reply::Integer(0)]));
    let result = modules.search("idx").search("*", SearchOptions::new().no_content()).unwrap();
    assert_eq!(result.total, 0);
    assert_eq!(mock.last(), vec!["FT.SEARCH", "idx", "*", "NOCONTENT", "DIALECT", "2"]);

    mock.reply(Reply::Array(vec![Reply::Integer(0)]));
    modules.search("idx").search("*", SearchOptions::new().dialect(3)).unwrap();
    assert_eq!(mock.last(), vec!["FT.SEARCH", "idx", "*", "DIALECT", "3"]);
}

#[test]
fn bad_stride_is_a_decode_error() {
    let (modules, mock) = modules();
    mock.reply(Reply::Array(vec![Reply::Integer(1), Reply::bulk("doc:1")]));
    let err = modules.search("idx").search("x", SearchOptions::new().with_scores()).unwrap_err();
    assert!(err.is_decode());
}

#[tokio::test]
async fn list_indexes_async() {
    let (modules, mock) = modules();
    mock.reply(Reply::bulk_array(["idx", "other"]));
    assert_eq!(modules.search("idx").list_async().await.unwrap(), vec!["idx", "other"]);
    assert_eq!(mock.last(), vec!["FT._LIST"]);
}

fn search_reply(total: u64, docs: usize, shape: SearchReplyShape) -> Reply {
    let mut items = vec![Reply::Integer(total as i64)];
    for i in 0..docs {
        items.push(Reply::bulk(format!("doc:{i}")));
        if shape.with_scores {
            items.push(Reply::bulk(format!("{i}.5")));
        }
        if shape.with_content {
            items.push(Reply::bulk_array(["n".to_string(), i.to_string()]));
        }
    }
    Reply::Array(items)
}

proptest! {
    #[test]
    fn search_stride_decodes_every_document(
        extra in 0u64..100,
        docs in 0usize..20,
        with_scores in any::<bool>(),
        with_content in any::<bool>(),
    ) {
        let shape = SearchReplyShape { with_scores, with_content, ..SearchReplyShape::default() };
        let total = docs as u64 + extra;
        let result = search_result(search_reply(total, docs, shape), shape).unwrap();
        prop_assert_eq!(result.total, total);
        prop_assert_eq!(result.documents.len(), docs);
        for (i, doc) in result.documents.iter().enumerate() {
            let id = format!("doc:{i}");
            prop_assert_eq!(doc.id.as_str(), id.as_str());
            prop_assert_eq!(doc.score.is_some(), with_scores);
            prop_assert_eq!(doc.fields.is_empty(), !with_content);
        }
    }
}
