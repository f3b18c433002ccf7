//! Integration tests: RedisBloom façades over a scripted executor.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use redis_modules::bloom::info::{bloom_filter_info, count_min_sketch_info, cuckoo_filter_info, top_k_info};
use redis_modules::bloom::BloomReserveOptions;
use redis_modules::{Access, Reply};

#[test]
fn count_min_sketch_round_trip() {
    let (modules, mock) = modules();
    let cms = modules.count_min_sketch("page-hits");
    mock.reply(Reply::status("OK"));
    cms.init_by_dim(5, 10).unwrap();
    assert_eq!(mock.last(), vec!["CMS.INITBYDIM", "page-hits", "5", "10"]);

    mock.reply(flat(&[
        ("width", Reply::Integer(5)),
        ("depth", Reply::Integer(10)),
        ("count", Reply::Integer(0)),
    ]));
    let info = cms.info().unwrap();
    assert_eq!((info.width, info.depth, info.count), (5, 10, 0));
    assert_eq!(mock.last_access(), Some(Access::Read));
}

#[test]
fn bloom_filter_add_and_exists() {
    let (modules, mock) = modules();
    let filter = modules.bloom_filter("seen");
    mock.reply(Reply::status("OK"))
        .reply(Reply::Integer(1))
        .reply(ints(&[1, 0]));
    filter.reserve(0.01, 1000, BloomReserveOptions::default()).unwrap();
    assert!(filter.add("a").unwrap());
    assert_eq!(filter.mexists(["a", "b"]).unwrap(), vec![true, false]);
    assert_eq!(
        mock.sent(),
        vec![
            vec!["BF.RESERVE", "seen", "0.01", "1000"],
            vec!["BF.ADD", "seen", "a"],
            vec!["BF.MEXISTS", "seen", "a", "b"],
        ]
    );
}

#[test]
fn invalid_input_sends_nothing() {
    let (modules, mock) = modules();
    let err = modules.count_min_sketch("k").init_by_dim(0, 10).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(mock.sent().is_empty());
}

#[test]
fn server_errors_pass_through() {
    let (modules, mock) = modules();
    mock.error("ERR item exists");
    let err = modules.bloom_filter("seen").reserve(0.01, 10, BloomReserveOptions::default()).unwrap_err();
    assert!(err.to_string().contains("item exists"));
}

#[test]
fn top_k_list_with_count() {
    let (modules, mock) = modules();
    mock.reply(Reply::Array(vec![
        Reply::bulk("x"),
        Reply::Integer(7),
        Reply::bulk("y"),
        Reply::Integer(3),
    ]));
    let top = modules.top_k("trending").list_with_count().unwrap();
    assert_eq!(top, vec![("x".to_string(), 7), ("y".to_string(), 3)]);
    assert_eq!(mock.last(), vec!["TOPK.LIST", "trending", "WITHCOUNT"]);
}

#[tokio::test]
async fn cuckoo_filter_async() {
    let (modules, mock) = modules();
    mock.reply(Reply::Integer(1));
    assert!(modules.cuckoo_filter("cf").add_async("item").await.unwrap());
    assert_eq!(mock.last(), vec!["CF.ADD", "cf", "item"]);
}

fn shuffled(pairs: Vec<(&'static str, Reply)>) -> impl Strategy<Value = Reply> {
    Just(pairs).prop_shuffle().prop_map(|pairs| flat(&pairs))
}

proptest! {
    #[test]
    fn bloom_info_ignores_field_order(reply in shuffled(vec![
        ("Capacity", Reply::Integer(100)),
        ("Size", Reply::Integer(240)),
        ("Number of filters", Reply::Integer(1)),
        ("Number of items inserted", Reply::Integer(3)),
        ("Expansion rate", Reply::Integer(2)),
    ])) {
        let info = bloom_filter_info(reply).unwrap();
        prop_assert_eq!(info.capacity, 100);
        prop_assert_eq!(info.items_inserted, 3);
        prop_assert_eq!(info.expansion_rate, Some(2));
    }

    #[test]
    fn cuckoo_info_ignores_field_order(reply in shuffled(vec![
        ("Size", Reply::Integer(1080)),
        ("Number of buckets", Reply::Integer(512)),
        ("Number of filters", Reply::Integer(1)),
        ("Number of items inserted", Reply::Integer(10)),
        ("Number of items deleted", Reply::Integer(2)),
        ("Bucket size", Reply::Integer(2)),
        ("Expansion rate", Reply::Integer(1)),
        ("Max iterations", Reply::Integer(20)),
    ])) {
        let info = cuckoo_filter_info(reply).unwrap();
        prop_assert_eq!(info.number_buckets, 512);
        prop_assert_eq!(info.items_deleted, 2);
        prop_assert_eq!(info.max_iterations, 20);
    }

    #[test]
    fn cms_info_ignores_field_order(reply in shuffled(vec![
        ("width", Reply::Integer(2000)),
        ("depth", Reply::Integer(7)),
        ("count", Reply::Integer(42)),
    ])) {
        let info = count_min_sketch_info(reply).unwrap();
        prop_assert_eq!((info.width, info.depth, info.count), (2000, 7, 42));
    }

    #[test]
    fn top_k_info_ignores_field_order(reply in shuffled(vec![
        ("k", Reply::Integer(10)),
        ("width", Reply::Integer(50)),
        ("depth", Reply::Integer(5)),
        ("decay", Reply::bulk("0.9")),
    ])) {
        let info = top_k_info(reply).unwrap();
        prop_assert_eq!(info.k, 10);
        prop_assert_eq!(info.decay, 0.9);
    }
}
