//! INFO / SCANDUMP reply types of the RedisBloom structures.
//!
//! All INFO replies are flat `[name, value, …]` arrays. Unknown names are
//! skipped so newer servers keep decoding; missing names leave the default.

use bytes::Bytes;

use crate::error::{ModuleError, Result};
use crate::reply::decode::{self, expect_f64, expect_u32, expect_u64};
use crate::reply::Reply;

/// `BF.INFO`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BloomFilterInfo {
    pub capacity: u64,
    pub size: u64,
    pub filters: u32,
    pub items_inserted: u64,
    /// `None` for non-scaling filters (server reports nil).
    pub expansion_rate: Option<u32>,
}

pub fn bloom_filter_info(reply: Reply) -> Result<BloomFilterInfo> {
    let mut info = BloomFilterInfo::default();
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "Capacity" => info.capacity = expect_u64(&value, "Capacity")?,
            "Size" => info.size = expect_u64(&value, "Size")?,
            "Number of filters" => info.filters = expect_u32(&value, "Number of filters")?,
            "Number of items inserted" => {
                info.items_inserted = expect_u64(&value, "Number of items inserted")?
            }
            "Expansion rate" if value.is_null() => info.expansion_rate = None,
            "Expansion rate" => info.expansion_rate = Some(expect_u32(&value, "Expansion rate")?),
            _ => {}
        }
    }
    Ok(info)
}

/// `CF.INFO`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CuckooFilterInfo {
    pub size: u64,
    pub number_buckets: u64,
    pub number_filters: u32,
    pub items_inserted: u64,
    pub items_deleted: u64,
    pub bucket_size: u32,
    pub expansion_rate: u32,
    pub max_iterations: u32,
}

pub fn cuckoo_filter_info(reply: Reply) -> Result<CuckooFilterInfo> {
    let mut info = CuckooFilterInfo::default();
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "Size" => info.size = expect_u64(&value, "Size")?,
            "Number of buckets" => info.number_buckets = expect_u64(&value, "Number of buckets")?,
            "Number of filters" => info.number_filters = expect_u32(&value, "Number of filters")?,
            "Number of items inserted" => {
                info.items_inserted = expect_u64(&value, "Number of items inserted")?
            }
            "Number of items deleted" => {
                info.items_deleted = expect_u64(&value, "Number of items deleted")?
            }
            "Bucket size" => info.bucket_size = expect_u32(&value, "Bucket size")?,
            "Expansion rate" => info.expansion_rate = expect_u32(&value, "Expansion rate")?,
            "Max iterations" => info.max_iterations = expect_u32(&value, "Max iterations")?,
            _ => {}
        }
    }
    Ok(info)
}

/// `CMS.INFO`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountMinSketchInfo {
    pub width: u64,
    pub depth: u64,
    pub count: u64,
}

pub fn count_min_sketch_info(reply: Reply) -> Result<CountMinSketchInfo> {
    let mut info = CountMinSketchInfo::default();
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "width" => info.width = expect_u64(&value, "width")?,
            "depth" => info.depth = expect_u64(&value, "depth")?,
            "count" => info.count = expect_u64(&value, "count")?,
            _ => {}
        }
    }
    Ok(info)
}

/// `TOPK.INFO`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopKFilterInfo {
    pub k: u64,
    pub width: u64,
    pub depth: u64,
    pub decay: f64,
}

pub fn top_k_info(reply: Reply) -> Result<TopKFilterInfo> {
    let mut info = TopKFilterInfo::default();
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "k" => info.k = expect_u64(&value, "k")?,
            "width" => info.width = expect_u64(&value, "width")?,
            "depth" => info.depth = expect_u64(&value, "depth")?,
            "decay" => info.decay = expect_f64(&value, "decay")?,
            _ => {}
        }
    }
    Ok(info)
}

/// `TDIGEST.INFO`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TDigestInfo {
    pub compression: u64,
    pub capacity: u64,
    pub merged_nodes: u64,
    pub unmerged_nodes: u64,
    pub merged_weight: f64,
    pub unmerged_weight: f64,
    pub observations: u64,
    pub total_compressions: u64,
    pub memory_usage: u64,
}

pub fn t_digest_info(reply: Reply) -> Result<TDigestInfo> {
    let mut info = TDigestInfo::default();
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "Compression" => info.compression = expect_u64(&value, "Compression")?,
            "Capacity" => info.capacity = expect_u64(&value, "Capacity")?,
            "Merged nodes" => info.merged_nodes = expect_u64(&value, "Merged nodes")?,
            "Unmerged nodes" => info.unmerged_nodes = expect_u64(&value, "Unmerged nodes")?,
            "Merged weight" => info.merged_weight = expect_f64(&value, "Merged weight")?,
            "Unmerged weight" => info.unmerged_weight = expect_f64(&value, "Unmerged weight")?,
            "Observations" => info.observations = expect_u64(&value, "Observations")?,
            "Total compressions" => {
                info.total_compressions = expect_u64(&value, "Total compressions")?
            }
            "Memory usage" => info.memory_usage = expect_u64(&value, "Memory usage")?,
            _ => {}
        }
    }
    Ok(info)
}

/// One step of an incremental `SCANDUMP` / `LOADCHUNK` transfer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkInfo {
    /// Iterator for the next call; `0` once the dump is complete.
    pub iterator: i64,
    pub data: Bytes,
}

impl ChunkInfo {
    pub fn is_last(&self) -> bool {
        self.iterator == 0
    }
}

/// `[iterator, data]`; data is nil on the terminating call.
pub fn chunk_info(reply: Reply) -> Result<ChunkInfo> {
    let [cursor, data]: [Reply; 2] = match reply {
        Reply::Array(items) => items
            .try_into()
            .map_err(|items| ModuleError::decode("expected [iterator, data]", &Reply::Array(items)))?,
        other => return Err(ModuleError::decode("expected [iterator, data]", &other)),
    };
    let iterator = decode::integer(cursor)?;
    let data = match data {
        Reply::Null => Bytes::new(),
        other => decode::bytes(other)?,
    };
    Ok(ChunkInfo { iterator, data })
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: Vec<(&str, Reply)>) -> Reply {
        Reply::Array(
            items
                .into_iter()
                .flat_map(|(k, v)| [Reply::status(k), v])
                .collect(),
        )
    }

    #[test]
    fn bloom_info_all_fields() {
        let reply = pairs(vec![
            ("Capacity", Reply::Integer(100)),
            ("Size", Reply::Integer(296)),
            ("Number of filters", Reply::Integer(1)),
            ("Number of items inserted", Reply::Integer(3)),
            ("Expansion rate", Reply::Integer(2)),
        ]);
        let info = bloom_filter_info(reply).unwrap();
        assert_eq!(
            info,
            BloomFilterInfo {
                capacity: 100,
                size: 296,
                filters: 1,
                items_inserted: 3,
                expansion_rate: Some(2),
            }
        );
    }

    #[test]
    fn bloom_info_nonscaling_and_unknown_keys() {
        let reply = pairs(vec![
            ("Capacity", Reply::Integer(10)),
            ("Expansion rate", Reply::Null),
            ("Something new", Reply::bulk("ignored")),
        ]);
        let info = bloom_filter_info(reply).unwrap();
        assert_eq!(info.capacity, 10);
        assert_eq!(info.expansion_rate, None);
        assert_eq!(info.size, 0);
    }

    #[test]
    fn bloom_info_rejects_overflowing_filters() {
        let reply = pairs(vec![("Number of filters", Reply::Integer(1 << 40))]);
        assert!(bloom_filter_info(reply).unwrap_err().is_decode());
    }

    #[test]
    fn cuckoo_info() {
        let reply = pairs(vec![
            ("Size", Reply::Integer(1080)),
            ("Number of buckets", Reply::Integer(512)),
            ("Number of filters", Reply::Integer(1)),
            ("Number of items inserted", Reply::Integer(4)),
            ("Number of items deleted", Reply::Integer(1)),
            ("Bucket size", Reply::Integer(2)),
            ("Expansion rate", Reply::Integer(1)),
            ("Max iterations", Reply::Integer(20)),
        ]);
        let info = cuckoo_filter_info(reply).unwrap();
        assert_eq!(info.number_buckets, 512);
        assert_eq!(info.items_deleted, 1);
        assert_eq!(info.max_iterations, 20);
    }

    #[test]
    fn top_k_info_parses_string_decay() {
        let reply = pairs(vec![
            ("k", Reply::Integer(3)),
            ("width", Reply::Integer(8)),
            ("depth", Reply::Integer(7)),
            ("decay", Reply::bulk("0.90000000000000002")),
        ]);
        let info = top_k_info(reply).unwrap();
        assert_eq!(info.k, 3);
        assert!((info.decay - 0.9).abs() < 1e-9);
    }

    #[test]
    fn t_digest_info() {
        let reply = pairs(vec![
            ("Compression", Reply::Integer(100)),
            ("Capacity", Reply::Integer(610)),
            ("Merged nodes", Reply::Integer(0)),
            ("Unmerged nodes", Reply::Integer(2)),
            ("Merged weight", Reply::bulk("0")),
            ("Unmerged weight", Reply::bulk("2")),
            ("Observations", Reply::Integer(2)),
            ("Total compressions", Reply::Integer(0)),
            ("Memory usage", Reply::Integer(9768)),
        ]);
        let info = super::t_digest_info(reply).unwrap();
        assert_eq!(info.compression, 100);
        assert_eq!(info.unmerged_weight, 2.0);
        assert_eq!(info.memory_usage, 9768);
    }

    #[test]
    fn chunk_info_shapes() {
        let reply = Reply::Array(vec![Reply::Integer(1), Reply::Bulk(Bytes::from_static(b"\x00\x01"))]);
        let chunk = chunk_info(reply).unwrap();
        assert_eq!(chunk.iterator, 1);
        assert_eq!(chunk.data.as_ref(), b"\x00\x01");
        assert!(!chunk.is_last());

        let last = chunk_info(Reply::Array(vec![Reply::Integer(0), Reply::Null])).unwrap();
        assert!(last.is_last());
        assert!(last.data.is_empty());

        assert!(chunk_info(Reply::Array(vec![Reply::Integer(0)])).unwrap_err().is_decode());
    }
}
