//! RedisBloom probabilistic structures: Bloom and Cuckoo filters,
//! Count-Min sketch, Top-K and t-digest.

pub mod commands;
pub mod info;
pub mod keywords;
pub mod options;

mod bloom_filter;
mod count_min_sketch;
mod cuckoo_filter;
mod t_digest;
mod top_k;

pub use bloom_filter::BloomFilter;
pub use count_min_sketch::CountMinSketch;
pub use cuckoo_filter::CuckooFilter;
pub use info::{
    BloomFilterInfo, ChunkInfo, CountMinSketchInfo, CuckooFilterInfo, TDigestInfo, TopKFilterInfo,
};
pub use keywords::BloomKeyword;
pub use options::{
    BloomReserveOptions, CuckooInsertArgs, CuckooReserveOptions, InsertArgs, TDigestMergeOptions,
    TopKParams,
};
pub use t_digest::TDigest;
pub use top_k::TopK;
