//! Option objects for the RedisBloom commands.

use crate::args::ArgList;
use crate::bloom::keywords::BloomKeyword;

/// Optional tail of `BF.RESERVE`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BloomReserveOptions {
    expansion: i64,
    non_scaling: bool,
}

impl BloomReserveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Growth factor for sub-filters; sent only when > 0.
    pub fn expansion(mut self, expansion: i64) -> Self {
        self.expansion = expansion;
        self
    }

    pub fn non_scaling(mut self, non_scaling: bool) -> Self {
        self.non_scaling = non_scaling;
        self
    }

    /// `[EXPANSION n] [NONSCALING]`
    pub fn build(&self) -> ArgList {
        let mut args = ArgList::new();
        args.positive(BloomKeyword::Expansion, self.expansion)
            .flag(self.non_scaling, BloomKeyword::NonScaling);
        args
    }
}

/// Creation options of `BF.INSERT`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertArgs {
    capacity: i64,
    error_rate: f64,
    expansion: i64,
    no_create: bool,
    non_scaling: bool,
}

impl InsertArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(mut self, capacity: i64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn error_rate(mut self, error_rate: f64) -> Self {
        self.error_rate = error_rate;
        self
    }

    pub fn expansion(mut self, expansion: i64) -> Self {
        self.expansion = expansion;
        self
    }

    pub fn no_create(mut self, no_create: bool) -> Self {
        self.no_create = no_create;
        self
    }

    pub fn non_scaling(mut self, non_scaling: bool) -> Self {
        self.non_scaling = non_scaling;
        self
    }

    /// `[CAPACITY c] [ERROR e] [EXPANSION x] [NOCREATE] [NONSCALING]`
    pub fn build(&self) -> ArgList {
        let mut args = ArgList::new();
        args.positive(BloomKeyword::Capacity, self.capacity);
        if self.error_rate > 0.0 {
            args.arg(BloomKeyword::Error).arg(self.error_rate);
        }
        args.positive(BloomKeyword::Expansion, self.expansion)
            .flag(self.no_create, BloomKeyword::NoCreate)
            .flag(self.non_scaling, BloomKeyword::NonScaling);
        args
    }
}

/// Optional tail of `CF.RESERVE`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CuckooReserveOptions {
    bucket_size: i64,
    max_iterations: i64,
    expansion: i64,
}

impl CuckooReserveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket_size(mut self, bucket_size: i64) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    pub fn max_iterations(mut self, max_iterations: i64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn expansion(mut self, expansion: i64) -> Self {
        self.expansion = expansion;
        self
    }

    /// `[BUCKETSIZE b] [MAXITERATIONS m] [EXPANSION e]`
    pub fn build(&self) -> ArgList {
        let mut args = ArgList::new();
        args.positive(BloomKeyword::BucketSize, self.bucket_size)
            .positive(BloomKeyword::MaxIterations, self.max_iterations)
            .positive(BloomKeyword::Expansion, self.expansion);
        args
    }
}

/// Creation options of `CF.INSERT` / `CF.INSERTNX`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CuckooInsertArgs {
    capacity: i64,
    no_create: bool,
}

impl CuckooInsertArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(mut self, capacity: i64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn no_create(mut self, no_create: bool) -> Self {
        self.no_create = no_create;
        self
    }

    /// `[CAPACITY c] [NOCREATE]`
    pub fn build(&self) -> ArgList {
        let mut args = ArgList::new();
        args.positive(BloomKeyword::Capacity, self.capacity)
            .flag(self.no_create, BloomKeyword::NoCreate);
        args
    }
}

/// Sizing of a Top-K sketch; all three travel together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopKParams {
    pub width: i64,
    pub depth: i64,
    pub decay: f64,
}

impl TopKParams {
    pub fn new(width: i64, depth: i64, decay: f64) -> Self {
        Self { width, depth, decay }
    }
}

/// Optional tail of `TDIGEST.MERGE`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TDigestMergeOptions {
    compression: i64,
    override_dest: bool,
}

impl TDigestMergeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compression(mut self, compression: i64) -> Self {
        self.compression = compression;
        self
    }

    /// Replace the destination instead of merging into it.
    pub fn override_dest(mut self, override_dest: bool) -> Self {
        self.override_dest = override_dest;
        self
    }

    /// `[COMPRESSION c] [OVERRIDE]`
    pub fn build(&self) -> ArgList {
        let mut args = ArgList::new();
        args.positive(BloomKeyword::Compression, self.compression)
            .flag(self.override_dest, BloomKeyword::Override);
        args
    }
}
