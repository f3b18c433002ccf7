crate::keywords! {
    /// Keyword tokens of the RedisBloom commands.
    pub enum BloomKeyword {
        Capacity => "CAPACITY",
        Error => "ERROR",
        Expansion => "EXPANSION",
        NoCreate => "NOCREATE",
        NonScaling => "NONSCALING",
        Items => "ITEMS",
        BucketSize => "BUCKETSIZE",
        MaxIterations => "MAXITERATIONS",
        Weights => "WEIGHTS",
        WithCount => "WITHCOUNT",
        Compression => "COMPRESSION",
        Override => "OVERRIDE",
    }
}
