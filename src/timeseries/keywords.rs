crate::keywords! {
    pub enum TsKeyword {
        Retention => "RETENTION",
        Uncompressed => "UNCOMPRESSED",
        Encoding => "ENCODING",
        Compressed => "COMPRESSED",
        ChunkSize => "CHUNK_SIZE",
        DuplicatePolicy => "DUPLICATE_POLICY",
        OnDuplicate => "ON_DUPLICATE",
        Labels => "LABELS",
        Timestamp => "TIMESTAMP",
        Aggregation => "AGGREGATION",
        Align => "ALIGN",
        BucketTimestamp => "BUCKETTIMESTAMP",
        Empty => "EMPTY",
        FilterByTs => "FILTER_BY_TS",
        FilterByValue => "FILTER_BY_VALUE",
        Count => "COUNT",
        WithLabels => "WITHLABELS",
        SelectedLabels => "SELECTED_LABELS",
        Filter => "FILTER",
        GroupBy => "GROUPBY",
        Reduce => "REDUCE",
        Latest => "LATEST",
        Debug => "DEBUG",
    }
}

crate::keywords! {
    /// What happens when a sample arrives for an existing timestamp.
    pub enum DuplicatePolicy {
        Block => "BLOCK",
        First => "FIRST",
        Last => "LAST",
        Min => "MIN",
        Max => "MAX",
        Sum => "SUM",
    }
}

crate::keywords! {
    /// Bucket aggregator; also used as the GROUPBY reducer.
    pub enum AggregationType {
        Avg => "avg",
        Sum => "sum",
        Min => "min",
        Max => "max",
        Range => "range",
        Count => "count",
        First => "first",
        Last => "last",
        StdP => "std.p",
        StdS => "std.s",
        VarP => "var.p",
        VarS => "var.s",
        Twa => "twa",
    }
}

crate::keywords! {
    /// Which bucket edge labels an aggregated sample.
    pub enum BucketTimestamp {
        Start => "start",
        End => "end",
        Mid => "mid",
    }
}
