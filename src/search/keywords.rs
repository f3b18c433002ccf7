crate::keywords! {
    /// Keyword tokens of the FT.* commands.
    pub enum SearchKeyword {
        On => "ON",
        Prefix => "PREFIX",
        Filter => "FILTER",
        Language => "LANGUAGE",
        LanguageField => "LANGUAGE_FIELD",
        Score => "SCORE",
        ScoreField => "SCORE_FIELD",
        MaxTextFields => "MAXTEXTFIELDS",
        Temporary => "TEMPORARY",
        NoOffsets => "NOOFFSETS",
        NoHl => "NOHL",
        NoFields => "NOFIELDS",
        NoFreqs => "NOFREQS",
        Stopwords => "STOPWORDS",
        SkipInitialScan => "SKIPINITIALSCAN",
        Schema => "SCHEMA",
        Add => "ADD",
        As => "AS",
        NoStem => "NOSTEM",
        Weight => "WEIGHT",
        Phonetic => "PHONETIC",
        Sortable => "SORTABLE",
        NoIndex => "NOINDEX",
        Separator => "SEPARATOR",
        CaseSensitive => "CASESENSITIVE",
        Type => "TYPE",
        Dim => "DIM",
        DistanceMetric => "DISTANCE_METRIC",
        DeleteDocs => "DD",
        NoContent => "NOCONTENT",
        Verbatim => "VERBATIM",
        NoStopwords => "NOSTOPWORDS",
        WithScores => "WITHSCORES",
        WithPayloads => "WITHPAYLOADS",
        WithSortKeys => "WITHSORTKEYS",
        GeoFilter => "GEOFILTER",
        InKeys => "INKEYS",
        InFields => "INFIELDS",
        Return => "RETURN",
        Summarize => "SUMMARIZE",
        Fields => "FIELDS",
        Frags => "FRAGS",
        Len => "LEN",
        Highlight => "HIGHLIGHT",
        Tags => "TAGS",
        Slop => "SLOP",
        Timeout => "TIMEOUT",
        InOrder => "INORDER",
        Expander => "EXPANDER",
        Scorer => "SCORER",
        Payload => "PAYLOAD",
        SortBy => "SORTBY",
        Limit => "LIMIT",
        Params => "PARAMS",
        Dialect => "DIALECT",
        Load => "LOAD",
        GroupBy => "GROUPBY",
        Reduce => "REDUCE",
        Apply => "APPLY",
        Max => "MAX",
        WithCursor => "WITHCURSOR",
        Count => "COUNT",
        MaxIdle => "MAXIDLE",
        By => "BY",
        Incr => "INCR",
        Fuzzy => "FUZZY",
        Distance => "DISTANCE",
        Terms => "TERMS",
        Include => "INCLUDE",
        Exclude => "EXCLUDE",
        Star => "*",
    }
}

crate::keywords! {
    /// Document source of an index.
    pub enum IndexOn {
        Hash => "HASH",
        Json => "JSON",
    }
}

crate::keywords! {
    pub enum FieldType {
        Text => "TEXT",
        Tag => "TAG",
        Numeric => "NUMERIC",
        Geo => "GEO",
        Vector => "VECTOR",
    }
}

crate::keywords! {
    pub enum VectorAlgorithm {
        Flat => "FLAT",
        Hnsw => "HNSW",
    }
}

crate::keywords! {
    pub enum DistanceMetric {
        L2 => "L2",
        InnerProduct => "IP",
        Cosine => "COSINE",
    }
}

crate::keywords! {
    pub enum SortOrder {
        Asc => "ASC",
        Desc => "DESC",
    }
}

crate::keywords! {
    pub enum GeoUnit {
        Meters => "m",
        Kilometers => "km",
        Miles => "mi",
        Feet => "ft",
    }
}

crate::keywords! {
    /// `FT.AGGREGATE` reducer functions.
    pub enum ReduceFunction {
        Count => "COUNT",
        CountDistinct => "COUNT_DISTINCT",
        CountDistinctish => "COUNT_DISTINCTISH",
        Sum => "SUM",
        Min => "MIN",
        Max => "MAX",
        Avg => "AVG",
        StdDev => "STDDEV",
        Quantile => "QUANTILE",
        ToList => "TOLIST",
        FirstValue => "FIRST_VALUE",
        RandomSample => "RANDOM_SAMPLE",
    }
}
