crate::keywords! {
    /// Keyword tokens of the AI.* commands.
    pub enum AiKeyword {
        Blob => "BLOB",
        Values => "VALUES",
        Meta => "META",
        Tag => "TAG",
        BatchSize => "BATCHSIZE",
        MinBatchSize => "MINBATCHSIZE",
        MinBatchTimeout => "MINBATCHTIMEOUT",
        Inputs => "INPUTS",
        Outputs => "OUTPUTS",
        Source => "SOURCE",
        EntryPoints => "ENTRY_POINTS",
        Keys => "KEYS",
        Args => "ARGS",
        Timeout => "TIMEOUT",
        Load => "LOAD",
        Persist => "PERSIST",
        Routing => "ROUTING",
        ResetStat => "RESETSTAT",
        BackendsPath => "BACKENDSPATH",
        LoadBackend => "LOADBACKEND",
        /// DAG operation separator.
        Pipe => "|>",
    }
}

crate::keywords! {
    /// Tensor element type.
    pub enum DataType {
        Float => "FLOAT",
        Double => "DOUBLE",
        Int8 => "INT8",
        Int16 => "INT16",
        Int32 => "INT32",
        Int64 => "INT64",
        Uint8 => "UINT8",
        Uint16 => "UINT16",
        Bool => "BOOL",
        String => "STRING",
    }
}

impl DataType {
    pub fn is_floating(&self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }
}

crate::keywords! {
    pub enum Backend {
        Tf => "TF",
        TfLite => "TFLITE",
        Torch => "TORCH",
        Onnx => "ONNX",
    }
}
