crate::keywords! {
    pub enum GearsKeyword {
        Unblocking => "UNBLOCKING",
        Requirements => "REQUIREMENTS",
        Shard => "SHARD",
        Cluster => "CLUSTER",
    }
}

/// Which plan `RG.GETEXECUTION` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Let the server pick (the local shard in cluster mode).
    #[default]
    Default,
    Shard,
    Cluster,
}

impl ExecutionMode {
    pub(crate) fn keyword(self) -> Option<GearsKeyword> {
        match self {
            Self::Default => None,
            Self::Shard => Some(GearsKeyword::Shard),
            Self::Cluster => Some(GearsKeyword::Cluster),
        }
    }
}
