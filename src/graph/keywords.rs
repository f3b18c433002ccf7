crate::keywords! {
    pub enum GraphKeyword {
        Timeout => "TIMEOUT",
        Compact => "--compact",
    }
}
