crate::keywords! {
    pub enum JsonKeyword {
        Nx => "NX",
        Xx => "XX",
        Indent => "INDENT",
        Newline => "NEWLINE",
        Space => "SPACE",
    }
}

crate::keywords! {
    /// Value type reported by `JSON.TYPE`.
    pub enum JsonType {
        Object => "object",
        Array => "array",
        String => "string",
        Integer => "integer",
        Number => "number",
        Boolean => "boolean",
        Null => "null",
    }
}
