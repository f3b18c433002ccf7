//! Query parameters rendered as a `CYPHER name=value …` prefix.

use crate::error::{ModuleError, Result};

/// A value that can be bound to a `$name` query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ParamValue>),
    Map(Vec<(String, ParamValue)>),
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for ParamValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for ParamValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
        }
    }
}

fn quote(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Map keys that are not plain identifiers go in backticks, with `` ` `` doubled.
fn map_key(out: &mut String, key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ModuleError::invalid("map keys must not be empty"));
    }
    if is_identifier(key) {
        out.push_str(key);
    } else {
        out.push('`');
        out.push_str(&key.replace('`', "``"));
        out.push('`');
    }
    Ok(())
}

impl ParamValue {
    /// Write this value as a Cypher literal.
    fn render(&self, out: &mut String) -> Result<()> {
        match self {
            Self::Null => out.push_str("null"),
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Int(i) => out.push_str(itoa::Buffer::new().format(*i)),
            Self::Float(f) => {
                if !f.is_finite() {
                    return Err(ModuleError::invalid(format!("{f} has no Cypher literal")));
                }
                out.push_str(ryu::Buffer::new().format_finite(*f));
            }
            Self::String(s) => quote(out, s),
            Self::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.render(out)?;
                }
                out.push(']');
            }
            Self::Map(entries) => {
                out.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    map_key(out, key)?;
                    out.push_str(": ");
                    value.render(out)?;
                }
                out.push('}');
            }
        }
        Ok(())
    }
}

/// `CYPHER a=1 b="x" <query>`; the query is returned unchanged without params.
pub fn with_params(query: &str, params: &[(&str, ParamValue)]) -> Result<String> {
    if params.is_empty() {
        return Ok(query.to_string());
    }
    let mut out = String::from("CYPHER ");
    for (name, value) in params {
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(ModuleError::invalid(format!("invalid parameter name {name:?}")));
        }
        out.push_str(name);
        out.push('=');
        value.render(&mut out)?;
        out.push(' ');
    }
    out.push_str(query);
    Ok(out)
}
