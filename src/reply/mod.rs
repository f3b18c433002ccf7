//! Raw reply tree handed back by a [`CommandExecutor`](crate::executor::CommandExecutor).
//!
//! The transport has already turned wire bytes into scalars and arrays; every
//! module decoder pattern-matches on this shape. RESP3 maps, doubles and
//! booleans are accepted so a RESP3 transport can feed the same decoders.

pub mod decode;

use bytes::Bytes;

/// A decoded-from-the-wire reply value.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// +OK\r\n
    Status(String),
    /// $6\r\nfoobar\r\n
    Bulk(Bytes),
    /// :1000\r\n
    Integer(i64),
    /// ,3.14\r\n (RESP3)
    Double(f64),
    /// #t\r\n or #f\r\n (RESP3)
    Boolean(bool),
    /// *2\r\n…
    Array(Vec<Reply>),
    /// %N\r\n (RESP3 map)
    Map(Vec<(Reply, Reply)>),
    /// $-1\r\n, *-1\r\n or _\r\n
    Null,
}

// ── Convenience constructors ───────────────────────────────────────

impl Reply {
    /// Bulk string from UTF-8 text.
    pub fn bulk(s: impl AsRef<str>) -> Self {
        Self::Bulk(Bytes::copy_from_slice(s.as_ref().as_bytes()))
    }

    /// Status reply (`+OK`).
    pub fn status(s: impl Into<String>) -> Self {
        Self::Status(s.into())
    }

    /// Array of bulk strings.
    pub fn bulk_array<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Array(items.into_iter().map(Self::bulk).collect())
    }
}

// ── Convenience accessors ──────────────────────────────────────────

impl Reply {
    /// Try to interpret this value as a UTF-8 string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Status(s) => Some(s),
            Self::Bulk(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Try to interpret this value as bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bulk(b) => Some(b),
            Self::Status(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Try to interpret this value as i64 (integer replies only).
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Integer reply, or a string holding a base-10 integer.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Status(s) => s.parse().ok(),
            Self::Bulk(b) => std::str::from_utf8(b).ok().and_then(|s| s.parse().ok()),
            _ => None,
        }
    }

    /// Double, integer, or a numeric string (`inf`, `-inf` and `nan` included).
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            Self::Integer(i) => Some(*i as f64),
            Self::Status(_) | Self::Bulk(_) => self.as_str().and_then(parse_float),
            _ => None,
        }
    }

    /// Boolean, integer 0/1, or the strings `true`/`false`.
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            Self::Integer(i) => Some(*i != 0),
            Self::Status(_) | Self::Bulk(_) => match self.as_str()? {
                "true" | "TRUE" | "1" | "OK" => Some(true),
                "false" | "FALSE" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Render any scalar as text (numbers formatted, null → `None`).
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Status(s) => Some(s.clone()),
            Self::Bulk(b) => Some(String::from_utf8_lossy(b).into_owned()),
            Self::Integer(i) => Some(itoa::Buffer::new().format(*i).to_string()),
            Self::Double(d) => Some(d.to_string()),
            Self::Boolean(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Borrow this value as an array.
    pub fn as_array(&self) -> Option<&[Reply]> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Try to interpret this value as an array (consumes self).
    pub fn into_array(self) -> Option<Vec<Reply>> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns true when this value represents null / nil.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true for the `+OK` status.
    pub fn is_ok(&self) -> bool {
        matches!(self.as_str(), Some("OK"))
    }

    /// Returns the type name as a static string (useful for error messages).
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Status(_) => "status",
            Self::Bulk(_) => "bulk_string",
            Self::Integer(_) => "integer",
            Self::Double(_) => "double",
            Self::Boolean(_) => "boolean",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Null => "null",
        }
    }
}

/// Parse a Redis-style float (`inf`, `+inf`, `-inf` accepted).
pub(crate) fn parse_float(s: &str) -> Option<f64> {
    match s {
        "inf" | "+inf" | "Inf" | "+Inf" => Some(f64::INFINITY),
        "-inf" | "-Inf" => Some(f64::NEG_INFINITY),
        _ => s.trim().parse().ok(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_variants() {
        assert_eq!(Reply::status("OK").as_str(), Some("OK"));
        assert_eq!(Reply::bulk("hello").as_str(), Some("hello"));
        assert_eq!(Reply::Bulk(Bytes::from_static(&[0xff, 0xfe])).as_str(), None);
        assert_eq!(Reply::Integer(42).as_str(), None);
        assert_eq!(Reply::Null.as_str(), None);
    }

    #[test]
    fn as_bytes_variants() {
        let v = Reply::Bulk(Bytes::from_static(&[1, 2, 3]));
        assert_eq!(v.as_bytes(), Some(&[1u8, 2, 3][..]));
        assert_eq!(Reply::status("OK").as_bytes(), Some(b"OK".as_ref()));
        assert_eq!(Reply::Integer(1).as_bytes(), None);
    }

    #[test]
    fn to_i64_accepts_numeric_strings() {
        assert_eq!(Reply::Integer(-1).to_i64(), Some(-1));
        assert_eq!(Reply::bulk("1024").to_i64(), Some(1024));
        assert_eq!(Reply::status("7").to_i64(), Some(7));
        assert_eq!(Reply::bulk("x").to_i64(), None);
        assert_eq!(Reply::Double(1.0).to_i64(), None);
    }

    #[test]
    fn to_f64_accepts_infinities() {
        assert_eq!(Reply::Double(3.5).to_f64(), Some(3.5));
        assert_eq!(Reply::Integer(2).to_f64(), Some(2.0));
        assert_eq!(Reply::bulk("0.25").to_f64(), Some(0.25));
        assert_eq!(Reply::bulk("inf").to_f64(), Some(f64::INFINITY));
        assert_eq!(Reply::bulk("-inf").to_f64(), Some(f64::NEG_INFINITY));
        assert!(Reply::bulk("nan").to_f64().unwrap().is_nan());
        assert_eq!(Reply::Null.to_f64(), None);
    }

    #[test]
    fn to_bool_variants() {
        assert_eq!(Reply::Integer(1).to_bool(), Some(true));
        assert_eq!(Reply::Integer(0).to_bool(), Some(false));
        assert_eq!(Reply::Boolean(true).to_bool(), Some(true));
        assert_eq!(Reply::bulk("false").to_bool(), Some(false));
        assert_eq!(Reply::status("OK").to_bool(), Some(true));
        assert_eq!(Reply::Null.to_bool(), None);
    }

    #[test]
    fn to_text_formats_scalars() {
        assert_eq!(Reply::Integer(12).to_text().as_deref(), Some("12"));
        assert_eq!(Reply::bulk("a").to_text().as_deref(), Some("a"));
        assert_eq!(Reply::Null.to_text(), None);
        assert_eq!(Reply::Array(vec![]).to_text(), None);
    }

    #[test]
    fn into_array_and_null() {
        let v = Reply::Array(vec![Reply::Integer(1), Reply::Integer(2)]);
        assert_eq!(v.as_array().map(|a| a.len()), Some(2));
        assert_eq!(v.into_array().unwrap().len(), 2);
        assert!(Reply::Integer(1).into_array().is_none());
        assert!(Reply::Null.is_null());
        assert!(!Reply::bulk("").is_null());
    }

    #[test]
    fn type_name_all_variants() {
        assert_eq!(Reply::status("").type_name(), "status");
        assert_eq!(Reply::Bulk(Bytes::new()).type_name(), "bulk_string");
        assert_eq!(Reply::Integer(0).type_name(), "integer");
        assert_eq!(Reply::Double(0.0).type_name(), "double");
        assert_eq!(Reply::Boolean(true).type_name(), "boolean");
        assert_eq!(Reply::Array(vec![]).type_name(), "array");
        assert_eq!(Reply::Map(vec![]).type_name(), "map");
        assert_eq!(Reply::Null.type_name(), "null");
    }
}
