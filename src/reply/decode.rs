//! Reply decoders shared by every module.
//!
//! Each decoder is a pure `fn(Reply) -> Result<T>`; module decoders compose
//! them. A reply that does not match fails with
//! [`ModuleError::Decode`](crate::error::ModuleError::Decode) carrying the
//! offending fragment.

use bytes::Bytes;

use crate::error::{ModuleError, Result};
use crate::reply::Reply;

/// `+OK`.
pub fn ok(reply: Reply) -> Result<()> {
    if reply.is_ok() {
        Ok(())
    } else {
        Err(ModuleError::decode("expected OK", &reply))
    }
}

/// Integer 0/1, RESP3 boolean, `OK`, or `true`/`false` text.
pub fn boolean(reply: Reply) -> Result<bool> {
    reply
        .to_bool()
        .ok_or_else(|| ModuleError::decode("expected boolean", &reply))
}

/// Integer reply (numeric strings accepted).
pub fn integer(reply: Reply) -> Result<i64> {
    expect_i64(&reply, "integer")
}

/// Integer reply, or `None` for null.
pub fn optional_integer(reply: Reply) -> Result<Option<i64>> {
    if reply.is_null() {
        return Ok(None);
    }
    integer(reply).map(Some)
}

/// Double, integer, or numeric string.
pub fn double(reply: Reply) -> Result<f64> {
    expect_f64(&reply, "double")
}

/// Text reply; numbers are rendered as text.
pub fn string(reply: Reply) -> Result<String> {
    reply
        .to_text()
        .ok_or_else(|| ModuleError::decode("expected string", &reply))
}

/// Text reply, or `None` for null.
pub fn optional_string(reply: Reply) -> Result<Option<String>> {
    if reply.is_null() {
        return Ok(None);
    }
    string(reply).map(Some)
}

/// Binary-safe bulk string.
pub fn bytes(reply: Reply) -> Result<Bytes> {
    match reply {
        Reply::Bulk(b) => Ok(b),
        Reply::Status(s) => Ok(Bytes::from(s)),
        other => Err(ModuleError::decode("expected bulk string", &other)),
    }
}

/// The reply itself, untouched.
pub fn raw(reply: Reply) -> Result<Reply> {
    Ok(reply)
}

/// Array reply; null decodes to an empty list.
pub fn array(reply: Reply) -> Result<Vec<Reply>> {
    match reply {
        Reply::Array(items) => Ok(items),
        Reply::Null => Ok(Vec::new()),
        other => Err(ModuleError::decode("expected array", &other)),
    }
}

pub fn boolean_list(reply: Reply) -> Result<Vec<bool>> {
    array(reply)?.into_iter().map(boolean).collect()
}

pub fn integer_list(reply: Reply) -> Result<Vec<i64>> {
    array(reply)?.into_iter().map(integer).collect()
}

pub fn optional_integer_list(reply: Reply) -> Result<Vec<Option<i64>>> {
    array(reply)?.into_iter().map(optional_integer).collect()
}

pub fn double_list(reply: Reply) -> Result<Vec<f64>> {
    array(reply)?.into_iter().map(double).collect()
}

pub fn string_list(reply: Reply) -> Result<Vec<String>> {
    array(reply)?.into_iter().map(string).collect()
}

pub fn optional_string_list(reply: Reply) -> Result<Vec<Option<String>>> {
    array(reply)?.into_iter().map(optional_string).collect()
}

/// Flat `[k1, v1, k2, v2, …]` array (or RESP3 map) into ordered pairs.
///
/// Keys must be text; values are left raw for the caller to coerce.
pub fn flat_pairs(reply: Reply) -> Result<Vec<(String, Reply)>> {
    match reply {
        Reply::Map(entries) => entries
            .into_iter()
            .map(|(k, v)| Ok((key_text(&k)?, v)))
            .collect(),
        Reply::Array(items) => {
            if items.len() % 2 != 0 {
                return Err(ModuleError::decode(
                    format!("expected an even number of elements, got {}", items.len()),
                    &Reply::Array(items),
                ));
            }
            let mut pairs = Vec::with_capacity(items.len() / 2);
            let mut iter = items.into_iter();
            while let (Some(k), Some(v)) = (iter.next(), iter.next()) {
                pairs.push((key_text(&k)?, v));
            }
            Ok(pairs)
        }
        Reply::Null => Ok(Vec::new()),
        other => Err(ModuleError::decode("expected key/value array", &other)),
    }
}

/// Flat pairs with every value rendered as optional text.
pub fn string_pairs(reply: Reply) -> Result<Vec<(String, Option<String>)>> {
    flat_pairs(reply)?
        .into_iter()
        .map(|(k, v)| Ok((k, optional_string(v)?)))
        .collect()
}

fn key_text(key: &Reply) -> Result<String> {
    key.as_str()
        .map(str::to_string)
        .ok_or_else(|| ModuleError::decode("expected text key", key))
}

// ── Field coercion helpers for info-style decoders ─────────────────

/// Coerce a field value to i64.
pub fn expect_i64(value: &Reply, what: &str) -> Result<i64> {
    value
        .to_i64()
        .ok_or_else(|| ModuleError::decode(format!("expected integer for {what}"), value))
}

/// Coerce a field value to f64.
pub fn expect_f64(value: &Reply, what: &str) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| ModuleError::decode(format!("expected number for {what}"), value))
}

/// Coerce a field value to text.
pub fn expect_string(value: &Reply, what: &str) -> Result<String> {
    value
        .to_text()
        .ok_or_else(|| ModuleError::decode(format!("expected string for {what}"), value))
}

/// Coerce a field value to u64, rejecting negatives.
pub fn expect_u64(value: &Reply, what: &str) -> Result<u64> {
    let n = expect_i64(value, what)?;
    u64::try_from(n)
        .map_err(|_| ModuleError::decode(format!("{what} out of range: {n}"), value))
}

/// Coerce a field value to u32, failing on overflow instead of truncating.
pub fn expect_u32(value: &Reply, what: &str) -> Result<u32> {
    let n = expect_i64(value, what)?;
    u32::try_from(n)
        .map_err(|_| ModuleError::decode(format!("{what} out of range: {n}"), value))
}

/// Borrow an array value, or fail naming the field.
pub fn expect_array<'a>(value: &'a Reply, what: &str) -> Result<&'a [Reply]> {
    value
        .as_array()
        .ok_or_else(|| ModuleError::decode(format!("expected array for {what}"), value))
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_accepts_status_only() {
        assert!(ok(Reply::status("OK")).is_ok());
        assert!(ok(Reply::bulk("OK")).is_ok());
        assert!(ok(Reply::Integer(1)).unwrap_err().is_decode());
    }

    #[test]
    fn boolean_variants() {
        assert!(boolean(Reply::Integer(1)).unwrap());
        assert!(!boolean(Reply::Integer(0)).unwrap());
        assert!(boolean(Reply::Boolean(true)).unwrap());
        assert!(boolean(Reply::Null).unwrap_err().is_decode());
    }

    #[test]
    fn lists() {
        let reply = Reply::Array(vec![Reply::Integer(1), Reply::Integer(0), Reply::Integer(1)]);
        assert_eq!(boolean_list(reply.clone()).unwrap(), vec![true, false, true]);
        assert_eq!(integer_list(reply).unwrap(), vec![1, 0, 1]);
        assert_eq!(
            string_list(Reply::bulk_array(["a", "b"])).unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(
            optional_string_list(Reply::Array(vec![Reply::Null, Reply::bulk("x")])).unwrap(),
            vec![None, Some("x".to_string())]
        );
        assert_eq!(
            double_list(Reply::bulk_array(["1.5", "inf"])).unwrap(),
            vec![1.5, f64::INFINITY]
        );
        assert!(integer_list(Reply::Null).unwrap().is_empty());
    }

    #[test]
    fn flat_pairs_array_and_map() {
        let reply = Reply::Array(vec![
            Reply::bulk("Capacity"),
            Reply::Integer(100),
            Reply::bulk("Size"),
            Reply::Integer(240),
        ]);
        let pairs = flat_pairs(reply).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ("Capacity".to_string(), Reply::Integer(100)));

        let map = Reply::Map(vec![(Reply::status("width"), Reply::Integer(5))]);
        assert_eq!(
            flat_pairs(map).unwrap(),
            vec![("width".to_string(), Reply::Integer(5))]
        );
    }

    #[test]
    fn flat_pairs_rejects_odd_length() {
        let reply = Reply::Array(vec![Reply::bulk("k")]);
        let err = flat_pairs(reply.clone()).unwrap_err();
        assert_eq!(err.fragment(), Some(&reply));
    }

    #[test]
    fn narrowing_is_checked() {
        assert_eq!(expect_u32(&Reply::Integer(42), "capacity").unwrap(), 42);
        assert!(expect_u32(&Reply::Integer(i64::from(u32::MAX) + 1), "capacity")
            .unwrap_err()
            .is_decode());
        assert!(expect_u64(&Reply::Integer(-1), "size").unwrap_err().is_decode());
    }

    #[test]
    fn decoding_twice_is_equal() {
        let reply = Reply::bulk_array(["x", "y"]);
        assert_eq!(
            string_list(reply.clone()).unwrap(),
            string_list(reply).unwrap()
        );
    }
}
