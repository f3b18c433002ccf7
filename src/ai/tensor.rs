//! Tensors, devices and their wire forms.

use std::fmt;

use bytes::{Bytes, BytesMut};

use crate::ai::keywords::{AiKeyword, DataType};
use crate::args::{Arg, ArgList};
use crate::error::{ModuleError, Result};
use crate::reply::decode::{self, expect_string};
use crate::reply::Reply;

/// Where a model or script runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Cpu,
    Gpu,
    /// A specific GPU (`GPU:n`).
    GpuIndex(u32),
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => f.write_str("CPU"),
            Self::Gpu => f.write_str("GPU"),
            Self::GpuIndex(n) => write!(f, "GPU:{n}"),
        }
    }
}

impl Device {
    /// Parse a server-reported device, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.to_ascii_uppercase();
        match upper.as_str() {
            "CPU" => Some(Self::Cpu),
            "GPU" => Some(Self::Gpu),
            other => other
                .strip_prefix("GPU:")
                .and_then(|n| n.parse().ok())
                .map(Self::GpuIndex),
        }
    }
}

impl From<Device> for Arg {
    fn from(device: Device) -> Self {
        Arg::Str(device.to_string())
    }
}

pub(crate) fn device_field(value: &Reply) -> Result<Device> {
    let text = expect_string(value, "device")?;
    Device::parse(&text).ok_or_else(|| ModuleError::decode(format!("unknown device {text}"), value))
}

/// A single tensor element.
#[derive(Debug, Clone, PartialEq)]
pub enum TensorValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl From<TensorValue> for Arg {
    fn from(value: TensorValue) -> Self {
        match value {
            TensorValue::Int(i) => Arg::Int(i),
            TensorValue::Float(f) => Arg::Float(f),
            TensorValue::Bool(b) => Arg::Int(i64::from(b)),
            TensorValue::Str(s) => Arg::Str(s),
        }
    }
}

impl From<i64> for TensorValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for TensorValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for TensorValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for TensorValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

/// A tensor with either a raw blob or a value list.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    pub data_type: DataType,
    pub shape: Vec<i64>,
    pub blob: Option<Bytes>,
    pub values: Option<Vec<TensorValue>>,
}

impl Tensor {
    pub fn from_blob(data_type: DataType, shape: Vec<i64>, blob: impl Into<Bytes>) -> Self {
        Self {
            data_type,
            shape,
            blob: Some(blob.into()),
            values: None,
        }
    }

    pub fn from_values<I, V>(data_type: DataType, shape: Vec<i64>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<TensorValue>,
    {
        Self {
            data_type,
            shape,
            blob: None,
            values: Some(values.into_iter().map(Into::into).collect()),
        }
    }
}

/// What `AI.TENSORGET` should return besides the metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TensorFormat {
    Blob,
    #[default]
    Values,
    /// Metadata only.
    Meta,
}

impl TensorFormat {
    pub(crate) fn append_to(self, args: &mut ArgList) {
        args.arg(AiKeyword::Meta);
        match self {
            Self::Blob => {
                args.arg(AiKeyword::Blob);
            }
            Self::Values => {
                args.arg(AiKeyword::Values);
            }
            Self::Meta => {}
        }
    }
}

fn tensor_value(data_type: DataType, reply: Reply) -> Result<TensorValue> {
    Ok(match data_type {
        DataType::Float | DataType::Double => TensorValue::Float(decode::double(reply)?),
        DataType::Bool => TensorValue::Bool(decode::boolean(reply)?),
        DataType::String => TensorValue::Str(decode::string(reply)?),
        _ => TensorValue::Int(decode::integer(reply)?),
    })
}

/// Blob as a single bulk or as an array of chunks.
pub(crate) fn blob(reply: Reply) -> Result<Bytes> {
    match reply {
        Reply::Array(chunks) => {
            let mut buf = BytesMut::new();
            for chunk in chunks {
                buf.extend_from_slice(&decode::bytes(chunk)?);
            }
            Ok(buf.freeze())
        }
        other => decode::bytes(other),
    }
}

/// `[dtype, t, shape, [d…], (blob, b | values, [v…])]`
pub fn tensor(reply: Reply) -> Result<Tensor> {
    let fragment = reply.clone();
    let mut data_type = None;
    let mut shape = Vec::new();
    let mut blob_data = None;
    let mut raw_values = None;
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "dtype" => {
                let text = expect_string(&value, "dtype")?;
                data_type = Some(
                    DataType::from_wire(&text)
                        .ok_or_else(|| ModuleError::decode(format!("unknown dtype {text}"), &value))?,
                );
            }
            "shape" => shape = decode::integer_list(value)?,
            "blob" => blob_data = Some(blob(value)?),
            "values" => raw_values = Some(decode::array(value)?),
            _ => {}
        }
    }
    let data_type =
        data_type.ok_or_else(|| ModuleError::decode("tensor reply without dtype", &fragment))?;
    let values = raw_values
        .map(|items| {
            items
                .into_iter()
                .map(|v| tensor_value(data_type, v))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;
    Ok(Tensor {
        data_type,
        shape,
        blob: blob_data,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_round_trip() {
        assert_eq!(Device::GpuIndex(1).to_string(), "GPU:1");
        assert_eq!(Device::parse("gpu:3"), Some(Device::GpuIndex(3)));
        assert_eq!(Device::parse("CPU"), Some(Device::Cpu));
        assert_eq!(Device::parse("TPU"), None);
    }

    #[test]
    fn decode_values_by_dtype() {
        let reply = Reply::Array(vec![
            Reply::bulk("dtype"),
            Reply::bulk("FLOAT"),
            Reply::bulk("shape"),
            Reply::Array(vec![Reply::Integer(2)]),
            Reply::bulk("values"),
            Reply::Array(vec![Reply::bulk("1.5"), Reply::bulk("2")]),
        ]);
        let t = tensor(reply).unwrap();
        assert_eq!(t.data_type, DataType::Float);
        assert_eq!(t.shape, vec![2]);
        assert_eq!(t.values, Some(vec![TensorValue::Float(1.5), TensorValue::Float(2.0)]));
        assert_eq!(t.blob, None);
    }

    #[test]
    fn decode_chunked_blob() {
        let reply = Reply::Array(vec![
            Reply::bulk("dtype"),
            Reply::bulk("UINT8"),
            Reply::bulk("shape"),
            Reply::Array(vec![Reply::Integer(3)]),
            Reply::bulk("blob"),
            Reply::Array(vec![Reply::bulk("ab"), Reply::bulk("c")]),
        ]);
        assert_eq!(tensor(reply).unwrap().blob.as_deref(), Some(&b"abc"[..]));
    }

    #[test]
    fn unknown_dtype_is_decode_error() {
        let reply = Reply::Array(vec![Reply::bulk("dtype"), Reply::bulk("FLOAT128")]);
        assert!(tensor(reply).unwrap_err().is_decode());
    }

    #[test]
    fn missing_dtype_keeps_the_reply() {
        let reply = Reply::Array(vec![
            Reply::bulk("shape"),
            Reply::Array(vec![Reply::Integer(1)]),
            Reply::bulk("values"),
            Reply::Array(vec![Reply::Integer(7)]),
        ]);
        let err = tensor(reply.clone()).unwrap_err();
        assert_eq!(err.fragment(), Some(&reply));
    }
}
