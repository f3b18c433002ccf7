//! Stored models and scripts.

use bytes::Bytes;

use crate::ai::keywords::{AiKeyword, Backend};
use crate::ai::tensor::{self, device_field, Device};
use crate::args::ArgList;
use crate::error::{ModuleError, Result};
use crate::reply::decode::{self, expect_i64, expect_string};
use crate::reply::Reply;

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub backend: Backend,
    pub device: Device,
    pub tag: Option<String>,
    pub batch_size: i64,
    pub min_batch_size: i64,
    pub min_batch_timeout: i64,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub blob: Option<Bytes>,
}

impl Model {
    pub fn new(backend: Backend, device: Device, blob: impl Into<Bytes>) -> Self {
        Self {
            backend,
            device,
            tag: None,
            batch_size: 0,
            min_batch_size: 0,
            min_batch_timeout: 0,
            inputs: Vec::new(),
            outputs: Vec::new(),
            blob: Some(blob.into()),
        }
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn batch_size(mut self, n: i64) -> Self {
        self.batch_size = n;
        self
    }

    pub fn min_batch_size(mut self, n: i64) -> Self {
        self.min_batch_size = n;
        self
    }

    pub fn min_batch_timeout(mut self, ms: i64) -> Self {
        self.min_batch_timeout = ms;
        self
    }

    pub fn inputs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn outputs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs = names.into_iter().map(Into::into).collect();
        self
    }
}

fn non_empty_tag(value: &Reply) -> Result<Option<String>> {
    if value.is_null() {
        return Ok(None);
    }
    let tag = expect_string(value, "tag")?;
    Ok((!tag.is_empty()).then_some(tag))
}

/// `AI.MODELGET … META [BLOB]` flat pairs.
pub fn model(reply: Reply) -> Result<Model> {
    let fragment = reply.clone();
    let mut backend = None;
    let mut device = None;
    let mut model = Model {
        backend: Backend::Tf,
        device: Device::Cpu,
        tag: None,
        batch_size: 0,
        min_batch_size: 0,
        min_batch_timeout: 0,
        inputs: Vec::new(),
        outputs: Vec::new(),
        blob: None,
    };
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "backend" => {
                let text = expect_string(&value, "backend")?;
                backend = Some(
                    Backend::from_wire(&text)
                        .ok_or_else(|| ModuleError::decode(format!("unknown backend {text}"), &value))?,
                );
            }
            "device" => device = Some(device_field(&value)?),
            "tag" => model.tag = non_empty_tag(&value)?,
            "batchsize" => model.batch_size = expect_i64(&value, "batchsize")?,
            "minbatchsize" => model.min_batch_size = expect_i64(&value, "minbatchsize")?,
            "minbatchtimeout" => model.min_batch_timeout = expect_i64(&value, "minbatchtimeout")?,
            "inputs" => model.inputs = decode::string_list(value)?,
            "outputs" => model.outputs = decode::string_list(value)?,
            "blob" => model.blob = Some(tensor::blob(value)?),
            _ => {}
        }
    }
    model.backend =
        backend.ok_or_else(|| ModuleError::decode("model reply without backend", &fragment))?;
    model.device =
        device.ok_or_else(|| ModuleError::decode("model reply without device", &fragment))?;
    Ok(model)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub device: Device,
    pub tag: Option<String>,
    pub entry_points: Vec<String>,
    pub source: String,
}

impl Script {
    pub fn new(device: Device, source: impl Into<String>) -> Self {
        Self {
            device,
            tag: None,
            entry_points: Vec::new(),
            source: source.into(),
        }
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn entry_points<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entry_points = names.into_iter().map(Into::into).collect();
        self
    }
}

pub fn script(reply: Reply) -> Result<Script> {
    let fragment = reply.clone();
    let mut device = None;
    let mut script = Script::new(Device::Cpu, String::new());
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "device" => device = Some(device_field(&value)?),
            "tag" => script.tag = non_empty_tag(&value)?,
            "entry_points" => script.entry_points = decode::string_list(value)?,
            "source" => script.source = decode::string(value)?,
            _ => {}
        }
    }
    script.device =
        device.ok_or_else(|| ModuleError::decode("script reply without device", &fragment))?;
    Ok(script)
}

/// Arguments of `AI.SCRIPTEXECUTE`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptExecuteArgs {
    pub keys: Vec<String>,
    pub inputs: Vec<String>,
    pub args: Vec<String>,
    pub outputs: Vec<String>,
    pub timeout: Option<i64>,
}

impl ScriptExecuteArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys<I: IntoIterator<Item = S>, S: Into<String>>(mut self, keys: I) -> Self {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn inputs<I: IntoIterator<Item = S>, S: Into<String>>(mut self, inputs: I) -> Self {
        self.inputs = inputs.into_iter().map(Into::into).collect();
        self
    }

    pub fn args<I: IntoIterator<Item = S>, S: Into<String>>(mut self, args: I) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn outputs<I: IntoIterator<Item = S>, S: Into<String>>(mut self, outputs: I) -> Self {
        self.outputs = outputs.into_iter().map(Into::into).collect();
        self
    }

    pub fn timeout(mut self, ms: i64) -> Self {
        self.timeout = Some(ms);
        self
    }

    /// `[KEYS n …] [INPUTS n …] [ARGS n …] [OUTPUTS n …] [TIMEOUT t]`
    pub(crate) fn append_to(&self, list: &mut ArgList) -> Result<()> {
        for (keyword, items) in [
            (AiKeyword::Keys, &self.keys),
            (AiKeyword::Inputs, &self.inputs),
            (AiKeyword::Args, &self.args),
            (AiKeyword::Outputs, &self.outputs),
        ] {
            if !items.is_empty() {
                list.counted(keyword, items.iter());
            }
        }
        if let Some(timeout) = self.timeout {
            if timeout <= 0 {
                return Err(ModuleError::invalid("TIMEOUT must be positive"));
            }
            list.arg(AiKeyword::Timeout).arg(timeout);
        }
        Ok(())
    }
}

/// `AI.INFO` statistics for a model or script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoResult {
    pub key: String,
    pub type_: String,
    pub backend: String,
    pub device: String,
    pub tag: Option<String>,
    pub duration: i64,
    pub samples: i64,
    pub calls: i64,
    pub errors: i64,
}

pub fn info_result(reply: Reply) -> Result<InfoResult> {
    let mut info = InfoResult::default();
    for (name, value) in decode::flat_pairs(reply)? {
        match name.as_str() {
            "key" => info.key = expect_string(&value, "key")?,
            "type" => info.type_ = expect_string(&value, "type")?,
            "backend" => info.backend = expect_string(&value, "backend")?,
            "device" => info.device = expect_string(&value, "device")?,
            "tag" => info.tag = non_empty_tag(&value)?,
            "duration" => info.duration = expect_i64(&value, "duration")?,
            "samples" => info.samples = expect_i64(&value, "samples")?,
            "calls" => info.calls = expect_i64(&value, "calls")?,
            "errors" => info.errors = expect_i64(&value, "errors")?,
            _ => {}
        }
    }
    Ok(info)
}

/// `[[key, tag]…]` from `AI._MODELSCAN` / `AI._SCRIPTSCAN`.
pub fn scan_entries(reply: Reply) -> Result<Vec<(String, String)>> {
    decode::array(reply)?
        .into_iter()
        .map(|entry| {
            let [key, tag]: [Reply; 2] = match entry {
                Reply::Array(items) => items
                    .try_into()
                    .map_err(|items| ModuleError::decode("expected [key, tag]", &Reply::Array(items)))?,
                other => return Err(ModuleError::decode("expected [key, tag]", &other)),
            };
            Ok((decode::string(key)?, decode::optional_string(tag)?.unwrap_or_default()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_model_meta() {
        let reply = Reply::Array(vec![
            Reply::bulk("backend"),
            Reply::bulk("ONNX"),
            Reply::bulk("device"),
            Reply::bulk("CPU"),
            Reply::bulk("tag"),
            Reply::bulk(""),
            Reply::bulk("batchsize"),
            Reply::Integer(2),
            Reply::bulk("minbatchsize"),
            Reply::Integer(0),
            Reply::bulk("inputs"),
            Reply::bulk_array(["x"]),
            Reply::bulk("outputs"),
            Reply::bulk_array(["y"]),
        ]);
        let m = model(reply).unwrap();
        assert_eq!(m.backend, Backend::Onnx);
        assert_eq!(m.tag, None);
        assert_eq!(m.batch_size, 2);
        assert_eq!(m.inputs, vec!["x"]);
        assert_eq!(m.blob, None);
    }

    #[test]
    fn missing_backend_keeps_the_reply() {
        let reply = Reply::bulk_array(["device", "CPU", "tag", "t"]);
        let err = model(reply.clone()).unwrap_err();
        assert!(err.is_decode());
        assert_eq!(err.fragment(), Some(&reply));

        let reply = Reply::bulk_array(["tag", "t", "source", "def f(): pass"]);
        assert_eq!(script(reply.clone()).unwrap_err().fragment(), Some(&reply));
    }

    #[test]
    fn execute_args_order() {
        let mut list = ArgList::new();
        ScriptExecuteArgs::new()
            .outputs(["o"])
            .keys(["k"])
            .args(["1"])
            .timeout(10)
            .append_to(&mut list)
            .unwrap();
        assert_eq!(
            list.to_strings(),
            vec!["KEYS", "1", "k", "ARGS", "1", "1", "OUTPUTS", "1", "o", "TIMEOUT", "10"]
        );
    }

    #[test]
    fn decode_info_and_scan() {
        let reply = Reply::Array(vec![
            Reply::bulk("key"),
            Reply::bulk("m"),
            Reply::bulk("type"),
            Reply::bulk("MODEL"),
            Reply::bulk("calls"),
            Reply::Integer(3),
            Reply::bulk("duration"),
            Reply::Integer(120),
        ]);
        let info = info_result(reply).unwrap();
        assert_eq!(info.key, "m");
        assert_eq!(info.type_, "MODEL");
        assert_eq!(info.calls, 3);
        assert_eq!(info.duration, 120);

        let scan = Reply::Array(vec![Reply::bulk_array(["m1", "v1"]), Reply::bulk_array(["m2", ""])]);
        assert_eq!(
            scan_entries(scan).unwrap(),
            vec![("m1".into(), "v1".into()), ("m2".into(), String::new())]
        );
    }
}
