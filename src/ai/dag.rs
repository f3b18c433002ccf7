//! `AI.DAGEXECUTE` pipelines.

use crate::ai::commands;
use crate::ai::keywords::AiKeyword;
use crate::ai::model::ScriptExecuteArgs;
use crate::ai::tensor::{self, Tensor, TensorFormat};
use crate::args::ArgList;
use crate::error::{require_key, ModuleError, Result};
use crate::reply::decode;
use crate::reply::Reply;

/// One `|>`-separated operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DagOp {
    TensorSet { key: String, tensor: Tensor },
    TensorGet { key: String, format: TensorFormat },
    ModelExecute {
        key: String,
        inputs: Vec<String>,
        outputs: Vec<String>,
        timeout: Option<i64>,
    },
    ScriptExecute {
        key: String,
        function: String,
        args: ScriptExecuteArgs,
    },
}

impl DagOp {
    fn append_to(&self, args: &mut ArgList) -> Result<()> {
        args.arg(AiKeyword::Pipe);
        match self {
            Self::TensorSet { key, tensor } => {
                require_key("tensor key", key)?;
                args.arg("AI.TENSORSET").arg(key);
                commands::tensor_args(args, tensor)?;
            }
            Self::TensorGet { key, format } => {
                require_key("tensor key", key)?;
                args.arg("AI.TENSORGET").arg(key);
                format.append_to(args);
            }
            Self::ModelExecute {
                key,
                inputs,
                outputs,
                timeout,
            } => {
                require_key("model key", key)?;
                args.arg("AI.MODELEXECUTE").arg(key);
                append_model_io(args, inputs, outputs, *timeout)?;
            }
            Self::ScriptExecute {
                key,
                function,
                args: script_args,
            } => {
                require_key("script key", key)?;
                require_key("function", function)?;
                args.arg("AI.SCRIPTEXECUTE").arg(key).arg(function);
                script_args.append_to(args)?;
            }
        }
        Ok(())
    }
}

/// `INPUTS n … OUTPUTS n … [TIMEOUT t]`
pub(crate) fn append_model_io<S: AsRef<str>, T: AsRef<str>>(
    args: &mut ArgList,
    inputs: &[S],
    outputs: &[T],
    timeout: Option<i64>,
) -> Result<()> {
    if inputs.is_empty() || outputs.is_empty() {
        return Err(ModuleError::invalid("model execution needs inputs and outputs"));
    }
    args.counted(AiKeyword::Inputs, inputs.iter().map(|s| s.as_ref()))
        .counted(AiKeyword::Outputs, outputs.iter().map(|s| s.as_ref()));
    if let Some(timeout) = timeout {
        if timeout <= 0 {
            return Err(ModuleError::invalid("TIMEOUT must be positive"));
        }
        args.arg(AiKeyword::Timeout).arg(timeout);
    }
    Ok(())
}

/// A DAG of tensor, model and script operations run atomically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dag {
    pub load: Vec<String>,
    pub persist: Vec<String>,
    pub routing: Option<String>,
    pub timeout: Option<i64>,
    pub ops: Vec<DagOp>,
}

impl Dag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<I: IntoIterator<Item = S>, S: Into<String>>(mut self, keys: I) -> Self {
        self.load = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn persist<I: IntoIterator<Item = S>, S: Into<String>>(mut self, keys: I) -> Self {
        self.persist = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn routing(mut self, key: impl Into<String>) -> Self {
        self.routing = Some(key.into());
        self
    }

    pub fn timeout(mut self, ms: i64) -> Self {
        self.timeout = Some(ms);
        self
    }

    pub fn tensor_set(mut self, key: impl Into<String>, tensor: Tensor) -> Self {
        self.ops.push(DagOp::TensorSet {
            key: key.into(),
            tensor,
        });
        self
    }

    pub fn tensor_get(mut self, key: impl Into<String>, format: TensorFormat) -> Self {
        self.ops.push(DagOp::TensorGet {
            key: key.into(),
            format,
        });
        self
    }

    pub fn model_execute<I, O, S, T>(mut self, key: impl Into<String>, inputs: I, outputs: O) -> Self
    where
        I: IntoIterator<Item = S>,
        O: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        self.ops.push(DagOp::ModelExecute {
            key: key.into(),
            inputs: inputs.into_iter().map(Into::into).collect(),
            outputs: outputs.into_iter().map(Into::into).collect(),
            timeout: None,
        });
        self
    }

    pub fn script_execute(
        mut self,
        key: impl Into<String>,
        function: impl Into<String>,
        args: ScriptExecuteArgs,
    ) -> Self {
        self.ops.push(DagOp::ScriptExecute {
            key: key.into(),
            function: function.into(),
            args,
        });
        self
    }

    /// Which ops produce tensors, in op order.
    pub(crate) fn tensor_outputs(&self) -> Vec<bool> {
        self.ops
            .iter()
            .map(|op| matches!(op, DagOp::TensorGet { .. }))
            .collect()
    }

    pub(crate) fn build(&self, read_only: bool) -> Result<ArgList> {
        if self.ops.is_empty() {
            return Err(ModuleError::invalid("DAG must contain at least one operation"));
        }
        if read_only && !self.persist.is_empty() {
            return Err(ModuleError::invalid("PERSIST is not allowed in a read-only DAG"));
        }
        let mut args = ArgList::new();
        if !self.load.is_empty() {
            args.counted(AiKeyword::Load, self.load.iter());
        }
        if !self.persist.is_empty() {
            args.counted(AiKeyword::Persist, self.persist.iter());
        }
        args.opt(AiKeyword::Routing, self.routing.as_ref());
        if let Some(timeout) = self.timeout {
            if timeout <= 0 {
                return Err(ModuleError::invalid("TIMEOUT must be positive"));
            }
            args.arg(AiKeyword::Timeout).arg(timeout);
        }
        for op in &self.ops {
            op.append_to(&mut args)?;
        }
        Ok(args)
    }
}

/// Per-op outcome of a DAG run.
#[derive(Debug, Clone, PartialEq)]
pub enum DagOpResult {
    Status(String),
    Tensor(Tensor),
}

pub(crate) fn dag_results(reply: Reply, tensor_outputs: &[bool]) -> Result<Vec<DagOpResult>> {
    let items = decode::array(reply)?;
    if items.len() != tensor_outputs.len() {
        return Err(ModuleError::decode(
            format!("expected {} DAG results, got {}", tensor_outputs.len(), items.len()),
            &Reply::Array(items),
        ));
    }
    items
        .into_iter()
        .zip(tensor_outputs)
        .map(|(item, &is_tensor)| {
            if is_tensor {
                tensor::tensor(item).map(DagOpResult::Tensor)
            } else {
                decode::string(item).map(DagOpResult::Status)
            }
        })
        .collect()
}
