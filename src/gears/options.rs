use crate::args::ArgList;
use crate::gears::keywords::GearsKeyword;

/// Flags for `RG.PYEXECUTE`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PyExecuteOptions {
    pub unblocking: bool,
    pub requirements: Vec<String>,
}

impl PyExecuteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return an execution id immediately instead of waiting for results.
    pub fn unblocking(mut self) -> Self {
        self.unblocking = true;
        self
    }

    /// Python package the script needs, e.g. `"redis==4.5.1"`.
    pub fn requirement(mut self, requirement: impl Into<String>) -> Self {
        self.requirements.push(requirement.into());
        self
    }

    pub(crate) fn append_to(&self, args: &mut ArgList) {
        args.flag(self.unblocking, GearsKeyword::Unblocking);
        if !self.requirements.is_empty() {
            args.arg(GearsKeyword::Requirements)
                .args(self.requirements.iter().map(String::as_str));
        }
    }
}
