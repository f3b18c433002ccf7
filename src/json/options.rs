use crate::args::ArgList;
use crate::json::keywords::JsonKeyword;

/// Existence condition for `JSON.SET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetArgs {
    #[default]
    None,
    /// Only set if the path does not exist yet.
    Nx,
    /// Only set if the path already exists.
    Xx,
}

impl SetArgs {
    pub(crate) fn append_to(self, args: &mut ArgList) {
        match self {
            Self::None => {}
            Self::Nx => {
                args.arg(JsonKeyword::Nx);
            }
            Self::Xx => {
                args.arg(JsonKeyword::Xx);
            }
        }
    }
}

/// Formatting and paths for `JSON.GET`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetArgs {
    pub indent: Option<String>,
    pub newline: Option<String>,
    pub space: Option<String>,
    pub paths: Vec<String>,
}

impl GetArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = Some(indent.into());
        self
    }

    pub fn newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = Some(newline.into());
        self
    }

    pub fn space(mut self, space: impl Into<String>) -> Self {
        self.space = Some(space.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// `[INDENT s] [NEWLINE s] [SPACE s] path…`, falling back to
    /// `default_path` when no path was given.
    pub(crate) fn append_to(&self, args: &mut ArgList, default_path: &str) {
        args.opt(JsonKeyword::Indent, self.indent.as_ref())
            .opt(JsonKeyword::Newline, self.newline.as_ref())
            .opt(JsonKeyword::Space, self.space.as_ref());
        if self.paths.is_empty() {
            args.arg(default_path);
        } else {
            args.args(self.paths.iter());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_args_order() {
        let mut args = ArgList::new();
        GetArgs::new()
            .space(" ")
            .indent("\t")
            .path("$.a")
            .path("$.b")
            .append_to(&mut args, ".");
        assert_eq!(args.to_strings(), vec!["INDENT", "\t", "SPACE", " ", "$.a", "$.b"]);
    }

    #[test]
    fn default_path_when_none_given() {
        let mut args = ArgList::new();
        GetArgs::new().append_to(&mut args, "$");
        assert_eq!(args.to_strings(), vec!["$"]);
    }

    #[test]
    fn set_conditions() {
        let mut args = ArgList::new();
        SetArgs::None.append_to(&mut args);
        SetArgs::Xx.append_to(&mut args);
        assert_eq!(args.to_strings(), vec!["XX"]);
    }
}
