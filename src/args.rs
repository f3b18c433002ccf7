//! Command arguments and the keyword vocabulary plumbing.
//!
//! Every request builder produces an [`ArgList`]: an ordered sequence of
//! [`Arg`] values, each already coercible to a wire scalar.

use std::borrow::Cow;

use bytes::Bytes;

use crate::error::{ModuleError, Result};

/// A single command argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Int(i64),
    Float(f64),
    Bytes(Bytes),
    /// Protocol keyword; always sent as its wire text.
    Token(&'static str),
}

impl Arg {
    /// Wire representation of this argument.
    pub fn to_bytes(&self) -> Cow<'_, [u8]> {
        match self {
            Self::Str(s) => Cow::Borrowed(s.as_bytes()),
            Self::Bytes(b) => Cow::Borrowed(b.as_ref()),
            Self::Token(t) => Cow::Borrowed(t.as_bytes()),
            Self::Int(i) => Cow::Owned(itoa::Buffer::new().format(*i).as_bytes().to_vec()),
            Self::Float(f) => Cow::Owned(format_float(*f).into_bytes()),
        }
    }

    /// Text view of this argument (lossy for binary blobs).
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::Str(s) => Cow::Borrowed(s),
            Self::Token(t) => Cow::Borrowed(t),
            Self::Bytes(b) => String::from_utf8_lossy(b),
            Self::Int(i) => Cow::Owned(itoa::Buffer::new().format(*i).to_string()),
            Self::Float(f) => Cow::Owned(format_float(*f)),
        }
    }
}

/// Render a float the way Redis modules parse it.
///
/// Integral values drop the fraction (`5.0` → `5`), infinities use the
/// `+inf`/`-inf` spelling, everything else is the shortest round-trip form.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "+inf" } else { "-inf" }.to_string();
    }
    if f.fract() == 0.0 && f.abs() < 1e15 {
        return itoa::Buffer::new().format(f as i64).to_string();
    }
    ryu::Buffer::new().format_finite(f).to_string()
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<i64> for Arg {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Arg {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for Arg {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u64> for Arg {
    fn from(i: u64) -> Self {
        match i64::try_from(i) {
            Ok(v) => Self::Int(v),
            Err(_) => Self::Str(i.to_string()),
        }
    }
}

impl From<usize> for Arg {
    fn from(i: usize) -> Self {
        Self::from(i as u64)
    }
}

impl From<f64> for Arg {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Bytes> for Arg {
    fn from(b: Bytes) -> Self {
        Self::Bytes(b)
    }
}

impl From<&Bytes> for Arg {
    fn from(b: &Bytes) -> Self {
        Self::Bytes(b.clone())
    }
}

impl From<Vec<u8>> for Arg {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(b))
    }
}

impl From<&[u8]> for Arg {
    fn from(b: &[u8]) -> Self {
        Self::Bytes(Bytes::copy_from_slice(b))
    }
}

// ── Keywords ───────────────────────────────────────────────────────

/// A protocol keyword with an explicit wire spelling.
pub trait Keyword: Copy {
    fn as_wire(&self) -> &'static str;
}

/// Declare a keyword enum whose variants carry an explicit wire string.
///
/// ```ignore
/// keywords! {
///     pub enum BloomKeyword {
///         Capacity => "CAPACITY",
///         NoCreate => "NOCREATE",
///     }
/// }
/// ```
///
/// Generates [`Keyword`], `From<Enum> for Arg`, `Display` and a
/// case-insensitive `from_wire` for decoding server-reported values.
#[macro_export]
macro_rules! keywords {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::args::Keyword for $name {
            fn as_wire(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$( Self::$variant ),+];

            /// Parse a wire token, ignoring ASCII case.
            pub fn from_wire(s: &str) -> Option<Self> {
                $( if s.eq_ignore_ascii_case($wire) { return Some(Self::$variant); } )+
                None
            }
        }

        impl From<$name> for $crate::args::Arg {
            fn from(k: $name) -> Self {
                $crate::args::Arg::Token($crate::args::Keyword::as_wire(&k))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::args::Keyword::as_wire(self))
            }
        }
    };
}

// ── ArgList ────────────────────────────────────────────────────────

/// Ordered argument list under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgList {
    args: Vec<Arg>,
}

impl ArgList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            args: Vec::with_capacity(cap),
        }
    }

    /// Append one argument.
    pub fn arg(&mut self, arg: impl Into<Arg>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// Append every item.
    pub fn args<I, T>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arg>,
    {
        self.args.extend(items.into_iter().map(Into::into));
        self
    }

    /// Append a bare keyword when `on` is set.
    pub fn flag(&mut self, on: bool, keyword: impl Into<Arg>) -> &mut Self {
        if on {
            self.args.push(keyword.into());
        }
        self
    }

    /// Append `keyword value` when the value is present.
    pub fn opt<T: Into<Arg>>(&mut self, keyword: impl Into<Arg>, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.args.push(keyword.into());
            self.args.push(value.into());
        }
        self
    }

    /// Append `keyword value` when `value > 0`.
    pub fn positive(&mut self, keyword: impl Into<Arg>, value: i64) -> &mut Self {
        if value > 0 {
            self.args.push(keyword.into());
            self.args.push(Arg::Int(value));
        }
        self
    }

    /// Append `keyword <len> item…` (count-prefixed group).
    pub fn counted<I, T>(&mut self, keyword: impl Into<Arg>, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
        T: Into<Arg>,
    {
        let items = items.into_iter();
        self.args.push(keyword.into());
        self.args.push(Arg::from(items.len()));
        self.args.extend(items.map(Into::into));
        self
    }

    /// Append the contents of another list.
    pub fn append(&mut self, other: ArgList) -> &mut Self {
        self.args.extend(other.args);
        self
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn as_slice(&self) -> &[Arg] {
        &self.args
    }

    pub fn into_vec(self) -> Vec<Arg> {
        self.args
    }

    /// Text rendering of every argument (handy in tests and logs).
    pub fn to_strings(&self) -> Vec<String> {
        self.args.iter().map(|a| a.to_text().into_owned()).collect()
    }
}

/// Collect a mandatory collection, failing with `InvalidArgument` when empty.
pub(crate) fn non_empty<I, T>(what: &str, items: I) -> Result<Vec<Arg>>
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    let items: Vec<Arg> = items.into_iter().map(Into::into).collect();
    if items.is_empty() {
        return Err(ModuleError::invalid(format!("{what} must not be empty")));
    }
    Ok(items)
}

impl From<Vec<Arg>> for ArgList {
    fn from(args: Vec<Arg>) -> Self {
        Self { args }
    }
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    crate::keywords! {
        enum Probe {
            Items => "ITEMS",
            NoCreate => "NOCREATE",
            Pipe => "|>",
        }
    }

    #[test]
    fn keyword_wire_text_is_explicit() {
        assert_eq!(Probe::Items.as_wire(), "ITEMS");
        assert_eq!(Probe::Pipe.as_wire(), "|>");
        assert_eq!(Arg::from(Probe::NoCreate), Arg::Token("NOCREATE"));
        assert_eq!(Probe::Pipe.to_string(), "|>");
    }

    #[test]
    fn keyword_from_wire_ignores_case() {
        assert_eq!(Probe::from_wire("items"), Some(Probe::Items));
        assert_eq!(Probe::from_wire("NOCREATE"), Some(Probe::NoCreate));
        assert_eq!(Probe::from_wire("nope"), None);
        assert_eq!(Probe::ALL.len(), 3);
    }

    #[test]
    fn float_formatting() {
        assert_eq!(format_float(5.0), "5");
        assert_eq!(format_float(0.01), "0.01");
        assert_eq!(format_float(-2.5), "-2.5");
        assert_eq!(format_float(f64::INFINITY), "+inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_float(f64::NAN), "nan");
    }

    #[test]
    fn arg_to_bytes() {
        assert_eq!(Arg::from("k").to_bytes().as_ref(), b"k");
        assert_eq!(Arg::from(42i64).to_bytes().as_ref(), b"42");
        assert_eq!(Arg::from(0.5).to_bytes().as_ref(), b"0.5");
        assert_eq!(Arg::from(vec![0u8, 255]).to_bytes().as_ref(), &[0u8, 255]);
        assert_eq!(Arg::from(u64::MAX).to_text(), "18446744073709551615");
    }

    #[test]
    fn non_empty_rejects_nothing() {
        assert!(non_empty("items", Vec::<&str>::new()).unwrap_err().is_invalid_argument());
        assert_eq!(non_empty("items", ["a"]).unwrap(), vec![Arg::from("a")]);
    }

    #[test]
    fn arg_list_groups() {
        let mut args = ArgList::new();
        args.arg("key")
            .positive("CAPACITY", 0)
            .positive("EXPANSION", 2)
            .opt("ERROR", Some(0.01))
            .opt::<i64>("TAG", None)
            .flag(true, Probe::NoCreate)
            .flag(false, "NONSCALING")
            .counted("INPUTS", ["a", "b"]);
        assert_eq!(
            args.to_strings(),
            vec!["key", "EXPANSION", "2", "ERROR", "0.01", "NOCREATE", "INPUTS", "2", "a", "b"]
        );
    }
}
