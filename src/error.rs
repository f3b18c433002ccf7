use std::io;

use crate::reply::Reply;

// ── Error taxonomy ─────────────────────────────────────────────────
//
//  ModuleError
//  ├── InvalidArgument   request builder rejected its input (no I/O happened)
//  ├── Decode            reply shape did not match the command's decoder
//  ├── Redis             server replied with an error (surfaced by the executor)
//  ├── Connection        transport I/O failure (surfaced by the executor)
//  ├── Timeout           transport timeout (surfaced by the executor)
//  ├── Json              JSON value could not be (de)serialized
//  └── Batch             batch results misuse

/// Structured Redis error kinds for programmatic matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedisErrorKind {
    /// Generic ERR
    Err,
    /// WRONGTYPE Operation against a key holding the wrong kind of value
    WrongType,
    /// LOADING Redis is loading the dataset in memory
    Loading,
    /// READONLY You can't write against a read only replica
    ReadOnly,
    /// NOSCRIPT No matching script
    NoScript,
    /// BUSY Redis is busy running a script
    Busy,
    /// TRYAGAIN
    TryAgain,
    /// Any other Redis error prefix
    Other(String),
}

impl RedisErrorKind {
    /// Parse from a Redis error message string (e.g. "WRONGTYPE Operation against…").
    pub fn from_error_msg(msg: &str) -> (Self, String) {
        let kind = if msg.starts_with("WRONGTYPE") {
            Self::WrongType
        } else if msg.starts_with("LOADING") {
            Self::Loading
        } else if msg.starts_with("READONLY") {
            Self::ReadOnly
        } else if msg.starts_with("NOSCRIPT") {
            Self::NoScript
        } else if msg.starts_with("BUSY") {
            Self::Busy
        } else if msg.starts_with("TRYAGAIN") {
            Self::TryAgain
        } else if msg.starts_with("ERR") {
            Self::Err
        } else {
            // Module errors rarely carry a prefix, keep the first word.
            let prefix = msg.split_whitespace().next().unwrap_or("UNKNOWN");
            Self::Other(prefix.to_string())
        };
        (kind, msg.to_string())
    }
}

/// All error variants for redis-modules.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    /// A request builder rejected its input before anything was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The reply did not have the shape the command's decoder expects.
    #[error("decode error: {message} (reply fragment: {fragment:?})")]
    Decode { message: String, fragment: Reply },
    /// Redis returned an error string with structured kind
    #[error("redis error: {message}")]
    Redis {
        kind: RedisErrorKind,
        message: String,
    },
    /// TCP / IO level errors raised by the executor
    #[error("connection error: {0}")]
    Connection(#[from] io::Error),
    /// Operation timed out inside the executor
    #[error("timeout: {0}")]
    Timeout(String),
    /// JSON value (de)serialization failed
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Batch misuse (foreign handle, result already taken, reply count mismatch)
    #[error("batch error: {0}")]
    Batch(String),
}

impl ModuleError {
    /// Create a Redis error from a raw error message, auto-parsing the kind.
    pub fn redis(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        let (kind, message) = RedisErrorKind::from_error_msg(&msg);
        Self::Redis { kind, message }
    }

    /// Shorthand for [`ModuleError::InvalidArgument`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a decode error that keeps the offending reply fragment.
    pub fn decode(message: impl Into<String>, fragment: &Reply) -> Self {
        let message = message.into();
        tracing::warn!(%message, fragment = fragment.type_name(), "reply rejected by decoder");
        Self::Decode {
            message,
            fragment: fragment.clone(),
        }
    }

    /// True for errors raised before any I/O.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// True for reply decoding failures.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// The offending reply, for decode errors.
    pub fn fragment(&self) -> Option<&Reply> {
        match self {
            Self::Decode { fragment, .. } => Some(fragment),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ModuleError>;

/// Fail with `InvalidArgument` unless `name` is non-empty.
pub(crate) fn require_key(what: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ModuleError::invalid(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Fail with `InvalidArgument` unless `items` has at least one element.
pub(crate) fn require_items<T>(what: &str, items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(ModuleError::invalid(format!("{what} must not be empty")));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────
