//! Client-side defaults shared by the module façades.
//!
//! Everything here only changes how requests are built; transport settings
//! belong to the [`CommandExecutor`](crate::executor::CommandExecutor).
//!
//! Environment variables read by [`ModulesConfig::from_env`]:
//! - `REDIS_MODULES_JSON_PATH`          — default JSON path (`.`)
//! - `REDIS_MODULES_GRAPH_COMPACT`      — `true`/`false`, send `--compact` (true)
//! - `REDIS_MODULES_GRAPH_TIMEOUT_MS`   — `TIMEOUT` for graph queries (unset)
//! - `REDIS_MODULES_SEARCH_DIALECT`     — default `DIALECT` for FT.SEARCH/AGGREGATE (unset)

use crate::error::{ModuleError, Result};

/// Default JSON root path (legacy RedisJSON syntax).
pub const DEFAULT_JSON_PATH: &str = ".";

pub const JSON_PATH_ENV: &str = "REDIS_MODULES_JSON_PATH";
pub const GRAPH_COMPACT_ENV: &str = "REDIS_MODULES_GRAPH_COMPACT";
pub const GRAPH_TIMEOUT_ENV: &str = "REDIS_MODULES_GRAPH_TIMEOUT_MS";
pub const SEARCH_DIALECT_ENV: &str = "REDIS_MODULES_SEARCH_DIALECT";

/// Request-building defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ModulesConfig {
    /// Path used by JSON methods that are called without one.
    pub json_root_path: String,
    /// Append `--compact` to GRAPH.QUERY / GRAPH.RO_QUERY / GRAPH.PROFILE.
    pub graph_compact: bool,
    /// Append `TIMEOUT <ms>` to graph queries.
    pub graph_timeout_ms: Option<u64>,
    /// `DIALECT` sent with FT.SEARCH / FT.AGGREGATE when the options leave it unset.
    pub search_dialect: Option<u32>,
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            json_root_path: DEFAULT_JSON_PATH.to_string(),
            graph_compact: true,
            graph_timeout_ms: None,
            search_dialect: None,
        }
    }
}

impl ModulesConfig {
    /// Load from the process environment, starting from the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(JSON_PATH_ENV) {
            if path.is_empty() {
                return Err(ModuleError::invalid(format!("{JSON_PATH_ENV} must not be empty")));
            }
            config.json_root_path = path;
        }
        if let Some(raw) = lookup(GRAPH_COMPACT_ENV) {
            config.graph_compact = parse_bool(GRAPH_COMPACT_ENV, &raw)?;
        }
        if let Some(raw) = lookup(GRAPH_TIMEOUT_ENV) {
            config.graph_timeout_ms = Some(parse_number(GRAPH_TIMEOUT_ENV, &raw)?);
        }
        if let Some(raw) = lookup(SEARCH_DIALECT_ENV) {
            let dialect: u32 = parse_number(SEARCH_DIALECT_ENV, &raw)?;
            if dialect == 0 {
                return Err(ModuleError::invalid(format!("{SEARCH_DIALECT_ENV} must be >= 1")));
            }
            config.search_dialect = Some(dialect);
        }

        Ok(config)
    }

    pub fn with_json_root_path(mut self, path: impl Into<String>) -> Self {
        self.json_root_path = path.into();
        self
    }

    pub fn with_graph_compact(mut self, compact: bool) -> Self {
        self.graph_compact = compact;
        self
    }

    pub fn with_graph_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.graph_timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_search_dialect(mut self, dialect: u32) -> Self {
        self.search_dialect = Some(dialect);
        self
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ModuleError::invalid(format!("invalid boolean for {key}: {raw}"))),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| ModuleError::invalid(format!("invalid number for {key}: {raw}")))
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ModulesConfig::default();
        assert_eq!(config.json_root_path, ".");
        assert!(config.graph_compact);
        assert_eq!(config.graph_timeout_ms, None);
        assert_eq!(config.search_dialect, None);
    }

    #[test]
    fn from_lookup_empty_is_default() {
        let config = ModulesConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ModulesConfig::default());
    }

    #[test]
    fn from_lookup_all_keys() {
        let config = ModulesConfig::from_lookup(lookup(&[
            (JSON_PATH_ENV, "$"),
            (GRAPH_COMPACT_ENV, "off"),
            (GRAPH_TIMEOUT_ENV, "250"),
            (SEARCH_DIALECT_ENV, "2"),
        ]))
        .unwrap();
        assert_eq!(config.json_root_path, "$");
        assert!(!config.graph_compact);
        assert_eq!(config.graph_timeout_ms, Some(250));
        assert_eq!(config.search_dialect, Some(2));
    }

    #[test]
    fn from_lookup_rejects_garbage() {
        let err = ModulesConfig::from_lookup(lookup(&[(GRAPH_TIMEOUT_ENV, "soon")])).unwrap_err();
        assert!(err.is_invalid_argument());
        let err = ModulesConfig::from_lookup(lookup(&[(GRAPH_COMPACT_ENV, "maybe")])).unwrap_err();
        assert!(err.is_invalid_argument());
        let err = ModulesConfig::from_lookup(lookup(&[(SEARCH_DIALECT_ENV, "0")])).unwrap_err();
        assert!(err.is_invalid_argument());
        let err = ModulesConfig::from_lookup(lookup(&[(JSON_PATH_ENV, "")])).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn builder_setters() {
        let config = ModulesConfig::default()
            .with_json_root_path("$")
            .with_graph_compact(false)
            .with_graph_timeout_ms(10)
            .with_search_dialect(3);
        assert_eq!(config.json_root_path, "$");
        assert!(!config.graph_compact);
        assert_eq!(config.graph_timeout_ms, Some(10));
        assert_eq!(config.search_dialect, Some(3));
    }
}
