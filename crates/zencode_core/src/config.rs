//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_MAX_CODE_SIZE, DEFAULT_PORT, DEFAULT_STORE_TIMEOUT_MS};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Which key-value backend holds shared code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Persistent redb file under `db_path`.
    Redb,
    /// Process-local map; contents are lost on restart.
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redb" | "disk" => Some(Self::Redb),
            "memory" | "mem" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Runtime configuration for ZenCode.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub port: u16,
    pub bind: Option<String>,
    pub public_url: Option<String>,
    pub max_code_size: usize,
    pub store_timeout: Duration,
    pub store_backend: StoreBackend,
    pub allow_public_access: bool,
    pub telemetry: bool,
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String, home: Option<PathBuf>) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir(lookup: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    // Prefer explicit HOME if set (Unix, some Windows shells)
    if let Some(home) = lookup("HOME").filter(|home| !home.trim().is_empty()) {
        return Some(PathBuf::from(home));
    }

    // Windows USERPROFILE (standard)
    if let Some(profile) = lookup("USERPROFILE").filter(|profile| !profile.trim().is_empty()) {
        return Some(PathBuf::from(profile));
    }

    std::env::current_dir().ok()
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn normalize_public_url(value: String) -> Option<String> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Missing or unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |name: &str| {
            lookup(name)
                .and_then(|value| parse_env_flag(&value))
                .unwrap_or(false)
        };

        let store_backend = match lookup("STORE_BACKEND") {
            Some(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                tracing::warn!(
                    "Unknown STORE_BACKEND='{}'. Falling back to redb",
                    value
                );
                StoreBackend::Redb
            }),
            None => StoreBackend::Redb,
        };

        Self {
            db_path: lookup("DB_PATH")
                .map(|path| expand_tilde(path, resolve_home_dir(&lookup)))
                .unwrap_or_else(|| {
                    let home = resolve_home_dir(&lookup).unwrap_or_else(|| PathBuf::from("."));
                    let cache_dir = home.join(".cache").join("zencode");
                    cache_dir.join("db").to_string_lossy().to_string()
                }),
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            bind: lookup("BIND").filter(|value| !value.trim().is_empty()),
            public_url: lookup("PUBLIC_URL").and_then(normalize_public_url),
            max_code_size: lookup("MAX_CODE_SIZE")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_CODE_SIZE),
            store_timeout: Duration::from_millis(
                lookup("STORE_TIMEOUT_MS")
                    .and_then(|s| s.trim().parse().ok())
                    .filter(|ms| *ms > 0)
                    .unwrap_or(DEFAULT_STORE_TIMEOUT_MS),
            ),
            store_backend,
            allow_public_access: flag("ALLOW_PUBLIC_ACCESS"),
            telemetry: flag("TELEMETRY"),
        }
    }

    /// Base URL used for canonical share links when no request origin is known.
    pub fn default_base_url(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}
