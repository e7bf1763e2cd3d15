//! Environment variable helpers for service configuration.

use std::str::FromStr;

use anyhow::{Context as _, anyhow};

/// Read a required environment variable.
pub fn required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).with_context(|| format!("missing environment variable {key}"))
}

/// Read and parse an optional environment variable, falling back to `default` when unset.
///
/// A value that is present but fails to parse is an error rather than silently ignored.
pub fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow!("invalid value {raw:?} for {key}: {e}")),
        Err(_) => Ok(default),
    }
}
