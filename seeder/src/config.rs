use crate::error::SeedError;
use crate::types::check_base_url;
use anyhow::{Context, Result};
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

// ── Default constants ───────────────────────────────────────────────────

/// Uptime Kuma database relative to home.
const DEFAULT_DB_REL: &str = ".uptime-kuma/data/kuma.db";

/// Base URL every catalogue path is appended to.
const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Kuma's first (admin) user.
const DEFAULT_OWNER_ID: i64 = 1;

/// Seconds. Kuma defaults new monitors to 80% of the 60s interval.
pub const DEFAULT_TIMEOUT_SECS: u32 = 48;

// ── Config struct ───────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct SeederConfig {
    pub db_path: PathBuf,
    pub base_url: String,
    pub owner_id: i64,
    pub default_timeout_secs: u32,
}

impl SeederConfig {
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("KUMA_SEED_BASE_URL")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        check_base_url(&base_url).map_err(SeedError::InvalidBaseUrl)?;

        let db_path = match env::var("KUMA_SEED_DB_PATH") {
            Ok(val) if !val.trim().is_empty() => expand_tilde(val.trim(), home_dir)?,
            _ => home_dir()?.join(DEFAULT_DB_REL),
        };

        Ok(Self {
            db_path,
            base_url,
            owner_id: env_parse("KUMA_SEED_OWNER_ID", DEFAULT_OWNER_ID),
            default_timeout_secs: env_parse("KUMA_SEED_DEFAULT_TIMEOUT", DEFAULT_TIMEOUT_SECS),
        })
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("could not resolve home directory")
}

fn env_parse<T: FromStr + Display + Copy>(key: &str, default: T) -> T {
    parse_or_default(key, env::var(key).ok().as_deref(), default)
}

/// Unset keeps the default silently; a value that doesn't parse keeps it
/// with a warning.
fn parse_or_default<T: FromStr + Display + Copy>(key: &str, raw: Option<&str>, default: T) -> T {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warn!(key, value = raw, %default, "unparseable setting, using default");
            default
        }
    }
}

/// Home is only resolved for `~/` paths.
fn expand_tilde(input: &str, home: impl FnOnce() -> Result<PathBuf>) -> Result<PathBuf> {
    if let Some(rest) = input.strip_prefix("~/") {
        return Ok(home()?.join(rest));
    }
    Ok(PathBuf::from(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    #[test]
    fn expand_tilde_joins_home() {
        assert_eq!(
            expand_tilde("~/kuma/kuma.db", || Ok(PathBuf::from("/home/ops"))).unwrap(),
            PathBuf::from("/home/ops/kuma/kuma.db")
        );
    }

    #[test]
    fn absolute_path_never_asks_for_home() {
        let path = expand_tilde("/srv/kuma.db", || bail!("no home directory")).unwrap();
        assert_eq!(path, PathBuf::from("/srv/kuma.db"));
        assert!(expand_tilde("~/kuma.db", || bail!("no home directory")).is_err());
    }

    #[test]
    fn numeric_settings_parse_or_keep_default() {
        assert_eq!(parse_or_default("KUMA_SEED_OWNER_ID", None, 1_i64), 1);
        assert_eq!(parse_or_default("KUMA_SEED_OWNER_ID", Some(" 5 "), 1_i64), 5);
        assert_eq!(parse_or_default("KUMA_SEED_OWNER_ID", Some("admin"), 1_i64), 1);
        assert_eq!(parse_or_default("KUMA_SEED_DEFAULT_TIMEOUT", Some("-3"), 48_u32), 48);
    }
}
