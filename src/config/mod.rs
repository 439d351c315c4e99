//! Stored settings and the resolution of a session's configuration.
//!
//! Settings live in a small SQLite key-value table (default
//! `~/.trip-planner/settings.db`). Command-line flags win over stored
//! settings, which win over built-in defaults.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use reqwest::Url;
use rusqlite::Connection;

use crate::consts::{DEFAULT_BASE_URL, DEFAULT_MOBILE_ENDPOINT, WEB_ENDPOINT_PATH};
use crate::planner::PlannerConfig;
use crate::state::OverlapPolicy;
use crate::trip::Shell;

/// Keys accepted by [`Settings::set`].
pub const KEYS: &[&str] = &["shell", "base_url", "mobile_url", "policy", "timeout"];

/// Persistent key-value settings store.
pub struct Settings {
    conn: Mutex<Connection>,
}

impl Settings {
    /// Open or create the settings table in the given database.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open settings database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS settings (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .context("failed to create settings table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("settings connection lock poisoned"))
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Store a setting (upsert). Unknown keys and unparsable values are rejected.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        validate(key, value)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM settings WHERE key = ?1", [key])?;
        Ok(())
    }

    /// All stored settings, sorted by key.
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT key, value FROM settings ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("failed to read settings")
    }
}

fn validate(key: &str, value: &str) -> Result<()> {
    match key {
        "shell" => {
            value.parse::<Shell>()?;
        }
        "policy" => {
            value.parse::<OverlapPolicy>()?;
        }
        "base_url" | "mobile_url" => {
            Url::parse(value).with_context(|| format!("invalid URL for {key}: {value}"))?;
        }
        "timeout" => {
            parse_timeout(value)?;
        }
        other => bail!("unknown setting: {other} (known: {})", KEYS.join(", ")),
    }
    Ok(())
}

fn parse_timeout(value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .with_context(|| format!("invalid timeout (seconds): {value}"))
}

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub shell: Option<Shell>,
    pub base_url: Option<String>,
    pub endpoint: Option<String>,
    pub policy: Option<OverlapPolicy>,
    pub timeout: Option<u64>,
}

/// Everything a session needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub planner: PlannerConfig,
    /// Request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// Merge flags, stored settings and defaults.
pub fn resolve(overrides: &Overrides, settings: Option<&Settings>) -> Result<Resolved> {
    let stored = |key: &str| -> Result<Option<String>> {
        match settings {
            Some(s) => s.get(key),
            None => Ok(None),
        }
    };

    let shell = match overrides.shell {
        Some(shell) => shell,
        None => stored("shell")?
            .map(|v| v.parse::<Shell>())
            .transpose()?
            .unwrap_or_default(),
    };

    let policy = match overrides.policy {
        Some(policy) => policy,
        None => stored("policy")?
            .map(|v| v.parse::<OverlapPolicy>())
            .transpose()?
            .unwrap_or_default(),
    };

    let endpoint = match &overrides.endpoint {
        Some(endpoint) => {
            Url::parse(endpoint).with_context(|| format!("invalid endpoint URL: {endpoint}"))?;
            endpoint.clone()
        }
        None => match shell {
            Shell::Web => {
                let base = match &overrides.base_url {
                    Some(base) => base.clone(),
                    None => stored("base_url")?.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                };
                web_endpoint(&base)?
            }
            Shell::Mobile => {
                stored("mobile_url")?.unwrap_or_else(|| DEFAULT_MOBILE_ENDPOINT.to_string())
            }
        },
    };

    let timeout = match overrides.timeout {
        Some(secs) => Some(secs),
        None => stored("timeout")?.map(|v| parse_timeout(&v)).transpose()?,
    }
    .filter(|secs| *secs > 0)
    .map(Duration::from_secs);

    Ok(Resolved {
        planner: PlannerConfig {
            shell,
            endpoint,
            policy,
        },
        timeout,
    })
}

/// The web shell's endpoint: `/api/plan_trip` on the base URL's origin.
pub fn web_endpoint(base_url: &str) -> Result<String> {
    let base = Url::parse(base_url).with_context(|| format!("invalid base URL: {base_url}"))?;
    let url = base
        .join(WEB_ENDPOINT_PATH)
        .with_context(|| format!("cannot join {WEB_ENDPOINT_PATH} onto {base_url}"))?;
    Ok(url.to_string())
}

#[cfg(test)]
mod tests;
