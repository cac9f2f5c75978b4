//! Server configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Sessions untouched for longer than this are pruned.
    pub session_idle: Duration,
    /// Mark the session cookie `Secure` (HTTPS deployments).
    pub cookie_secure: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, session_idle: Duration::from_secs(DEFAULT_SESSION_IDLE_SECS), cookie_secure: false }
    }
}

impl ServerConfig {
    /// Build server config from environment variables.
    ///
    /// - `PORT`: default 3000
    /// - `SESSION_IDLE_SECS`: default 3600
    /// - `COOKIE_SECURE`: `1|true|yes|on` or `0|false|no|off`, default off
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            session_idle: Duration::from_secs(env_parse("SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE_SECS)),
            cookie_secure: env_bool("COOKIE_SECURE").unwrap_or(false),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
