use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absent ⇒ the enhancement gateway runs in degraded mode.
    pub anthropic_api_key: Option<String>,
    pub llm_timeout: Duration,
    /// Export coordinate grid: positions snap to 1/scale pt.
    pub export_scale: f32,
    /// Start the session with the demo résumé instead of a blank one.
    pub seed_demo: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            llm_timeout: Duration::from_secs(
                parse_env("LLM_TIMEOUT_SECS", 60)
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            export_scale: parse_env("EXPORT_SCALE", 2.0)
                .context("EXPORT_SCALE must be a number")?,
            seed_demo: parse_env("SEED_DEMO", false).context("SEED_DEMO must be true or false")?,
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Set and non-blank, or `None`.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        None => Ok(default),
    }
}
