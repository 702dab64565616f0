use std::path::PathBuf;

use anyhow::{Context, Result};

/// Placeholder values that mean "no key was ever filled in".
const PLACEHOLDER_KEYS: &[&str] = &["YOUR_GEMINI_API_KEY", "DISABLED"];

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Provider credential, resolved once at startup and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Configured(String),
    Unconfigured,
}

impl Credential {
    /// Absent, blank and placeholder keys all resolve to `Unconfigured`.
    pub fn from_raw(raw: Option<String>) -> Self {
        match raw.map(|k| k.trim().to_string()) {
            Some(key) if !key.is_empty() && !PLACEHOLDER_KEYS.contains(&key.as_str()) => {
                Credential::Configured(key)
            }
            _ => Credential::Unconfigured,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Credential::Configured(_))
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Credential::Configured(key) => Some(key),
            Credential::Unconfigured => None,
        }
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Configured(_) => f.write_str("Configured(***)"),
            Credential::Unconfigured => f.write_str("Unconfigured"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// A missing API key is not a startup error: searches report `Unconfigured` instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub credential: Credential,
    pub gemini_model: String,
    pub export_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            credential: Credential::from_raw(std::env::var("GEMINI_API_KEY").ok()),
            gemini_model: optional_env("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            export_dir: optional_env("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("exports")),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
