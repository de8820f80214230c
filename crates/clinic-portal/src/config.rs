use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};

pub const DEFAULT_PAGE_ORIGIN: &str = "http://localhost:5000";

/// What to do when no backend URL was injected at deploy time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Talk to `/api` on the page's own origin.
    SameOrigin,
    /// Run without a backend: placeholders instead of network calls.
    Unavailable,
}

impl FromStr for Fallback {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "same-origin" => Ok(Self::SameOrigin),
            "none" => Ok(Self::Unavailable),
            other => Err(anyhow!(
                "unknown backend fallback '{}' (expected 'same-origin' or 'none')",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendMode {
    Live { origin: String },
    Unavailable,
}

/// Resolve the backend once at startup. An empty injected value counts as
/// not injected.
pub fn resolve_backend(
    injected: Option<&str>,
    page_origin: &str,
    fallback: Fallback,
) -> BackendMode {
    match injected.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => BackendMode::Live {
            origin: url.trim_end_matches('/').to_string(),
        },
        None => match fallback {
            Fallback::SameOrigin => BackendMode::Live {
                origin: page_origin.trim_end_matches('/').to_string(),
            },
            Fallback::Unavailable => BackendMode::Unavailable,
        },
    }
}

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub backend: BackendMode,
    pub refresh_interval: Duration,
    pub message_timeout: Duration,
    pub request_timeout: Duration,
}

impl PortalConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let injected = lookup("CLINIC_BACKEND_URL");
        let page_origin =
            lookup("CLINIC_ORIGIN").unwrap_or_else(|| DEFAULT_PAGE_ORIGIN.to_string());
        let fallback: Fallback = match lookup("CLINIC_BACKEND_FALLBACK") {
            Some(v) => v.parse().context("CLINIC_BACKEND_FALLBACK")?,
            None => Fallback::SameOrigin,
        };

        let refresh_secs = positive(&lookup, "CLINIC_REFRESH_SECS", 30)?;
        let message_ms = positive(&lookup, "CLINIC_MESSAGE_TIMEOUT_MS", 5000)?;
        let request_secs = positive(&lookup, "CLINIC_REQUEST_TIMEOUT_SECS", 30)?;

        Ok(Self {
            backend: resolve_backend(injected.as_deref(), &page_origin, fallback),
            refresh_interval: Duration::from_secs(refresh_secs),
            message_timeout: Duration::from_millis(message_ms),
            request_timeout: Duration::from_secs(request_secs),
        })
    }
}

fn positive(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<u64> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a whole number, got '{}'", key, raw))?;
    if value == 0 {
        bail!("{} must be greater than zero", key);
    }
    Ok(value)
}
