use std::time::Duration;
use url::Url;

const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8000";
const DEFAULT_PORT: &str = "8081";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid VALIDATOR_UPSTREAM_URL {value:?}: {reason}")]
    InvalidUpstream { value: String, reason: String },
    #[error("Invalid {name} value {value:?}: expected a positive integer")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub bind_address: String,
    /// Base URL of the validation service, without a trailing slash.
    pub upstream_url: String,
    pub frontend_dir: String,
    pub upstream_timeout: Duration,
    pub max_body_bytes: usize,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let upstream_url = parse_upstream(
            &lookup("VALIDATOR_UPSTREAM_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
        )?;

        let port = lookup("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
        let port: u16 = port
            .trim()
            .parse()
            .ok()
            .filter(|p| *p > 0)
            .ok_or(ConfigError::InvalidNumber { name: "PORT", value: port })?;

        let frontend_dir = lookup("FRONTEND_DIR").unwrap_or_else(|| {
            match lookup("CARGO_MANIFEST_DIR") {
                Some(manifest_dir) => format!("{}/../frontend/dist", manifest_dir),
                None => "/usr/src/app/frontend/dist".to_string(),
            }
        });

        let timeout_secs = positive(&lookup, "UPSTREAM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let max_body_bytes = positive(&lookup, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES as u64)?;

        Ok(Self {
            bind_address: format!("0.0.0.0:{}", port),
            upstream_url,
            frontend_dir,
            upstream_timeout: Duration::from_secs(timeout_secs),
            max_body_bytes: max_body_bytes as usize,
        })
    }
}

fn parse_upstream(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUpstream {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUpstream {
            value: raw.to_string(),
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }
    Ok(trimmed.to_string())
}

fn positive<F>(lookup: &F, name: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ConfigError::InvalidNumber { name, value }),
    }
}
