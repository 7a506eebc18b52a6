use crate::error::TranscribeError;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const TIMEOUT_VAR: &str = "TRANSCRIBE_PROVIDER_TIMEOUT";
pub const MAX_RETRIES_VAR: &str = "TRANSCRIBE_PROVIDER_MAX_RETRIES";
pub const LOG_LEVEL_VAR: &str = "TRANSCRIBE_PROVIDER_LOG_LEVEL";
pub const ENDPOINT_VAR: &str = "TRANSCRIBE_PROVIDER_ENDPOINT";

/// Settings shared by every transcription backend and client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommonConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub log_level: Option<String>,
    pub endpoint: Option<String>,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 3,
            log_level: None,
            endpoint: None,
        }
    }
}

impl CommonConfig {
    /// Reads the `TRANSCRIBE_PROVIDER_*` variables. Unparseable numbers fall
    /// back to their defaults; a malformed endpoint is an error.
    pub fn from_env() -> Result<Self, TranscribeError> {
        let defaults = Self::default();
        let endpoint = match std::env::var(ENDPOINT_VAR) {
            Ok(raw) if !raw.trim().is_empty() => Some(parse_endpoint(raw.trim())?),
            _ => None,
        };
        Ok(Self {
            timeout_secs: std::env::var(TIMEOUT_VAR)
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.timeout_secs),
            max_retries: std::env::var(MAX_RETRIES_VAR)
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.max_retries),
            log_level: std::env::var(LOG_LEVEL_VAR).ok(),
            endpoint,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_endpoint(raw: &str) -> Result<String, TranscribeError> {
    let url = Url::parse(raw)
        .map_err(|e| TranscribeError::validation(format!("{ENDPOINT_VAR} is not a valid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        scheme => Err(TranscribeError::validation(format!(
            "{ENDPOINT_VAR} must use http or https, got {scheme}"
        ))),
    }
}
