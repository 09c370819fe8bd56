use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://192.168.1.100:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CLIENT_LOG_LEVEL: &str = "info";

/// `<meta>` names the server renders so the hydrating client picks up the
/// same configuration.
pub const META_BACKEND_URL: &str = "backend-url";
pub const META_TIMEOUT_SECS: &str = "backend-timeout-secs";
pub const META_CLIENT_LOG_LEVEL: &str = "client-log-level";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },
    #[error("{var} must be a positive whole number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub client_log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            client_log_level: DEFAULT_CLIENT_LOG_LEVEL.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let base_url = match get("BACKEND_URL") {
            Some(raw) => {
                check_url(&raw)?;
                raw.trim().trim_end_matches('/').to_string()
            }
            None => defaults.base_url,
        };

        let timeout_secs = match get("BACKEND_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout {
                    var: "BACKEND_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => defaults.timeout_secs,
        };

        let client_log_level = get("CLIENT_LOG_LEVEL")
            .map(|v| v.trim().to_lowercase())
            .unwrap_or(defaults.client_log_level);

        Ok(Self {
            base_url,
            timeout_secs,
            client_log_level,
        })
    }

    #[cfg(feature = "ssr")]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads back what [`crate::app::shell`] rendered into `<head>`.
    pub fn from_document() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let meta = |name: &str| {
            document
                .query_selector(&format!("meta[name=\"{name}\"]"))
                .ok()
                .flatten()
                .and_then(|el| el.get_attribute("content"))
        };

        let defaults = Self::default();
        Some(Self {
            base_url: meta(META_BACKEND_URL).unwrap_or(defaults.base_url),
            timeout_secs: meta(META_TIMEOUT_SECS)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            client_log_level: meta(META_CLIENT_LOG_LEVEL).unwrap_or(defaults.client_log_level),
        })
    }
}

#[cfg(feature = "ssr")]
fn check_url(raw: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        var: "BACKEND_URL",
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl {
            var: "BACKEND_URL",
            reason: format!("unsupported scheme {other}"),
        }),
    }
}

#[cfg(not(feature = "ssr"))]
fn check_url(raw: &str) -> Result<(), ConfigError> {
    let raw = raw.trim();
    if raw.starts_with("http://") || raw.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl {
            var: "BACKEND_URL",
            reason: "expected an http(s) URL".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("BACKEND_URL", "https://api.example.com/"),
            ("BACKEND_TIMEOUT_SECS", "5"),
            ("CLIENT_LOG_LEVEL", "DEBUG"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.client_log_level, "debug");
    }

    #[test]
    fn blank_values_fall_back() {
        let config = ApiConfig::from_lookup(lookup(&[("BACKEND_URL", "  ")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn rejects_bad_url() {
        let err = ApiConfig::from_lookup(lookup(&[("BACKEND_URL", "ftp://files")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err =
            ApiConfig::from_lookup(lookup(&[("BACKEND_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(err.to_string().contains("BACKEND_TIMEOUT_SECS"));
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..ApiConfig::default()
        };
        assert_eq!(
            config.endpoint("/api/files"),
            "http://localhost:8000/api/files"
        );
        assert_eq!(config.endpoint("ask/gemini"), "http://localhost:8000/ask/gemini");
    }
}
