use std::time::Duration;

use crate::error::ConfigError;

const ENDPOINT_VAR: &str = "SOIL_ANALYZER_URL";
const TIMEOUT_VAR: &str = "SOIL_ANALYZER_TIMEOUT_SECS";

/// Endpoint used when `SOIL_ANALYZER_URL` is not set
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/analyze-soil";

/// Analyzer configuration loaded from environment variables.
///
/// | Env Var                      | Default                                  |
/// |------------------------------|------------------------------------------|
/// | `SOIL_ANALYZER_URL`          | `http://localhost:8000/api/analyze-soil` |
/// | `SOIL_ANALYZER_TIMEOUT_SECS` | unset (no timeout)                       |
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Where images are POSTed for analysis
    pub endpoint: String,
    /// Optional cap on a single analysis request
    pub request_timeout: Option<Duration>,
}

impl AnalyzerConfig {
    /// Load from the process environment (call `dotenvy::dotenv()` first)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(ENDPOINT_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let valid = reqwest::Url::parse(&endpoint)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid {
            return Err(ConfigError::InvalidEndpoint {
                var: ENDPOINT_VAR,
                value: endpoint,
            });
        }

        let request_timeout = match lookup(TIMEOUT_VAR).map(|v| v.trim().to_string()) {
            None => None,
            Some(v) if v.is_empty() => None,
            Some(v) => match v.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        var: TIMEOUT_VAR,
                        value: v,
                    })
                }
            },
        };

        Ok(Self {
            endpoint,
            request_timeout,
        })
    }
}
