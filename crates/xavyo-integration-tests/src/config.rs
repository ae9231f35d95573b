//! Harness configuration loaded from the environment.

use crate::auth::AdminAuth;
use std::env::VarError;
use std::time::Duration;

/// Default admin API base used by the local dev server.
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Admin principal the dev server seeds for integration runs.
pub const DEFAULT_ADMIN_USER_ID: &str = "integration-test-admin-user";

/// Configuration for the connector admin API harness.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Admin API base URL, without trailing slash.
    pub api_url: String,

    /// Credentials attached to every request.
    pub auth: AdminAuth,

    /// Optional per-request timeout. When unset a hung request stalls
    /// until the test runner gives up.
    pub timeout: Option<Duration>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth: AdminAuth::DevelopmentUser {
                user_id: DEFAULT_ADMIN_USER_ID.to_string(),
            },
            timeout: None,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_reader(|key| std::env::var(key))
    }

    /// Load configuration from a custom variable reader.
    ///
    /// Tests supply variables through this without touching process-global
    /// environment state.
    pub fn from_reader<F>(reader: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let api_url = read_var(&reader, "XAVYO_TEST_API_URL")?
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = api_url.trim().trim_end_matches('/').to_string();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue(
                "XAVYO_TEST_API_URL".into(),
                format!("expected an http(s) URL, got '{api_url}'"),
            ));
        }

        let auth = match read_var(&reader, "XAVYO_TEST_ADMIN_TOKEN")? {
            Some(token) if !token.trim().is_empty() => AdminAuth::Bearer {
                token: token.trim().to_string(),
            },
            _ => AdminAuth::DevelopmentUser {
                user_id: read_var(&reader, "XAVYO_TEST_ADMIN_USER_ID")?
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_ADMIN_USER_ID.to_string()),
            },
        };

        let timeout = match read_var(&reader, "XAVYO_TEST_TIMEOUT_SECS")? {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    ConfigError::InvalidValue("XAVYO_TEST_TIMEOUT_SECS".into(), e.to_string())
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue(
                        "XAVYO_TEST_TIMEOUT_SECS".into(),
                        "must be greater than zero".to_string(),
                    ));
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_url,
            auth,
            timeout,
        })
    }
}

/// Read one variable; unset is `None`, a non-Unicode value is an error.
fn read_var<F>(reader: &F, key: &str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match reader(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue(
            key.to_string(),
            "value is not valid Unicode".to_string(),
        )),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}
