//! Deployment configuration for the request builder and transport.
//!
//! Defaults target the production API root. Each field can be overridden
//! from the environment:
//!
//! | Variable               | Field              |
//! |------------------------|--------------------|
//! | `FDB_BASE_URL`         | `base_url`         |
//! | `FDB_CALL_SYSTEM_NAME` | `call_system_name` |
//! | `FDB_TIMEOUT_SECS`     | `timeout`          |
//! | `FDB_COMPAT_HEADERS`   | `compat_headers`   |
//! | `FDB_MAX_BODY_BYTES`   | `max_body_bytes`   |

use std::time::Duration;

use crate::error::ConfigError;

pub const API_HOST: &str = "https://api.fdbcloudconnector.com/CC/api";
pub const DEFAULT_API_VERSION: &str = "v1_4";
pub const DEFAULT_CALL_SYSTEM_NAME: &str = "StreamlitTest";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

pub const ENV_BASE_URL: &str = "FDB_BASE_URL";
pub const ENV_CALL_SYSTEM_NAME: &str = "FDB_CALL_SYSTEM_NAME";
pub const ENV_TIMEOUT_SECS: &str = "FDB_TIMEOUT_SECS";
pub const ENV_COMPAT_HEADERS: &str = "FDB_COMPAT_HEADERS";
pub const ENV_MAX_BODY_BYTES: &str = "FDB_MAX_BODY_BYTES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Versioned API root, without a trailing slash.
    pub base_url: String,
    /// Value sent as `callSystemName` when the caller does not set one.
    pub call_system_name: String,
    /// Transport timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Send `Content-Type: application/x-www-form-urlencoded` and
    /// `Cache-Control: no-cache` alongside the required headers.
    pub compat_headers: bool,
    /// Upper bound on a response body the transport will read.
    pub max_body_bytes: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: format!("{API_HOST}/{DEFAULT_API_VERSION}"),
            call_system_name: DEFAULT_CALL_SYSTEM_NAME.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            compat_headers: true,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Point at another version of the production API, e.g. `v1_3`.
    pub fn with_api_version(mut self, version: &str) -> Self {
        self.base_url = format!("{API_HOST}/{}", version.trim_matches('/'));
        self
    }

    pub fn with_call_system_name(mut self, name: &str) -> Self {
        self.call_system_name = name.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_compat_headers(mut self, enabled: bool) -> Self {
        self.compat_headers = enabled;
        self
    }

    pub fn with_max_body_bytes(mut self, limit: u64) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            let base_url = base_url.trim().trim_end_matches('/');
            if base_url.is_empty() {
                return Err(ConfigError::Empty { var: ENV_BASE_URL });
            }
            config.base_url = base_url.to_string();
        }

        if let Some(name) = lookup(ENV_CALL_SYSTEM_NAME) {
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::Empty {
                    var: ENV_CALL_SYSTEM_NAME,
                });
            }
            config.call_system_name = name.to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    var: ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?;
            // 0 disables the timeout.
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(raw) = lookup(ENV_MAX_BODY_BYTES) {
            config.max_body_bytes = match raw.trim().parse::<u64>() {
                Ok(limit) if limit > 0 => limit,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        var: ENV_MAX_BODY_BYTES,
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: ENV_MAX_BODY_BYTES,
                        value: raw,
                        reason: e.to_string(),
                    })
                }
            };
        }

        if let Some(raw) = lookup(ENV_COMPAT_HEADERS) {
            config.compat_headers = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: ENV_COMPAT_HEADERS,
                        value: raw,
                        reason: "expected true or false".to_string(),
                    })
                }
            };
        }

        Ok(config)
    }
}
