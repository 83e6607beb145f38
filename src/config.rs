//! Client configuration.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::{CarbonArcError, Result};

/// Default API host.
pub const DEFAULT_HOST: &str = "https://platform.carbonarc.co";

/// Default API version prefix.
pub const DEFAULT_VERSION: &str = "v2";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
const USER_AGENT: &str = concat!("carbonarc-rs/", env!("CARGO_PKG_VERSION"));

/// Connection settings for a [`CarbonArcClient`](crate::CarbonArcClient).
///
/// The host and version are explicit values that flow into every route;
/// nothing is read from process-wide state after construction.
#[derive(Clone)]
pub struct ClientConfig {
    /// Bearer token sent on every request.
    pub token: String,
    /// Base host, e.g. `https://platform.carbonarc.co`.
    pub host: String,
    /// API version path segment, e.g. `v2`.
    pub version: String,
    /// Transport timeout applied by the HTTP client.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("version", &self.version)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    /// Create a config for `token` with the default host and version.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            host: DEFAULT_HOST.to_string(),
            version: DEFAULT_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Create a config from environment variables.
    ///
    /// Uses `CARBONARC_API_TOKEN` for authentication and optionally
    /// `CARBONARC_HOST` and `CARBONARC_API_VERSION`.
    ///
    /// # Errors
    ///
    /// Returns an error if `CARBONARC_API_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("CARBONARC_API_TOKEN").map_err(|_| {
            CarbonArcError::ConfigMissing(
                "CARBONARC_API_TOKEN environment variable not set".to_string(),
            )
        })?;

        let mut config = Self::new(token);
        if let Ok(host) = env::var("CARBONARC_HOST") {
            config = config.with_host(host);
        }
        if let Ok(version) = env::var("CARBONARC_API_VERSION") {
            config = config.with_version(version);
        }
        Ok(config)
    }

    /// Override the host. A trailing slash is removed.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the API version segment.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
