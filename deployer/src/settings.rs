//! Settings file management

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::DeployError;
use crate::filesys::file::File;
use crate::logs::LogLevel;

/// Deployer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Emit JSON log lines
    #[serde(default)]
    pub log_json: bool,

    /// Platform endpoints
    #[serde(default)]
    pub endpoints: EndpointSettings,

    /// Bounded polling configuration
    #[serde(default)]
    pub polling: PollingSettings,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_json: false,
            endpoints: EndpointSettings::default(),
            polling: PollingSettings::default(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults when the file is absent
    pub async fn load(file: &File) -> Result<Self, DeployError> {
        if !file.exists().await {
            debug!("No settings file at {}, using defaults", file.path().display());
            return Ok(Self::default());
        }
        file.read_json::<Settings>().await
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// The two logical platform services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointSettings {
    /// Authentication (token) endpoint
    #[serde(default = "default_login_endpoint")]
    pub login: Endpoint,

    /// API endpoint
    #[serde(default = "default_api_endpoint")]
    pub api: Endpoint,
}

fn default_login_endpoint() -> Endpoint {
    Endpoint::new("login.local.pcfdev.io", true)
}

fn default_api_endpoint() -> Endpoint {
    Endpoint::new("api.local.pcfdev.io", true)
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            login: default_login_endpoint(),
            api: default_api_endpoint(),
        }
    }
}

/// One service endpoint: a host (with optional port) and a transport switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub host: String,

    /// Use TLS
    #[serde(default = "default_true")]
    pub ssl: bool,
}

fn default_true() -> bool {
    true
}

impl Endpoint {
    pub fn new(host: impl Into<String>, ssl: bool) -> Self {
        Self {
            host: host.into(),
            ssl,
        }
    }

    /// Base URL for this endpoint, without a trailing slash
    pub fn base_url(&self) -> String {
        format!(
            "http{}://{}",
            if self.ssl { "s" } else { "" },
            self.host.trim_end_matches('/')
        )
    }
}

/// Polling budget shared by the job and runtime-stability waits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingSettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_max_attempts() -> u32 {
    10
}

fn default_interval_secs() -> u64 {
    2
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            interval_secs: default_interval_secs(),
        }
    }
}
