use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::api::Service;
use crate::error::{LexvaultError, Result};

const CONFIG_DIR_NAME: &str = ".lexvault";
const CONFIG_FILE_NAME: &str = "config.yaml";

pub const DEFAULT_BASE_URL: &str = "https://api.lexvault.dev";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const API_KEY_ENV: &str = "LEXVAULT_API_KEY";
pub const BASE_URL_ENV: &str = "LEXVAULT_BASE_URL";
pub const TIMEOUT_ENV: &str = "LEXVAULT_TIMEOUT";

/// Client configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Root URL every service path is appended to
    pub base_url: String,

    /// API key sent as a bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// User agent string
    pub user_agent: String,

    /// Headers added to every request before per-request overrides
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub default_headers: BTreeMap<String, String>,

    /// Per-service overrides
    pub services: ServiceOverrides,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServiceOverrides {
    #[serde(default)]
    pub legal: ServiceConfig,

    #[serde(default)]
    pub search: ServiceConfig,

    #[serde(default)]
    pub vault: ServiceConfig,
}

#[derive(Clone, Serialize, Deserialize, Default)]
pub struct ServiceConfig {
    /// Service-specific base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Service-specific key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("lexvault-rust/{}", env!("CARGO_PKG_VERSION")),
            default_headers: BTreeMap::new(),
            services: ServiceOverrides::default(),
        }
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("default_headers", &self.default_headers)
            .field("services", &self.services)
            .finish()
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout = timeout_secs;
        self
    }

    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Get the configuration directory path
    pub fn config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            LexvaultError::Config("Could not determine home directory".to_string())
        })?;

        Ok(home_dir.join(CONFIG_DIR_NAME))
    }

    /// Get the configuration file full path
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_path()?.join(CONFIG_FILE_NAME))
    }

    /// Defaults overridden by `LEXVAULT_*` environment variables
    pub fn from_env() -> Result<Self> {
        let mut options = Self::default();
        options.apply_env()?;
        Ok(options)
    }

    /// Load options from `~/.lexvault/config.yaml` when it exists, then
    /// apply environment overrides.
    pub fn load() -> Result<Self> {
        let config_file = Self::config_file_path()?;
        let mut options = if config_file.exists() {
            Self::load_from(&config_file)?
        } else {
            debug!("No config file at {}, using defaults", config_file.display());
            Self::default()
        };
        options.apply_env()?;
        Ok(options)
    }

    /// Load options from a YAML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| LexvaultError::Config(format!("Failed to read config file: {}", e)))?;

        let options: Self = serde_yaml::from_str(&contents)
            .map_err(|e| LexvaultError::Config(format!("Failed to parse config file: {}", e)))?;

        options.base_url()?;
        for service in Service::ALL {
            options.base_url_for(service)?;
        }

        info!("Loaded client options from {}", path.display());
        Ok(options)
    }

    /// Save options as YAML, readable only by the owner on Unix
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    LexvaultError::Config(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| LexvaultError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, yaml)
            .map_err(|e| LexvaultError::Config(format!("Failed to write config file: {}", e)))?;

        // Set file permissions to 0600 on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(path, permissions).map_err(|e| {
                LexvaultError::Config(format!("Failed to set file permissions: {}", e))
            })?;
        }

        Ok(())
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(api_key) = non_empty_env(API_KEY_ENV) {
            debug!("Using API key from {}", API_KEY_ENV);
            self.api_key = Some(api_key);
        }
        if let Some(base_url) = non_empty_env(BASE_URL_ENV) {
            debug!("Using base URL from {}: {}", BASE_URL_ENV, base_url);
            self.base_url = base_url;
        }
        if let Some(timeout) = non_empty_env(TIMEOUT_ENV) {
            self.timeout = timeout.parse().map_err(|_| {
                LexvaultError::Config(format!("{} must be a number of seconds, got '{}'", TIMEOUT_ENV, timeout))
            })?;
        }
        Ok(())
    }

    pub fn base_url(&self) -> Result<Url> {
        parse_base_url(&self.base_url)
    }

    fn service_config(&self, service: Service) -> &ServiceConfig {
        match service {
            Service::Legal => &self.services.legal,
            Service::Search => &self.services.search,
            Service::Vault => &self.services.vault,
        }
    }

    /// Base URL for a service, falling back to the global one
    pub fn base_url_for(&self, service: Service) -> Result<Url> {
        match &self.service_config(service).base_url {
            Some(base_url) => parse_base_url(base_url),
            None => self.base_url(),
        }
    }

    /// API key for a service (with fallback to the global key)
    pub fn api_key_for(&self, service: Service) -> Option<&str> {
        let non_empty = |key: &&str| !key.is_empty();
        self.service_config(service)
            .api_key
            .as_deref()
            .filter(non_empty)
            .or_else(|| self.api_key.as_deref().filter(non_empty))
    }

    pub fn require_api_key(&self, service: Service) -> Result<&str> {
        self.api_key_for(service).ok_or(LexvaultError::NoApiKey)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(LexvaultError::Config(format!("'{}' cannot be used as a base URL", raw)));
    }
    Ok(url)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
