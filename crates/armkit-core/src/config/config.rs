//! Configuration management for resource-management clients
//!
//! Configuration is stored in TOML format with support for multiple named
//! profiles. Each profile names an endpoint and subscription and carries the
//! polling and HTTP settings used against them.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use super::error::{ConfigError, Result};
use super::polling::{HttpConfig, PollingConfig};

/// Public cloud resource-management endpoint
pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com";

/// Profiles known to armkit, keyed by name
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Profile used when none is named explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Profiles keyed by name
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// One named target: management endpoint, subscription and client settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    pub subscription_id: String,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

impl Profile {
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            endpoint: default_endpoint(),
            subscription_id: subscription_id.into(),
            polling: PollingConfig::default(),
            http: HttpConfig::default(),
        }
    }

    /// Parse the endpoint, rejecting anything that is not an absolute http(s) URL
    pub fn endpoint_url(&self, name: &str) -> Result<Url> {
        let invalid = |reason: String| ConfigError::InvalidProfile {
            name: name.to_string(),
            field: "endpoint",
            reason,
        };
        let url = Url::parse(&self.endpoint).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        }
    }
}

impl Config {
    /// Resolve which profile to use
    ///
    /// An explicit name wins, then `default_profile`, then the alphabetically
    /// first profile.
    pub fn resolve_profile(&self, explicit_profile: Option<&str>) -> Result<String> {
        if let Some(profile_name) = explicit_profile {
            return Ok(profile_name.to_string());
        }

        if let Some(ref default) = self.default_profile {
            return Ok(default.clone());
        }

        self.list_profiles()
            .first()
            .map(|(name, _)| name.to_string())
            .ok_or_else(|| ConfigError::NoProfiles {
                path: Self::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "config.toml".to_string()),
            })
    }

    /// Look up a profile by name
    pub fn profile(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.to_string(),
            })
    }

    /// Resolve and look up in one step
    pub fn active_profile(&self, explicit_profile: Option<&str>) -> Result<(String, &Profile)> {
        let name = self.resolve_profile(explicit_profile)?;
        let profile = self.profile(&name)?;
        Ok((name, profile))
    }

    /// Read profiles from [`Config::config_path`]
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Read profiles from `config_path`; a missing file yields an empty config
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::LoadError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        let expanded_content = Self::expand_env_vars(&content);

        let config: Config = toml::from_str(&expanded_content)?;

        Ok(config)
    }

    /// Write profiles to [`Config::config_path`]
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Write profiles to `config_path`, creating parent directories
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| ConfigError::SaveError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }

    /// Insert or replace a profile
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Drop a profile, clearing the default if it pointed there
    pub fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        self.profiles.remove(name)
    }

    /// Profiles ordered by name
    pub fn list_profiles(&self) -> Vec<(&String, &Profile)> {
        let mut profiles: Vec<_> = self.profiles.iter().collect();
        profiles.sort_by_key(|(name, _)| *name);
        profiles
    }

    /// Platform-specific location of `config.toml`
    ///
    /// On Linux: ~/.config/armkit/config.toml
    /// On macOS: ~/Library/Application Support/com.armkit.armkit/config.toml
    /// On Windows: %APPDATA%\armkit\armkit\config\config.toml
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("com", "armkit", "armkit").ok_or(ConfigError::ConfigDirError)?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Substitute `${VAR}` and `${VAR:-default}` references before parsing
    ///
    /// Supports ${VAR} and ${VAR:-default}. Unset variables without a
    /// default are left as written so unused profiles still load.
    ///
    /// Example:
    /// ```toml
    /// subscription_id = "${AZURE_SUBSCRIPTION_ID}"
    /// endpoint = "${ARM_ENDPOINT:-https://management.azure.com}"
    /// ```
    fn expand_env_vars(content: &str) -> String {
        let expanded =
            shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok());
        expanded.to_string()
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
