use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::Edition;
use crate::error::{Result, TrackerError};

/// Name of the configuration file looked up in the working and config directories
pub const CONFIG_FILE_NAME: &str = "release-tracker.toml";

/// Represents the complete configuration for image-release-tracker.
///
/// Contains the registry endpoints, the image name for each edition and the
/// repository layout used when publishing releases.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub images: ImagesConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,
}

fn default_index_url() -> String {
    "https://index.docker.io".to_string()
}

fn default_auth_url() -> String {
    "https://auth.docker.io".to_string()
}

fn default_service() -> String {
    "registry.docker.io".to_string()
}

/// Registry endpoints and HTTP client settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RegistryConfig {
    #[serde(default = "default_index_url")]
    pub index_url: String,

    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    #[serde(default = "default_service")]
    pub service: String,

    /// No timeout unless set
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl RegistryConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            index_url: default_index_url(),
            auth_url: default_auth_url(),
            service: default_service(),
            timeout_secs: None,
        }
    }
}

fn default_community_image() -> String {
    "gitlab/gitlab-ce".to_string()
}

fn default_enterprise_image() -> String {
    "gitlab/gitlab-ee".to_string()
}

/// Registry image name for each edition.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ImagesConfig {
    #[serde(default = "default_community_image")]
    pub ce: String,

    #[serde(default = "default_enterprise_image")]
    pub ee: String,
}

impl ImagesConfig {
    pub fn image_for(&self, edition: Edition) -> &str {
        match edition {
            Edition::Community => &self.ce,
            Edition::Enterprise => &self.ee,
        }
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        ImagesConfig {
            ce: default_community_image(),
            ee: default_enterprise_image(),
        }
    }
}

fn default_mainline() -> String {
    "master".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_build_file() -> String {
    "Dockerfile".to_string()
}

/// Repository layout used when publishing releases.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    /// Base for new release branches
    #[serde(default = "default_mainline")]
    pub mainline: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    /// Generated file, relative to the working tree
    #[serde(default = "default_build_file")]
    pub build_file: String,

    /// Template file; the built-in template is used when unset
    #[serde(default)]
    pub template: Option<PathBuf>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            mainline: default_mainline(),
            remote: default_remote(),
            build_file: default_build_file(),
            template: None,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-tracker.toml` in current directory
/// 3. `.release-tracker.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        PathBuf::from(CONFIG_FILE_NAME)
    } else if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if !path.exists() {
            return Ok(Config::default());
        }
        path
    } else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        TrackerError::config(format!("Cannot read '{}': {}", path.display(), e))
    })?;

    toml::from_str(&config_str)
        .map_err(|e| TrackerError::config(format!("Invalid '{}': {}", path.display(), e)))
}
