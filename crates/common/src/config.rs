use serde::{Deserialize, Serialize};

use crate::profile::{default_profile, Profile, ValidationErrors};
use crate::repo::{BasePath, File, FileError};

pub const DEFAULT_API_PORT: u16 = 2503;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file error: {0}")]
    File(#[from] FileError),
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

/// Settings of the local HTTP API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_api_port")]
    pub port: u16,
}

fn default_true() -> bool {
    true
}

fn default_api_port() -> u16 {
    DEFAULT_API_PORT
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: DEFAULT_API_PORT,
        }
    }
}

/// Storage backend of the repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Only the filesystem repo ("fs") exists today
    #[serde(rename = "type", default = "default_repo_kind")]
    pub kind: String,
}

fn default_repo_kind() -> String {
    "fs".to_string()
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            kind: default_repo_kind(),
        }
    }
}

/// The document stored under [`File::Config`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub profile: Profile,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub repo: RepoConfig,
}

impl Config {
    /// Fresh configuration with a newly generated peer profile.
    ///
    /// Blocks on key generation, see [`default_profile`].
    pub fn default_config() -> Self {
        Self::with_profile(default_profile())
    }

    pub fn with_profile(profile: Profile) -> Self {
        Self {
            profile,
            api: ApiConfig::default(),
            repo: RepoConfig::default(),
        }
    }

    /// Validate every section, reporting all violations at once
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::default();
        if let Err(profile_errs) = self.profile.validate() {
            errs.extend(profile_errs);
        }

        if self.api.enabled && self.api.port == 0 {
            errs.push("api.port", "must be set when the api is enabled");
        }
        if self.repo.kind != "fs" {
            errs.push(
                "repo.type",
                format!("unsupported repo type '{}'", self.repo.kind),
            );
        }

        errs.into_result()
    }

    pub fn load(base: &BasePath) -> Result<Self, ConfigError> {
        Ok(base.read_file(File::Config)?)
    }

    /// Validate, then persist under [`File::Config`]
    pub fn save(&self, base: &BasePath) -> Result<(), ConfigError> {
        self.validate()?;
        base.save_file(self, File::Config)?;
        Ok(())
    }
}
