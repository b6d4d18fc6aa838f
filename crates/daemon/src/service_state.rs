use std::sync::Arc;

use common::prelude::{BasePath, Config, ConfigError, File, Profile};

use super::service_config::Config as ServiceConfig;

/// Main service state, shared by every request handler
#[derive(Debug, Clone)]
pub struct State {
    config: Arc<Config>,
}

impl State {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Take the repo config handed over by the caller, or read it from
    /// disk, bootstrapping a new peer when there is none
    pub async fn from_config(config: &ServiceConfig) -> Result<Self, StateSetupError> {
        let base = BasePath::new(&config.repo_dir);

        let repo_config = match &config.repo_config {
            Some(repo_config) => repo_config.clone(),
            None if base.exists(File::Config) => {
                let repo_config = Config::load(&base)?;
                repo_config.validate().map_err(ConfigError::from)?;
                repo_config
            }
            None => {
                tracing::info!(
                    repo = %config.repo_dir.display(),
                    "no repo config found, generating a new peer identity"
                );
                // key generation blocks on system entropy
                let repo_config = tokio::task::spawn_blocking(Config::default_config).await?;
                std::fs::create_dir_all(&config.repo_dir)?;
                repo_config.save(&base)?;
                repo_config
            }
        };

        tracing::info!(
            peer_id = %repo_config.profile.id,
            peername = %repo_config.profile.peername,
            "loaded peer profile"
        );

        Ok(Self::new(repo_config))
    }

    pub fn profile(&self) -> &Profile {
        &self.config.profile
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("repo config error: {0}")]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("identity generation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
