use clap::Args;

use common::prelude::Config;
use quarry_daemon::state::{AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Peername to use instead of the generated nickname
    #[arg(long)]
    pub peername: Option<String>,

    /// API server port
    #[arg(long)]
    pub api_port: Option<u16>,

    /// Do not serve the HTTP API when running the daemon
    #[arg(long)]
    pub no_api: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] StateError),
    #[error("identity generation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        if AppState::exists(ctx.repo_path.clone())? {
            return Err(StateError::AlreadyInitialized.into());
        }

        // key generation blocks on system entropy
        let mut config = tokio::task::spawn_blocking(Config::default_config).await?;
        if let Some(peername) = &self.peername {
            config.profile.peername = peername.clone();
        }
        if let Some(port) = self.api_port {
            config.api.port = port;
        }
        config.api.enabled = !self.no_api;

        let state = AppState::init(ctx.repo_path.clone(), config)?;
        let profile = &state.config.profile;

        let api = if state.config.api.enabled {
            format!("port {}", state.config.api.port)
        } else {
            "disabled".to_string()
        };

        let output = format!(
            "Initialized quarry repo at: {}\n\
             - Config: {}\n\
             - Peer id: {}\n\
             - Peername: {}\n\
             - API: {}",
            state.repo_dir.display(),
            state.repo_dir.join("config.json").display(),
            profile.id,
            profile.peername,
            api
        );

        Ok(output)
    }
}
